// src/utils/password.rs

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

/// パスワード関連のエラー
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingError(argon2::password_hash::Error),

    #[error("Weak password: {0}")]
    WeakPassword(String),
}

/// パスワード長の要件
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    /// 最小文字数
    pub min_length: usize,
    /// 最大文字数
    pub max_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 6,
            max_length: 128,
        }
    }
}

/// パスワードハッシュマネージャー
pub struct PasswordManager {
    argon2: Argon2<'static>,
    policy: PasswordPolicy,
}

impl PasswordManager {
    /// デフォルト設定でPasswordManagerを作成
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
            policy: PasswordPolicy::default(),
        }
    }

    /// パスワードをハッシュ化
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.validate_password(password)?;

        // ソルト生成
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(PasswordError::HashingError)?;

        Ok(password_hash.to_string())
    }

    /// パスワードを検証
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(PasswordError::HashingError)?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::HashingError(e)),
        }
    }

    /// パスワード長のチェック
    fn validate_password(&self, password: &str) -> Result<(), PasswordError> {
        if password.len() < self.policy.min_length {
            return Err(PasswordError::WeakPassword(format!(
                "Password must be at least {} characters",
                self.policy.min_length
            )));
        }

        if password.len() > self.policy.max_length {
            return Err(PasswordError::WeakPassword(format!(
                "Password must be at most {} characters",
                self.policy.max_length
            )));
        }

        Ok(())
    }
}

impl Default for PasswordManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let manager = PasswordManager::new();

        let hash = manager.hash_password("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2"));

        assert!(manager
            .verify_password("correct horse battery", &hash)
            .unwrap());
        assert!(!manager.verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let manager = PasswordManager::new();

        let first = manager.hash_password("admin123").unwrap();
        let second = manager.hash_password("admin123").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_too_short_password_rejected() {
        let manager = PasswordManager::new();

        let result = manager.hash_password("abc");
        assert!(matches!(result, Err(PasswordError::WeakPassword(_))));
    }

    #[test]
    fn test_invalid_hash_format() {
        let manager = PasswordManager::new();

        assert!(manager.verify_password("whatever", "not-a-hash").is_err());
    }
}
