// src/service/storage_service.rs

use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// ファイル保存を抽象化するトレイト
///
/// 添付ファイルの永続化先はこのトレイトの実装に閉じ込める。
#[async_trait]
pub trait StorageService: Send + Sync {
    /// ファイルを保存し、配信用のURLパスを返す
    async fn store(&self, filename: &str, data: Vec<u8>) -> AppResult<String>;

    /// 保存済みファイルを削除
    async fn delete(&self, file_url: &str) -> AppResult<()>;
}

/// 設定されたディレクトリ配下にファイルを書き込むローカルストレージ
pub struct LocalStorageService {
    base_dir: PathBuf,
    /// 配信時のURLプレフィックス（ServeDir のマウント先）
    url_prefix: String,
}

impl LocalStorageService {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            url_prefix: "/uploads".to_string(),
        }
    }

    /// 元のファイル名から安全な保存名を作る
    ///
    /// パス区切りを落とし、衝突しないように UUID プレフィックスを付ける。
    fn stored_name(filename: &str) -> String {
        let safe_name: String = Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        format!("{}_{}", Uuid::new_v4(), safe_name)
    }

    /// file_url から保存先パスを復元（プレフィックス外へのパスは拒否）
    fn path_for_url(&self, file_url: &str) -> AppResult<PathBuf> {
        let name = file_url
            .strip_prefix(&format!("{}/", self.url_prefix))
            .ok_or_else(|| AppError::NotFound("Stored file not found".to_string()))?;

        if name.contains('/') || name.contains("..") {
            return Err(AppError::NotFound("Stored file not found".to_string()));
        }

        Ok(self.base_dir.join(name))
    }
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn store(&self, filename: &str, data: Vec<u8>) -> AppResult<String> {
        tokio::fs::create_dir_all(&self.base_dir).await.map_err(|e| {
            AppError::InternalServerError(format!("Failed to create upload directory: {}", e))
        })?;

        let stored_name = Self::stored_name(filename);
        let path = self.base_dir.join(&stored_name);

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::InternalServerError(format!("Failed to store file: {}", e)))?;

        info!(filename = %filename, path = %path.display(), "File stored");

        Ok(format!("{}/{}", self.url_prefix, stored_name))
    }

    async fn delete(&self, file_url: &str) -> AppResult<()> {
        let path = self.path_for_url(file_url)?;

        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| AppError::InternalServerError(format!("Failed to delete file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_name_is_sanitized_and_unique() {
        let first = LocalStorageService::stored_name("../../etc/passwd");
        assert!(!first.contains(".."));
        assert!(!first.contains('/'));
        assert!(first.ends_with("passwd"));

        let second = LocalStorageService::stored_name("report.pdf");
        assert!(second.ends_with("report.pdf"));
        assert_ne!(
            LocalStorageService::stored_name("report.pdf"),
            LocalStorageService::stored_name("report.pdf")
        );
    }

    #[test]
    fn test_path_for_url_rejects_traversal() {
        let storage = LocalStorageService::new("/tmp/uploads");

        assert!(storage.path_for_url("/uploads/../secret").is_err());
        assert!(storage.path_for_url("/elsewhere/file").is_err());
        assert!(storage.path_for_url("/uploads/ok.txt").is_ok());
    }

    #[tokio::test]
    async fn test_store_and_delete_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorageService::new(dir.path());

        let url = storage
            .store("notes.txt", b"hello".to_vec())
            .await
            .unwrap();
        assert!(url.starts_with("/uploads/"));

        let path = storage.path_for_url(&url).unwrap();
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"hello");

        storage.delete(&url).await.unwrap();
        assert!(!path.exists());
    }
}
