// src/api/dto/common.rs
use serde::Deserialize;

/// skip/limit 形式のページネーションクエリ
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaginationQuery {
    #[serde(default)]
    pub skip: u64,
    pub limit: Option<u64>,
}

impl PaginationQuery {
    pub const DEFAULT_LIMIT: u64 = 100;

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}

/// 部分一致検索クエリ
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let query: PaginationQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.skip, 0);
        assert_eq!(query.limit(), PaginationQuery::DEFAULT_LIMIT);
    }

    #[test]
    fn test_pagination_explicit() {
        let query: PaginationQuery = serde_json::from_str(r#"{"skip": 20, "limit": 10}"#).unwrap();
        assert_eq!(query.skip, 20);
        assert_eq!(query.limit(), 10);
    }
}
