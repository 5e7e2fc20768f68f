// src/api/dto/report_dto.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TaskStatsQuery {
    pub project_id: Option<Uuid>,
}

/// ステータス別タスク数の集計結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatsDto {
    pub total: u64,
    pub completed: u64,
    pub in_progress: u64,
    #[serde(rename = "new")]
    pub new_tasks: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_serializes_new_field() {
        let stats = TaskStatsDto {
            total: 3,
            completed: 1,
            in_progress: 1,
            new_tasks: 1,
        };

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["new"], 1);
        assert_eq!(json["total"], 3);
        assert!(json.get("new_tasks").is_none());
    }
}
