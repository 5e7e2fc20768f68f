// src/domain/task_priority.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// タスクの優先度を表すenum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<TaskPriority> for String {
    fn from(priority: TaskPriority) -> Self {
        priority.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion() {
        assert_eq!(TaskPriority::from_str("low"), Some(TaskPriority::Low));
        assert_eq!(TaskPriority::from_str("MEDIUM"), Some(TaskPriority::Medium));
        assert_eq!(TaskPriority::from_str("high"), Some(TaskPriority::High));
        assert_eq!(TaskPriority::from_str("urgent"), None);

        assert_eq!(TaskPriority::High.as_str(), "high");
    }

    #[test]
    fn test_default() {
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    }
}
