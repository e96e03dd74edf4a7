use serde::{Deserialize, Serialize};

/// Status of a main task or sub-task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    /// Parse status from an uppercase tag like "IN_PROGRESS"
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "IN_PROGRESS" => Some(Self::InProgress),
            "COMPLETED" => Some(Self::Completed),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Convert status to its uppercase tag
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Check if the item still counts toward open work
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

/// Where a sub-task currently lives, projected from its today fields.
/// Never stored; derived from `is_in_today`/`today_order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    /// On the project timeline
    Scheduled,
    /// In the daily focus list
    Focused,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_from_tag() {
        assert_eq!(TaskStatus::from_tag("PENDING"), Some(TaskStatus::Pending));
        assert_eq!(TaskStatus::from_tag("IN_PROGRESS"), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::from_tag("completed"), Some(TaskStatus::Completed));
        assert_eq!(TaskStatus::from_tag("CANCELLED"), Some(TaskStatus::Cancelled));
        assert_eq!(TaskStatus::from_tag("INVALID"), None);
    }

    #[test]
    fn test_task_status_to_tag() {
        assert_eq!(TaskStatus::Pending.to_tag(), "PENDING");
        assert_eq!(TaskStatus::InProgress.to_tag(), "IN_PROGRESS");
        assert_eq!(TaskStatus::Completed.to_tag(), "COMPLETED");
        assert_eq!(TaskStatus::Cancelled.to_tag(), "CANCELLED");
    }

    #[test]
    fn test_task_status_is_open() {
        assert!(TaskStatus::Pending.is_open());
        assert!(TaskStatus::InProgress.is_open());
        assert!(!TaskStatus::Completed.is_open());
        assert!(!TaskStatus::Cancelled.is_open());
    }

    #[test]
    fn test_task_status_serde_tags() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        let back: TaskStatus = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(back, TaskStatus::Pending);
    }
}
