use super::enums::{FocusState, TaskStatus};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default color for main tasks created without an explicit one
pub const DEFAULT_COLOR: &str = "#3B82F6";

/// An optional grouping for main tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub color: String,
}

impl Project {
    pub fn new(title: String, color: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            color,
        }
    }
}

/// A top-level unit of work with a start time and aggregate duration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainTask {
    /// Unique ID
    pub id: Uuid,
    /// Task title
    pub title: String,
    /// Optional longer description
    pub description: Option<String>,
    /// When the task is scheduled to start
    pub start_time: DateTime<Local>,
    /// Sum of all sub-task estimates, in minutes. Maintained by the
    /// repository whenever a sub-task is added.
    pub total_duration: i64,
    /// Display color for the timeline header
    pub color: String,
    /// Current status
    pub status: TaskStatus,
    /// Optional owning project
    pub project_id: Option<Uuid>,
    /// Opaque owner identifier
    pub user_id: String,
}

impl MainTask {
    pub fn new(
        title: String,
        description: Option<String>,
        start_time: DateTime<Local>,
        project_id: Option<Uuid>,
        user_id: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            start_time,
            total_duration: 0,
            color: DEFAULT_COLOR.to_string(),
            status: TaskStatus::Pending,
            project_id,
            user_id,
        }
    }
}

/// A time-boxed unit of work belonging to exactly one main task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubTask {
    /// Unique ID
    pub id: Uuid,
    /// Sub-task title
    pub title: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Estimated time in minutes, always > 0
    pub estimated_time: i64,
    /// Actual time spent in minutes, once known
    pub actual_time: Option<i64>,
    /// Real-valued rank for timeline position within the main task.
    /// Only the relative sort matters; cuts insert fractional ranks.
    pub order: f64,
    /// Current status
    pub status: TaskStatus,
    /// Whether the sub-task has been pulled into the daily focus list
    pub is_in_today: bool,
    /// Integer rank within the focus list, present iff `is_in_today`
    pub today_order: Option<i64>,
    /// Owning main task
    pub main_task_id: Uuid,
    /// The sub-task this one was cut from, if any
    pub parent_id: Option<Uuid>,
}

impl SubTask {
    pub fn new(
        title: String,
        description: Option<String>,
        estimated_time: i64,
        main_task_id: Uuid,
        order: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            estimated_time,
            actual_time: None,
            order,
            status: TaskStatus::Pending,
            is_in_today: false,
            today_order: None,
            main_task_id,
            parent_id: None,
        }
    }

    /// Project the today fields into a focus state
    pub fn focus_state(&self) -> FocusState {
        if self.is_in_today {
            FocusState::Focused
        } else {
            FocusState::Scheduled
        }
    }
}
