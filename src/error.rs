use thiserror::Error;
use uuid::Uuid;

/// Failure taxonomy for repository, splitter and today-list operations.
///
/// Every operation boundary converts into one of these; persistence internals
/// use `anyhow` and surface here as `Storage`.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Missing or malformed required input (e.g. an empty user id).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Cut offset outside the open interval (0, estimated_time).
    #[error("invalid cut time: {cut_time} (must be between 0 and {estimated_time}, exclusive)")]
    InvalidCutTime { cut_time: i64, estimated_time: i64 },

    /// Referenced entity does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Underlying store operation failed.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl TaskError {
    pub fn not_found(kind: &'static str, id: Uuid) -> Self {
        TaskError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
