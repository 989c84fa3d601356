//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned by task aggregate operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// Only tasks in a terminal status can be archived.
    #[error("task {task_id} cannot be archived while {status}")]
    NotTerminal {
        /// Task that was asked to archive.
        task_id: TaskId,
        /// Status the task held at the time.
        status: TaskStatus,
    },
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing task categories from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task category: {0}")]
pub struct ParseTaskCategoryError(pub String);
