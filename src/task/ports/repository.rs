//! Repository port for task persistence, lookup, and retention bulk
//! operations.

use crate::task::domain::{Task, TaskId, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Sort order for task listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskOrder {
    /// Most recently created first.
    #[default]
    NewestCreated,
    /// Most recently archived first; unarchived tasks sort last.
    NewestArchived,
}

impl TaskOrder {
    /// Sorts tasks in place according to this order.
    pub fn sort(self, tasks: &mut [Task]) {
        match self {
            Self::NewestCreated => tasks.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
            Self::NewestArchived => tasks.sort_by(|a, b| b.archived_at().cmp(&a.archived_at())),
        }
    }
}

/// Predicate and ordering for [`TaskRepository::find`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Restrict to archived (`Some(true)`) or live (`Some(false)`) tasks.
    pub archived: Option<bool>,
    /// Restrict to one status.
    pub status: Option<TaskStatus>,
    /// Result ordering.
    pub order: TaskOrder,
}

impl TaskFilter {
    /// Live tasks, newest first.
    #[must_use]
    pub const fn active() -> Self {
        Self {
            archived: Some(false),
            status: None,
            order: TaskOrder::NewestCreated,
        }
    }

    /// Archived tasks, most recently archived first.
    #[must_use]
    pub const fn archived() -> Self {
        Self {
            archived: Some(true),
            status: None,
            order: TaskOrder::NewestArchived,
        }
    }

    /// Narrows the filter to a single status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns whether a task satisfies the predicate part of the filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.archived.is_none_or(|flag| task.is_archived() == flag)
            && self.status.is_none_or(|status| task.status() == status)
    }
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Writes the editable fields, status, and terminal timestamps of an
    /// existing task as a single-row write.
    ///
    /// `is_archived` and `archived_at` are never written here, so an edit
    /// based on a copy read before a sweep keeps the sweep's archival.
    /// Returns the task as stored after the write.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns all tasks matching the filter in the filter's order.
    async fn find(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>>;

    /// Permanently deletes a task.
    ///
    /// Returns `false` when no task had the identifier.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Archives every unarchived `done` task completed strictly before
    /// `cutoff`, stamping `archived_at`.
    ///
    /// Returns the number of archived tasks.
    async fn archive_completed_before(
        &self,
        cutoff: DateTime<Utc>,
        archived_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<usize>;

    /// Deletes every archived task archived strictly before `cutoff`.
    ///
    /// Returns the number of deleted tasks.
    async fn purge_archived_before(&self, cutoff: DateTime<Utc>) -> TaskRepositoryResult<usize>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The store could not be reached or rejected the operation.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
