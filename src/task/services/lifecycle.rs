//! Service layer for task creation, editing, status changes, and removal.

use crate::access::Principal;
use crate::task::{
    domain::{RetentionPolicy, Task, TaskDraft, TaskId, TaskStatus, TaskUpdate},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Archived task paired with the days left before the sweep purges it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedTaskView {
    task: Task,
    days_until_deletion: u32,
}

impl ArchivedTaskView {
    /// Returns the archived task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the whole days left before deletion.
    #[must_use]
    pub const fn days_until_deletion(&self) -> u32 {
        self.days_until_deletion
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// The task exists but has not been archived.
    #[error("task {0} is not archived")]
    NotArchived(TaskId),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    policy: RetentionPolicy,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service using the default retention
    /// policy for archive listings.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            policy: RetentionPolicy::default(),
        }
    }

    /// Replaces the retention policy used for days-until-deletion values.
    #[must_use]
    pub const fn with_policy(mut self, policy: RetentionPolicy) -> Self {
        self.policy = policy;
        self
    }

    async fn find_task_or_error(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))
    }

    /// Creates a task authored by the acting principal.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the repository rejects
    /// persistence.
    pub async fn create_task(
        &self,
        principal: &Principal,
        draft: TaskDraft,
    ) -> TaskLifecycleResult<Task> {
        let task = Task::new(draft, principal.user_id(), &*self.clock);
        self.repository.store(&task).await?;
        Ok(task)
    }

    /// Moves a task to `status`, rewriting its terminal timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when no task has the given ID
    /// and [`TaskLifecycleError::Repository`] when the store fails.
    pub async fn change_status(
        &self,
        task_id: TaskId,
        status: TaskStatus,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        task.set_status(status, &*self.clock);
        Ok(self.repository.update(&task).await?)
    }

    /// Applies a partial edit to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when no task has the given ID
    /// and [`TaskLifecycleError::Repository`] when the store fails.
    pub async fn update_task(
        &self,
        task_id: TaskId,
        update: TaskUpdate,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        task.apply_update(update, &*self.clock);
        Ok(self.repository.update(&task).await?)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(task_id).await?)
    }

    /// Lists live (unarchived) tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list_active(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.find(&TaskFilter::active()).await?)
    }

    /// Lists archived tasks, most recently archived first, with the days
    /// left before each is purged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn list_archived(&self) -> TaskLifecycleResult<Vec<ArchivedTaskView>> {
        let now = self.clock.utc();
        let archived = self.repository.find(&TaskFilter::archived()).await?;
        Ok(archived
            .into_iter()
            .map(|task| {
                let days_until_deletion = task
                    .archived_at()
                    .map_or(self.policy.purge_after_days(), |archived_at| {
                        self.policy.days_until_deletion(archived_at, now)
                    });
                ArchivedTaskView {
                    task,
                    days_until_deletion,
                }
            })
            .collect())
    }

    /// Permanently deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when no task has the given ID
    /// and [`TaskLifecycleError::Repository`] when the store fails.
    pub async fn delete_task(&self, task_id: TaskId) -> TaskLifecycleResult<()> {
        if self.repository.delete(task_id).await? {
            Ok(())
        } else {
            Err(TaskLifecycleError::NotFound(task_id))
        }
    }

    /// Permanently deletes an archived task ahead of the purge window.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when no task has the given
    /// ID, [`TaskLifecycleError::NotArchived`] when the task is still live,
    /// and [`TaskLifecycleError::Repository`] when the store fails.
    pub async fn delete_archived(&self, task_id: TaskId) -> TaskLifecycleResult<()> {
        let task = self.find_task_or_error(task_id).await?;
        if !task.is_archived() {
            return Err(TaskLifecycleError::NotArchived(task_id));
        }
        self.delete_task(task_id).await
    }
}
