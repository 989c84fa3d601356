//! In-memory task repository for tests and embedding.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskFilter, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored tasks, archived ones included.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn len(&self) -> TaskRepositoryResult<usize> {
        Ok(self.read()?.len())
    }

    /// Returns whether the repository holds no tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn is_empty(&self) -> TaskRepositoryResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, HashMap<TaskId, Task>>> {
        self.tasks.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, HashMap<TaskId, Task>>> {
        self.tasks.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.write()?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let mut tasks = self.write()?;
        let slot = tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        let mut updated = task.clone();
        updated.keep_archival_of(slot);
        *slot = updated.clone();
        Ok(updated)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn find(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let mut found: Vec<Task> = self
            .read()?
            .values()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        filter.order.sort(&mut found);
        Ok(found)
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        Ok(self.write()?.remove(&id).is_some())
    }

    async fn archive_completed_before(
        &self,
        cutoff: DateTime<Utc>,
        archived_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<usize> {
        let mut tasks = self.write()?;
        let mut archived = 0;
        for task in tasks.values_mut().filter(|task| task.is_done_before(cutoff)) {
            task.archive(archived_at)
                .map_err(TaskRepositoryError::persistence)?;
            archived += 1;
        }
        Ok(archived)
    }

    async fn purge_archived_before(&self, cutoff: DateTime<Utc>) -> TaskRepositoryResult<usize> {
        let mut tasks = self.write()?;
        let before = tasks.len();
        tasks.retain(|_, task| !task.is_archived_before(cutoff));
        Ok(before - tasks.len())
    }
}
