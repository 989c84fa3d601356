//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        PersistedTaskData, Task, TaskCategory, TaskId, TaskPriority, TaskStatus, UserId,
    },
    ports::{TaskFilter, TaskOrder, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let task_id = task.id();
        let changeset = to_changeset(task);

        self.run_blocking(move |connection| {
            let row = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set(&changeset)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?
                .ok_or(TaskRepositoryError::NotFound(task_id))?;
            row_to_task(row)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let lookup = *filter;
        self.run_blocking(move |connection| {
            let mut query = tasks::table.select(TaskRow::as_select()).into_boxed();
            if let Some(archived) = lookup.archived {
                query = query.filter(tasks::is_archived.eq(archived));
            }
            if let Some(status) = lookup.status {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            query = match lookup.order {
                TaskOrder::NewestCreated => query.order(tasks::created_at.desc()),
                TaskOrder::NewestArchived => query.order(tasks::archived_at.desc().nulls_last()),
            };

            let rows = query
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn archive_completed_before(
        &self,
        cutoff: DateTime<Utc>,
        archived_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            diesel::update(
                tasks::table
                    .filter(tasks::status.eq(TaskStatus::Done.as_str()))
                    .filter(tasks::is_archived.eq(false))
                    .filter(tasks::completed_at.lt(cutoff)),
            )
            .set((
                tasks::is_archived.eq(true),
                tasks::archived_at.eq(Some(archived_at)),
            ))
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn purge_archived_before(&self, cutoff: DateTime<Utc>) -> TaskRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            diesel::delete(
                tasks::table
                    .filter(tasks::is_archived.eq(true))
                    .filter(tasks::archived_at.lt(cutoff)),
            )
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        notes: task.notes().to_owned(),
        assigned_to: task.assigned_to().into_inner(),
        created_by: task.created_by().into_inner(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        category: task.category().as_str().to_owned(),
        due_date: task.due_date(),
        created_at: task.created_at(),
        completed_at: task.completed_at(),
        cancelled_at: task.cancelled_at(),
        is_archived: task.is_archived(),
        archived_at: task.archived_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        notes: task.notes().to_owned(),
        assigned_to: task.assigned_to().into_inner(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        category: task.category().as_str().to_owned(),
        due_date: task.due_date(),
        completed_at: task.completed_at(),
        cancelled_at: task.cancelled_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let status = TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let priority =
        TaskPriority::try_from(row.priority.as_str()).map_err(TaskRepositoryError::persistence)?;
    let category =
        TaskCategory::try_from(row.category.as_str()).map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        title: row.title,
        description: row.description,
        notes: row.notes,
        assigned_to: UserId::from_uuid(row.assigned_to),
        created_by: UserId::from_uuid(row.created_by),
        status,
        priority,
        category,
        due_date: row.due_date,
        created_at: row.created_at,
        completed_at: row.completed_at,
        cancelled_at: row.cancelled_at,
        is_archived: row.is_archived,
        archived_at: row.archived_at,
    };
    Ok(Task::from_persisted(data))
}
