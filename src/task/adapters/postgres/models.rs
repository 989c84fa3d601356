//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Notes.
    pub notes: String,
    /// Assigned member.
    pub assigned_to: uuid::Uuid,
    /// Authoring member.
    pub created_by: uuid::Uuid,
    /// Lifecycle status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Category.
    pub category: String,
    /// Due date.
    pub due_date: NaiveDate,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Cancellation timestamp.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Archival flag.
    pub is_archived: bool,
    /// Archival timestamp.
    pub archived_at: Option<DateTime<Utc>>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Notes.
    pub notes: String,
    /// Assigned member.
    pub assigned_to: uuid::Uuid,
    /// Authoring member.
    pub created_by: uuid::Uuid,
    /// Lifecycle status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Category.
    pub category: String,
    /// Due date.
    pub due_date: NaiveDate,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Cancellation timestamp.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Archival flag.
    pub is_archived: bool,
    /// Archival timestamp.
    pub archived_at: Option<DateTime<Utc>>,
}

/// Changeset for single-row task updates.
///
/// Nullable columns are written as-is so clearing a timestamp reaches the
/// database. Archival columns are absent: only the retention sweep writes
/// them.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Notes.
    pub notes: String,
    /// Assigned member.
    pub assigned_to: uuid::Uuid,
    /// Lifecycle status.
    pub status: String,
    /// Priority.
    pub priority: String,
    /// Category.
    pub category: String,
    /// Due date.
    pub due_date: NaiveDate,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Cancellation timestamp.
    pub cancelled_at: Option<DateTime<Utc>>,
}
