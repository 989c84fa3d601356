//! Task aggregate root and the status/timestamp bookkeeping rules.

use super::{TaskCategory, TaskDomainError, TaskId, TaskPriority, TaskStatus, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Content supplied when a member creates a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
    notes: String,
    assigned_to: UserId,
    due_date: NaiveDate,
    status: TaskStatus,
    priority: TaskPriority,
    category: TaskCategory,
}

impl TaskDraft {
    /// Creates a draft with the required fields and default status,
    /// priority, and category.
    #[must_use]
    pub fn new(title: impl Into<String>, assigned_to: UserId, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            notes: String::new(),
            assigned_to,
            due_date,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            category: TaskCategory::default(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets free-form notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the category.
    #[must_use]
    pub const fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = category;
        self
    }
}

/// Partial edit of a task. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement notes.
    pub notes: Option<String>,
    /// New assignee.
    pub assigned_to: Option<UserId>,
    /// New due date.
    pub due_date: Option<NaiveDate>,
    /// New priority.
    pub priority: Option<TaskPriority>,
    /// New category.
    pub category: Option<TaskCategory>,
    /// New status; applies the same timestamp rule as [`Task::set_status`].
    pub status: Option<TaskStatus>,
}

impl TaskUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Reassigns the task.
    #[must_use]
    pub const fn with_assignee(mut self, assigned_to: UserId) -> Self {
        self.assigned_to = Some(assigned_to);
        self
    }

    /// Moves the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the category.
    #[must_use]
    pub const fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Includes a status change.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Task aggregate root.
///
/// `completed_at` is set exactly when the status is [`TaskStatus::Done`] and
/// `cancelled_at` exactly when it is [`TaskStatus::Cancelled`]. Every status
/// change goes through [`Task::set_status`] to keep that true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    notes: String,
    assigned_to: UserId,
    created_by: UserId,
    status: TaskStatus,
    priority: TaskPriority,
    category: TaskCategory,
    due_date: NaiveDate,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
    is_archived: bool,
    archived_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted notes.
    pub notes: String,
    /// Persisted assignee.
    pub assigned_to: UserId,
    /// Persisted author.
    pub created_by: UserId,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted category.
    pub category: TaskCategory,
    /// Persisted due date.
    pub due_date: NaiveDate,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted cancellation timestamp, if any.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Persisted archival flag.
    pub is_archived: bool,
    /// Persisted archival timestamp, if any.
    pub archived_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a task authored by `created_by`.
    ///
    /// A draft created directly in a terminal status gets the matching
    /// terminal timestamp.
    #[must_use]
    pub fn new(draft: TaskDraft, created_by: UserId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let mut task = Self {
            id: TaskId::new(),
            title: draft.title,
            description: draft.description,
            notes: draft.notes,
            assigned_to: draft.assigned_to,
            created_by,
            status: TaskStatus::Ongoing,
            priority: draft.priority,
            category: draft.category,
            due_date: draft.due_date,
            created_at: timestamp,
            completed_at: None,
            cancelled_at: None,
            is_archived: false,
            archived_at: None,
        };
        task.stamp_status(draft.status, timestamp);
        task
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            notes: data.notes,
            assigned_to: data.assigned_to,
            created_by: data.created_by,
            status: data.status,
            priority: data.priority,
            category: data.category,
            due_date: data.due_date,
            created_at: data.created_at,
            completed_at: data.completed_at,
            cancelled_at: data.cancelled_at,
            is_archived: data.is_archived,
            archived_at: data.archived_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the notes.
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assigned_to(&self) -> UserId {
        self.assigned_to
    }

    /// Returns the author.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> TaskCategory {
        self.category
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the task was marked done, if it is done.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns when the task was cancelled, if it is cancelled.
    #[must_use]
    pub const fn cancelled_at(&self) -> Option<DateTime<Utc>> {
        self.cancelled_at
    }

    /// Returns whether the task has been archived.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.is_archived
    }

    /// Returns the archival timestamp, if archived.
    #[must_use]
    pub const fn archived_at(&self) -> Option<DateTime<Utc>> {
        self.archived_at
    }

    /// Sets the status and rewrites the terminal timestamps to match.
    ///
    /// Any transition is allowed, including reopening a finished task.
    /// Archival fields are left alone.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.stamp_status(status, clock.utc());
    }

    /// Applies a partial edit.
    ///
    /// Timestamps only change when the update carries a status.
    pub fn apply_update(&mut self, update: TaskUpdate, clock: &impl Clock) {
        let TaskUpdate {
            title,
            description,
            notes,
            assigned_to,
            due_date,
            priority,
            category,
            status,
        } = update;

        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = notes {
            self.notes = value;
        }
        if let Some(value) = assigned_to {
            self.assigned_to = value;
        }
        if let Some(value) = due_date {
            self.due_date = value;
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        if let Some(value) = category {
            self.category = value;
        }
        if let Some(value) = status {
            self.set_status(value, clock);
        }
    }

    /// Marks the task archived at the given instant.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotTerminal`] when the task is still
    /// ongoing.
    pub fn archive(&mut self, archived_at: DateTime<Utc>) -> Result<(), TaskDomainError> {
        if !self.status.is_terminal() {
            return Err(TaskDomainError::NotTerminal {
                task_id: self.id,
                status: self.status,
            });
        }
        self.is_archived = true;
        self.archived_at = Some(archived_at);
        Ok(())
    }

    /// Copies the archival flag and timestamp from `stored`.
    ///
    /// Storage adapters call this when writing an edit so that archival
    /// state stays whatever the store already holds.
    pub const fn keep_archival_of(&mut self, stored: &Self) {
        self.is_archived = stored.is_archived;
        self.archived_at = stored.archived_at;
    }

    /// Returns whether the task is done, not archived, and was completed
    /// strictly before `cutoff`.
    #[must_use]
    pub fn is_done_before(&self, cutoff: DateTime<Utc>) -> bool {
        self.status == TaskStatus::Done
            && !self.is_archived
            && self.completed_at.is_some_and(|at| at < cutoff)
    }

    /// Returns whether the task is archived and was archived strictly before
    /// `cutoff`.
    #[must_use]
    pub fn is_archived_before(&self, cutoff: DateTime<Utc>) -> bool {
        self.is_archived && self.archived_at.is_some_and(|at| at < cutoff)
    }

    const fn stamp_status(&mut self, status: TaskStatus, timestamp: DateTime<Utc>) {
        let (completed_at, cancelled_at) = match status {
            TaskStatus::Ongoing => (None, None),
            TaskStatus::Done => (Some(timestamp), None),
            TaskStatus::Cancelled => (None, Some(timestamp)),
        };
        self.status = status;
        self.completed_at = completed_at;
        self.cancelled_at = cancelled_at;
    }
}
