//! Declarative role → capability table and the single authorization gate.

use super::{Principal, Role};
use crate::task::domain::UserId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;

/// Coarse permission granted to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Read tasks and archives.
    View,
    /// Create tasks.
    Create,
    /// Edit tasks and change their status.
    Edit,
    /// Delete tasks, live or archived.
    Delete,
    /// Manage member accounts.
    ManageUsers,
}

/// Task operations exposed to the request layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskOperation {
    /// List live tasks or fetch one.
    ViewTasks,
    /// Create a task.
    CreateTask,
    /// Edit task fields.
    UpdateTask,
    /// Move a task between statuses.
    ChangeStatus,
    /// Delete a live task.
    DeleteTask,
    /// List archived tasks.
    ViewArchive,
    /// Delete an archived task before its purge date.
    DeleteArchivedTask,
}

impl TaskOperation {
    /// Returns the capability the operation requires.
    #[must_use]
    pub const fn required_capability(self) -> Capability {
        match self {
            Self::ViewTasks | Self::ViewArchive => Capability::View,
            Self::CreateTask => Capability::Create,
            Self::UpdateTask | Self::ChangeStatus => Capability::Edit,
            Self::DeleteTask | Self::DeleteArchivedTask => Capability::Delete,
        }
    }
}

impl fmt::Display for TaskOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ViewTasks => "view_tasks",
            Self::CreateTask => "create_task",
            Self::UpdateTask => "update_task",
            Self::ChangeStatus => "change_status",
            Self::DeleteTask => "delete_task",
            Self::ViewArchive => "view_archive",
            Self::DeleteArchivedTask => "delete_archived_task",
        };
        f.write_str(name)
    }
}

/// Returned when a principal's role lacks the capability for an operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{role} {user_id} may not {operation}")]
pub struct AccessDenied {
    /// Acting member.
    pub user_id: UserId,
    /// Role the member holds.
    pub role: Role,
    /// Operation that was refused.
    pub operation: TaskOperation,
}

/// Role → capability table.
///
/// The default table grants super admins everything, admins and leaders
/// view/create/edit, and scouts view only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    grants: HashMap<Role, HashSet<Capability>>,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        let editor = [Capability::View, Capability::Create, Capability::Edit];
        Self::empty()
            .with_grants(
                Role::SuperAdmin,
                [
                    Capability::View,
                    Capability::Create,
                    Capability::Edit,
                    Capability::Delete,
                    Capability::ManageUsers,
                ],
            )
            .with_grants(Role::Admin, editor)
            .with_grants(Role::Leader, editor)
            .with_grants(Role::Scout, [Capability::View])
    }
}

impl AccessPolicy {
    /// Creates a table that grants nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            grants: HashMap::new(),
        }
    }

    /// Replaces the capabilities granted to `role`.
    #[must_use]
    pub fn with_grants(
        mut self,
        role: Role,
        capabilities: impl IntoIterator<Item = Capability>,
    ) -> Self {
        self.grants.insert(role, capabilities.into_iter().collect());
        self
    }

    /// Returns whether `role` holds `capability`.
    #[must_use]
    pub fn allows(&self, role: Role, capability: Capability) -> bool {
        self.grants
            .get(&role)
            .is_some_and(|granted| granted.contains(&capability))
    }

    /// Checks that the principal may perform the operation.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] when the principal's role lacks the required
    /// capability.
    pub fn authorize(
        &self,
        principal: &Principal,
        operation: TaskOperation,
    ) -> Result<(), AccessDenied> {
        if self.allows(principal.role(), operation.required_capability()) {
            return Ok(());
        }
        Err(AccessDenied {
            user_id: principal.user_id(),
            role: principal.role(),
            operation,
        })
    }
}
