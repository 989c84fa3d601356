//! Retention windows for archiving finished tasks and purging archives.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Days a task stays `done` before the sweep archives it.
pub const ARCHIVE_AFTER_DAYS: u32 = 30;

/// Days an archived task is kept before the sweep deletes it.
pub const PURGE_AFTER_DAYS: u32 = 90;

/// Archive and purge windows, both counted in whole days.
///
/// The archive window is measured from `completed_at` and the purge window
/// from `archived_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionPolicy {
    archive_after_days: u32,
    purge_after_days: u32,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self::new(ARCHIVE_AFTER_DAYS, PURGE_AFTER_DAYS)
    }
}

impl RetentionPolicy {
    /// Creates a policy with explicit windows.
    #[must_use]
    pub const fn new(archive_after_days: u32, purge_after_days: u32) -> Self {
        Self {
            archive_after_days,
            purge_after_days,
        }
    }

    /// Returns the archive window in days.
    #[must_use]
    pub const fn archive_after_days(&self) -> u32 {
        self.archive_after_days
    }

    /// Returns the purge window in days.
    #[must_use]
    pub const fn purge_after_days(&self) -> u32 {
        self.purge_after_days
    }

    /// Done tasks completed strictly before this instant are due for
    /// archival.
    #[must_use]
    pub fn archive_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        days_before(now, self.archive_after_days)
    }

    /// Archived tasks archived strictly before this instant are due for
    /// deletion.
    #[must_use]
    pub fn purge_cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        days_before(now, self.purge_after_days)
    }

    /// Whole days left before an archived task is purged, never negative.
    ///
    /// Partial days elapsed since archival are not counted, so a task
    /// archived 80.5 days ago still has 10 days left under the default
    /// policy.
    #[must_use]
    pub fn days_until_deletion(&self, archived_at: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
        let elapsed = now.signed_duration_since(archived_at).num_days();
        let remaining = i64::from(self.purge_after_days).saturating_sub(elapsed);
        u32::try_from(remaining.max(0)).unwrap_or(u32::MAX)
    }
}

fn days_before(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    TimeDelta::try_days(i64::from(days))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
