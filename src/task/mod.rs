//! Task lifecycle and retention.
//!
//! Status changes keep the `completed_at`/`cancelled_at` timestamps in step
//! with the task status. A recurring sweep archives tasks that have been done
//! for longer than the archive window and deletes archives older than the
//! purge window. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
