//! Scoutboard: task tracking for scout troops.
//!
//! Members create, assign, and track tasks through a three-state lifecycle
//! (ongoing, done, cancelled). Finished tasks are archived automatically and
//! archives are purged after a retention window.
//!
//! # Architecture
//!
//! Scoutboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`access`]: Acting principals and the role capability table
//! - [`task`]: Task lifecycle, status bookkeeping, and the retention sweep

pub mod access;
pub mod task;
