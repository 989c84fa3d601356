//! Acting principals and the role capability table.
//!
//! Callers pass a [`Principal`] into operations explicitly. The request
//! layer consults [`AccessPolicy::authorize`] once per operation instead of
//! repeating role checks in every handler.

mod policy;
mod principal;

pub use policy::{AccessDenied, AccessPolicy, Capability, TaskOperation};
pub use principal::{ParseRoleError, Principal, Role};
