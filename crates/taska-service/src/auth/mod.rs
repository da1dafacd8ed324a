//! Caller identity as seen by the task service.

pub mod caller;

pub use caller::{Caller, RoleResolver};
