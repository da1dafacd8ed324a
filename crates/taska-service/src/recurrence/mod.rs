//! ## Summary
//! Turning a raw task declaration into a dated series.
//!
//! [`validator::validate`] normalizes a [`CreateTaskRequest`] into a
//! [`ValidatedRecurrence`]; [`generator`] expands that into one root
//! occurrence plus its children.

pub mod declaration;
pub mod generator;
pub mod validator;

pub use declaration::{CreateTaskRequest, Schedule, ValidatedRecurrence};
