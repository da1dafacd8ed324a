//! Recurring task engine: declaration validation, series generation and
//! series-aware task operations.

pub mod auth;
pub mod error;
pub mod recurrence;
pub mod task;
