//! Task records and the persistence collaborator the recurrence engine talks to.
//!
//! The engine only depends on the [`db::repository::TaskRepository`] and
//! [`db::repository::TaskStore`] traits. [`db::memory::MemoryStore`] is the
//! in-process implementation used by the binary and the test suites.

pub mod db;
pub mod error;
pub mod model;
