//! Shared building blocks for the Taska workspace: configuration, the core
//! error type, field-level validation errors and the clock abstraction.

pub mod clock;
pub mod config;
pub mod error;
pub mod validation;
