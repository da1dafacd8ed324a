//! Series-aware task operations.

pub mod filter;
pub mod series;
pub mod service;

pub use filter::TaskFilter;
pub use service::TaskService;
