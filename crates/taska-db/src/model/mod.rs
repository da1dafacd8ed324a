pub mod catalog;
pub mod series;
pub mod task;
