//! Taska task scheduler - integration test support.
//!
//! This crate re-exports the workspace crates so that integration tests can
//! use a single `taska_test::component::` path.

pub mod component {
    pub use taska_core::{clock, validation};
    pub use taska_service::{auth, error, recurrence, task};

    pub mod db {
        pub use taska_db::db::*;
        pub use taska_db::error::{DbError, DbResult};
    }

    pub mod model {
        pub use taska_db::model::*;
    }

    pub mod seeder {
        pub use taska_app::seeder::*;
    }
}
