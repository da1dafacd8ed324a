pub mod catalog;
pub mod plan;

use taska_db::db::memory::MemoryStore;

/// Trait for seeders that populate the store with initial data.
pub trait Seeder {
    /// Seeds the store.
    ///
    /// ## Errors
    /// Returns an error if the seeding operation fails.
    fn seed(&self, store: &MemoryStore) -> anyhow::Result<()>;
}
