use taska_db::db::memory::MemoryStore;

use super::Seeder;

/// Seeds the role and shift catalogs by name.
pub struct CatalogSeeder {
    pub roles: Vec<String>,
    pub shifts: Vec<String>,
}

impl CatalogSeeder {
    #[must_use]
    pub const fn new(roles: Vec<String>, shifts: Vec<String>) -> Self {
        Self { roles, shifts }
    }
}

impl Seeder for CatalogSeeder {
    fn seed(&self, store: &MemoryStore) -> anyhow::Result<()> {
        for name in &self.roles {
            if store.role_by_name(name).is_some() {
                tracing::debug!(%name, "Role already seeded, skipping");
                continue;
            }
            let role = store.add_role(name.as_str());
            tracing::debug!(role_id = %role.id, %name, "Seeded role");
        }

        for name in &self.shifts {
            if store.shift_by_name(name).is_some() {
                tracing::debug!(%name, "Shift already seeded, skipping");
                continue;
            }
            let shift = store.add_shift(name.as_str());
            tracing::debug!(shift_id = %shift.id, %name, "Seeded shift");
        }

        Ok(())
    }
}
