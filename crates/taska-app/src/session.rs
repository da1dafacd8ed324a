//! Config-backed identity for the binary, which has no real users.

use taska_core::error::CoreError;
use taska_db::db::memory::MemoryStore;
use taska_service::auth::RoleResolver;
use taska_service::error::{ServiceError, ServiceResult};

/// Acts as a fixed role, looked up by name in the store.
pub struct ConfiguredUser<'a> {
    store: &'a MemoryStore,
    role: String,
    privileged_role: String,
}

impl<'a> ConfiguredUser<'a> {
    #[must_use]
    pub fn new(store: &'a MemoryStore, role: String, privileged_role: String) -> Self {
        Self {
            store,
            role,
            privileged_role,
        }
    }
}

impl RoleResolver for ConfiguredUser<'_> {
    fn resolve_role_id_for_current_user(&self) -> ServiceResult<uuid::Uuid> {
        self.store
            .role_by_name(&self.role)
            .map(|role| role.id)
            .ok_or_else(|| ServiceError::CoreError(CoreError::NotFound(format!("role {}", self.role))))
    }

    fn is_current_user_privileged(&self) -> ServiceResult<bool> {
        Ok(self.role == self.privileged_role)
    }
}
