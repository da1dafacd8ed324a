//! ## Summary
//! The acting user's role and privilege, passed explicitly into operations
//! that scope their results by role.
//!
//! Authentication lives outside this crate. Whatever layer authenticates the
//! request implements [`RoleResolver`] and turns it into a [`Caller`].

use crate::error::ServiceResult;

/// Source of the current user's role information.
pub trait RoleResolver {
    /// ## Errors
    /// Returns an error if the current user cannot be resolved.
    fn resolve_role_id_for_current_user(&self) -> ServiceResult<uuid::Uuid>;

    /// ## Errors
    /// Returns an error if the current user cannot be resolved.
    fn is_current_user_privileged(&self) -> ServiceResult<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    /// Role the caller is assigned to.
    pub role_id: uuid::Uuid,
    /// Privileged callers may look at any role's tasks.
    pub privileged: bool,
}

impl Caller {
    #[must_use]
    pub const fn new(role_id: uuid::Uuid, privileged: bool) -> Self {
        Self {
            role_id,
            privileged,
        }
    }

    /// ## Summary
    /// Builds a caller from a [`RoleResolver`].
    ///
    /// ## Errors
    /// Propagates resolver failures.
    pub fn resolve(resolver: &dyn RoleResolver) -> ServiceResult<Self> {
        Ok(Self {
            role_id: resolver.resolve_role_id_for_current_user()?,
            privileged: resolver.is_current_user_privileged()?,
        })
    }

    /// Role filter to apply for this caller.
    ///
    /// Privileged callers keep whatever they asked for (including no filter);
    /// everyone else is pinned to their own role.
    #[must_use]
    pub fn scoped_role_id(&self, requested: Option<uuid::Uuid>) -> Option<uuid::Uuid> {
        if self.privileged {
            requested
        } else {
            Some(self.role_id)
        }
    }
}
