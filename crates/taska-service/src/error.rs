use taska_core::validation::FieldErrors;
use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    ValidationError(FieldErrors),

    #[error("{entity} not found: {id}")]
    NotFound {
        entity: &'static str,
        id: uuid::Uuid,
    },

    #[error(transparent)]
    DatabaseError(#[from] taska_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] taska_core::error::CoreError),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),
}

impl ServiceError {
    #[must_use]
    pub const fn task_not_found(id: uuid::Uuid) -> Self {
        Self::NotFound { entity: "task", id }
    }

    /// Field errors carried by a validation failure.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::ValidationError(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FieldErrors> for ServiceError {
    fn from(errors: FieldErrors) -> Self {
        Self::ValidationError(errors)
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
