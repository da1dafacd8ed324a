use thiserror::Error;

/// Database layer errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Record does not exist: {0}")]
    MissingRecord(uuid::Uuid),

    #[error("Storage conflict: {0}")]
    Conflict(String),
}

pub type DbResult<T> = std::result::Result<T, DbError>;
