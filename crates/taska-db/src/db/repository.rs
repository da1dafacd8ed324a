//! ## Summary
//! Persistence collaborator consumed by the task service.
//!
//! A [`TaskStore`] hands out a [`TaskRepository`] scoped to one transaction.
//! Work done through that repository becomes visible only if the closure
//! passed to [`TaskStore::transaction`] returns `Ok`.

use chrono::NaiveDate;

use crate::db::query::TaskQuery;
use crate::error::{DbError, DbResult};
use crate::model::catalog::{Role, Shift};
use crate::model::task::{NewTask, Task};

/// Task record access within a single transaction.
///
/// Listing methods return rows ordered by `(date, id)` unless stated otherwise.
pub trait TaskRepository {
    /// ## Errors
    /// Returns an error if the storage layer fails.
    fn find_by_id(&self, id: uuid::Uuid) -> DbResult<Option<Task>>;

    /// Children pointing at `parent_id`, in stored order.
    ///
    /// ## Errors
    /// Returns an error if the storage layer fails.
    fn find_by_parent_id(&self, parent_id: uuid::Uuid) -> DbResult<Vec<Task>>;

    /// The root row `root_id` together with every row pointing at it.
    ///
    /// ## Errors
    /// Returns an error if the storage layer fails.
    fn find_series(&self, root_id: uuid::Uuid) -> DbResult<Vec<Task>>;

    /// Rows dated within `start..=end`.
    ///
    /// ## Errors
    /// Returns an error if the storage layer fails.
    fn find_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> DbResult<Vec<Task>>;

    /// ## Errors
    /// Returns an error if the storage layer fails.
    fn find_matching(&self, query: &TaskQuery) -> DbResult<Vec<Task>>;

    /// ## Errors
    /// Returns an error if the storage layer fails.
    fn find_all(&self) -> DbResult<Vec<Task>>;

    /// ## Errors
    /// Returns an error if the storage layer fails.
    fn exists_by_id(&self, id: uuid::Uuid) -> DbResult<bool>;

    /// Persists a new row and returns it with its assigned id.
    ///
    /// ## Errors
    /// Returns an error if the storage layer fails.
    fn insert(&mut self, task: NewTask) -> DbResult<Task>;

    /// ## Errors
    /// Returns an error if the storage layer fails.
    fn insert_batch(&mut self, tasks: Vec<NewTask>) -> DbResult<Vec<Task>>;

    /// Overwrites an existing row.
    ///
    /// ## Errors
    /// Returns [`DbError::MissingRecord`] if the row does not exist, or any
    /// storage failure.
    fn save(&mut self, task: &Task) -> DbResult<Task>;

    /// ## Errors
    /// Returns [`DbError::MissingRecord`] if any row does not exist, or any
    /// storage failure.
    fn save_batch(&mut self, tasks: &[Task]) -> DbResult<Vec<Task>>;

    /// ## Errors
    /// Returns [`DbError::MissingRecord`] if the row does not exist, or any
    /// storage failure.
    fn delete(&mut self, id: uuid::Uuid) -> DbResult<()>;

    /// ## Errors
    /// Returns [`DbError::MissingRecord`] if any row does not exist, or any
    /// storage failure.
    fn delete_batch(&mut self, ids: &[uuid::Uuid]) -> DbResult<()>;

    /// ## Errors
    /// Returns an error if the storage layer fails.
    fn find_role(&self, id: uuid::Uuid) -> DbResult<Option<Role>>;

    /// ## Errors
    /// Returns an error if the storage layer fails.
    fn find_shift(&self, id: uuid::Uuid) -> DbResult<Option<Shift>>;

    /// Every role, ordered by name.
    ///
    /// ## Errors
    /// Returns an error if the storage layer fails.
    fn find_roles(&self) -> DbResult<Vec<Role>>;

    /// Every shift, ordered by name.
    ///
    /// ## Errors
    /// Returns an error if the storage layer fails.
    fn find_shifts(&self) -> DbResult<Vec<Shift>>;
}

/// Source of transactional [`TaskRepository`] handles.
pub trait TaskStore: Send + Sync {
    type Tx: TaskRepository;

    /// ## Summary
    /// Runs `callback` in a transaction, committing on `Ok` and rolling back on `Err`.
    ///
    /// ## Errors
    /// Returns the callback's error, or a storage error raised while opening
    /// or committing the transaction.
    fn transaction<T, E, F>(&self, callback: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self::Tx) -> Result<T, E>,
        E: From<DbError>;
}
