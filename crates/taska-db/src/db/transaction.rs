//! Transaction helper utilities for store operations.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use taska_db::db::transaction::with_transaction;
//!
//! with_transaction(store, |tx| {
//!     let root = tx.insert(new_root)?;
//!     tx.insert_batch(children)?;
//!     Ok(root)
//! })?;
//! ```

use crate::db::repository::TaskStore;
use crate::error::DbError;

/// ## Summary
/// Runs a store transaction and returns the closure result.
///
/// ## Errors
/// Returns any error produced by the closure, or errors raised while starting
/// or committing the transaction.
pub fn with_transaction<S, T, E, F>(store: &S, callback: F) -> Result<T, E>
where
    S: TaskStore + ?Sized,
    F: FnOnce(&mut S::Tx) -> Result<T, E>,
    E: From<DbError>,
{
    tracing::trace!("Opening transaction");
    let result = store.transaction(callback);
    if result.is_err() {
        tracing::debug!("Transaction rolled back");
    }
    result
}
