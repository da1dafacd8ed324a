//! ## Summary
//! Derived view over one task series.
//!
//! Series membership lives only in `Task::parent_id`; a [`Series`] is
//! materialised from storage rows on demand and never persisted.

use chrono::NaiveDate;

use crate::model::task::Task;

/// A root and its children, children ordered by `(date, id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    root: Task,
    children: Vec<Task>,
}

impl Series {
    /// ## Summary
    /// Builds the view from rows returned for `root_id`.
    ///
    /// Rows that are neither the root nor point at it are dropped. Returns
    /// `None` when the root row is absent or is itself a child.
    #[must_use]
    pub fn from_rows(root_id: uuid::Uuid, rows: impl IntoIterator<Item = Task>) -> Option<Self> {
        let mut root = None;
        let mut children = Vec::new();
        for row in rows {
            if row.id == root_id {
                root = Some(row);
            } else if row.parent_id == Some(root_id) {
                children.push(row);
            }
        }
        let root = root.filter(Task::is_root)?;
        children.sort_by_key(|task| (task.date, task.id));
        Some(Self { root, children })
    }

    /// Every member, ordered by `(date, id)`.
    #[must_use]
    pub fn into_ordered(self) -> Vec<Task> {
        let mut all = self.children;
        all.push(self.root);
        all.sort_by_key(|task| (task.date, task.id));
        all
    }

    /// Members dated on or after `from`, ordered by `(date, id)`.
    #[must_use]
    pub fn into_tail(self, from: NaiveDate) -> Vec<Task> {
        self.into_ordered()
            .into_iter()
            .filter(|task| task.date >= from)
            .collect()
    }
}
