//! ## Summary
//! Structural edits of a task series, computed without touching storage.
//!
//! The service loads rows, asks this module what the series should look like
//! afterwards, then writes the result back inside one transaction.

use taska_db::model::series::Series;
use taska_db::model::task::Task;

/// How a series is rewired when its root is removed but children remain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    /// Earliest child, now without a parent.
    pub promoted: Task,
    /// Every other child, now pointing at `promoted`.
    pub repointed: Vec<Task>,
}

/// ## Summary
/// Picks the earliest child (ties broken by id) as the new root and repoints
/// its siblings at it. Returns `None` when there are no children.
#[must_use]
pub fn plan_promotion(mut children: Vec<Task>) -> Option<Promotion> {
    let index = children
        .iter()
        .enumerate()
        .min_by_key(|(_, task)| (task.date, task.id))
        .map(|(index, _)| index)?;
    let mut promoted = children.remove(index);
    promoted.parent_id = None;
    for child in &mut children {
        child.parent_id = Some(promoted.id);
    }
    Some(Promotion {
        promoted,
        repointed: children,
    })
}

/// Members of `series` dated on or after `target`, `target` included.
#[must_use]
pub fn tail_from(series: Series, target: &Task) -> Vec<Task> {
    series.into_tail(target.date)
}
