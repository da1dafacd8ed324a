//! ## Summary
//! Predicate set for filtered task lookups.
//!
//! Every populated field narrows the result; unset fields match everything.
//! Storage adapters may translate a [`TaskQuery`] into their native query
//! language, or evaluate [`TaskQuery::matches`] row by row.

use chrono::NaiveDate;

use crate::db::enums::{RecurrenceKind, WeekDay};
use crate::model::task::Task;

/// Date predicate of a [`TaskQuery`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFilter {
    #[default]
    Any,
    /// Exactly this date.
    On(NaiveDate),
    /// Inclusive range; a missing bound is open.
    Between {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl DateFilter {
    #[must_use]
    pub fn matches(self, date: NaiveDate) -> bool {
        match self {
            Self::Any => true,
            Self::On(on) => date == on,
            Self::Between { start, end } => {
                start.is_none_or(|start| date >= start) && end.is_none_or(|end| date <= end)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub role_id: Option<uuid::Uuid>,
    pub shift_id: Option<uuid::Uuid>,
    pub weekday: Option<WeekDay>,
    pub kind: Option<RecurrenceKind>,
    pub completed: Option<bool>,
    pub date: DateFilter,
}

impl TaskQuery {
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.role_id.is_none_or(|id| task.role_id == id)
            && self.shift_id.is_none_or(|id| task.shift_id == id)
            && self.weekday.is_none_or(|day| task.weekday == Some(day))
            && self.kind.is_none_or(|kind| task.kind == kind)
            && self.completed.is_none_or(|done| task.completed == done)
            && self.date.matches(task.date)
    }
}
