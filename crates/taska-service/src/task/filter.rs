//! ## Summary
//! Search filter as received from a client and its translation into a
//! storage [`TaskQuery`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use taska_core::validation::FieldErrors;
use taska_db::db::query::{DateFilter, TaskQuery};

use crate::auth::Caller;
use crate::recurrence::validator::{parse_kind, parse_weekday, validate_date_range};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    pub role_id: Option<uuid::Uuid>,
    pub shift_id: Option<uuid::Uuid>,
    pub kind: Option<String>,
    pub weekday: Option<String>,
    pub completed: Option<bool>,
    /// Exact date; ignored when either range bound is set.
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

impl TaskFilter {
    /// ## Summary
    /// Builds the storage query for `caller`.
    ///
    /// Non-privileged callers are pinned to their own role whatever role the
    /// filter names. A range is used as soon as either bound is present.
    ///
    /// ## Errors
    /// Returns field errors for unknown kind or weekday names and for a
    /// reversed date range.
    pub fn to_query(&self, caller: &Caller) -> Result<TaskQuery, FieldErrors> {
        let mut errors = FieldErrors::new();

        let kind = match non_empty(self.kind.as_ref()).map(|raw| parse_kind(Some(raw))) {
            Some(Err(err)) => {
                errors.merge(err);
                None
            }
            parsed => parsed.and_then(Result::ok),
        };
        let weekday = match non_empty(self.weekday.as_ref()).map(|raw| parse_weekday(Some(raw))) {
            Some(Err(err)) => {
                errors.merge(err);
                None
            }
            parsed => parsed.and_then(Result::ok),
        };
        if let Err(err) = validate_date_range(self.start_date, self.end_date) {
            errors.merge(err);
        }

        let date = if self.start_date.is_some() || self.end_date.is_some() {
            DateFilter::Between {
                start: self.start_date,
                end: self.end_date,
            }
        } else {
            self.date.map_or(DateFilter::Any, DateFilter::On)
        };

        errors.into_result(TaskQuery {
            role_id: caller.scoped_role_id(self.role_id),
            shift_id: self.shift_id,
            weekday,
            kind,
            completed: self.completed,
            date,
        })
    }
}
