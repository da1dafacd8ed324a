//! Task occurrence records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::db::enums::{RecurrenceKind, WeekDay};

/// A persisted, dated occurrence of a recurring task.
///
/// `parent_id == None` marks the root of a series; every other occurrence of
/// the series points at that root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: uuid::Uuid,
    pub description: String,
    pub kind: RecurrenceKind,
    pub weekday: Option<WeekDay>,
    pub day_of_month: Option<u32>,
    pub date: NaiveDate,
    pub parent_id: Option<uuid::Uuid>,
    pub role_id: uuid::Uuid,
    pub shift_id: uuid::Uuid,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Id of the root anchoring this task's series.
    #[must_use]
    pub fn series_root_id(&self) -> uuid::Uuid {
        self.parent_id.unwrap_or(self.id)
    }
}

/// A task that has not been persisted yet and so has no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub description: String,
    pub kind: RecurrenceKind,
    pub weekday: Option<WeekDay>,
    pub day_of_month: Option<u32>,
    pub date: NaiveDate,
    pub parent_id: Option<uuid::Uuid>,
    pub role_id: uuid::Uuid,
    pub shift_id: uuid::Uuid,
}

impl NewTask {
    /// Attaches a storage-assigned id.
    #[must_use]
    pub fn into_task(self, id: uuid::Uuid) -> Task {
        Task {
            id,
            description: self.description,
            kind: self.kind,
            weekday: self.weekday,
            day_of_month: self.day_of_month,
            date: self.date,
            parent_id: self.parent_id,
            role_id: self.role_id,
            shift_id: self.shift_id,
            completed: false,
            completed_at: None,
        }
    }
}
