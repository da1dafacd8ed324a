//! Raw and validated forms of a recurrence declaration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use taska_db::db::enums::{RecurrenceKind, WeekDay};

/// Task creation request as received from a client, before validation.
///
/// Enum-valued fields stay strings and numeric fields stay wide so that the
/// validator can report exactly what was wrong with them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub description: String,
    pub role_id: uuid::Uuid,
    pub shift_id: uuid::Uuid,
    pub kind: Option<String>,
    pub weekday: Option<String>,
    pub day_of_month: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub repeat_count: Option<i64>,
    pub max_date: Option<NaiveDate>,
}

/// When a series happens. Each kind carries exactly the anchor it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Daily,
    Weekly(WeekDay),
    Biweekly(WeekDay),
    /// Day of month, `1..=31`.
    Monthly(u32),
    Once(NaiveDate),
}

impl Schedule {
    #[must_use]
    pub const fn kind(self) -> RecurrenceKind {
        match self {
            Self::Daily => RecurrenceKind::Daily,
            Self::Weekly(_) => RecurrenceKind::Weekly,
            Self::Biweekly(_) => RecurrenceKind::Biweekly,
            Self::Monthly(_) => RecurrenceKind::Monthly,
            Self::Once(_) => RecurrenceKind::Once,
        }
    }

    #[must_use]
    pub const fn weekday(self) -> Option<WeekDay> {
        match self {
            Self::Weekly(day) | Self::Biweekly(day) => Some(day),
            _ => None,
        }
    }

    #[must_use]
    pub const fn day_of_month(self) -> Option<u32> {
        match self {
            Self::Monthly(day) => Some(day),
            _ => None,
        }
    }

    #[must_use]
    pub const fn start_date(self) -> Option<NaiveDate> {
        match self {
            Self::Once(date) => Some(date),
            _ => None,
        }
    }
}

/// A declaration that passed validation.
///
/// `repeat_count` is 1 and `max_date` is `None` for one-off tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRecurrence {
    pub description: String,
    pub role_id: uuid::Uuid,
    pub shift_id: uuid::Uuid,
    pub schedule: Schedule,
    pub repeat_count: u32,
    pub max_date: Option<NaiveDate>,
}

impl ValidatedRecurrence {
    #[must_use]
    pub const fn kind(&self) -> RecurrenceKind {
        self.schedule.kind()
    }
}
