//! ## Summary
//! Date math for task series.
//!
//! The root is built first so that storage can assign its id; children are
//! then stamped with that id as their parent. All date offsets are computed
//! from the root's date, never accumulated from the previous child.

use chrono::{Datelike, Days, Months, NaiveDate};
use taska_db::db::enums::{RecurrenceKind, WeekDay};
use taska_db::model::catalog::{Role, Shift};
use taska_db::model::task::{NewTask, Task};

use super::declaration::{Schedule, ValidatedRecurrence};

/// Upper bound on children generated for one series, whatever the end date.
pub const MAX_CHILDREN: u32 = 365;

/// ## Summary
/// First date of a series declared on `today`.
///
/// - Once: the declared date.
/// - Weekly/Biweekly: today if it is the declared weekday, else the next one.
/// - Monthly: the declared day this month if it is still ahead (or today) and
///   exists in this month, otherwise next month with the day clamped to that
///   month's length.
/// - Daily: today.
#[must_use]
pub fn start_date(schedule: Schedule, today: NaiveDate) -> NaiveDate {
    match schedule {
        Schedule::Once(date) => date,
        Schedule::Weekly(day) | Schedule::Biweekly(day) => next_or_same_weekday(today, day),
        Schedule::Monthly(day) => next_or_same_day_of_month(today, day),
        Schedule::Daily => today,
    }
}

fn next_or_same_weekday(today: NaiveDate, day: WeekDay) -> NaiveDate {
    let target = day.to_chrono().num_days_from_monday();
    let current = today.weekday().num_days_from_monday();
    let ahead = (7 + target - current) % 7;
    today
        .checked_add_days(Days::new(u64::from(ahead)))
        .unwrap_or(today)
}

fn next_or_same_day_of_month(today: NaiveDate, day: u32) -> NaiveDate {
    if today.day() <= day
        && let Some(date) = today.with_day(day)
    {
        return date;
    }
    let Some(next_month) = today
        .with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
    else {
        return today;
    };
    let clamped = day.min(days_in_month(next_month));
    next_month.with_day(clamped).unwrap_or(next_month)
}

fn days_in_month(first_of_month: NaiveDate) -> u32 {
    first_of_month
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}

/// ## Summary
/// Date of repetition `k` of a series starting on `start`.
///
/// Monthly offsets use calendar month arithmetic, which clamps to the end of
/// shorter months. Returns `None` when the date falls outside the calendar.
#[must_use]
pub fn offset_date(start: NaiveDate, kind: RecurrenceKind, k: u32) -> Option<NaiveDate> {
    match kind {
        RecurrenceKind::Daily => start.checked_add_days(Days::new(u64::from(k))),
        RecurrenceKind::Weekly => start.checked_add_days(Days::new(7 * u64::from(k))),
        RecurrenceKind::Biweekly => start.checked_add_days(Days::new(14 * u64::from(k))),
        RecurrenceKind::Monthly => start.checked_add_months(Months::new(k)),
        RecurrenceKind::Once => Some(start),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Limit {
    /// Stop after the last date not past this one.
    Until(NaiveDate),
    /// Stop after this many repetitions.
    Count(u32),
}

/// Lazily yields the dates of repetitions `1, 2, 3, …` of a series.
///
/// Ends at whichever comes first: the end date is passed, the repetition
/// count is used up, or [`MAX_CHILDREN`] dates have been produced.
#[derive(Debug, Clone)]
pub struct Repetitions {
    start: NaiveDate,
    kind: RecurrenceKind,
    next: u32,
    limit: Limit,
}

impl Repetitions {
    /// Repetitions after the root dated `start`, per the declaration's end rule.
    #[must_use]
    pub fn after(start: NaiveDate, decl: &ValidatedRecurrence) -> Self {
        let limit = match (decl.kind(), decl.max_date) {
            (RecurrenceKind::Once, _) => Limit::Count(0),
            (_, Some(max_date)) => Limit::Until(max_date),
            (_, None) => Limit::Count(decl.repeat_count.saturating_sub(1)),
        };
        Self {
            start,
            kind: decl.kind(),
            next: 1,
            limit,
        }
    }
}

impl Iterator for Repetitions {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > MAX_CHILDREN {
            return None;
        }
        if let Limit::Count(count) = self.limit
            && self.next > count
        {
            return None;
        }
        let date = offset_date(self.start, self.kind, self.next)?;
        if let Limit::Until(max_date) = self.limit
            && date > max_date
        {
            return None;
        }
        self.next += 1;
        Some(date)
    }
}

fn occurrence(
    decl: &ValidatedRecurrence,
    role_id: uuid::Uuid,
    shift_id: uuid::Uuid,
    date: NaiveDate,
    parent_id: Option<uuid::Uuid>,
) -> NewTask {
    NewTask {
        description: decl.description.clone(),
        kind: decl.kind(),
        weekday: decl.schedule.weekday(),
        day_of_month: decl.schedule.day_of_month(),
        date,
        parent_id,
        role_id,
        shift_id,
    }
}

/// ## Summary
/// Builds the root occurrence of a new series, not yet persisted.
#[must_use]
pub fn build_root(
    decl: &ValidatedRecurrence,
    role: &Role,
    shift: &Shift,
    today: NaiveDate,
) -> NewTask {
    let date = start_date(decl.schedule, today);
    tracing::trace!(%date, kind = %decl.kind(), "Computed series start date");
    occurrence(decl, role.id, shift.id, date, None)
}

/// ## Summary
/// Builds the children of a persisted root, each pointing at `root.id`.
///
/// One-off tasks have no children.
#[must_use]
pub fn build_children(root: &Task, decl: &ValidatedRecurrence) -> Vec<NewTask> {
    let children: Vec<NewTask> = Repetitions::after(root.date, decl)
        .map(|date| occurrence(decl, root.role_id, root.shift_id, date, Some(root.id)))
        .collect();
    tracing::trace!(root_id = %root.id, count = children.len(), "Generated child occurrences");
    children
}
