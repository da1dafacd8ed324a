//! ## Summary
//! Validation of task creation requests.
//!
//! An unknown or missing recurrence kind fails immediately, since every other
//! rule depends on it. All remaining rules are checked together and reported
//! as one [`FieldErrors`] map keyed by wire field name.

use std::str::FromStr;

use chrono::{Months, NaiveDate};
use taska_core::validation::FieldErrors;
use taska_db::db::enums::{RecurrenceKind, UnknownVariant, WeekDay};

use super::declaration::{CreateTaskRequest, Schedule, ValidatedRecurrence};
use super::generator;

pub const MIN_REPEAT_COUNT: i64 = 1;
pub const MAX_REPEAT_COUNT: i64 = 365;

/// Repetitions used when a request names neither a count nor an end date.
#[must_use]
pub const fn default_repeat_count(kind: RecurrenceKind) -> u32 {
    match kind {
        RecurrenceKind::Daily => 90,
        RecurrenceKind::Weekly => 52,
        RecurrenceKind::Biweekly => 26,
        RecurrenceKind::Monthly => 12,
        RecurrenceKind::Once => 1,
    }
}

/// Parses an enum by exact name, reporting a missing value as `null`.
fn parse_named<T>(field: &str, value: Option<&str>) -> Result<T, FieldErrors>
where
    T: FromStr<Err = UnknownVariant>,
{
    value
        .unwrap_or("null")
        .parse()
        .map_err(|err: UnknownVariant| FieldErrors::single(field, err.to_string()))
}

/// ## Summary
/// Resolves a recurrence kind by exact name.
///
/// ## Errors
/// Returns a `kind` field error listing the valid names when `value` is
/// missing or unknown.
pub fn parse_kind(value: Option<&str>) -> Result<RecurrenceKind, FieldErrors> {
    parse_named("kind", value)
}

/// ## Summary
/// Resolves a weekday by exact name.
///
/// ## Errors
/// Returns a `weekday` field error listing the valid names when `value` is
/// missing or unknown.
pub fn parse_weekday(value: Option<&str>) -> Result<WeekDay, FieldErrors> {
    parse_named("weekday", value)
}

/// One year past `today`, the furthest a series may be declared to run.
#[must_use]
pub fn max_date_horizon(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_months(Months::new(12))
        .unwrap_or(NaiveDate::MAX)
}

/// ## Summary
/// Validates and normalizes a creation request against `today`.
///
/// ## Errors
/// Returns every field that failed validation. Nothing is returned partially.
pub fn validate(
    request: &CreateTaskRequest,
    today: NaiveDate,
) -> Result<ValidatedRecurrence, FieldErrors> {
    let kind = parse_kind(request.kind.as_deref())?;
    let mut errors = FieldErrors::new();

    if request.description.trim().is_empty() {
        errors.insert("description", "Description must not be blank");
    }

    let schedule = schedule(kind, request, today, &mut errors);

    let repeat_count = if kind == RecurrenceKind::Once {
        1
    } else {
        repeat_count(kind, request.repeat_count, &mut errors)
    };

    let max_date = if kind == RecurrenceKind::Once {
        None
    } else {
        request.max_date.inspect(|&max_date| {
            check_max_date(max_date, schedule, today, &mut errors);
        })
    };

    let Some(schedule) = schedule else {
        tracing::warn!(%errors, "Rejected task declaration");
        return Err(errors);
    };
    if !errors.is_empty() {
        tracing::warn!(%errors, "Rejected task declaration");
    }
    errors.into_result(ValidatedRecurrence {
        description: request.description.clone(),
        role_id: request.role_id,
        shift_id: request.shift_id,
        schedule,
        repeat_count,
        max_date,
    })
}

fn schedule(
    kind: RecurrenceKind,
    request: &CreateTaskRequest,
    today: NaiveDate,
    errors: &mut FieldErrors,
) -> Option<Schedule> {
    match kind {
        RecurrenceKind::Daily => Some(Schedule::Daily),
        RecurrenceKind::Weekly | RecurrenceKind::Biweekly => {
            match parse_weekday(request.weekday.as_deref()) {
                Ok(day) if kind == RecurrenceKind::Weekly => Some(Schedule::Weekly(day)),
                Ok(day) => Some(Schedule::Biweekly(day)),
                Err(err) => {
                    errors.merge(err);
                    None
                }
            }
        }
        RecurrenceKind::Monthly => match request.day_of_month {
            None => {
                errors.insert("dayOfMonth", "Day of month is required for MONTHLY tasks");
                None
            }
            Some(day) => match u32::try_from(day) {
                Ok(day @ 1..=31) => Some(Schedule::Monthly(day)),
                _ => {
                    errors.insert(
                        "dayOfMonth",
                        format!("Day of month must be between 1 and 31, got {day}"),
                    );
                    None
                }
            },
        },
        RecurrenceKind::Once => match request.start_date {
            None => {
                errors.insert("startDate", "Start date is required for ONCE tasks");
                None
            }
            Some(date) if date < today => {
                errors.insert("startDate", "Start date must be today or later");
                None
            }
            Some(date) => Some(Schedule::Once(date)),
        },
    }
}

fn repeat_count(kind: RecurrenceKind, requested: Option<i64>, errors: &mut FieldErrors) -> u32 {
    let Some(count) = requested else {
        return default_repeat_count(kind);
    };
    match u32::try_from(count) {
        Ok(valid) if (MIN_REPEAT_COUNT..=MAX_REPEAT_COUNT).contains(&count) => valid,
        _ => {
            errors.insert(
                "repeatCount",
                format!(
                    "Repeat count must be between {MIN_REPEAT_COUNT} and {MAX_REPEAT_COUNT}, got {count}"
                ),
            );
            default_repeat_count(kind)
        }
    }
}

fn check_max_date(
    max_date: NaiveDate,
    schedule: Option<Schedule>,
    today: NaiveDate,
    errors: &mut FieldErrors,
) {
    if max_date < today {
        errors.insert("maxDate", "Max date must be today or later");
        return;
    }
    let horizon = max_date_horizon(today);
    if max_date > horizon {
        errors.insert(
            "maxDate",
            format!("Max date must not be more than one year ahead ({horizon})"),
        );
        return;
    }
    if let Some(schedule) = schedule {
        let start = generator::start_date(schedule, today);
        if max_date < start {
            errors.insert(
                "maxDate",
                format!("Max date must not be before the first occurrence ({start})"),
            );
        }
    }
}

/// ## Summary
/// Checks a search date range.
///
/// ## Errors
/// Returns a `dateRange` field error when both bounds are present and the
/// end precedes the start.
pub fn validate_date_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), FieldErrors> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(FieldErrors::single(
            "dateRange",
            format!("End date {end} is before start date {start}"),
        )),
        _ => Ok(()),
    }
}
