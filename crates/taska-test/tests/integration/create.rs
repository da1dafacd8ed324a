//! Tests for series creation.

use chrono::NaiveDate;

use super::helpers::*;

#[test_log::test]
fn weekly_on_current_weekday_starts_today() {
    let fx = Fixture::at(monday());

    let series = fx.create_series(&fx.weekly("MONDAY", 4));

    assert_eq!(series.len(), 4);
    assert_eq!(
        dates(&series),
        vec![
            monday(),
            plus_days(monday(), 7),
            plus_days(monday(), 14),
            plus_days(monday(), 21),
        ]
    );
    let root = &series[0];
    assert!(root.is_root());
    assert!(series[1..].iter().all(|t| t.parent_id == Some(root.id)));
}

#[test_log::test]
fn daily_with_max_date_stops_on_max_date() {
    let fx = Fixture::at(monday());
    let request = CreateTaskRequest {
        max_date: Some(plus_days(monday(), 7)),
        ..fx.request("DAILY")
    };

    let series = fx.create_series(&request);

    assert_eq!(series.len(), 8);
    assert_eq!(series[0].date, fx.today());
    assert_eq!(series.last().map(|t| t.date), Some(plus_days(monday(), 7)));
    assert_eq!(fx.roots().len(), 1);
}

#[test_log::test]
fn weekly_jumps_forward_to_declared_weekday() {
    // Saturday
    let fx = Fixture::at(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());

    let series = fx.create_series(&fx.weekly("MONDAY", 2));

    assert_eq!(dates(&series), vec![monday(), plus_days(monday(), 7)]);
}

#[test_log::test]
fn biweekly_children_are_two_weeks_apart() {
    let fx = Fixture::at(monday());
    let request = CreateTaskRequest {
        weekday: Some("WEDNESDAY".to_string()),
        repeat_count: Some(3),
        ..fx.request("BIWEEKLY")
    };

    let series = fx.create_series(&request);

    let wednesday = plus_days(monday(), 2);
    assert_eq!(
        dates(&series),
        vec![wednesday, plus_days(wednesday, 14), plus_days(wednesday, 28)]
    );
}

#[test_log::test]
fn monthly_clamps_to_end_of_short_month() {
    let fx = Fixture::at(NaiveDate::from_ymd_opt(2027, 1, 31).unwrap());

    let series = fx.create_series(&fx.monthly(30, 1));

    assert_eq!(dates(&series), vec![NaiveDate::from_ymd_opt(2027, 2, 28).unwrap()]);
}

#[test_log::test]
fn monthly_uses_current_month_when_day_not_passed() {
    let fx = Fixture::at(monday());

    let series = fx.create_series(&fx.monthly(25, 3));

    let first = NaiveDate::from_ymd_opt(2026, 10, 25).unwrap();
    assert_eq!(
        dates(&series),
        vec![first, plus_months(first, 1), plus_months(first, 2)]
    );
    assert!(series.iter().all(|t| t.day_of_month == Some(25)));
}

#[test_log::test]
fn once_creates_single_root_on_start_date() {
    let fx = Fixture::at(monday());
    let start = plus_days(monday(), 3);
    let request = CreateTaskRequest {
        start_date: Some(start),
        repeat_count: Some(10),
        ..fx.request("ONCE")
    };

    let series = fx.create_series(&request);

    assert_eq!(dates(&series), vec![start]);
    assert!(series[0].is_root());
}

#[test_log::test]
fn repeat_count_defaults_per_kind() {
    let fx = Fixture::at(monday());

    let daily = fx.create_series(&fx.request("DAILY"));
    let monthly = fx.create_series(&CreateTaskRequest {
        day_of_month: Some(1),
        ..fx.request("MONTHLY")
    });

    assert_eq!(daily.len(), 90);
    assert_eq!(monthly.len(), 12);
}

#[test_log::test]
fn repeat_count_of_one_creates_only_root() {
    let fx = Fixture::at(monday());

    let series = fx.create_series(&fx.daily(1));

    assert_eq!(series.len(), 1);
}

#[test_log::test]
fn children_copy_declaration_fields() {
    let fx = Fixture::at(monday());

    let series = fx.create_series(&fx.weekly("FRIDAY", 3));

    for task in &series {
        assert_eq!(task.description, "Limpiar campana");
        assert_eq!(task.role_id, fx.cocina);
        assert_eq!(task.shift_id, fx.tarde);
        assert_eq!(task.weekday.map(|w| w.to_string()), Some("FRIDAY".to_string()));
        assert!(!task.completed);
        assert_eq!(task.completed_at, None);
    }
}

#[test_log::test]
fn unknown_shift_is_not_found() {
    let fx = Fixture::at(monday());
    let missing = uuid::Uuid::now_v7();
    let request = CreateTaskRequest {
        shift_id: missing,
        ..fx.daily(3)
    };

    let err = fx.service().create(&request).unwrap_err();

    assert!(matches!(err, ServiceError::NotFound { entity: "shift", id } if id == missing));
    assert!(fx.rows().is_empty());
}

#[test_log::test]
fn create_all_stores_every_series() {
    let fx = Fixture::at(monday());

    let roots = fx
        .service()
        .create_all(&[fx.daily(2), fx.weekly("MONDAY", 3)])
        .unwrap();

    assert_eq!(roots.len(), 2);
    assert_eq!(fx.rows().len(), 5);
    assert_eq!(fx.roots().len(), 2);
}

#[test_log::test]
fn create_all_rejects_everything_when_one_is_invalid() {
    let fx = Fixture::at(monday());

    let err = fx
        .service()
        .create_all(&[fx.daily(2), fx.monthly(40, 2)])
        .unwrap_err();

    assert!(err.field_errors().is_some_and(|e| e.contains("dayOfMonth")));
    assert!(fx.rows().is_empty());
}
