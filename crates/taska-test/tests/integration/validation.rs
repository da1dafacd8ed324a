//! Tests for declarations rejected before anything is stored.

use super::helpers::*;

fn rejected_fields(fx: &Fixture, request: &CreateTaskRequest) -> Vec<String> {
    let err = fx.service().create(request).unwrap_err();
    assert!(fx.rows().is_empty(), "nothing is stored on rejection");
    err.field_errors()
        .expect("validation error")
        .iter()
        .map(|(field, _)| field.to_string())
        .collect()
}

#[test_log::test]
fn day_of_month_out_of_range() {
    let fx = Fixture::at(monday());

    assert_eq!(rejected_fields(&fx, &fx.monthly(40, 3)), vec!["dayOfMonth"]);
}

#[test_log::test]
fn once_without_start_date() {
    let fx = Fixture::at(monday());

    assert_eq!(rejected_fields(&fx, &fx.request("ONCE")), vec!["startDate"]);
}

#[test_log::test]
fn once_in_the_past() {
    let fx = Fixture::at(monday());
    let request = CreateTaskRequest {
        start_date: Some(minus_days(monday(), 1)),
        ..fx.request("ONCE")
    };

    assert_eq!(rejected_fields(&fx, &request), vec!["startDate"]);
}

#[test_log::test]
fn max_date_yesterday() {
    let fx = Fixture::at(monday());
    let request = CreateTaskRequest {
        max_date: Some(minus_days(monday(), 1)),
        ..fx.request("DAILY")
    };

    assert_eq!(rejected_fields(&fx, &request), vec!["maxDate"]);
}

#[test_log::test]
fn max_date_beyond_one_year() {
    let fx = Fixture::at(monday());
    let request = CreateTaskRequest {
        max_date: Some(plus_days(plus_months(monday(), 12), 1)),
        ..fx.request("DAILY")
    };

    assert_eq!(rejected_fields(&fx, &request), vec!["maxDate"]);
}

#[test_log::test]
fn kind_is_case_sensitive() {
    let fx = Fixture::at(monday());

    let fields = rejected_fields(&fx, &fx.request("weekly"));

    assert_eq!(fields, vec!["kind"]);
}

#[test_log::test]
fn weekly_without_weekday_and_bad_repeat_count() {
    let fx = Fixture::at(monday());
    let request = CreateTaskRequest {
        repeat_count: Some(0),
        ..fx.request("WEEKLY")
    };

    assert_eq!(rejected_fields(&fx, &request), vec!["repeatCount", "weekday"]);
}

#[test_log::test]
fn blank_description() {
    let fx = Fixture::at(monday());
    let request = CreateTaskRequest {
        description: String::new(),
        ..fx.daily(2)
    };

    assert_eq!(rejected_fields(&fx, &request), vec!["description"]);
}
