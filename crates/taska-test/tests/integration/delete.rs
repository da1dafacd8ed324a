//! Tests for single-occurrence and tail deletion.

use super::helpers::*;

#[test_log::test]
fn deleting_root_promotes_earliest_child() {
    let fx = Fixture::at(monday());
    let series = fx.create_series(&fx.monthly(1, 4));
    let old_root = series[0].id;

    fx.service().delete_single(old_root).unwrap();

    let rows = fx.rows();
    assert_eq!(rows.len(), 3);
    let promoted = &rows[0];
    assert_eq!(promoted.id, series[1].id);
    assert_eq!(promoted.parent_id, None);
    assert!(rows[1..].iter().all(|t| t.parent_id == Some(promoted.id)));
    assert!(rows.iter().all(|t| t.id != old_root));
}

#[test_log::test]
fn promotion_leaves_one_root_per_series() {
    let fx = Fixture::at(monday());
    let first = fx.create_series(&fx.weekly("TUESDAY", 5));
    let second = fx.create_series(&fx.daily(3));

    fx.service().delete_single(first[0].id).unwrap();

    assert_eq!(fx.roots().len(), 2);
    let untouched = fx.service().find_series(second[0].id).unwrap();
    assert_eq!(untouched, second);
}

#[test_log::test]
fn deleting_child_leaves_rest_of_series() {
    let fx = Fixture::at(monday());
    let series = fx.create_series(&fx.daily(4));

    fx.service().delete_single(series[2].id).unwrap();

    let remaining = fx.service().find_series(series[0].id).unwrap();
    assert_eq!(
        remaining.iter().map(|t| t.id).collect::<Vec<_>>(),
        vec![series[0].id, series[1].id, series[3].id]
    );
    assert!(remaining[0].is_root());
}

#[test_log::test]
fn deleting_childless_root_removes_series() {
    let fx = Fixture::at(monday());
    let series = fx.create_series(&fx.daily(1));

    fx.service().delete_single(series[0].id).unwrap();

    assert!(fx.rows().is_empty());
}

#[test_log::test]
fn delete_from_second_keeps_only_first() {
    let fx = Fixture::at(monday());
    let series = fx.create_series(&fx.weekly("MONDAY", 4));

    let deleted = fx.service().delete_from(series[1].id).unwrap();

    assert_eq!(deleted, 3);
    assert_eq!(fx.rows(), vec![series[0].clone()]);
}

#[test_log::test]
fn delete_from_root_removes_whole_series_only() {
    let fx = Fixture::at(monday());
    let doomed = fx.create_series(&fx.daily(5));
    let kept = fx.create_series(&fx.weekly("MONDAY", 2));

    let deleted = fx.service().delete_from(doomed[0].id).unwrap();

    assert_eq!(deleted, 5);
    assert_eq!(fx.rows(), kept);
}

#[test_log::test]
fn delete_from_last_removes_only_last() {
    let fx = Fixture::at(monday());
    let series = fx.create_series(&fx.daily(3));

    let deleted = fx.service().delete_from(series[2].id).unwrap();

    assert_eq!(deleted, 1);
    assert_eq!(fx.rows(), series[..2].to_vec());
}

#[test_log::test]
fn delete_from_after_promotion_follows_new_root() {
    let fx = Fixture::at(monday());
    let series = fx.create_series(&fx.daily(5));
    fx.service().delete_single(series[0].id).unwrap();

    fx.service().delete_from(series[3].id).unwrap();

    let rows = fx.rows();
    assert_eq!(
        rows.iter().map(|t| t.id).collect::<Vec<_>>(),
        vec![series[1].id, series[2].id]
    );
    assert!(rows[0].is_root());
    assert_eq!(rows[1].parent_id, Some(series[1].id));
}

#[test_log::test]
fn deleting_missing_task_is_not_found() {
    let fx = Fixture::at(monday());
    let missing = uuid::Uuid::now_v7();

    let single = fx.service().delete_single(missing).unwrap_err();
    let tail = fx.service().delete_from(missing).unwrap_err();

    for err in [single, tail] {
        assert!(matches!(err, ServiceError::NotFound { entity: "task", id } if id == missing));
    }
}
