//! Tests that storage failures roll back every write of an operation.

use super::helpers::*;

#[test_log::test]
fn failed_children_insert_drops_root() {
    let fx = Fixture::at(monday());
    fx.store.fail_writes_after(Some(1));

    let err = fx.service().create(&fx.daily(5)).unwrap_err();
    fx.store.fail_writes_after(None);

    assert!(matches!(err, ServiceError::DatabaseError(_)));
    assert!(fx.rows().is_empty());
}

#[test_log::test]
fn failed_root_delete_keeps_original_root() {
    let fx = Fixture::at(monday());
    let series = fx.create_series(&fx.daily(4));
    // Promote and repoint succeed, deleting the old root fails.
    fx.store.fail_writes_after(Some(2));

    let err = fx.service().delete_single(series[0].id).unwrap_err();
    fx.store.fail_writes_after(None);

    assert!(matches!(err, ServiceError::DatabaseError(_)));
    assert_eq!(fx.rows(), series);
    assert_eq!(fx.roots().len(), 1);
}

#[test_log::test]
fn store_recovers_after_failure() {
    let fx = Fixture::at(monday());
    let series = fx.create_series(&fx.daily(3));
    fx.store.fail_writes_after(Some(0));
    assert!(fx.service().delete_from(series[1].id).is_err());
    fx.store.fail_writes_after(None);

    let deleted = fx.service().delete_from(series[1].id).unwrap();

    assert_eq!(deleted, 2);
    assert_eq!(fx.rows(), series[..1].to_vec());
}
