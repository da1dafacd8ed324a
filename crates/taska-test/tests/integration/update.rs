//! Tests for description updates over a series tail.

use super::helpers::*;

#[test_log::test]
fn update_rewrites_tail_description_only() {
    let fx = Fixture::at(monday());
    let series = fx.create_series(&fx.weekly("THURSDAY", 5));

    let updated = fx
        .service()
        .update_description_from(series[2].id, "Desengrasar campana")
        .unwrap();

    assert_eq!(updated.len(), 3);
    let rows = fx.rows();
    for (before, after) in series.iter().zip(&rows) {
        assert_eq!(after.id, before.id);
        assert_eq!(after.date, before.date);
        assert_eq!(after.kind, before.kind);
        assert_eq!(after.parent_id, before.parent_id);
    }
    assert!(rows[..2].iter().all(|t| t.description == "Limpiar campana"));
    assert!(rows[2..].iter().all(|t| t.description == "Desengrasar campana"));
}

#[test_log::test]
fn update_from_root_covers_whole_series() {
    let fx = Fixture::at(monday());
    let series = fx.create_series(&fx.daily(4));

    let updated = fx.service().update_description_from(series[0].id, "Fregar").unwrap();

    assert_eq!(updated.len(), 4);
    assert!(fx.rows().iter().all(|t| t.description == "Fregar"));
}

#[test_log::test]
fn blank_description_is_rejected_before_lookup() {
    let fx = Fixture::at(monday());
    let series = fx.create_series(&fx.daily(2));

    let err = fx.service().update_description_from(series[0].id, "   ").unwrap_err();
    let missing = fx
        .service()
        .update_description_from(uuid::Uuid::now_v7(), "")
        .unwrap_err();

    assert!(err.field_errors().is_some_and(|e| e.contains("description")));
    assert!(missing.field_errors().is_some_and(|e| e.contains("description")));
    assert_eq!(fx.rows(), series);
}

#[test_log::test]
fn update_of_missing_task_is_not_found() {
    let fx = Fixture::at(monday());

    let err = fx
        .service()
        .update_description_from(uuid::Uuid::now_v7(), "Fregar")
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound { entity: "task", .. }));
}
