//! Generic row reader against a seeded database

use sea_orm::Value;

use panel_tracker::error::AppError;
use panel_tracker::models::{company, company_account, component, panel};
use panel_tracker::services::tables::PartialRow;
use panel_tracker::services::{read_all, read_all_as, read_in, read_in_as, upsert, Record, RecordKind};

mod common;
use common::create_test_db;

fn row(entries: &[(&str, &str)]) -> PartialRow {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), Some(Value::from(v.to_string()))))
        .collect()
}

#[tokio::test]
async fn test_read_all_companies_ordered_by_id() {
    let conn = create_test_db().await;

    let companies: Vec<company::Model> = read_all_as(&conn).await.unwrap();
    let ids: Vec<&str> = companies.iter().map(|c| c.id.as_str()).collect();

    assert_eq!(
        ids,
        vec!["abacus", "admin", "dsm", "gpe", "presisi", "triangle", "viewer", "warehouse"]
    );
    let gpe = companies.iter().find(|c| c.id == "gpe").unwrap();
    assert_eq!(gpe.name, "PT GPE");
    assert_eq!(gpe.role, "k3");
}

#[tokio::test]
async fn test_read_all_accounts_hides_passwords() {
    let conn = create_test_db().await;

    let accounts: Vec<company_account::Model> = read_all_as(&conn).await.unwrap();
    assert_eq!(accounts.len(), 12);

    // Seeded passwords are stored hashed
    assert!(accounts.iter().all(|a| a.password.starts_with("$2")));

    let json = serde_json::to_value(&accounts[0]).unwrap();
    assert!(json.get("password").is_none());
    assert!(json.get("username").is_some());
}

#[tokio::test]
async fn test_read_all_panels_includes_panel_type() {
    let conn = create_test_db().await;
    upsert(&conn, "panels", &row(&[("no_pp", "P1"), ("panel_type", "MCC")]))
        .await
        .unwrap();

    let records = read_all(&conn, RecordKind::Panel).await.unwrap();
    assert_eq!(records.len(), 1);

    let Record::Panel(panel) = &records[0] else {
        panic!("expected a panel record");
    };
    assert_eq!(panel.panel_type.as_deref(), Some("MCC"));
}

#[tokio::test]
async fn test_read_all_rejects_child_kinds() {
    let conn = create_test_db().await;

    let err = read_all(&conn, RecordKind::Busbar).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn test_read_in_filters_by_ids() {
    let conn = create_test_db().await;
    for no_pp in ["P1", "P2", "P3"] {
        upsert(&conn, "panels", &row(&[("no_pp", no_pp)])).await.unwrap();
    }

    let panels: Vec<panel::Model> =
        read_in_as(&conn, "no_pp", &["P3".to_string(), "P1".to_string(), "P9".to_string()])
            .await
            .unwrap();

    let ids: Vec<&str> = panels.iter().map(|p| p.no_pp.as_str()).collect();
    assert_eq!(ids, vec!["P1", "P3"]);
}

#[tokio::test]
async fn test_read_in_children_by_panel() {
    let conn = create_test_db().await;
    upsert(&conn, "panels", &row(&[("no_pp", "P1")])).await.unwrap();
    upsert(&conn, "panels", &row(&[("no_pp", "P2")])).await.unwrap();
    upsert(&conn, "components", &row(&[("panel_no_pp", "P1"), ("vendor", "gpe")]))
        .await
        .unwrap();
    upsert(&conn, "components", &row(&[("panel_no_pp", "P1"), ("vendor", "dsm")]))
        .await
        .unwrap();
    upsert(&conn, "components", &row(&[("panel_no_pp", "P2"), ("vendor", "gpe")]))
        .await
        .unwrap();

    let parts: Vec<component::Model> = read_in_as(&conn, "panel_no_pp", &["P1".to_string()])
        .await
        .unwrap();

    assert_eq!(parts.len(), 2);
    assert!(parts.iter().all(|c| c.panel_no_pp == "P1"));
}

#[tokio::test]
async fn test_read_in_with_no_ids_is_empty() {
    let conn = create_test_db().await;
    upsert(&conn, "panels", &row(&[("no_pp", "P1")])).await.unwrap();

    let records = read_in(&conn, RecordKind::Panel, "no_pp", &[]).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_read_in_rejects_unknown_column_and_kind() {
    let conn = create_test_db().await;
    let ids = vec!["P1".to_string()];

    let err = read_in(&conn, RecordKind::Panel, "no_pp; DROP TABLE panels", &ids)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = read_in(&conn, RecordKind::Company, "id", &ids).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}
