//! Test helpers shared by the integration tests.
//!
//! Databases are in-memory SQLite migrated and seeded through the same path the
//! service uses at startup. PostgreSQL-only checks use `DATABASE_URL` when it
//! points at a PostgreSQL server.

#![allow(dead_code)]

use std::sync::Once;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, Statement};

use panel_tracker::db;
use panel_tracker::endpoints::create_router;
use panel_tracker::state::AppState;

static INIT: Once = Once::new();

/// Keep bcrypt cheap for tests. Must run before `CONFIG` is first read.
pub fn init_test_env() {
    INIT.call_once(|| {
        std::env::set_var("PANEL_TRACKER_BCRYPT_COST", "4");
    });
}

/// Create an in-memory SQLite database without running migrations
pub async fn create_empty_db() -> DatabaseConnection {
    init_test_env();

    Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database")
}

/// Create an in-memory SQLite database, migrated and seeded
pub async fn create_test_db() -> DatabaseConnection {
    let conn = create_empty_db().await;

    db::migrate(&conn)
        .await
        .expect("Failed to run test migrations");

    conn
}

/// Create a PostgreSQL connection with the tracker tables dropped.
/// Returns None if DATABASE_URL is not a PostgreSQL URL.
pub async fn create_postgres_db() -> Option<DatabaseConnection> {
    init_test_env();

    let db_url = std::env::var("DATABASE_URL").ok()?;
    if !db_url.starts_with("postgres") {
        return None;
    }

    let conn = Database::connect(&db_url)
        .await
        .expect("Failed to connect to PostgreSQL test database");

    let tables = [
        "corepart",
        "palet",
        "components",
        "busbars",
        "panels",
        "company_accounts",
        "companies",
        "seaql_migrations",
    ];
    for table in tables {
        let sql = format!("DROP TABLE IF EXISTS \"{}\" CASCADE", table);
        let _ = conn
            .execute(Statement::from_string(DbBackend::Postgres, sql))
            .await;
    }

    Some(conn)
}

/// Count rows of a table
pub async fn count_rows(conn: &DatabaseConnection, table: &str) -> i64 {
    let backend = conn.get_database_backend();
    let row = conn
        .query_one(Statement::from_string(
            backend,
            format!("SELECT COUNT(*) AS n FROM \"{}\"", table),
        ))
        .await
        .expect("Failed to count rows")
        .expect("COUNT returned no row");

    row.try_get("", "n").expect("Failed to read count")
}

/// Build the API router over a fresh seeded database
pub async fn create_test_app() -> (Router, DatabaseConnection) {
    let conn = create_test_db().await;
    let app = create_router(AppState::new(conn.clone()));
    (app, conn)
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}

/// Read a response body as raw bytes
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}
