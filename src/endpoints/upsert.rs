use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::endpoints::extractors::JsonBody;
use crate::error::Result;
use crate::services::security::hash_row_password;
use crate::services::tables::{row_from_json, Table};
use crate::services::upsert;
use crate::state::AppState;

pub fn upsert_routes(state: AppState) -> Router {
    Router::new()
        .route("/{table}", post(upsert_row))
        .with_state(state)
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UpsertResponse {
    pub table: String,
    pub rows_affected: u64,
}

/// Insert or update one row of a table
///
/// Only the supplied columns are written. Key columns are never updated.
#[utoipa::path(
    post,
    path = "/api/upsert/{table}",
    tag = "Upsert",
    params(("table" = String, Path, description = "Table name")),
    request_body = serde_json::Value,
    responses(
        (status = 200, body = UpsertResponse),
        (status = 400, description = "Unknown table, unknown column or bad value"),
        (status = 415, description = "Body is not JSON")
    )
)]
pub async fn upsert_row(
    State(state): State<AppState>,
    Path(table): Path<String>,
    JsonBody(body): JsonBody<Map<String, Value>>,
) -> Result<Json<UpsertResponse>> {
    let table = Table::from_name(&table)?;
    let mut row = row_from_json(table, &body)?;

    if table == Table::CompanyAccounts {
        hash_row_password(&mut row)?;
    }

    let rows_affected = upsert(&state.db, table.name(), &row).await?;

    Ok(Json(UpsertResponse {
        table: table.name().to_string(),
        rows_affected,
    }))
}
