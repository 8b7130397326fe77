use axum::{
    extract::State,
    routing::post,
    Json, Router,
};
use serde_json::Value;

use crate::endpoints::extractors::{JsonBody, Upload};
use crate::error::{AppError, Result};
use crate::services::import::{import_document, import_workbook, ImportReport};
use crate::state::AppState;

pub fn import_routes(state: AppState) -> Router {
    Router::new()
        .route("/json", post(import_json))
        .route("/workbook", post(import_xlsx))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/api/import/json",
    tag = "Import",
    request_body = serde_json::Value,
    responses(
        (status = 200, body = ImportReport),
        (status = 400, description = "Malformed import document")
    )
)]
pub async fn import_json(
    State(state): State<AppState>,
    JsonBody(document): JsonBody<Value>,
) -> Result<Json<ImportReport>> {
    let report = import_document(&state.db, &document).await?;
    Ok(Json(report))
}

/// Upload an xlsx workbook as the first multipart field
#[utoipa::path(
    post,
    path = "/api/import/workbook",
    tag = "Import",
    responses(
        (status = 200, body = ImportReport),
        (status = 400, description = "Missing or unreadable workbook")
    )
)]
pub async fn import_xlsx(
    State(state): State<AppState>,
    Upload(mut multipart): Upload,
) -> Result<Json<ImportReport>> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid upload: {}", e)))?
        .ok_or_else(|| AppError::BadRequest("Missing workbook upload".to_string()))?;

    let file_name = field.file_name().unwrap_or("workbook").to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;

    tracing::info!("Importing workbook {} ({} bytes)", file_name, bytes.len());

    let report = import_workbook(&state.db, &bytes).await?;
    Ok(Json(report))
}
