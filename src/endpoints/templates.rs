use axum::{
    extract::Path,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::endpoints::extractors::QueryParams;
use crate::error::{AppError, Result};
use crate::services::templates::{json_template, workbook_template, Dataset};
use crate::state::AppState;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub fn templates_routes(state: AppState) -> Router {
    Router::new()
        .route("/{dataset}", get(download_template))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TemplateParams {
    /// `json` (default) or `xlsx`
    pub format: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/templates/{dataset}",
    tag = "Templates",
    params(
        ("dataset" = String, Path, description = "companies_and_accounts, or anything else for operational data"),
        TemplateParams
    ),
    responses(
        (status = 200, description = "Template document or workbook"),
        (status = 400, description = "Unknown format")
    )
)]
pub async fn download_template(
    Path(dataset): Path<String>,
    QueryParams(params): QueryParams<TemplateParams>,
) -> Result<Response> {
    let dataset = Dataset::from_name(&dataset);

    match params.format.as_deref().unwrap_or("json") {
        "json" => Ok(Json(json_template(dataset)).into_response()),
        "xlsx" => {
            let bytes = workbook_template(dataset)?;
            let disposition = format!(
                "attachment; filename=\"{}_template.xlsx\"",
                dataset.name()
            );

            Ok((
                [
                    (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response())
        }
        other => Err(AppError::BadRequest(format!(
            "Unknown template format '{}'",
            other
        ))),
    }
}
