use axum::{extract::State, routing::get, Json, Router};

use crate::error::Result;
use crate::models::{company, company_account};
use crate::services::read_all_as;
use crate::state::AppState;

pub fn companies_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/companies", get(list_companies))
        .route("/api/company-accounts", get(list_company_accounts))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/companies",
    tag = "Companies",
    responses((status = 200, body = Vec<company::Model>))
)]
pub async fn list_companies(State(state): State<AppState>) -> Result<Json<Vec<company::Model>>> {
    Ok(Json(read_all_as(&state.db).await?))
}

/// Passwords are never serialized
#[utoipa::path(
    get,
    path = "/api/company-accounts",
    tag = "Companies",
    responses((status = 200, body = Vec<company_account::Model>))
)]
pub async fn list_company_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<company_account::Model>>> {
    Ok(Json(read_all_as(&state.db).await?))
}
