use axum::{extract::State, routing::post, Json, Router};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};

use crate::endpoints::extractors::JsonBody;
use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::services::security::verify_password;
use crate::state::AppState;

pub fn auth_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/login", post(login))
        .with_state(state)
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub username: String,
    pub company_id: String,
    pub company_name: String,
    pub role: String,
}

// ============================================================================
// Endpoints
// ============================================================================

/// Check an account's credentials and return its company and role
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, body = LoginResponse),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let invalid = || AppError::Unauthorized("Invalid username or password".to_string());

    let (account, company) = CompanyAccount::find_by_id(request.username.clone())
        .find_also_related(Company)
        .one(&state.db)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&request.password, &account.password) {
        tracing::debug!("Rejected login for {}", request.username);
        return Err(invalid());
    }

    let company = company.ok_or_else(|| {
        AppError::Internal(format!("Account {} has no company", account.username))
    })?;

    Ok(Json(LoginResponse {
        username: account.username,
        company_id: company.id,
        company_name: company.name,
        role: company.role,
    }))
}
