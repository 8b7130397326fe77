pub mod auth;
pub mod companies;
pub mod extractors;
pub mod import;
pub mod panels;
pub mod templates;
pub mod upsert;

use axum::{http::Method, middleware as axum_middleware, routing::get, Json, Router};
use utoipa::OpenApi;

use crate::error::AppError;
use crate::middleware::json_content_type;
use crate::models::{busbar, company, company_account, component, corepart, palet, panel};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(title = "Panel Tracker API"),
    paths(
        health_check,
        auth::login,
        companies::list_companies,
        companies::list_company_accounts,
        panels::list_panels,
        panels::get_panel,
        panels::delete_panel,
        upsert::upsert_row,
        import::import_json,
        import::import_xlsx,
        templates::download_template,
    ),
    components(schemas(
        company::Model,
        company_account::Model,
        panel::Model,
        busbar::Model,
        component::Model,
        palet::Model,
        corepart::Model,
        auth::LoginRequest,
        auth::LoginResponse,
        panels::PanelDetail,
        panels::DeletedResponse,
        upsert::UpsertResponse,
        crate::services::import::ImportReport,
    ))
)]
pub struct ApiDoc;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/openapi.json", get(openapi_spec))
        .merge(auth::auth_routes(state.clone()))
        .merge(companies::companies_routes(state.clone()))
        .nest("/api/panels", panels::panels_routes(state.clone()))
        .nest("/api/upsert", upsert::upsert_routes(state.clone()))
        .nest("/api/import", import::import_routes(state.clone()))
        .nest("/api/templates", templates::templates_routes(state))
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(axum_middleware::from_fn(json_content_type))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "System",
    responses((status = 200, body = String))
)]
pub async fn health_check() -> Json<&'static str> {
    Json("OK")
}

async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(format!("Method {} is not allowed on this route", method))
}
