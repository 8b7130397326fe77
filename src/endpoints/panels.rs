use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};

use crate::endpoints::extractors::QueryParams;
use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::models::{busbar, component, corepart, palet, panel};
use crate::services::{read_all_as, read_in_as, split_comma_list};
use crate::state::AppState;

pub fn panels_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_panels))
        .route("/{no_pp}", get(get_panel).delete(delete_panel))
        .with_state(state)
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PanelListParams {
    /// Comma-separated panel numbers
    pub ids: Option<String>,
    /// Only panels whose vendor list contains this company id
    pub vendor: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PanelDetail {
    #[serde(flatten)]
    pub panel: panel::Model,
    pub busbars: Vec<busbar::Model>,
    pub components: Vec<component::Model>,
    pub palet: Vec<palet::Model>,
    pub corepart: Vec<corepart::Model>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeletedResponse {
    pub deleted: String,
}

// ============================================================================
// Endpoints
// ============================================================================

#[utoipa::path(
    get,
    path = "/api/panels",
    tag = "Panels",
    params(PanelListParams),
    responses((status = 200, body = Vec<panel::Model>))
)]
pub async fn list_panels(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PanelListParams>,
) -> Result<Json<Vec<panel::Model>>> {
    let mut panels: Vec<panel::Model> = match params.ids.as_deref() {
        Some(ids) => read_in_as(&state.db, "no_pp", &split_comma_list(Some(ids))).await?,
        None => read_all_as(&state.db).await?,
    };

    if let Some(vendor) = params.vendor.as_deref() {
        panels.retain(|p| split_comma_list(p.vendor_id.as_deref()).iter().any(|v| v == vendor));
    }

    Ok(Json(panels))
}

/// A panel together with its vendor sub-assemblies
#[utoipa::path(
    get,
    path = "/api/panels/{no_pp}",
    tag = "Panels",
    params(("no_pp" = String, Path, description = "Panel number")),
    responses(
        (status = 200, body = PanelDetail),
        (status = 404, description = "Panel not found")
    )
)]
pub async fn get_panel(
    State(state): State<AppState>,
    Path(no_pp): Path<String>,
) -> Result<Json<PanelDetail>> {
    let ids = vec![no_pp];

    let panel = read_in_as::<panel::Model, _>(&state.db, "no_pp", &ids)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound(format!("Panel '{}' not found", ids[0])))?;

    Ok(Json(PanelDetail {
        panel,
        busbars: read_in_as(&state.db, "panel_no_pp", &ids).await?,
        components: read_in_as(&state.db, "panel_no_pp", &ids).await?,
        palet: read_in_as(&state.db, "panel_no_pp", &ids).await?,
        corepart: read_in_as(&state.db, "panel_no_pp", &ids).await?,
    }))
}

/// Delete a panel; its sub-assemblies go with it
#[utoipa::path(
    delete,
    path = "/api/panels/{no_pp}",
    tag = "Panels",
    params(("no_pp" = String, Path, description = "Panel number")),
    responses(
        (status = 200, body = DeletedResponse),
        (status = 404, description = "Panel not found")
    )
)]
pub async fn delete_panel(
    State(state): State<AppState>,
    Path(no_pp): Path<String>,
) -> Result<Json<DeletedResponse>> {
    let result = Panel::delete_by_id(no_pp.clone()).exec(&state.db).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound(format!("Panel '{}' not found", no_pp)));
    }

    tracing::info!("Deleted panel {}", no_pp);
    Ok(Json(DeletedResponse { deleted: no_pp }))
}
