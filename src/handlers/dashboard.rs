// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::AuthenticatedRole, tenancy::OrgContext},
    models::{dashboard::DashboardSummary, warehouse::WarehouseItem},
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    params(("x-organization-id" = Uuid, Header, description = "ID de la organización")),
    responses((status = 200, description = "Resumen de unidades y herramientas", body = DashboardSummary)),
    security(("api_jwt" = []))
)]
pub async fn summary(
    State(app_state): State<AppState>,
    org: OrgContext,
    _role: AuthenticatedRole,
) -> Result<impl IntoResponse, AppError> {
    Ok((
        StatusCode::OK,
        Json(app_state.dashboard_service.summary(org.0)?),
    ))
}

// GET /api/dashboard/low-stock
#[utoipa::path(
    get,
    path = "/api/dashboard/low-stock",
    tag = "Dashboard",
    params(("x-organization-id" = Uuid, Header, description = "ID de la organización")),
    responses((status = 200, description = "Ítems con stock bajo", body = Vec<WarehouseItem>)),
    security(("api_jwt" = []))
)]
pub async fn low_stock(
    State(app_state): State<AppState>,
    org: OrgContext,
    _role: AuthenticatedRole,
) -> Result<impl IntoResponse, AppError> {
    Ok((
        StatusCode::OK,
        Json(app_state.dashboard_service.low_stock(org.0)?),
    ))
}

// GET /api/dashboard/campus-load
#[utoipa::path(
    get,
    path = "/api/dashboard/campus-load",
    tag = "Dashboard",
    params(("x-organization-id" = Uuid, Header, description = "ID de la organización")),
    responses((status = 200, description = "Carga de mantenimiento por sede", body = Vec<crate::models::dashboard::CampusLoad>)),
    security(("api_jwt" = []))
)]
pub async fn campus_load(
    State(app_state): State<AppState>,
    org: OrgContext,
    _role: AuthenticatedRole,
) -> Result<impl IntoResponse, AppError> {
    Ok((
        StatusCode::OK,
        Json(app_state.dashboard_service.campus_load(org.0)?),
    ))
}
