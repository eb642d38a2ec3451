// src/handlers/campuses.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::AuthenticatedRole, tenancy::OrgContext},
    models::unit::MaintenanceUnit,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampusPayload {
    #[validate(length(min = 1, message = "El nombre de la sede es obligatorio."))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameCampusPayload {
    #[validate(length(min = 1, message = "El nuevo nombre es obligatorio."))]
    pub new_name: String,
}

// Renomear/apagar sedes cascateia para as unidades, então a resposta
// carrega as duas coleções atualizadas.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampusesWithUnits {
    pub campuses: Vec<String>,
    pub units: Vec<MaintenanceUnit>,
}

// GET /api/campuses
#[utoipa::path(
    get,
    path = "/api/campuses",
    tag = "Campuses",
    params(("x-organization-id" = Uuid, Header, description = "ID de la organización")),
    responses((status = 200, description = "Sedes de la organización", body = Vec<String>)),
    security(("api_jwt" = []))
)]
pub async fn list(
    State(app_state): State<AppState>,
    org: OrgContext,
    _role: AuthenticatedRole,
) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(app_state.campus_service.list(org.0)?)))
}

// POST /api/campuses
#[utoipa::path(
    post,
    path = "/api/campuses",
    tag = "Campuses",
    params(("x-organization-id" = Uuid, Header, description = "ID de la organización")),
    request_body = CampusPayload,
    responses((status = 200, description = "Lista de sedes", body = Vec<String>)),
    security(("api_jwt" = []))
)]
pub async fn add(
    State(app_state): State<AppState>,
    org: OrgContext,
    AuthenticatedRole(role): AuthenticatedRole,
    Json(payload): Json<CampusPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let campuses = app_state.campus_service.add(org.0, role, &payload.name)?;
    Ok((StatusCode::OK, Json(campuses)))
}

// PUT /api/campuses/{name}
#[utoipa::path(
    put,
    path = "/api/campuses/{name}",
    tag = "Campuses",
    params(
        ("name" = String, Path, description = "Nombre actual de la sede"),
        ("x-organization-id" = Uuid, Header, description = "ID de la organización")
    ),
    request_body = RenameCampusPayload,
    responses(
        (status = 200, description = "Sedes y unidades actualizadas", body = CampusesWithUnits),
        (status = 404, description = "Sede no encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn rename(
    State(app_state): State<AppState>,
    org: OrgContext,
    AuthenticatedRole(role): AuthenticatedRole,
    Path(name): Path<String>,
    Json(payload): Json<RenameCampusPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let (campuses, units) = app_state
        .campus_service
        .rename(org.0, role, &name, &payload.new_name)?;
    Ok((StatusCode::OK, Json(CampusesWithUnits { campuses, units })))
}

// DELETE /api/campuses/{name} — apaga também as unidades da sede.
#[utoipa::path(
    delete,
    path = "/api/campuses/{name}",
    tag = "Campuses",
    params(
        ("name" = String, Path, description = "Nombre de la sede"),
        ("x-organization-id" = Uuid, Header, description = "ID de la organización")
    ),
    responses((status = 200, description = "Sedes y unidades restantes", body = CampusesWithUnits)),
    security(("api_jwt" = []))
)]
pub async fn delete(
    State(app_state): State<AppState>,
    org: OrgContext,
    AuthenticatedRole(role): AuthenticatedRole,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (campuses, units) = app_state.campus_service.delete(org.0, role, &name)?;
    Ok((StatusCode::OK, Json(CampusesWithUnits { campuses, units })))
}
