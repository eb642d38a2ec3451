// src/handlers/units.rs

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::AuthenticatedRole, tenancy::OrgContext},
    models::unit::{
        CreateUnitPayload, IncidentReport, MaintenanceUnit, NewMaterialRequest, UnitPatch,
    },
    services::qr_service,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalPayload {
    pub approved: bool,
}

// GET /api/units
#[utoipa::path(
    get,
    path = "/api/units",
    tag = "Units",
    params(("x-organization-id" = Uuid, Header, description = "ID de la organización")),
    responses((status = 200, description = "Unidades de la organización", body = Vec<MaintenanceUnit>)),
    security(("api_jwt" = []))
)]
pub async fn list(
    State(app_state): State<AppState>,
    org: OrgContext,
    _role: AuthenticatedRole,
) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(app_state.unit_service.list(org.0)?)))
}

// POST /api/units — devolve a coleção atualizada (intacta se o papel
// não pode criar).
#[utoipa::path(
    post,
    path = "/api/units",
    tag = "Units",
    params(("x-organization-id" = Uuid, Header, description = "ID de la organización")),
    request_body = CreateUnitPayload,
    responses(
        (status = 200, description = "Colección de unidades", body = Vec<MaintenanceUnit>),
        (status = 400, description = "Payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create(
    State(app_state): State<AppState>,
    org: OrgContext,
    AuthenticatedRole(role): AuthenticatedRole,
    Json(payload): Json<CreateUnitPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let units = app_state.unit_service.create(org.0, role, &payload)?;
    Ok((StatusCode::OK, Json(units)))
}

// PATCH /api/units/{id}
#[utoipa::path(
    patch,
    path = "/api/units/{id}",
    tag = "Units",
    params(
        ("id" = String, Path, description = "ID de la unidad"),
        ("x-organization-id" = Uuid, Header, description = "ID de la organización")
    ),
    request_body = UnitPatch,
    responses(
        (status = 200, description = "La unidad (actualizada o intacta)", body = MaintenanceUnit),
        (status = 404, description = "Unidad no encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update(
    State(app_state): State<AppState>,
    org: OrgContext,
    AuthenticatedRole(role): AuthenticatedRole,
    Path(id): Path<String>,
    Json(patch): Json<UnitPatch>,
) -> Result<impl IntoResponse, AppError> {
    let unit = app_state.unit_service.update(org.0, role, &id, &patch)?;
    Ok((StatusCode::OK, Json(unit)))
}

// POST /api/units/{id}/incident — o fluxo do solicitante/QR.
#[utoipa::path(
    post,
    path = "/api/units/{id}/incident",
    tag = "Units",
    params(
        ("id" = String, Path, description = "ID de la unidad"),
        ("x-organization-id" = Uuid, Header, description = "ID de la organización")
    ),
    request_body = IncidentReport,
    responses(
        (status = 200, description = "Unidad en estado REQUEST", body = MaintenanceUnit),
        (status = 404, description = "Unidad no encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn report_incident(
    State(app_state): State<AppState>,
    org: OrgContext,
    AuthenticatedRole(role): AuthenticatedRole,
    Path(id): Path<String>,
    Json(report): Json<IncidentReport>,
) -> Result<impl IntoResponse, AppError> {
    let unit = app_state
        .unit_service
        .report_incident(org.0, role, &id, &report)?;
    Ok((StatusCode::OK, Json(unit)))
}

// POST /api/units/{id}/requests
#[utoipa::path(
    post,
    path = "/api/units/{id}/requests",
    tag = "Units",
    params(
        ("id" = String, Path, description = "ID de la unidad"),
        ("x-organization-id" = Uuid, Header, description = "ID de la organización")
    ),
    request_body = NewMaterialRequest,
    responses(
        (status = 200, description = "Unidad con la requisición agregada", body = MaintenanceUnit),
        (status = 404, description = "Unidad no encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_request(
    State(app_state): State<AppState>,
    org: OrgContext,
    AuthenticatedRole(role): AuthenticatedRole,
    Path(id): Path<String>,
    Json(payload): Json<NewMaterialRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let unit = app_state
        .unit_service
        .add_request(org.0, role, &id, &payload)?;
    Ok((StatusCode::OK, Json(unit)))
}

// PUT /api/units/{id}/requests/{requestId}/approval — só tesouraria
// (e admin) tem efeito; o resto recebe a unidade intacta.
#[utoipa::path(
    put,
    path = "/api/units/{id}/requests/{request_id}/approval",
    tag = "Units",
    params(
        ("id" = String, Path, description = "ID de la unidad"),
        ("request_id" = String, Path, description = "ID de la requisición"),
        ("x-organization-id" = Uuid, Header, description = "ID de la organización")
    ),
    request_body = ApprovalPayload,
    responses(
        (status = 200, description = "La unidad", body = MaintenanceUnit),
        (status = 404, description = "Unidad no encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_request_approval(
    State(app_state): State<AppState>,
    org: OrgContext,
    AuthenticatedRole(role): AuthenticatedRole,
    Path((id, request_id)): Path<(String, String)>,
    Json(payload): Json<ApprovalPayload>,
) -> Result<impl IntoResponse, AppError> {
    let unit = app_state.unit_service.set_request_approval(
        org.0,
        role,
        &id,
        &request_id,
        payload.approved,
    )?;
    Ok((StatusCode::OK, Json(unit)))
}

// GET /api/units/{id}/qr — PNG com a URL de reporte da unidade.
#[utoipa::path(
    get,
    path = "/api/units/{id}/qr",
    tag = "Units",
    params(
        ("id" = String, Path, description = "ID de la unidad"),
        ("x-organization-id" = Uuid, Header, description = "ID de la organización")
    ),
    responses(
        (status = 200, description = "QR de reporte (image/png)"),
        (status = 404, description = "Unidad no encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn qr(
    State(app_state): State<AppState>,
    org: OrgContext,
    _role: AuthenticatedRole,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    // Garante que a unidade existe antes de gerar o QR.
    let unit = app_state.unit_service.find(org.0, &id)?;
    let png = qr_service::incident_report_png(&app_state.app_origin, &unit.id)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/png")],
        png,
    ))
}
