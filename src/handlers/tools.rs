// src/handlers/tools.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
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
    models::tool::Tool,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateToolPayload {
    #[validate(length(min = 1, message = "El nombre de la herramienta es obligatorio."))]
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    #[validate(length(min = 1, message = "El nombre del responsable es obligatorio."))]
    pub assignee: String,
}

// GET /api/tools
#[utoipa::path(
    get,
    path = "/api/tools",
    tag = "Tools",
    params(("x-organization-id" = Uuid, Header, description = "ID de la organización")),
    responses((status = 200, description = "Herramientas de la organización", body = Vec<Tool>)),
    security(("api_jwt" = []))
)]
pub async fn list(
    State(app_state): State<AppState>,
    org: OrgContext,
    _role: AuthenticatedRole,
) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(app_state.tool_service.list(org.0)?)))
}

// POST /api/tools
#[utoipa::path(
    post,
    path = "/api/tools",
    tag = "Tools",
    params(("x-organization-id" = Uuid, Header, description = "ID de la organización")),
    request_body = CreateToolPayload,
    responses((status = 200, description = "Colección de herramientas", body = Vec<Tool>)),
    security(("api_jwt" = []))
)]
pub async fn create(
    State(app_state): State<AppState>,
    org: OrgContext,
    AuthenticatedRole(role): AuthenticatedRole,
    Json(payload): Json<CreateToolPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let tools = app_state
        .tool_service
        .add(org.0, role, &payload.name, payload.image)?;
    Ok((StatusCode::OK, Json(tools)))
}

// POST /api/tools/{id}/checkout
#[utoipa::path(
    post,
    path = "/api/tools/{id}/checkout",
    tag = "Tools",
    params(
        ("id" = String, Path, description = "ID de la herramienta"),
        ("x-organization-id" = Uuid, Header, description = "ID de la organización")
    ),
    request_body = CheckoutPayload,
    responses(
        (status = 200, description = "La herramienta", body = Tool),
        (status = 400, description = "Herramienta no disponible"),
        (status = 404, description = "Herramienta no encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn checkout(
    State(app_state): State<AppState>,
    org: OrgContext,
    AuthenticatedRole(role): AuthenticatedRole,
    Path(id): Path<String>,
    Json(payload): Json<CheckoutPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let tool = app_state
        .tool_service
        .checkout(org.0, role, &id, &payload.assignee)?;
    Ok((StatusCode::OK, Json(tool)))
}

// POST /api/tools/{id}/return
#[utoipa::path(
    post,
    path = "/api/tools/{id}/return",
    tag = "Tools",
    params(
        ("id" = String, Path, description = "ID de la herramienta"),
        ("x-organization-id" = Uuid, Header, description = "ID de la organización")
    ),
    responses(
        (status = 200, description = "La herramienta", body = Tool),
        (status = 404, description = "Herramienta no encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn return_tool(
    State(app_state): State<AppState>,
    org: OrgContext,
    AuthenticatedRole(role): AuthenticatedRole,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tool = app_state.tool_service.return_tool(org.0, role, &id)?;
    Ok((StatusCode::OK, Json(tool)))
}

// POST /api/tools/{id}/report-broken
#[utoipa::path(
    post,
    path = "/api/tools/{id}/report-broken",
    tag = "Tools",
    params(
        ("id" = String, Path, description = "ID de la herramienta"),
        ("x-organization-id" = Uuid, Header, description = "ID de la organización")
    ),
    responses(
        (status = 200, description = "La herramienta", body = Tool),
        (status = 404, description = "Herramienta no encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn report_broken(
    State(app_state): State<AppState>,
    org: OrgContext,
    AuthenticatedRole(role): AuthenticatedRole,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tool = app_state.tool_service.report_broken(org.0, role, &id)?;
    Ok((StatusCode::OK, Json(tool)))
}

// POST /api/tools/{id}/repair-complete
#[utoipa::path(
    post,
    path = "/api/tools/{id}/repair-complete",
    tag = "Tools",
    params(
        ("id" = String, Path, description = "ID de la herramienta"),
        ("x-organization-id" = Uuid, Header, description = "ID de la organización")
    ),
    responses(
        (status = 200, description = "La herramienta", body = Tool),
        (status = 404, description = "Herramienta no encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn repair_complete(
    State(app_state): State<AppState>,
    org: OrgContext,
    AuthenticatedRole(role): AuthenticatedRole,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tool = app_state.tool_service.repair_complete(org.0, role, &id)?;
    Ok((StatusCode::OK, Json(tool)))
}
