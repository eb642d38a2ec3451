// src/handlers/warehouse.rs

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
    models::warehouse::WarehouseItem,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWarehouseItemPayload {
    #[validate(length(min = 1, message = "El nombre del ítem es obligatorio."))]
    pub name: String,
    #[validate(length(min = 1, message = "La categoría es obligatoria."))]
    pub category: String,
    pub quantity: u32,
    #[validate(length(min = 1, message = "La unidad de medida es obligatoria."))]
    pub unit: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuantityPayload {
    pub quantity: u32,
}

// GET /api/warehouse
#[utoipa::path(
    get,
    path = "/api/warehouse",
    tag = "Warehouse",
    params(("x-organization-id" = Uuid, Header, description = "ID de la organización")),
    responses((status = 200, description = "Ítems del almacén", body = Vec<WarehouseItem>)),
    security(("api_jwt" = []))
)]
pub async fn list(
    State(app_state): State<AppState>,
    org: OrgContext,
    _role: AuthenticatedRole,
) -> Result<impl IntoResponse, AppError> {
    Ok((
        StatusCode::OK,
        Json(app_state.warehouse_service.list(org.0)?),
    ))
}

// POST /api/warehouse
#[utoipa::path(
    post,
    path = "/api/warehouse",
    tag = "Warehouse",
    params(("x-organization-id" = Uuid, Header, description = "ID de la organización")),
    request_body = CreateWarehouseItemPayload,
    responses((status = 200, description = "Colección del almacén", body = Vec<WarehouseItem>)),
    security(("api_jwt" = []))
)]
pub async fn create(
    State(app_state): State<AppState>,
    org: OrgContext,
    AuthenticatedRole(role): AuthenticatedRole,
    Json(payload): Json<CreateWarehouseItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let items = app_state.warehouse_service.add(
        org.0,
        role,
        &payload.name,
        &payload.category,
        payload.quantity,
        &payload.unit,
    )?;
    Ok((StatusCode::OK, Json(items)))
}

// PUT /api/warehouse/{id}/quantity
#[utoipa::path(
    put,
    path = "/api/warehouse/{id}/quantity",
    tag = "Warehouse",
    params(
        ("id" = String, Path, description = "ID del ítem"),
        ("x-organization-id" = Uuid, Header, description = "ID de la organización")
    ),
    request_body = QuantityPayload,
    responses(
        (status = 200, description = "El ítem", body = WarehouseItem),
        (status = 404, description = "Ítem no encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_quantity(
    State(app_state): State<AppState>,
    org: OrgContext,
    AuthenticatedRole(role): AuthenticatedRole,
    Path(id): Path<String>,
    Json(payload): Json<QuantityPayload>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state
        .warehouse_service
        .set_quantity(org.0, role, &id, payload.quantity)?;
    Ok((StatusCode::OK, Json(item)))
}
