// src/handlers/organizations.rs

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
    middleware::auth::AuthenticatedRole,
    models::{
        organization::{Organization, Plan},
        rbac::Action,
    },
};

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOrganizationPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    #[schema(example = "Colegio San Martín")]
    pub name: String,

    pub logo_url: Option<String>,

    pub plan: Option<Plan>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrganizationSettingsPayload {
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub plan: Option<Plan>,

    // URL do endpoint de sincronização. Só o ADMIN configura.
    #[schema(example = "https://script.google.com/macros/s/XXXX/exec")]
    pub remote_endpoint: Option<String>,
}

// ---
// Handlers
// ---

// POST /api/orgs — registro público (cria o tenant).
#[utoipa::path(
    post,
    path = "/api/orgs",
    tag = "Organizations",
    request_body = RegisterOrganizationPayload,
    responses(
        (status = 201, description = "Organización registrada", body = Organization),
        (status = 400, description = "Payload inválido")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterOrganizationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let org = Organization {
        id: Uuid::new_v4(),
        name: payload.name,
        logo_url: payload.logo_url,
        plan: payload.plan.unwrap_or(Plan::Free),
        remote_endpoint: None,
    };
    app_state.store.upsert_organization(&org)?;
    tracing::info!("🏢 Organização registrada: {} ({})", org.name, org.id);

    Ok((StatusCode::CREATED, Json(org)))
}

// GET /api/orgs
#[utoipa::path(
    get,
    path = "/api/orgs",
    tag = "Organizations",
    responses(
        (status = 200, description = "Registro de organizaciones", body = Vec<Organization>)
    )
)]
pub async fn list(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(app_state.store.organizations()?)))
}

// GET /api/orgs/{id}
#[utoipa::path(
    get,
    path = "/api/orgs/{id}",
    tag = "Organizations",
    params(("id" = Uuid, Path, description = "ID de la organización")),
    responses(
        (status = 200, description = "La organización", body = Organization),
        (status = 404, description = "No encontrada")
    )
)]
pub async fn get_one(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let org = app_state
        .store
        .find_organization(id)?
        .ok_or(AppError::OrganizationNotFound)?;
    Ok((StatusCode::OK, Json(org)))
}

// PUT /api/orgs/{id}/settings — mutator gateado: papel sem
// ConfigureOrganization recebe a organização intacta (no-op).
#[utoipa::path(
    put,
    path = "/api/orgs/{id}/settings",
    tag = "Organizations",
    params(("id" = Uuid, Path, description = "ID de la organización")),
    request_body = UpdateOrganizationSettingsPayload,
    responses(
        (status = 200, description = "Organización (actualizada o intacta)", body = Organization),
        (status = 404, description = "No encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_settings(
    State(app_state): State<AppState>,
    AuthenticatedRole(role): AuthenticatedRole,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrganizationSettingsPayload>,
) -> Result<impl IntoResponse, AppError> {
    let mut org = app_state
        .store
        .find_organization(id)?
        .ok_or(AppError::OrganizationNotFound)?;

    if role.allows(Action::ConfigureOrganization) {
        if let Some(name) = payload.name {
            org.name = name;
        }
        if let Some(logo_url) = payload.logo_url {
            org.logo_url = Some(logo_url);
        }
        if let Some(plan) = payload.plan {
            org.plan = plan;
        }
        if let Some(remote_endpoint) = payload.remote_endpoint {
            org.remote_endpoint = Some(remote_endpoint.trim().to_string());
        }
        app_state.store.upsert_organization(&org)?;
    }

    Ok((StatusCode::OK, Json(org)))
}
