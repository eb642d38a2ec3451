// src/handlers/sync.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;

use crate::{
    config::AppState,
    middleware::{auth::AuthenticatedRole, tenancy::OrgContext},
    models::sync::SyncOutcome,
};

// POST /api/sync/up — responde sempre 200; o resultado real vai no
// corpo (`success` + `message`), como o cliente espera.
#[utoipa::path(
    post,
    path = "/api/sync/up",
    tag = "Sync",
    params(("x-organization-id" = Uuid, Header, description = "ID de la organización")),
    responses((status = 200, description = "Resultado del envío", body = SyncOutcome)),
    security(("api_jwt" = []))
)]
pub async fn sync_up(
    State(app_state): State<AppState>,
    org: OrgContext,
    _role: AuthenticatedRole,
) -> impl IntoResponse {
    let outcome = app_state.sync_service.sync_up(org.0).await;
    (StatusCode::OK, Json(outcome))
}

// POST /api/sync/down — idem: falha vira `success: false`.
#[utoipa::path(
    post,
    path = "/api/sync/down",
    tag = "Sync",
    params(("x-organization-id" = Uuid, Header, description = "ID de la organización")),
    responses((status = 200, description = "Resultado de la descarga", body = SyncOutcome)),
    security(("api_jwt" = []))
)]
pub async fn sync_down(
    State(app_state): State<AppState>,
    org: OrgContext,
    _role: AuthenticatedRole,
) -> impl IntoResponse {
    let outcome = app_state.sync_service.sync_down(org.0).await;
    (StatusCode::OK, Json(outcome))
}
