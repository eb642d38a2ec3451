// src/handlers/admin.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::AuthenticatedRole, tenancy::OrgContext},
    models::auth::Role,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPayload {
    // Trava de segurança: sem `"confirm": true` explícito, nada acontece.
    pub confirm: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    pub message: String,
}

// POST /api/admin/reset — volta a organização ao estado semeado.
// Só ADMIN; irreversível.
#[utoipa::path(
    post,
    path = "/api/admin/reset",
    tag = "Admin",
    params(("x-organization-id" = Uuid, Header, description = "ID de la organización")),
    request_body = ResetPayload,
    responses(
        (status = 200, description = "Datos restablecidos", body = ResetResponse),
        (status = 400, description = "Falta la confirmación explícita")
    ),
    security(("api_jwt" = []))
)]
pub async fn reset(
    State(app_state): State<AppState>,
    org: OrgContext,
    AuthenticatedRole(role): AuthenticatedRole,
    Json(payload): Json<ResetPayload>,
) -> Result<impl IntoResponse, AppError> {
    if role != Role::Admin {
        return Err(AppError::InvalidToken);
    }
    if !payload.confirm {
        return Err(AppError::InvalidInput(
            "Se requiere la confirmación explícita para restablecer los datos.".to_string(),
        ));
    }

    app_state.store.reset_org(org.0)?;
    tracing::warn!("🗑️ Organização {} restaurada ao estado inicial.", org.0);
    Ok((
        StatusCode::OK,
        Json(ResetResponse {
            message: "Los datos de la organización fueron restablecidos.".to_string(),
        }),
    ))
}

// POST /api/admin/factory-reset — apaga TUDO: todas as organizações,
// o registro e os segredos. Não exige X-Organization-Id porque o alvo
// é o armazenamento inteiro.
#[utoipa::path(
    post,
    path = "/api/admin/factory-reset",
    tag = "Admin",
    request_body = ResetPayload,
    responses(
        (status = 200, description = "Almacenamiento vaciado", body = ResetResponse),
        (status = 400, description = "Falta la confirmación explícita")
    ),
    security(("api_jwt" = []))
)]
pub async fn factory_reset(
    State(app_state): State<AppState>,
    AuthenticatedRole(role): AuthenticatedRole,
    Json(payload): Json<ResetPayload>,
) -> Result<impl IntoResponse, AppError> {
    if role != Role::Admin {
        return Err(AppError::InvalidToken);
    }
    if !payload.confirm {
        return Err(AppError::InvalidInput(
            "Se requiere la confirmación explícita para restablecer los datos.".to_string(),
        ));
    }

    let removed = app_state.store.reset_all()?;
    Ok((
        StatusCode::OK,
        Json(ResetResponse {
            message: format!("Almacenamiento restablecido ({} claves eliminadas).", removed),
        }),
    ))
}
