// src/middleware/tenancy.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState};

// O nome do nosso cabeçalho HTTP customizado. Não existe mais um
// "organização atual" ambiente: todo acesso namespaced vem com o id
// explícito da organização.
const ORG_ID_HEADER: &str = "x-organization-id";

// O contexto da organização que o utilizador quer aceder.
#[derive(Debug, Clone, Copy)]
pub struct OrgContext(pub Uuid);

// Middleware: lê o cabeçalho, valida que a organização existe no
// registro local e injeta o contexto na requisição.
pub async fn org_guard(
    State(app_state): State<AppState>,
    mut request: axum::extract::Request,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = request
        .headers()
        .get(ORG_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            AppError::InvalidInput("El encabezado X-Organization-Id es obligatorio.".into())
        })?;

    let org_id = Uuid::parse_str(header_value).map_err(|_| {
        AppError::InvalidInput("El encabezado X-Organization-Id no es un UUID válido.".into())
    })?;

    if app_state.store.find_organization(org_id)?.is_none() {
        return Err(AppError::OrganizationNotFound);
    }

    request.extensions_mut().insert(OrgContext(org_id));
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for OrgContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<OrgContext>().copied().ok_or_else(|| {
            AppError::InvalidInput("Contexto de organización no encontrado.".into())
        })
    }
}
