// src/models/auth.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

// Os papéis do sistema. Enum fechado em vez de strings soltas:
// todo mutator consulta a tabela de capacidades (models/rbac.rs)
// em vez de re-derivar booleanos por chamada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Maintenance,
    Treasury,
    Solicitor,
    Viewer,
}

impl Role {
    // O nome usado como chave no mapa AuthData (e nas planilhas remotas).
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Maintenance => "MAINTENANCE",
            Role::Treasury => "TREASURY",
            Role::Solicitor => "SOLICITOR",
            Role::Viewer => "VIEWER",
        }
    }
}

// Mapa papel -> segredo compartilhado, em texto plano.
// Formato preservado por compatibilidade com o backend de planilhas
// (aba "Auth"); NÃO é uma recomendação de segurança.
pub type AuthData = BTreeMap<String, String>;

// Dados para login
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    pub role: Role,

    #[schema(example = "admin123")]
    pub secret: Option<String>,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub role: Role, // O papel autenticado
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}
