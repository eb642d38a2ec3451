// src/models/organization.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Plan {
    Free,
    Pro,
    Enterprise,
}

// ---
// A Organização (o "Tenant")
// ---
// Raiz do isolamento multi-tenant: toda coleção de domínio é
// namespaced pelo id dela no armazenamento local.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: Uuid,

    #[schema(example = "Colegio San Martín")]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    pub plan: Plan,

    // URL do endpoint de sincronização (Apps Script). A própria URL é o
    // único controle de acesso do lado remoto; sem ela não há sync.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "https://script.google.com/macros/s/XXXX/exec")]
    pub remote_endpoint: Option<String>,
}
