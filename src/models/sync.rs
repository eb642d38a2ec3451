// src/models/sync.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{
    auth::AuthData, tool::Tool, unit::MaintenanceUnit, warehouse::WarehouseItem,
};

// O snapshot COMPLETO de uma organização como viaja pelo fio.
// Não há diff nem merge: o sync empurra/puxa coleções inteiras.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncData {
    #[serde(default)]
    pub units: Vec<MaintenanceUnit>,

    #[serde(default)]
    pub campuses: Vec<String>,

    #[serde(default)]
    pub tools: Vec<Tool>,

    #[serde(default)]
    pub warehouse: Vec<WarehouseItem>,

    // Segredos por papel, em texto plano (compatibilidade com a aba
    // "Auth" da planilha remota).
    #[serde(default)]
    pub auth: AuthData,
}

// Corpo do POST de subida.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncEnvelope {
    pub timestamp: DateTime<Utc>,

    // Sempre "SYNC_UP".
    pub action: String,

    pub org_id: Uuid,
    pub data: SyncData,
}

// O que o endpoint remoto responde, tanto no POST quanto no GET.
// Tudo opcional: um corpo não-JSON ou incompleto não derruba nada.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteReply {
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub data: Option<SyncData>,
}

// Resultado de qualquer operação de sync, entregue ao chamador.
// Nunca um Err: toda falha vira `{ success: false, message }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    pub success: bool,
    pub message: String,
}

impl SyncOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into() }
    }
}
