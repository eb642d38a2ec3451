// src/models/tool.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolStatus {
    Available,
    InUse,
    Broken,
}

// ---
// Ferramenta com controle de empréstimo
// ---
// Invariante: assigned_to/assigned_date presentes SE E SOMENTE SE
// status == InUse. As transições vivem em services/tool_service.rs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: String,
    pub org_id: Uuid,

    #[schema(example = "Taladro Percutor Makita")]
    pub name: String,

    pub status: ToolStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Carlos Pérez")]
    pub assigned_to: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Tool {
    // Usado pelos testes e pelo serviço para validar o invariante
    // de empréstimo após cada transição.
    pub fn assignment_is_consistent(&self) -> bool {
        match self.status {
            ToolStatus::InUse => self.assigned_to.is_some() && self.assigned_date.is_some(),
            _ => self.assigned_to.is_none() && self.assigned_date.is_none(),
        }
    }
}
