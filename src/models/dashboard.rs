// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

// 1. Contagem por estado das unidades (os cards do topo)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusTally {
    pub operative: usize,
    pub prevention: usize,
    pub repair: usize,
    pub request: usize,
    pub total: usize,

    // round(100 * operative / total); 0 quando não há unidades.
    pub health_percentage: u32,
}

// 2. Contagem por estado das ferramentas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolTally {
    pub available: usize,
    pub in_use: usize,
    pub broken: usize,
}

// 3. Carga operacional por sede (ranking de atenção)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampusLoad {
    #[schema(example = "Sede Principal")]
    pub campus: String,

    pub total: usize,

    // Unidades em REPAIR ou REQUEST.
    pub critical: usize,
}

// Resumo combinado servido em /api/dashboard/summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub units: StatusTally,
    pub tools: ToolTally,
}
