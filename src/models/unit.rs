// src/models/unit.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// Máximo de fotos por unidade (carrossel da ficha).
pub const MAX_UNIT_IMAGES: usize = 5;

// O estado operacional de um espaço físico. Qualquer papel autorizado
// pode saltar para qualquer valor; não há grafo de transições.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Operative,  // Azul
    Prevention, // Naranja
    Repair,     // Rojo
    Request,    // Púrpura
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ItemCondition {
    Good,
    Fair,
    Poor,
}

// Item do inventário de UMA unidade (filho direto; só é editado
// através do fluxo de edição daquela unidade).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,

    #[schema(example = "Sillas Estudiantes")]
    pub name: String,

    pub quantity: u32,
    pub condition: ItemCondition,
}

// Requisição de material com custo estimado. `approved` é o ÚNICO
// campo que a tesouraria mexe; o resto é fixado na criação.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRequest {
    pub id: String,

    #[schema(example = "Filtro Aire Acondicionado")]
    pub item: String,

    pub quantity: u32,

    #[schema(example = 50000.0)]
    pub estimated_cost: Decimal,

    pub approved: bool,
    pub date: NaiveDate,
}

// ---
// A Unidade de Manutenção (salão, laboratório, baño...)
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceUnit {
    pub id: String,
    pub org_id: Uuid,

    #[schema(example = "Sede Principal")]
    pub campus: String,

    #[schema(example = "Salón 3B - Matemáticas")]
    pub name: String,

    #[serde(rename = "type")]
    #[schema(example = "Aula")]
    pub kind: String,

    pub description: String,
    pub status: Status,

    // Data URIs ou URLs; no máximo MAX_UNIT_IMAGES.
    pub images: Vec<String>,

    pub inventory: Vec<InventoryItem>,
    pub requests: Vec<MaterialRequest>,

    // Re-estampado a cada mutação aceita na unidade OU em seus filhos.
    pub last_updated: DateTime<Utc>,
}

// ---
// Patch parcial de uma unidade (edição da ficha)
// ---
// Cada campo é verificado contra a tabela de capacidades
// individualmente; campos não autorizados são ignorados em silêncio.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitPatch {
    pub status: Option<Status>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub inventory: Option<Vec<InventoryItem>>,
}

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("El costo no puede ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// Dados para criar uma nova unidade.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUnitPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    #[schema(example = "Salón 101")]
    pub name: String,

    #[validate(length(min = 1, message = "La sede es obligatoria."))]
    #[schema(example = "Sede Principal")]
    pub campus: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "El tipo es obligatorio."))]
    #[schema(example = "Aula")]
    pub kind: String,

    pub description: Option<String>,
}

// Nova requisição de material (criada por manutenção/admin).
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewMaterialRequest {
    #[validate(length(min = 1, message = "El material es obligatorio."))]
    #[schema(example = "Tubo PVC 2\"")]
    pub item: String,

    #[validate(range(min = 1, message = "La cantidad debe ser mayor que cero."))]
    pub quantity: u32,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(example = 120000.0)]
    pub estimated_cost: Decimal,
}

// Reporte de incidente (fluxo do solicitante / QR).
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IncidentReport {
    #[schema(example = "Fuga de agua en el lavamanos.")]
    pub description: Option<String>,

    // Foto opcional anexada ao reporte.
    pub image: Option<String>,
}
