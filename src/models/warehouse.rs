// src/models/warehouse.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Item do almacén central (estoque compartilhado da organização).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseItem {
    pub id: String,
    pub org_id: Uuid,

    #[schema(example = "Pintura Blanca Tipo 1")]
    pub name: String,

    #[schema(example = "Pintura")]
    pub category: String,

    pub quantity: u32,

    #[schema(example = "Galón")]
    pub unit: String,
}
