// src/db/seed.rs

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    auth::AuthData,
    tool::{Tool, ToolStatus},
    unit::{InventoryItem, ItemCondition, MaintenanceUnit, MaterialRequest, Status},
    warehouse::WarehouseItem,
};

// Dados de demonstração devolvidos quando uma organização ainda não
// gravou nada. São estampados com o org_id solicitante na leitura.

fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn initial_units(org_id: Uuid) -> Vec<MaintenanceUnit> {
    let now = Utc::now();
    vec![
        MaintenanceUnit {
            id: "1".into(),
            org_id,
            campus: "Sede Principal".into(),
            name: "Salón 3B - Matemáticas".into(),
            kind: "Aula".into(),
            description: "El aire acondicionado presenta goteo leve. Las sillas están en buen estado general.".into(),
            status: Status::Prevention,
            images: vec![
                "https://picsum.photos/id/1/800/800".into(),
                "https://picsum.photos/id/180/800/800".into(),
                "https://picsum.photos/id/20/800/800".into(),
            ],
            inventory: vec![
                inv("i1", "Sillas Estudiantes", 35, ItemCondition::Good),
                inv("i2", "Escritorio Profesor", 1, ItemCondition::Fair),
                inv("i3", "Aire Acondicionado", 2, ItemCondition::Fair),
                inv("i4", "Tablero Acrílico", 1, ItemCondition::Good),
            ],
            requests: vec![MaterialRequest {
                id: "r1".into(),
                item: "Filtro Aire Acondicionado".into(),
                quantity: 2,
                estimated_cost: Decimal::from(50_000),
                approved: false,
                date: d(2023, 10, 25),
            }],
            last_updated: now,
        },
        MaintenanceUnit {
            id: "2".into(),
            org_id,
            campus: "Sede Principal".into(),
            name: "Laboratorio de Química".into(),
            kind: "Laboratorio".into(),
            description: "Todo operativo. Se realizó limpieza profunda de mesones la semana pasada.".into(),
            status: Status::Operative,
            images: vec![
                "https://picsum.photos/id/2/800/800".into(),
                "https://picsum.photos/id/250/800/800".into(),
            ],
            inventory: vec![
                inv("i1", "Mesas de Trabajo", 8, ItemCondition::Good),
                inv("i2", "Grifos de Agua", 8, ItemCondition::Good),
                inv("i3", "Extintor", 1, ItemCondition::Good),
            ],
            requests: vec![],
            last_updated: now,
        },
        MaintenanceUnit {
            id: "3".into(),
            org_id,
            campus: "Sede Bachillerato".into(),
            name: "Baños Planta Baja".into(),
            kind: "Baño".into(),
            description: "Fuga importante en tubería principal. Se requiere cierre inmediato.".into(),
            status: Status::Repair,
            images: vec![
                "https://picsum.photos/id/3/800/800".into(),
                "https://picsum.photos/id/400/800/800".into(),
            ],
            inventory: vec![
                inv("i1", "Lavamanos", 4, ItemCondition::Fair),
                inv("i2", "Sanitarios", 5, ItemCondition::Poor),
            ],
            requests: vec![
                MaterialRequest {
                    id: "r1".into(),
                    item: "Tubo PVC 2\"".into(),
                    quantity: 3,
                    estimated_cost: Decimal::from(120_000),
                    approved: true,
                    date: d(2023, 10, 26),
                },
                MaterialRequest {
                    id: "r2".into(),
                    item: "Cemento Impermeabilizante".into(),
                    quantity: 1,
                    estimated_cost: Decimal::from(45_000),
                    approved: true,
                    date: d(2023, 10, 26),
                },
            ],
            last_updated: now,
        },
        MaintenanceUnit {
            id: "4".into(),
            org_id,
            campus: "Sede Bachillerato".into(),
            name: "Auditorio Principal".into(),
            kind: "Auditorio".into(),
            description: "Luces del escenario requieren cambio. Video Beam funcionando correctamente.".into(),
            status: Status::Prevention,
            images: vec![
                "https://picsum.photos/id/4/800/800".into(),
                "https://picsum.photos/id/450/800/800".into(),
            ],
            inventory: vec![
                inv("i1", "Sillas Auditorio", 120, ItemCondition::Good),
                inv("i2", "Video Beam", 1, ItemCondition::Good),
                inv("i3", "Sistema de Sonido", 1, ItemCondition::Fair),
            ],
            requests: vec![],
            last_updated: now,
        },
    ]
}

pub fn initial_campuses(org_id: Uuid) -> Vec<String> {
    // Derivadas das unidades de demonstração, preservando a ordem.
    let mut campuses: Vec<String> = Vec::new();
    for unit in initial_units(org_id) {
        if !campuses.contains(&unit.campus) {
            campuses.push(unit.campus);
        }
    }
    campuses
}

pub fn initial_tools(org_id: Uuid) -> Vec<Tool> {
    vec![
        Tool {
            id: "t1".into(),
            org_id,
            name: "Taladro Percutor Makita".into(),
            status: ToolStatus::Available,
            assigned_to: None,
            assigned_date: None,
            image: Some("https://picsum.photos/id/1/200/200".into()),
        },
        Tool {
            id: "t2".into(),
            org_id,
            name: "Escalera Tijera 3m".into(),
            status: ToolStatus::InUse,
            assigned_to: Some("Carlos Pérez".into()),
            assigned_date: Some(d(2023, 10, 27)),
            image: Some("https://picsum.photos/id/2/200/200".into()),
        },
        Tool {
            id: "t3".into(),
            org_id,
            name: "Kit Destornilladores".into(),
            status: ToolStatus::Available,
            assigned_to: None,
            assigned_date: None,
            image: Some("https://picsum.photos/id/3/200/200".into()),
        },
        Tool {
            id: "t4".into(),
            org_id,
            name: "Pulidora Industrial".into(),
            status: ToolStatus::Broken,
            assigned_to: None,
            assigned_date: None,
            image: Some("https://picsum.photos/id/4/200/200".into()),
        },
    ]
}

pub fn initial_warehouse(org_id: Uuid) -> Vec<WarehouseItem> {
    vec![
        wh("w1", org_id, "Pintura Blanca Tipo 1", "Pintura", 5, "Galón"),
        wh("w2", org_id, "Bombillo LED 12W", "Eléctrico", 24, "Unidad"),
        wh("w3", org_id, "Cinta Aislante", "Eléctrico", 10, "Rollo"),
        wh("w4", org_id, "Tubo PVC 1/2\"", "Plomería", 8, "Tubo"),
    ]
}

// Segredos padrão por papel. VIEWER e SOLICITOR entram sem segredo
// (o fluxo de QR força SOLICITOR sem login), então não aparecem aqui.
pub fn default_auth_data() -> AuthData {
    AuthData::from([
        ("ADMIN".to_string(), "admin123".to_string()),
        ("MAINTENANCE".to_string(), "mant2024".to_string()),
        ("TREASURY".to_string(), "teso2024".to_string()),
    ])
}

fn inv(id: &str, name: &str, quantity: u32, condition: ItemCondition) -> InventoryItem {
    InventoryItem { id: id.into(), name: name.into(), quantity, condition }
}

fn wh(id: &str, org_id: Uuid, name: &str, category: &str, quantity: u32, unit: &str) -> WarehouseItem {
    WarehouseItem {
        id: id.into(),
        org_id,
        name: name.into(),
        category: category.into(),
        quantity,
        unit: unit.into(),
    }
}
