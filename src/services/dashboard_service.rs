// src/services/dashboard_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::LocalStore,
    models::{
        dashboard::{CampusLoad, DashboardSummary, StatusTally, ToolTally},
        tool::{Tool, ToolStatus},
        unit::{MaintenanceUnit, Status},
        warehouse::WarehouseItem,
    },
};

// Limiar canônico do alerta de estoque baixo (o produto oscilava
// entre 3 e 5; fixamos 5, o valor mais comum).
pub const LOW_STOCK_THRESHOLD: u32 = 5;

// ---
// Agregações puras sobre o snapshot em memória
// ---
// Todas totais e determinísticas: mesma entrada, mesma saída.

pub fn status_tally(units: &[MaintenanceUnit]) -> StatusTally {
    let mut tally = StatusTally {
        operative: 0,
        prevention: 0,
        repair: 0,
        request: 0,
        total: units.len(),
        health_percentage: 0,
    };
    for unit in units {
        match unit.status {
            Status::Operative => tally.operative += 1,
            Status::Prevention => tally.prevention += 1,
            Status::Repair => tally.repair += 1,
            Status::Request => tally.request += 1,
        }
    }
    if tally.total > 0 {
        tally.health_percentage =
            ((100.0 * tally.operative as f64) / tally.total as f64).round() as u32;
    }
    tally
}

// Subconjunto com quantity < threshold, preservando a ordem de entrada.
pub fn low_stock(warehouse: &[WarehouseItem], threshold: u32) -> Vec<WarehouseItem> {
    warehouse
        .iter()
        .filter(|item| item.quantity < threshold)
        .cloned()
        .collect()
}

pub fn tool_tally(tools: &[Tool]) -> ToolTally {
    let mut tally = ToolTally { available: 0, in_use: 0, broken: 0 };
    for tool in tools {
        match tool.status {
            ToolStatus::Available => tally.available += 1,
            ToolStatus::InUse => tally.in_use += 1,
            ToolStatus::Broken => tally.broken += 1,
        }
    }
    tally
}

// Ranking de sedes por carga operacional: críticas (REPAIR/REQUEST)
// primeiro. Ordenação estável: empates mantêm a ordem das sedes.
pub fn per_campus_load(units: &[MaintenanceUnit], campuses: &[String]) -> Vec<CampusLoad> {
    let mut loads: Vec<CampusLoad> = campuses
        .iter()
        .map(|campus| {
            let in_campus = units.iter().filter(|u| &u.campus == campus);
            let mut total = 0;
            let mut critical = 0;
            for unit in in_campus {
                total += 1;
                if matches!(unit.status, Status::Repair | Status::Request) {
                    critical += 1;
                }
            }
            CampusLoad { campus: campus.clone(), total, critical }
        })
        .collect();

    loads.sort_by(|a, b| b.critical.cmp(&a.critical));
    loads
}

// ---
// Serviço (lê apenas o snapshot local)
// ---

#[derive(Clone)]
pub struct DashboardService {
    store: LocalStore,
}

impl DashboardService {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn summary(&self, org_id: Uuid) -> Result<DashboardSummary, AppError> {
        Ok(DashboardSummary {
            units: status_tally(&self.store.units(org_id)?),
            tools: tool_tally(&self.store.tools(org_id)?),
        })
    }

    pub fn low_stock(&self, org_id: Uuid) -> Result<Vec<WarehouseItem>, AppError> {
        Ok(low_stock(&self.store.warehouse(org_id)?, LOW_STOCK_THRESHOLD))
    }

    pub fn campus_load(&self, org_id: Uuid) -> Result<Vec<CampusLoad>, AppError> {
        Ok(per_campus_load(
            &self.store.units(org_id)?,
            &self.store.campuses(org_id)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn unit(campus: &str, status: Status) -> MaintenanceUnit {
        MaintenanceUnit {
            id: Uuid::new_v4().to_string(),
            org_id: Uuid::new_v4(),
            campus: campus.into(),
            name: "x".into(),
            kind: "Aula".into(),
            description: String::new(),
            status,
            images: vec![],
            inventory: vec![],
            requests: vec![],
            last_updated: Utc::now(),
        }
    }

    fn wh_item(id: &str, quantity: u32) -> WarehouseItem {
        WarehouseItem {
            id: id.into(),
            org_id: Uuid::new_v4(),
            name: id.into(),
            category: "Pintura".into(),
            quantity,
            unit: "Unidad".into(),
        }
    }

    #[test]
    fn tally_vazio_sem_divisao_por_zero() {
        let tally = status_tally(&[]);
        assert_eq!(tally.total, 0);
        assert_eq!(tally.health_percentage, 0);
    }

    #[test]
    fn tally_todo_operativo_da_cem() {
        let units = vec![unit("A", Status::Operative), unit("A", Status::Operative)];
        let tally = status_tally(&units);
        assert_eq!(tally.health_percentage, 100);
        assert_eq!(tally.operative, 2);
    }

    #[test]
    fn tally_arredonda() {
        // 1 de 3 operativa -> 33%.
        let units = vec![
            unit("A", Status::Operative),
            unit("A", Status::Repair),
            unit("A", Status::Request),
        ];
        let tally = status_tally(&units);
        assert_eq!(tally.health_percentage, 33);
        assert_eq!(tally.repair, 1);
        assert_eq!(tally.request, 1);
    }

    #[test]
    fn estoque_baixo_preserva_ordem() {
        let items = vec![wh_item("a", 2), wh_item("b", 9), wh_item("c", 4), wh_item("d", 5)];
        let low = low_stock(&items, 5);

        // Exatamente o subconjunto < 5, na ordem de entrada.
        assert_eq!(low.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(), vec!["a", "c"]);
        assert!(low_stock(&[], 5).is_empty());
    }

    #[test]
    fn contagem_de_ferramentas() {
        let org = Uuid::new_v4();
        let tools = crate::db::seed::initial_tools(org);
        let tally = tool_tally(&tools);
        assert_eq!(tally, ToolTally { available: 2, in_use: 1, broken: 1 });
    }

    #[test]
    fn ranking_por_carga_critica() {
        let campuses = vec!["Norte".to_string(), "Sur".to_string(), "Centro".to_string()];
        let units = vec![
            unit("Norte", Status::Operative),
            unit("Sur", Status::Repair),
            unit("Sur", Status::Request),
            unit("Centro", Status::Prevention),
        ];

        let loads = per_campus_load(&units, &campuses);
        assert_eq!(loads[0].campus, "Sur");
        assert_eq!(loads[0].critical, 2);
        // Empate em zero críticas: ordem original das sedes.
        assert_eq!(loads[1].campus, "Norte");
        assert_eq!(loads[2].campus, "Centro");
        // Sede sem unidades aparece zerada.
        assert_eq!(loads[1].total, 1);
    }
}
