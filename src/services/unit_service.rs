// src/services/unit_service.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::LocalStore,
    models::{
        auth::Role,
        rbac::Action,
        unit::{
            CreateUnitPayload, IncidentReport, MaintenanceUnit, MaterialRequest,
            NewMaterialRequest, Status, UnitPatch, MAX_UNIT_IMAGES,
        },
    },
};

// ---
// Mutators puros
// ---
// Contrato: (entidade, papel, patch) -> entidade. Papel não autorizado
// devolve a entidade INTACTA (sem erro e sem re-estampar last_updated).
// Qualquer mutação aceita na unidade ou nos filhos re-estampa o pai.

pub fn apply_unit_patch(
    mut unit: MaintenanceUnit,
    role: Role,
    patch: &UnitPatch,
) -> Result<MaintenanceUnit, AppError> {
    let mut changed = false;

    if let Some(status) = patch.status {
        if role.allows(Action::ChangeUnitStatus) {
            unit.status = status;
            changed = true;
        }
    }

    if role.allows(Action::EditUnitDetails) {
        if let Some(description) = &patch.description {
            unit.description = description.clone();
            changed = true;
        }
        if let Some(images) = &patch.images {
            if images.len() > MAX_UNIT_IMAGES {
                return Err(AppError::InvalidInput(format!(
                    "Máximo {} imágenes por unidad.",
                    MAX_UNIT_IMAGES
                )));
            }
            unit.images = images.clone();
            changed = true;
        }
    }

    if let Some(inventory) = &patch.inventory {
        if role.allows(Action::ManageInventory) {
            unit.inventory = inventory.clone();
            changed = true;
        }
    }

    if changed {
        unit.last_updated = Utc::now();
    }
    Ok(unit)
}

// O caminho do solicitante (e do QR): força REQUEST e anexa foto e
// descrição sem sobrescrever a bitácora existente.
pub fn submit_incident(
    mut unit: MaintenanceUnit,
    role: Role,
    report: &IncidentReport,
) -> Result<MaintenanceUnit, AppError> {
    if !role.allows(Action::ReportIncident) {
        return Ok(unit);
    }

    if let Some(image) = &report.image {
        if unit.images.len() >= MAX_UNIT_IMAGES {
            return Err(AppError::InvalidInput(format!(
                "Máximo {} imágenes por unidad.",
                MAX_UNIT_IMAGES
            )));
        }
        unit.images.push(image.clone());
    }

    if let Some(description) = &report.description {
        if unit.description.is_empty() {
            unit.description = description.clone();
        } else {
            unit.description = format!("{}\n{}", unit.description, description);
        }
    }

    unit.status = Status::Request;
    unit.last_updated = Utc::now();
    Ok(unit)
}

pub fn add_material_request(
    mut unit: MaintenanceUnit,
    role: Role,
    request: MaterialRequest,
) -> MaintenanceUnit {
    if !role.allows(Action::CreateMaterialRequest) {
        return unit;
    }
    unit.requests.push(request);
    unit.last_updated = Utc::now();
    unit
}

// Só a tesouraria (e admin) vira a flag `approved`; id desconhecido
// também é um no-op silencioso.
pub fn set_request_approval(
    mut unit: MaintenanceUnit,
    role: Role,
    request_id: &str,
    approved: bool,
) -> MaintenanceUnit {
    if !role.allows(Action::ApproveMaterialRequest) {
        return unit;
    }
    let Some(request) = unit.requests.iter_mut().find(|r| r.id == request_id) else {
        return unit;
    };
    request.approved = approved;
    unit.last_updated = Utc::now();
    unit
}

// ---
// Serviço (mutators + snapshot local)
// ---

#[derive(Clone)]
pub struct UnitService {
    store: LocalStore,
}

impl UnitService {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn list(&self, org_id: Uuid) -> Result<Vec<MaintenanceUnit>, AppError> {
        self.store.units(org_id)
    }

    pub fn find(&self, org_id: Uuid, unit_id: &str) -> Result<MaintenanceUnit, AppError> {
        self.store
            .units(org_id)?
            .into_iter()
            .find(|u| u.id == unit_id)
            .ok_or_else(|| AppError::NotFound(format!("Unidad '{}' no encontrada.", unit_id)))
    }

    // Devolve a coleção atualizada, como o serviço original fazia.
    // Papel não autorizado: coleção intacta.
    pub fn create(
        &self,
        org_id: Uuid,
        role: Role,
        payload: &CreateUnitPayload,
    ) -> Result<Vec<MaintenanceUnit>, AppError> {
        let mut units = self.store.units(org_id)?;
        if !role.allows(Action::CreateUnit) {
            return Ok(units);
        }

        let campuses = self.store.campuses(org_id)?;
        if !campuses.contains(&payload.campus) {
            return Err(AppError::InvalidInput(format!(
                "La sede '{}' no existe.",
                payload.campus
            )));
        }

        units.push(MaintenanceUnit {
            id: Uuid::new_v4().to_string(),
            org_id,
            campus: payload.campus.clone(),
            name: payload.name.clone(),
            kind: payload.kind.clone(),
            description: payload.description.clone().unwrap_or_default(),
            status: Status::Operative,
            images: vec![],
            inventory: vec![],
            requests: vec![],
            last_updated: Utc::now(),
        });
        self.store.save_units(org_id, &units)?;
        tracing::info!("🏫 Unidad creada en '{}' ({})", payload.campus, org_id);
        Ok(units)
    }

    pub fn update(
        &self,
        org_id: Uuid,
        role: Role,
        unit_id: &str,
        patch: &UnitPatch,
    ) -> Result<MaintenanceUnit, AppError> {
        self.mutate(org_id, unit_id, |unit| apply_unit_patch(unit, role, patch))
    }

    pub fn report_incident(
        &self,
        org_id: Uuid,
        role: Role,
        unit_id: &str,
        report: &IncidentReport,
    ) -> Result<MaintenanceUnit, AppError> {
        self.mutate(org_id, unit_id, |unit| submit_incident(unit, role, report))
    }

    pub fn add_request(
        &self,
        org_id: Uuid,
        role: Role,
        unit_id: &str,
        payload: &NewMaterialRequest,
    ) -> Result<MaintenanceUnit, AppError> {
        let request = MaterialRequest {
            id: Uuid::new_v4().to_string(),
            item: payload.item.clone(),
            quantity: payload.quantity,
            estimated_cost: payload.estimated_cost,
            approved: false,
            date: Utc::now().date_naive(),
        };
        self.mutate(org_id, unit_id, |unit| {
            Ok(add_material_request(unit, role, request.clone()))
        })
    }

    pub fn set_request_approval(
        &self,
        org_id: Uuid,
        role: Role,
        unit_id: &str,
        request_id: &str,
        approved: bool,
    ) -> Result<MaintenanceUnit, AppError> {
        self.mutate(org_id, unit_id, |unit| {
            Ok(set_request_approval(unit, role, request_id, approved))
        })
    }

    // Carrega a coleção, aplica o mutator na unidade alvo e regrava a
    // coleção inteira (substituição, não merge).
    fn mutate<F>(&self, org_id: Uuid, unit_id: &str, f: F) -> Result<MaintenanceUnit, AppError>
    where
        F: FnOnce(MaintenanceUnit) -> Result<MaintenanceUnit, AppError>,
    {
        let mut units = self.store.units(org_id)?;
        let position = units
            .iter()
            .position(|u| u.id == unit_id)
            .ok_or_else(|| AppError::NotFound(format!("Unidad '{}' no encontrada.", unit_id)))?;

        let updated = f(units[position].clone())?;
        units[position] = updated.clone();
        self.store.save_units(org_id, &units)?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_unit() -> MaintenanceUnit {
        MaintenanceUnit {
            id: "u1".into(),
            org_id: Uuid::new_v4(),
            campus: "Sede A".into(),
            name: "Salón 1".into(),
            kind: "Aula".into(),
            description: "Todo en orden.".into(),
            status: Status::Operative,
            images: vec![],
            inventory: vec![],
            requests: vec![MaterialRequest {
                id: "r1".into(),
                item: "Filtro".into(),
                quantity: 2,
                estimated_cost: Decimal::from(50_000),
                approved: false,
                date: Utc::now().date_naive(),
            }],
            last_updated: Utc::now(),
        }
    }

    fn service() -> (tempfile::TempDir, UnitService, LocalStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::open(&dir.path().join("units.redb")).expect("open store");
        (dir, UnitService::new(store.clone()), store)
    }

    #[test]
    fn papel_nao_autorizado_e_noop_exato() {
        let unit = sample_unit();
        let patch = UnitPatch {
            status: Some(Status::Repair),
            description: Some("hackeado".into()),
            images: None,
            inventory: None,
        };

        // Nem o campo muda, nem o timestamp.
        for role in [Role::Viewer, Role::Treasury] {
            let result = apply_unit_patch(unit.clone(), role, &patch).unwrap();
            assert_eq!(result, unit);
        }
    }

    #[test]
    fn manutencao_muda_estado_e_reestampa() {
        let unit = sample_unit();
        let before = unit.last_updated;
        let patch = UnitPatch { status: Some(Status::Prevention), ..Default::default() };

        let result = apply_unit_patch(unit, Role::Maintenance, &patch).unwrap();
        assert_eq!(result.status, Status::Prevention);
        assert!(result.last_updated >= before);
    }

    #[test]
    fn solicitante_edita_detalhes_mas_nao_estado() {
        let unit = sample_unit();
        let patch = UnitPatch {
            status: Some(Status::Repair),
            description: Some("Hay una gotera nueva.".into()),
            ..Default::default()
        };

        let result = apply_unit_patch(unit, Role::Solicitor, &patch).unwrap();
        // A descrição passa, o estado não.
        assert_eq!(result.description, "Hay una gotera nueva.");
        assert_eq!(result.status, Status::Operative);
    }

    #[test]
    fn limite_de_imagens() {
        let unit = sample_unit();
        let six = vec!["data:x".to_string(); MAX_UNIT_IMAGES + 1];
        let patch = UnitPatch { images: Some(six), ..Default::default() };

        assert!(matches!(
            apply_unit_patch(unit, Role::Admin, &patch),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn incidente_forca_request_e_anexa() {
        let unit = sample_unit();
        let report = IncidentReport {
            description: Some("Vidrio roto.".into()),
            image: Some("data:image/jpeg;base64,...".into()),
        };

        let result = submit_incident(unit, Role::Solicitor, &report).unwrap();
        assert_eq!(result.status, Status::Request);
        assert_eq!(result.images.len(), 1);
        assert!(result.description.ends_with("Vidrio roto."));
    }

    #[test]
    fn incidente_por_viewer_e_noop() {
        let unit = sample_unit();
        let report = IncidentReport { description: Some("x".into()), image: None };
        let result = submit_incident(unit.clone(), Role::Viewer, &report).unwrap();
        assert_eq!(result, unit);
    }

    #[test]
    fn aprovacao_gateada_pela_tesouraria() {
        let unit = sample_unit();

        // Manutenção não aprova.
        let denied = set_request_approval(unit.clone(), Role::Maintenance, "r1", true);
        assert!(!denied.requests[0].approved);
        assert_eq!(denied, unit);

        // Tesouraria sim.
        let approved = set_request_approval(unit, Role::Treasury, "r1", true);
        assert!(approved.requests[0].approved);
    }

    #[test]
    fn cenario_criar_unidade() {
        let (_dir, svc, store) = service();
        let org = Uuid::new_v4();
        store.save_campuses(org, &["Sede A".to_string()]).unwrap();
        store.save_units(org, &[]).unwrap();

        let payload = CreateUnitPayload {
            name: "Salón 1".into(),
            campus: "Sede A".into(),
            kind: "Aula".into(),
            description: None,
        };
        let units = svc.create(org, Role::Admin, &payload).unwrap();

        assert_eq!(units.len(), 1);
        let unit = &units[0];
        assert_eq!(unit.status, Status::Operative);
        assert!(unit.images.is_empty());
        assert!(unit.inventory.is_empty());
        assert!(unit.requests.is_empty());
        assert_eq!(unit.campus, "Sede A");
    }

    #[test]
    fn criar_em_sede_inexistente_falha() {
        let (_dir, svc, store) = service();
        let org = Uuid::new_v4();
        store.save_campuses(org, &[]).unwrap();

        let payload = CreateUnitPayload {
            name: "Salón 1".into(),
            campus: "Sede Fantasma".into(),
            kind: "Aula".into(),
            description: None,
        };
        assert!(matches!(
            svc.create(org, Role::Admin, &payload),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn criar_sem_permissao_nao_altera_colecao() {
        let (_dir, svc, store) = service();
        let org = Uuid::new_v4();
        store.save_campuses(org, &["Sede A".to_string()]).unwrap();
        store.save_units(org, &[]).unwrap();

        let payload = CreateUnitPayload {
            name: "Salón 1".into(),
            campus: "Sede A".into(),
            kind: "Aula".into(),
            description: None,
        };
        let units = svc.create(org, Role::Viewer, &payload).unwrap();
        assert!(units.is_empty());
    }
}
