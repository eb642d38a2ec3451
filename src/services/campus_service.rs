// src/services/campus_service.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::LocalStore,
    models::{auth::Role, rbac::Action, unit::MaintenanceUnit},
};

// Sedes são só nomes; a relação com as unidades é por string
// (`unit.campus`), então renomear e apagar precisam cascatear.
#[derive(Clone)]
pub struct CampusService {
    store: LocalStore,
}

impl CampusService {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn list(&self, org_id: Uuid) -> Result<Vec<String>, AppError> {
        self.store.campuses(org_id)
    }

    // Duplicatas são ignoradas (como no app original).
    pub fn add(&self, org_id: Uuid, role: Role, name: &str) -> Result<Vec<String>, AppError> {
        let mut campuses = self.store.campuses(org_id)?;
        if !role.allows(Action::ManageCampuses) {
            return Ok(campuses);
        }

        if !campuses.iter().any(|c| c == name) {
            campuses.push(name.to_string());
            self.store.save_campuses(org_id, &campuses)?;
        }
        Ok(campuses)
    }

    // Renomeia a sede e cascateia para o campo `campus` das unidades,
    // re-estampando as unidades tocadas.
    pub fn rename(
        &self,
        org_id: Uuid,
        role: Role,
        old_name: &str,
        new_name: &str,
    ) -> Result<(Vec<String>, Vec<MaintenanceUnit>), AppError> {
        let mut campuses = self.store.campuses(org_id)?;
        let mut units = self.store.units(org_id)?;
        if !role.allows(Action::ManageCampuses) {
            return Ok((campuses, units));
        }
        if !campuses.iter().any(|c| c == old_name) {
            return Err(AppError::NotFound(format!("La sede '{}' no existe.", old_name)));
        }

        for campus in campuses.iter_mut() {
            if campus == old_name {
                *campus = new_name.to_string();
            }
        }
        let now = Utc::now();
        for unit in units.iter_mut() {
            if unit.campus == old_name {
                unit.campus = new_name.to_string();
                unit.last_updated = now;
            }
        }

        self.store.save_campuses(org_id, &campuses)?;
        self.store.save_units(org_id, &units)?;
        Ok((campuses, units))
    }

    // Apaga a sede e TODAS as suas unidades (cascade-delete).
    pub fn delete(
        &self,
        org_id: Uuid,
        role: Role,
        name: &str,
    ) -> Result<(Vec<String>, Vec<MaintenanceUnit>), AppError> {
        let mut campuses = self.store.campuses(org_id)?;
        let mut units = self.store.units(org_id)?;
        if !role.allows(Action::ManageCampuses) {
            return Ok((campuses, units));
        }

        campuses.retain(|c| c != name);
        let before = units.len();
        units.retain(|u| u.campus != name);
        if units.len() != before {
            tracing::warn!(
                "🏫 Sede '{}' apagada com {} unidade(s) em cascata.",
                name,
                before - units.len()
            );
        }

        self.store.save_campuses(org_id, &campuses)?;
        self.store.save_units(org_id, &units)?;
        Ok((campuses, units))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> (tempfile::TempDir, CampusService, LocalStore, Uuid) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::open(&dir.path().join("campus.redb")).expect("open store");
        let org = Uuid::new_v4();
        (dir, CampusService::new(store.clone()), store, org)
    }

    #[test]
    fn adicionar_deduplica() {
        let (_dir, svc, store, org) = service();
        store.save_campuses(org, &["Sede A".to_string()]).unwrap();

        let campuses = svc.add(org, Role::Admin, "Sede A").unwrap();
        assert_eq!(campuses, vec!["Sede A"]);

        let campuses = svc.add(org, Role::Maintenance, "Sede B").unwrap();
        assert_eq!(campuses, vec!["Sede A", "Sede B"]);
    }

    #[test]
    fn renomear_cascateia_nas_unidades() {
        let (_dir, svc, store, org) = service();
        // Usa a semente: "Sede Principal" tem 2 unidades.
        let (campuses, units) = svc
            .rename(org, Role::Admin, "Sede Principal", "Sede Centro")
            .unwrap();

        assert!(campuses.contains(&"Sede Centro".to_string()));
        assert!(!campuses.contains(&"Sede Principal".to_string()));
        assert_eq!(units.iter().filter(|u| u.campus == "Sede Centro").count(), 2);
        assert_eq!(store.units(org).unwrap(), units);
    }

    #[test]
    fn apagar_remove_unidades_da_sede() {
        let (_dir, svc, _store, org) = service();
        let (campuses, units) = svc.delete(org, Role::Admin, "Sede Bachillerato").unwrap();

        assert_eq!(campuses, vec!["Sede Principal"]);
        assert!(units.iter().all(|u| u.campus == "Sede Principal"));
        assert_eq!(units.len(), 2);
    }

    #[test]
    fn papel_nao_autorizado_nao_muda_nada() {
        let (_dir, svc, store, org) = service();
        let before_campuses = store.campuses(org).unwrap();
        let before_units = store.units(org).unwrap();
        store.save_units(org, &before_units).unwrap();

        let campuses = svc.add(org, Role::Viewer, "Sede Pirata").unwrap();
        assert_eq!(campuses, before_campuses);

        let (campuses, units) = svc.delete(org, Role::Solicitor, "Sede Principal").unwrap();
        assert_eq!(campuses, before_campuses);
        assert_eq!(units, before_units);
    }
}
