// src/db/local_store.rs

use std::path::Path;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{kv::KvStore, seed},
    models::{
        auth::AuthData, organization::Organization, tool::Tool, unit::MaintenanceUnit,
        warehouse::WarehouseItem,
    },
};

// Prefixo das chaves persistidas, herdado do formato v1 do app.
pub const KEY_PREFIX: &str = "school_maint_v1";

const COL_UNITS: &str = "units";
const COL_CAMPUSES: &str = "campuses";
const COL_TOOLS: &str = "tools";
const COL_WAREHOUSE: &str = "warehouse";

// O snapshot local autoritativo de todas as coleções de domínio,
// namespaced por organização: `school_maint_v1_<orgId>_<coleção>`.
// Não há merge: cada save substitui a coleção inteira.
#[derive(Clone)]
pub struct LocalStore {
    kv: KvStore,
}

fn org_key(org_id: Uuid, collection: &str) -> String {
    format!("{}_{}_{}", KEY_PREFIX, org_id, collection)
}

fn global_key(name: &str) -> String {
    format!("{}_{}", KEY_PREFIX, name)
}

impl LocalStore {
    pub fn open(path: &Path) -> Result<Self, AppError> {
        Ok(Self { kv: KvStore::open(path)? })
    }

    // --- UNIDADES ---

    // Ausência não é erro: sem dados gravados, devolve a semente de
    // demonstração estampada com o org_id.
    pub fn units(&self, org_id: Uuid) -> Result<Vec<MaintenanceUnit>, AppError> {
        match self.kv.get_json(&org_key(org_id, COL_UNITS))? {
            Some(units) => Ok(units),
            None => Ok(seed::initial_units(org_id)),
        }
    }

    pub fn save_units(&self, org_id: Uuid, units: &[MaintenanceUnit]) -> Result<(), AppError> {
        self.kv.put_json(&org_key(org_id, COL_UNITS), &units)
    }

    // --- SEDES ---

    // Como no app original: a lista derivada da semente é persistida
    // na primeira leitura.
    pub fn campuses(&self, org_id: Uuid) -> Result<Vec<String>, AppError> {
        if let Some(campuses) = self.kv.get_json(&org_key(org_id, COL_CAMPUSES))? {
            return Ok(campuses);
        }
        let derived = seed::initial_campuses(org_id);
        self.save_campuses(org_id, &derived)?;
        Ok(derived)
    }

    pub fn save_campuses(&self, org_id: Uuid, campuses: &[String]) -> Result<(), AppError> {
        self.kv.put_json(&org_key(org_id, COL_CAMPUSES), &campuses)
    }

    // --- FERRAMENTAS ---

    pub fn tools(&self, org_id: Uuid) -> Result<Vec<Tool>, AppError> {
        match self.kv.get_json(&org_key(org_id, COL_TOOLS))? {
            Some(tools) => Ok(tools),
            None => Ok(seed::initial_tools(org_id)),
        }
    }

    pub fn save_tools(&self, org_id: Uuid, tools: &[Tool]) -> Result<(), AppError> {
        self.kv.put_json(&org_key(org_id, COL_TOOLS), &tools)
    }

    // --- ALMACÉN ---

    pub fn warehouse(&self, org_id: Uuid) -> Result<Vec<WarehouseItem>, AppError> {
        match self.kv.get_json(&org_key(org_id, COL_WAREHOUSE))? {
            Some(items) => Ok(items),
            None => Ok(seed::initial_warehouse(org_id)),
        }
    }

    pub fn save_warehouse(&self, org_id: Uuid, items: &[WarehouseItem]) -> Result<(), AppError> {
        self.kv.put_json(&org_key(org_id, COL_WAREHOUSE), &items)
    }

    // --- GLOBAIS (não namespaced) ---

    pub fn auth_data(&self) -> Result<AuthData, AppError> {
        match self.kv.get_json(&global_key("auth"))? {
            Some(auth) => Ok(auth),
            None => Ok(seed::default_auth_data()),
        }
    }

    pub fn save_auth_data(&self, auth: &AuthData) -> Result<(), AppError> {
        self.kv.put_json(&global_key("auth"), auth)
    }

    pub fn organizations(&self) -> Result<Vec<Organization>, AppError> {
        Ok(self.kv.get_json(&global_key("orgs"))?.unwrap_or_default())
    }

    pub fn save_organizations(&self, orgs: &[Organization]) -> Result<(), AppError> {
        self.kv.put_json(&global_key("orgs"), &orgs)
    }

    pub fn find_organization(&self, org_id: Uuid) -> Result<Option<Organization>, AppError> {
        Ok(self.organizations()?.into_iter().find(|o| o.id == org_id))
    }

    // Insere ou substitui uma organização no registro.
    pub fn upsert_organization(&self, org: &Organization) -> Result<(), AppError> {
        let mut orgs = self.organizations()?;
        match orgs.iter_mut().find(|o| o.id == org.id) {
            Some(existing) => *existing = org.clone(),
            None => orgs.push(org.clone()),
        }
        self.save_organizations(&orgs)
    }

    // --- RESET ---

    // Apaga as quatro coleções de UMA organização. Irreversível; a
    // confirmação é responsabilidade do chamador.
    pub fn reset_org(&self, org_id: Uuid) -> Result<(), AppError> {
        for collection in [COL_UNITS, COL_CAMPUSES, COL_TOOLS, COL_WAREHOUSE] {
            self.kv.remove(&org_key(org_id, collection))?;
        }
        tracing::warn!("🗑️ Dados locais da organização {} apagados.", org_id);
        Ok(())
    }

    // Apaga TODAS as chaves persistidas (todas as orgs + globais).
    pub fn reset_all(&self) -> Result<usize, AppError> {
        let removed = self.kv.remove_prefix(KEY_PREFIX)?;
        tracing::warn!("🗑️ Reset total: {} chaves removidas.", removed);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::unit::Status;

    fn store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::open(&dir.path().join("test.redb")).expect("open store");
        (dir, store)
    }

    #[test]
    fn leitura_sem_dados_devolve_semente() {
        let (_dir, store) = store();
        let org = Uuid::new_v4();

        let units = store.units(org).unwrap();
        assert_eq!(units.len(), 4);
        assert!(units.iter().all(|u| u.org_id == org));

        let campuses = store.campuses(org).unwrap();
        assert_eq!(campuses, vec!["Sede Principal", "Sede Bachillerato"]);
    }

    #[test]
    fn save_e_releitura_imediata() {
        let (_dir, store) = store();
        let org = Uuid::new_v4();

        let mut units = store.units(org).unwrap();
        units[0].status = Status::Repair;
        units.truncate(2);
        store.save_units(org, &units).unwrap();

        let reread = store.units(org).unwrap();
        assert_eq!(reread, units);
    }

    #[test]
    fn organizacoes_sao_isoladas() {
        let (_dir, store) = store();
        let org_a = Uuid::new_v4();
        let org_b = Uuid::new_v4();

        store.save_campuses(org_a, &["Sede Única".to_string()]).unwrap();

        // A org B segue vendo as suas sedes derivadas da semente.
        assert_eq!(store.campuses(org_a).unwrap(), vec!["Sede Única"]);
        assert_eq!(
            store.campuses(org_b).unwrap(),
            vec!["Sede Principal", "Sede Bachillerato"]
        );
    }

    #[test]
    fn reset_volta_ao_estado_pristino() {
        let (_dir, store) = store();
        let org = Uuid::new_v4();

        store.save_units(org, &[]).unwrap();
        assert!(store.units(org).unwrap().is_empty());

        store.reset_org(org).unwrap();
        assert_eq!(store.units(org).unwrap().len(), 4);
    }

    #[test]
    fn reset_total_apaga_tudo() {
        use crate::models::organization::{Organization, Plan};

        let (_dir, store) = store();
        let org_a = Uuid::new_v4();
        let org_b = Uuid::new_v4();

        store.save_units(org_a, &[]).unwrap();
        store.save_campuses(org_b, &["Sede X".to_string()]).unwrap();
        store
            .upsert_organization(&Organization {
                id: org_a,
                name: "Colegio A".into(),
                logo_url: None,
                plan: Plan::Free,
                remote_endpoint: None,
            })
            .unwrap();

        let removed = store.reset_all().unwrap();
        assert!(removed >= 3);

        // Tudo voltou à semente; o registro de organizações está vazio.
        assert_eq!(store.units(org_a).unwrap().len(), 4);
        assert_eq!(
            store.campuses(org_b).unwrap(),
            vec!["Sede Principal", "Sede Bachillerato"]
        );
        assert!(store.organizations().unwrap().is_empty());
    }

    #[test]
    fn registro_de_organizacoes() {
        use crate::models::organization::{Organization, Plan};

        let (_dir, store) = store();
        let org = Organization {
            id: Uuid::new_v4(),
            name: "Colegio Demo".into(),
            logo_url: None,
            plan: Plan::Free,
            remote_endpoint: None,
        };

        assert!(store.organizations().unwrap().is_empty());
        store.upsert_organization(&org).unwrap();
        assert_eq!(store.find_organization(org.id).unwrap(), Some(org.clone()));

        let renamed = Organization { name: "Colegio Renombrado".into(), ..org.clone() };
        store.upsert_organization(&renamed).unwrap();
        let orgs = store.organizations().unwrap();
        assert_eq!(orgs.len(), 1);
        assert_eq!(orgs[0].name, "Colegio Renombrado");
    }
}
