// src/services/warehouse_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::LocalStore,
    models::{auth::Role, rbac::Action, warehouse::WarehouseItem},
};

#[derive(Clone)]
pub struct WarehouseService {
    store: LocalStore,
}

impl WarehouseService {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn list(&self, org_id: Uuid) -> Result<Vec<WarehouseItem>, AppError> {
        self.store.warehouse(org_id)
    }

    pub fn add(
        &self,
        org_id: Uuid,
        role: Role,
        name: &str,
        category: &str,
        quantity: u32,
        unit: &str,
    ) -> Result<Vec<WarehouseItem>, AppError> {
        let mut items = self.store.warehouse(org_id)?;
        if !role.allows(Action::ManageWarehouse) {
            return Ok(items);
        }

        items.push(WarehouseItem {
            id: Uuid::new_v4().to_string(),
            org_id,
            name: name.to_string(),
            category: category.to_string(),
            quantity,
            unit: unit.to_string(),
        });
        self.store.save_warehouse(org_id, &items)?;
        Ok(items)
    }

    // Atualiza a quantidade em estoque (entrada/saída manual).
    pub fn set_quantity(
        &self,
        org_id: Uuid,
        role: Role,
        item_id: &str,
        quantity: u32,
    ) -> Result<WarehouseItem, AppError> {
        let mut items = self.store.warehouse(org_id)?;
        let position = items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| AppError::NotFound(format!("Ítem '{}' no encontrado.", item_id)))?;

        if !role.allows(Action::ManageWarehouse) {
            return Ok(items[position].clone());
        }

        items[position].quantity = quantity;
        let updated = items[position].clone();
        self.store.save_warehouse(org_id, &items)?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> (tempfile::TempDir, WarehouseService, LocalStore, Uuid) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::open(&dir.path().join("wh.redb")).expect("open store");
        (dir, WarehouseService::new(store.clone()), store, Uuid::new_v4())
    }

    #[test]
    fn adicionar_e_ajustar_estoque() {
        let (_dir, svc, _store, org) = service();

        let items = svc.add(org, Role::Maintenance, "Brocha 4\"", "Pintura", 12, "Unidad").unwrap();
        assert_eq!(items.len(), 5); // 4 da semente + 1

        let new_id = items.last().unwrap().id.clone();
        let updated = svc.set_quantity(org, Role::Admin, &new_id, 3).unwrap();
        assert_eq!(updated.quantity, 3);
    }

    #[test]
    fn papel_nao_autorizado_e_noop() {
        let (_dir, svc, store, org) = service();
        let before = store.warehouse(org).unwrap();
        store.save_warehouse(org, &before).unwrap();

        let items = svc.add(org, Role::Treasury, "Cemento", "Obra", 1, "Bulto").unwrap();
        assert_eq!(items, before);

        let untouched = svc.set_quantity(org, Role::Viewer, "w1", 0).unwrap();
        assert_eq!(untouched, before[0]);
        assert_eq!(store.warehouse(org).unwrap(), before);
    }
}
