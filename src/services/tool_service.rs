// src/services/tool_service.rs

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::LocalStore,
    models::{
        auth::Role,
        rbac::Action,
        tool::{Tool, ToolStatus},
    },
};

// ---
// Transições puras do empréstimo
// ---
// AVAILABLE --checkout--> IN_USE --return--> AVAILABLE
// AVAILABLE --report_broken--> BROKEN --repair_complete--> AVAILABLE
//
// checkout com responsável em branco ou fora do estado de origem é um
// erro visível ao chamador; as demais transições fora do estado de
// origem são no-ops silenciosos.

pub fn checkout(mut tool: Tool, assignee: &str, date: NaiveDate) -> Result<Tool, AppError> {
    if assignee.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Debes indicar quién retira la herramienta.".into(),
        ));
    }
    if tool.status != ToolStatus::Available {
        return Err(AppError::InvalidInput(format!(
            "La herramienta '{}' no está disponible.",
            tool.name
        )));
    }

    tool.status = ToolStatus::InUse;
    tool.assigned_to = Some(assignee.trim().to_string());
    tool.assigned_date = Some(date);
    Ok(tool)
}

pub fn return_tool(mut tool: Tool) -> Tool {
    if tool.status != ToolStatus::InUse {
        return tool;
    }
    tool.status = ToolStatus::Available;
    tool.assigned_to = None;
    tool.assigned_date = None;
    tool
}

pub fn report_broken(mut tool: Tool) -> Tool {
    if tool.status != ToolStatus::Available {
        return tool;
    }
    tool.status = ToolStatus::Broken;
    tool
}

pub fn repair_complete(mut tool: Tool) -> Tool {
    if tool.status != ToolStatus::Broken {
        return tool;
    }
    tool.status = ToolStatus::Available;
    tool
}

// ---
// Serviço
// ---

#[derive(Clone)]
pub struct ToolService {
    store: LocalStore,
}

impl ToolService {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn list(&self, org_id: Uuid) -> Result<Vec<Tool>, AppError> {
        self.store.tools(org_id)
    }

    pub fn add(
        &self,
        org_id: Uuid,
        role: Role,
        name: &str,
        image: Option<String>,
    ) -> Result<Vec<Tool>, AppError> {
        let mut tools = self.store.tools(org_id)?;
        if !role.allows(Action::ManageTools) {
            return Ok(tools);
        }

        tools.push(Tool {
            id: Uuid::new_v4().to_string(),
            org_id,
            name: name.to_string(),
            status: ToolStatus::Available,
            assigned_to: None,
            assigned_date: None,
            image,
        });
        self.store.save_tools(org_id, &tools)?;
        Ok(tools)
    }

    pub fn checkout(
        &self,
        org_id: Uuid,
        role: Role,
        tool_id: &str,
        assignee: &str,
    ) -> Result<Tool, AppError> {
        let today = Utc::now().date_naive();
        self.mutate(org_id, role, tool_id, |tool| checkout(tool, assignee, today))
    }

    pub fn return_tool(&self, org_id: Uuid, role: Role, tool_id: &str) -> Result<Tool, AppError> {
        self.mutate(org_id, role, tool_id, |tool| Ok(return_tool(tool)))
    }

    pub fn report_broken(&self, org_id: Uuid, role: Role, tool_id: &str) -> Result<Tool, AppError> {
        self.mutate(org_id, role, tool_id, |tool| Ok(report_broken(tool)))
    }

    pub fn repair_complete(&self, org_id: Uuid, role: Role, tool_id: &str) -> Result<Tool, AppError> {
        self.mutate(org_id, role, tool_id, |tool| Ok(repair_complete(tool)))
    }

    fn mutate<F>(&self, org_id: Uuid, role: Role, tool_id: &str, f: F) -> Result<Tool, AppError>
    where
        F: FnOnce(Tool) -> Result<Tool, AppError>,
    {
        let mut tools = self.store.tools(org_id)?;
        let position = tools
            .iter()
            .position(|t| t.id == tool_id)
            .ok_or_else(|| AppError::NotFound(format!("Herramienta '{}' no encontrada.", tool_id)))?;

        // Papel sem ManageTools: no-op silencioso, ferramenta intacta.
        if !role.allows(Action::ManageTools) {
            return Ok(tools[position].clone());
        }

        let updated = f(tools[position].clone())?;
        debug_assert!(updated.assignment_is_consistent());
        tools[position] = updated.clone();
        self.store.save_tools(org_id, &tools)?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn available_tool() -> Tool {
        Tool {
            id: "t1".into(),
            org_id: Uuid::new_v4(),
            name: "Taladro".into(),
            status: ToolStatus::Available,
            assigned_to: None,
            assigned_date: None,
            image: None,
        }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    #[test]
    fn ciclo_checkout_devolucao() {
        let tool = available_tool();

        let out = checkout(tool, "Carlos", today()).unwrap();
        assert_eq!(out.status, ToolStatus::InUse);
        assert_eq!(out.assigned_to.as_deref(), Some("Carlos"));
        assert_eq!(out.assigned_date, Some(today()));
        assert!(out.assignment_is_consistent());

        let back = return_tool(out);
        assert_eq!(back.status, ToolStatus::Available);
        assert_eq!(back.assigned_to, None);
        assert_eq!(back.assigned_date, None);
        assert!(back.assignment_is_consistent());
    }

    #[test]
    fn checkout_sem_responsavel_falha() {
        assert!(matches!(
            checkout(available_tool(), "   ", today()),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn checkout_fora_de_estado_falha() {
        let broken = report_broken(available_tool());
        assert!(matches!(
            checkout(broken, "Carlos", today()),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn transicoes_fora_de_estado_sao_noop() {
        let tool = available_tool();

        // Devolver algo disponível: nada muda.
        assert_eq!(return_tool(tool.clone()), tool);

        // Reparar algo que não está quebrado: nada muda.
        assert_eq!(repair_complete(tool.clone()), tool);

        // Quebrar algo em uso: nada muda.
        let in_use = checkout(tool, "Ana", today()).unwrap();
        assert_eq!(report_broken(in_use.clone()), in_use);
    }

    #[test]
    fn invariante_apos_cada_transicao() {
        let tool = available_tool();
        assert!(tool.assignment_is_consistent());

        let broken = report_broken(tool.clone());
        assert!(broken.assignment_is_consistent());

        let repaired = repair_complete(broken);
        assert!(repaired.assignment_is_consistent());

        let in_use = checkout(repaired, "Luisa", today()).unwrap();
        assert!(in_use.assignment_is_consistent());

        let returned = return_tool(in_use);
        assert!(returned.assignment_is_consistent());
    }

    #[test]
    fn papel_nao_autorizado_nao_muda_ferramenta() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::open(&dir.path().join("tools.redb")).expect("open store");
        let svc = ToolService::new(store.clone());
        let org = Uuid::new_v4();
        let tools = store.tools(org).unwrap();
        store.save_tools(org, &tools).unwrap();

        let result = svc.checkout(org, Role::Viewer, "t1", "Carlos").unwrap();
        assert_eq!(result, tools[0]);
        assert_eq!(store.tools(org).unwrap(), tools);
    }
}
