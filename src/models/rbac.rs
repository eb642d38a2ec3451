// src/models/rbac.rs

use crate::models::auth::Role;

// As ações mutáveis do domínio. A tabela abaixo é a única fonte de
// verdade sobre "quem pode mudar o quê"; nenhum handler ou serviço
// compara papéis diretamente.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateUnit,
    ChangeUnitStatus,
    EditUnitDetails,
    ManageInventory,
    CreateMaterialRequest,
    ApproveMaterialRequest,
    ManageCampuses,
    ManageTools,
    ManageWarehouse,
    ReportIncident,
    ConfigureOrganization,
}

impl Role {
    pub fn allows(self, action: Action) -> bool {
        use Action::*;
        use Role::*;
        match action {
            CreateUnit => matches!(self, Admin | Maintenance),
            ChangeUnitStatus => matches!(self, Admin | Maintenance),
            // O solicitante pode anexar fotos/descrição ao reportar.
            EditUnitDetails => matches!(self, Admin | Maintenance | Solicitor),
            ManageInventory => matches!(self, Admin | Maintenance),
            CreateMaterialRequest => matches!(self, Admin | Maintenance),
            // Tesouraria aprova; manutenção só cria.
            ApproveMaterialRequest => matches!(self, Admin | Treasury),
            ManageCampuses => matches!(self, Admin | Maintenance),
            ManageTools => matches!(self, Admin | Maintenance),
            ManageWarehouse => matches!(self, Admin | Maintenance),
            ReportIncident => matches!(self, Admin | Maintenance | Solicitor),
            ConfigureOrganization => matches!(self, Admin),
        }
    }
}
