// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,

        // --- Organizations ---
        handlers::organizations::register,
        handlers::organizations::list,
        handlers::organizations::get_one,
        handlers::organizations::update_settings,

        // --- Units ---
        handlers::units::list,
        handlers::units::create,
        handlers::units::update,
        handlers::units::report_incident,
        handlers::units::add_request,
        handlers::units::set_request_approval,
        handlers::units::qr,

        // --- Campuses ---
        handlers::campuses::list,
        handlers::campuses::add,
        handlers::campuses::rename,
        handlers::campuses::delete,

        // --- Tools ---
        handlers::tools::list,
        handlers::tools::create,
        handlers::tools::checkout,
        handlers::tools::return_tool,
        handlers::tools::report_broken,
        handlers::tools::repair_complete,

        // --- Warehouse ---
        handlers::warehouse::list,
        handlers::warehouse::create,
        handlers::warehouse::set_quantity,

        // --- Dashboard ---
        handlers::dashboard::summary,
        handlers::dashboard::low_stock,
        handlers::dashboard::campus_load,

        // --- Sync ---
        handlers::sync::sync_up,
        handlers::sync::sync_down,

        // --- Admin ---
        handlers::admin::reset,
        handlers::admin::factory_reset,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::LoginPayload,
            models::auth::AuthResponse,

            // --- Organizations ---
            models::organization::Plan,
            models::organization::Organization,
            handlers::organizations::RegisterOrganizationPayload,
            handlers::organizations::UpdateOrganizationSettingsPayload,

            // --- Units ---
            models::unit::Status,
            models::unit::ItemCondition,
            models::unit::InventoryItem,
            models::unit::MaterialRequest,
            models::unit::MaintenanceUnit,
            models::unit::UnitPatch,
            models::unit::CreateUnitPayload,
            models::unit::NewMaterialRequest,
            models::unit::IncidentReport,
            handlers::units::ApprovalPayload,

            // --- Campuses ---
            handlers::campuses::CampusPayload,
            handlers::campuses::RenameCampusPayload,
            handlers::campuses::CampusesWithUnits,

            // --- Tools ---
            models::tool::ToolStatus,
            models::tool::Tool,
            handlers::tools::CreateToolPayload,
            handlers::tools::CheckoutPayload,

            // --- Warehouse ---
            models::warehouse::WarehouseItem,
            handlers::warehouse::CreateWarehouseItemPayload,
            handlers::warehouse::QuantityPayload,

            // --- Dashboard ---
            models::dashboard::StatusTally,
            models::dashboard::ToolTally,
            models::dashboard::CampusLoad,
            models::dashboard::DashboardSummary,

            // --- Sync ---
            models::sync::SyncOutcome,

            // --- Admin ---
            handlers::admin::ResetPayload,
            handlers::admin::ResetResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticación por rol"),
        (name = "Organizations", description = "Registro y configuración de organizaciones"),
        (name = "Units", description = "Unidades de mantenimiento (baños, aulas, laboratorios)"),
        (name = "Campuses", description = "Sedes de la organización"),
        (name = "Tools", description = "Préstamo y estado de herramientas"),
        (name = "Warehouse", description = "Almacén de materiales"),
        (name = "Dashboard", description = "Indicadores agregados"),
        (name = "Sync", description = "Sincronización con el endpoint remoto"),
        (name = "Admin", description = "Operaciones administrativas")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
