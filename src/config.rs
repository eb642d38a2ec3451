// src/config.rs

use std::{env, path::PathBuf};

use crate::{
    db::LocalStore,
    services::{
        auth::AuthService, campus_service::CampusService, dashboard_service::DashboardService,
        sync_service::SyncService, tool_service::ToolService, unit_service::UnitService,
        warehouse_service::WarehouseService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub store: LocalStore,
    pub app_origin: String,
    pub auth_service: AuthService,
    pub unit_service: UnitService,
    pub campus_service: CampusService,
    pub tool_service: ToolService,
    pub warehouse_service: WarehouseService,
    pub dashboard_service: DashboardService,
    pub sync_service: SyncService,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let data_dir =
            PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string()));
        // Base das URLs codificadas nos QRs de reporte.
        let app_origin = env::var("APP_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        std::fs::create_dir_all(&data_dir)?;
        let store = LocalStore::open(&data_dir.join("mantenimiento.redb"))
            .map_err(|e| anyhow::anyhow!("falha abrindo o armazenamento local: {}", e))?;

        tracing::info!("✅ Armazenamento local aberto em {}", data_dir.display());

        // --- Monta o gráfico de dependências ---
        let auth_service = AuthService::new(store.clone(), jwt_secret);
        let unit_service = UnitService::new(store.clone());
        let campus_service = CampusService::new(store.clone());
        let tool_service = ToolService::new(store.clone());
        let warehouse_service = WarehouseService::new(store.clone());
        let dashboard_service = DashboardService::new(store.clone());
        let sync_service = SyncService::new(store.clone())?;

        Ok(Self {
            store,
            app_origin,
            auth_service,
            unit_service,
            campus_service,
            tool_service,
            warehouse_service,
            dashboard_service,
            sync_service,
        })
    }
}
