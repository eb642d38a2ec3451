pub mod auth;
pub mod campus_service;
pub mod dashboard_service;
pub mod qr_service;
pub mod sync_service;
pub mod tool_service;
pub mod unit_service;
pub mod warehouse_service;
