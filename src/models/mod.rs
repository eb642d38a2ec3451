pub mod auth;
pub mod dashboard;
pub mod organization;
pub mod rbac;
pub mod sync;
pub mod tool;
pub mod unit;
pub mod warehouse;
