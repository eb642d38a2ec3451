// src/handlers/mod.rs

pub mod admin;
pub mod auth;
pub mod campuses;
pub mod dashboard;
pub mod organizations;
pub mod sync;
pub mod tools;
pub mod units;
pub mod warehouse;
