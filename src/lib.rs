// src/lib.rs

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;
use crate::middleware::tenancy::org_guard;

// Monta o router completo da aplicação. Extraído do main para que os
// testes de integração consigam subir o mesmo app em memória.
pub fn build_router(app_state: AppState) -> Router {
    // Rotas públicas de autenticação
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Registro/consulta de organizações (públicas); a configuração
    // exige token.
    let org_routes = Router::new()
        .route(
            "/",
            post(handlers::organizations::register).get(handlers::organizations::list),
        )
        .route("/{id}", get(handlers::organizations::get_one))
        .route(
            "/{id}/settings",
            put(handlers::organizations::update_settings).layer(
                axum_middleware::from_fn_with_state(app_state.clone(), auth_guard),
            ),
        );

    // Reset de fábrica: só Bearer, sem contexto de organização.
    let admin_routes = Router::new()
        .route("/factory-reset", post(handlers::admin::factory_reset))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Todas as rotas abaixo exigem Bearer + X-Organization-Id.
    let tenant_routes = Router::new()
        .route(
            "/units",
            get(handlers::units::list).post(handlers::units::create),
        )
        .route("/units/{id}", patch(handlers::units::update))
        .route("/units/{id}/incident", post(handlers::units::report_incident))
        .route("/units/{id}/requests", post(handlers::units::add_request))
        .route(
            "/units/{id}/requests/{request_id}/approval",
            put(handlers::units::set_request_approval),
        )
        .route("/units/{id}/qr", get(handlers::units::qr))
        .route(
            "/campuses",
            get(handlers::campuses::list).post(handlers::campuses::add),
        )
        .route(
            "/campuses/{name}",
            put(handlers::campuses::rename).delete(handlers::campuses::delete),
        )
        .route(
            "/tools",
            get(handlers::tools::list).post(handlers::tools::create),
        )
        .route("/tools/{id}/checkout", post(handlers::tools::checkout))
        .route("/tools/{id}/return", post(handlers::tools::return_tool))
        .route(
            "/tools/{id}/report-broken",
            post(handlers::tools::report_broken),
        )
        .route(
            "/tools/{id}/repair-complete",
            post(handlers::tools::repair_complete),
        )
        .route(
            "/warehouse",
            get(handlers::warehouse::list).post(handlers::warehouse::create),
        )
        .route(
            "/warehouse/{id}/quantity",
            put(handlers::warehouse::set_quantity),
        )
        .route("/dashboard/summary", get(handlers::dashboard::summary))
        .route("/dashboard/low-stock", get(handlers::dashboard::low_stock))
        .route(
            "/dashboard/campus-load",
            get(handlers::dashboard::campus_load),
        )
        .route("/sync/up", post(handlers::sync::sync_up))
        .route("/sync/down", post(handlers::sync::sync_down))
        .route("/admin/reset", post(handlers::admin::reset))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            org_guard,
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/orgs", org_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api", tenant_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state)
}
