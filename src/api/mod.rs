mod error;
mod extract;
mod handlers;

use axum::{
    http::HeaderValue,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::db::Database;
use crate::service::HrService;

/// Router with permissive CORS and the local calendar as clock.
pub fn create_router(db: Database) -> Router {
    create_router_with_config(HrService::new(db), &ServerConfig::default())
}

pub fn create_router_with_config(service: HrService, config: &ServerConfig) -> Router {
    let api = Router::new()
        // Assignments
        .route("/assignments", get(handlers::list_active_project_assignments))
        .route(
            "/assignments/{project_id}/assign/{employee_id}",
            post(handlers::assign_employee),
        )
        .route(
            "/assignments/{project_id}/unassign/{employee_id}",
            delete(handlers::unassign_employee),
        )
        .route("/assignments/project/{id}", get(handlers::list_project_assignments))
        .route("/assignments/employee/{id}", get(handlers::list_employee_assignments))
        // Employees
        .route("/employees", get(handlers::list_active_employees))
        .route("/employees", post(handlers::add_employee))
        .route("/employees/bulk", post(handlers::add_employees))
        .route("/employees/page", get(handlers::page_active_employees))
        .route("/employees/basic", get(handlers::list_basic_employees))
        .route("/employees/{id}", get(handlers::get_employee))
        .route("/employees/{id}/terminate", put(handlers::terminate_employee))
        // Projects
        .route("/projects", get(handlers::list_active_projects))
        .route("/projects", post(handlers::add_project))
        .route("/projects/{id}", get(handlers::get_project))
        .route("/projects/{id}/terminate", put(handlers::terminate_project))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(config.cors_origins.as_deref())),
        )
        .with_state(service)
}

fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let Some(origins) = origins else {
        return CorsLayer::permissive();
    };

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}
