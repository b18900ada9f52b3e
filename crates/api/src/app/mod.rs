//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store wiring and startup seeding
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and role-dependent response views
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{
    http::{header, Method},
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> anyhow::Result<Router> {
    let services = Arc::new(services::build_services(config)?);
    Ok(router_with_services(services, config))
}

/// Router over already-built services.
pub fn router_with_services(services: Arc<services::AppServices>, config: &ApiConfig) -> Router {
    let auth_state = middleware::AuthState {
        tokens: Arc::new(services.auth.tokens().clone()),
    };

    // Protected routes: require a valid session.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .merge(routes::public_router())
        .merge(protected)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(Extension(services)),
        )
}
