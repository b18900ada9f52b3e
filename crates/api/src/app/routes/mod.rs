use axum::{routing::get, Router};

pub mod auth;
pub mod common;
pub mod products;
pub mod public;
pub mod reports;
pub mod shops;
pub mod system;
pub mod transactions;

/// Router for endpoints reachable without a session.
pub fn public_router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .merge(auth::router())
        .nest("/public", public::router())
}

/// Router for all authenticated (shop-scoped) endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/products", products::router())
        .nest("/transactions", transactions::router())
        .nest("/reports", reports::router())
        .nest("/shops", shops::router())
}
