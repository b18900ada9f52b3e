use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use shopledger_auth::Role;

use crate::app::routes::common;
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::{PrincipalContext, TenantContext};

pub fn router() -> Router {
    Router::new().route("/dashboard", get(dashboard))
}

pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = common::require(&principal, Role::SuperAdmin) {
        return resp;
    }

    match services.ledger.dashboard(tenant.shop_id()) {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
