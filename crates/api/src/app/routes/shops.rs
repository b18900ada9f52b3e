use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use shopledger_auth::Role;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::{PrincipalContext, TenantContext};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_shops))
        .route("/whatsapp", put(update_whatsapp))
}

pub async fn list_shops(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = common::require(&principal, Role::SuperAdmin) {
        return resp;
    }

    (StatusCode::OK, Json(services.shops.list())).into_response()
}

/// Update the caller's own shop contact number.
pub async fn update_whatsapp(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<dto::UpdateWhatsAppRequest>, JsonRejection>,
) -> axum::response::Response {
    if let Err(resp) = common::require(&principal, Role::SuperAdmin) {
        return resp;
    }

    let body = match common::json_body(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    match services.shops.update_whatsapp(tenant.shop_id(), &body.whatsapp_number) {
        Ok(shop) => (StatusCode::OK, Json(shop)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
