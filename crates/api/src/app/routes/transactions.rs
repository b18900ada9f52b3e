use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use shopledger_auth::Role;
use shopledger_ledger::NewTransaction;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::{PrincipalContext, TenantContext};

pub fn router() -> Router {
    Router::new().route("/", get(list_transactions).post(record_transaction))
}

pub async fn list_transactions(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(resp) = common::require(&principal, Role::Admin) {
        return resp;
    }

    let items = services.ledger.list(tenant.shop_id());
    (StatusCode::OK, Json(items)).into_response()
}

pub async fn record_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<dto::TransactionRequest>, JsonRejection>,
) -> axum::response::Response {
    if let Err(resp) = common::require(&principal, Role::Admin) {
        return resp;
    }

    let new = match common::json_body(body).and_then(|b| {
        NewTransaction::try_from(b).map_err(errors::domain_error_to_response)
    }) {
        Ok(n) => n,
        Err(resp) => return resp,
    };

    match services.ledger.record(tenant.shop_id(), new) {
        Ok(tx) => (StatusCode::CREATED, Json(tx)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
