use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use shopledger_auth::ensure_tenant;
use shopledger_catalog::{ProductCatalog, ProductFields};
use shopledger_core::ProductId;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::{PrincipalContext, TenantContext};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/:id", put(update_product).delete(delete_product))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    let items = services
        .catalog()
        .list(tenant.shop_id())
        .into_iter()
        .map(|p| dto::product_view(p, principal.role()))
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(items)).into_response()
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<dto::ProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let fields = match common::json_body(body).and_then(|b| {
        ProductFields::try_from(b).map_err(errors::domain_error_to_response)
    }) {
        Ok(f) => f,
        Err(resp) => return resp,
    };

    match services.catalog().create(tenant.shop_id(), fields) {
        Ok(p) => (StatusCode::CREATED, Json(dto::product_view(p, principal.role()))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<dto::ProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let product_id: ProductId = match common::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let fields = match common::json_body(body).and_then(|b| {
        ProductFields::try_from(b).map_err(errors::domain_error_to_response)
    }) {
        Ok(f) => f,
        Err(resp) => return resp,
    };

    let existing = match services.catalog().get(product_id) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Err(e) = ensure_tenant(principal.claims(), &existing) {
        return errors::access_error_to_response(e);
    }

    match services.catalog().update(product_id, fields) {
        Ok(p) => (StatusCode::OK, Json(dto::product_view(p, principal.role()))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id: ProductId = match common::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let existing = match services.catalog().get(product_id) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Err(e) = ensure_tenant(principal.claims(), &existing) {
        return errors::access_error_to_response(e);
    }

    match services.catalog().delete(product_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
