use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use shopledger_catalog::ProductCatalog;
use shopledger_core::ShopId;

use crate::app::errors;
use crate::app::routes::common;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/:shop_id/products", get(list_public_products))
}

/// Storefront listing for anonymous visitors.
pub async fn list_public_products(
    Extension(services): Extension<Arc<AppServices>>,
    Path(shop_id): Path<String>,
) -> axum::response::Response {
    let shop_id: ShopId = match common::parse_id(&shop_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let shop = match services.shops.get(shop_id) {
        Ok(s) => s,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let items = services
        .catalog()
        .list(shop.id)
        .iter()
        .map(|p| p.public_view(&shop.whatsapp_number))
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(items)).into_response()
}
