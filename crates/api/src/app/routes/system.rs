use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::services::AppServices;
use crate::context::{PrincipalContext, TenantContext};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Decoded session plus the stored profile, when the identity still exists.
pub async fn whoami(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> impl IntoResponse {
    let claims = principal.claims();
    let profile = services
        .auth
        .identities()
        .get(principal.user_id())
        .ok()
        .map(|identity| identity.view());

    Json(serde_json::json!({
        "user_id": principal.user_id(),
        "email": claims.email,
        "role": principal.role().as_str(),
        "shop_id": tenant.shop_id(),
        "issued_at": claims.issued_at(),
        "expires_at": claims.expires_at(),
        "profile": profile,
    }))
}
