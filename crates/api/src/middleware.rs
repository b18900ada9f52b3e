use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use shopledger_auth::{authenticate, TokenService};

use crate::app::errors;
use crate::context::{PrincipalContext, TenantContext};

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenService>,
}

/// Authenticate the bearer token and attach tenant + principal context.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let claims = authenticate(header, &state.tokens, Utc::now()).map_err(|_e| {
        errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", "missing or invalid token")
    })?;

    req.extensions_mut().insert(TenantContext::new(claims.shop_id));
    req.extensions_mut().insert(PrincipalContext::new(claims));

    Ok(next.run(req).await)
}
