use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use shopledger_auth::NewIdentity;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::RegisterRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match common::json_body(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    let input = NewIdentity::from(body);
    match common::blocking(move || services.register(input)).await {
        Ok(identity) => (StatusCode::CREATED, Json(identity.view())).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::LoginRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match common::json_body(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    if body.email.trim().is_empty() || body.password.is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_input",
            "email and password are required",
        );
    }

    match common::blocking(move || services.auth.login(&body.email, &body.password)).await {
        Ok(output) => (StatusCode::OK, Json(output)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
