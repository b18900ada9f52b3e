use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use shopledger_auth::AccessError;
use shopledger_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let status = match &err {
        DomainError::Malformed(_)
        | DomainError::InvalidInput(_)
        | DomainError::InsufficientStock { .. } => StatusCode::BAD_REQUEST,
        DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) | DomainError::CrossTenantReference => StatusCode::FORBIDDEN,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::AlreadyExists(_) => StatusCode::CONFLICT,
        DomainError::Internal(msg) => {
            tracing::error!(error = %msg, "internal error");
            return json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                err.kind(),
                "internal server error",
            );
        }
    };

    let message = match &err {
        DomainError::Unauthorized => "invalid credentials".to_string(),
        DomainError::Forbidden(msg) => msg.clone(),
        DomainError::Malformed(msg) | DomainError::InvalidInput(msg) => msg.clone(),
        other => other.to_string(),
    };

    json_error(status, err.kind(), message)
}

pub fn access_error_to_response(err: AccessError) -> axum::response::Response {
    domain_error_to_response(err.into())
}

/// Unparseable or wrongly typed JSON bodies are a 400, not axum's 422.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "malformed", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
