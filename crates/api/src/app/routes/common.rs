use core::str::FromStr;

use axum::{extract::rejection::JsonRejection, response::Response, Json};

use shopledger_auth::{require_role, Role};
use shopledger_core::{DomainError, DomainResult};

use crate::app::errors;
use crate::context::PrincipalContext;

/// Role gate for a handler; the response is ready to return as-is.
pub fn require(principal: &PrincipalContext, min_role: Role) -> Result<(), Response> {
    require_role(principal.claims(), min_role).map_err(errors::access_error_to_response)
}

/// Parse a numeric id path segment (`400 malformed` on failure).
pub fn parse_id<T>(raw: &str) -> Result<T, Response>
where
    T: FromStr<Err = DomainError>,
{
    raw.parse::<T>().map_err(errors::domain_error_to_response)
}

pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    body.map(|Json(inner)| inner)
        .map_err(errors::json_rejection_to_response)
}

/// Run CPU-heavy domain work (password hashing) off the async workers.
pub async fn blocking<T, F>(work: F) -> DomainResult<T>
where
    F: FnOnce() -> DomainResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .unwrap_or_else(|e| Err(DomainError::internal(format!("blocking task failed: {e}"))))
}
