use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shopledger_core::{ShopId, UserId};

use crate::Role;

/// Session claims carried inside a token.
///
/// Self-contained: the server keeps no session table, so these are rebuilt
/// from the token on every request and dropped when the request ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,

    /// Tenant scope for every private operation made with this token.
    pub shop_id: ShopId,

    /// Issued-at (Unix seconds).
    pub iat: i64,

    /// Expiration (Unix seconds).
    pub exp: i64,

    /// Unique token id.
    pub jti: String,
}

impl SessionClaims {
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClaimsError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically validate the time window of decoded claims.
///
/// Signature verification happens before this, in [`crate::TokenService`].
/// A token is expired once `now >= exp`. Clock skew is not compensated.
pub fn validate_claims(claims: &SessionClaims, now: DateTime<Utc>) -> Result<(), ClaimsError> {
    if claims.exp <= claims.iat {
        return Err(ClaimsError::InvalidTimeWindow);
    }
    if now.timestamp() >= claims.exp {
        return Err(ClaimsError::Expired);
    }
    Ok(())
}
