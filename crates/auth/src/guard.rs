//! Access guard: authentication from the `Authorization` header, role
//! requirements, and the tenant-ownership check.
//!
//! Transport-agnostic: callers pass the raw header value and get back
//! either trusted claims or an [`AccessError`].

use chrono::{DateTime, Utc};
use thiserror::Error;

use shopledger_core::{DomainError, TenantOwned};

use crate::claims::SessionClaims;
use crate::token::TokenService;
use crate::Role;

/// Scheme prefix of the only accepted credential format.
pub const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// No usable credential. The concrete reason is never exposed.
    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden: {0}")]
    Forbidden(String),
}

impl From<AccessError> for DomainError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthorized => DomainError::Unauthorized,
            AccessError::Forbidden(msg) => DomainError::Forbidden(msg),
        }
    }
}

/// Extract the token from a `Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AccessError> {
    let header = header.ok_or(AccessError::Unauthorized)?;
    let token = header.strip_prefix(BEARER_PREFIX).ok_or(AccessError::Unauthorized)?;

    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AccessError::Unauthorized);
    }
    Ok(token)
}

/// Authenticate a request from its `Authorization` header.
pub fn authenticate(
    header: Option<&str>,
    tokens: &TokenService,
    now: DateTime<Utc>,
) -> Result<SessionClaims, AccessError> {
    let token = bearer_token(header)?;
    tokens.validate_at(token, now).map_err(|e| {
        tracing::debug!(reason = %e, "token rejected");
        AccessError::Unauthorized
    })
}

/// Require `claims.role >= min_role`.
pub fn require_role(claims: &SessionClaims, min_role: Role) -> Result<(), AccessError> {
    if claims.role.satisfies(min_role) {
        Ok(())
    } else {
        tracing::debug!(user_id = %claims.user_id, role = %claims.role, required = %min_role, "role check failed");
        Err(AccessError::Forbidden(match min_role {
            Role::SuperAdmin => "super admin access required".to_string(),
            Role::Admin => "admin access required".to_string(),
        }))
    }
}

/// Require that a tenant-owned resource belongs to the caller's shop.
///
/// Out-of-tenant resources yield `Forbidden` (not `NotFound`), for every
/// resource type.
pub fn ensure_tenant<E: TenantOwned>(claims: &SessionClaims, resource: &E) -> Result<(), AccessError> {
    if resource.shop_id() == claims.shop_id {
        Ok(())
    } else {
        tracing::warn!(
            user_id = %claims.user_id,
            shop_id = %claims.shop_id,
            resource_shop_id = %resource.shop_id(),
            "cross-tenant access denied"
        );
        Err(AccessError::Forbidden("resource belongs to a different shop".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shopledger_core::{Entity, ShopId, UserId};

    use crate::identity::Identity;
    use crate::token::TokenConfig;

    struct Owned(ShopId);

    impl Entity for Owned {
        type Id = u64;

        fn id(&self) -> u64 {
            1
        }
    }

    impl TenantOwned for Owned {
        fn shop_id(&self) -> ShopId {
            self.0
        }
    }

    fn tokens() -> TokenService {
        TokenService::new(&TokenConfig::new("guard-secret"))
    }

    fn identity(role: Role, shop: u64) -> Identity {
        Identity {
            id: UserId::new(1),
            name: "n".to_string(),
            email: "a@x.com".to_string(),
            password_hash: String::new(),
            role,
            shop_id: ShopId::new(shop),
            created_at: Utc::now(),
        }
    }

    fn claims(role: Role, shop: u64) -> SessionClaims {
        let svc = tokens();
        let token = svc.issue(&identity(role, shop)).unwrap();
        svc.validate(&token).unwrap()
    }

    #[test]
    fn bearer_header_format_is_strict() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi"));

        for bad in [None, Some(""), Some("Bearer "), Some("bearer abc"), Some("Basic abc"), Some("Bearer a b"), Some("Bearer  abc"), Some("abc")] {
            assert_eq!(bearer_token(bad), Err(AccessError::Unauthorized), "{bad:?}");
        }
    }

    #[test]
    fn authenticate_accepts_valid_tokens_only() {
        let svc = tokens();
        let token = svc.issue(&identity(Role::Admin, 3)).unwrap();
        let header = format!("Bearer {token}");

        let claims = authenticate(Some(&header), &svc, Utc::now()).unwrap();
        assert_eq!(claims.shop_id, ShopId::new(3));

        let later = Utc::now() + Duration::days(8);
        assert_eq!(authenticate(Some(&header), &svc, later), Err(AccessError::Unauthorized));

        let other = TokenService::new(&TokenConfig::new("other"));
        assert_eq!(authenticate(Some(&header), &other, Utc::now()), Err(AccessError::Unauthorized));
        assert_eq!(authenticate(None, &svc, Utc::now()), Err(AccessError::Unauthorized));
    }

    #[test]
    fn role_requirements_follow_the_hierarchy() {
        let admin = claims(Role::Admin, 1);
        let super_admin = claims(Role::SuperAdmin, 1);

        assert!(require_role(&admin, Role::Admin).is_ok());
        assert!(require_role(&super_admin, Role::Admin).is_ok());
        assert!(require_role(&super_admin, Role::SuperAdmin).is_ok());
        assert!(matches!(require_role(&admin, Role::SuperAdmin), Err(AccessError::Forbidden(_))));
    }

    #[test]
    fn cross_tenant_resources_are_forbidden() {
        let caller = claims(Role::SuperAdmin, 1);
        assert!(ensure_tenant(&caller, &Owned(ShopId::new(1))).is_ok());
        assert!(matches!(
            ensure_tenant(&caller, &Owned(ShopId::new(2))),
            Err(AccessError::Forbidden(_))
        ));
    }

    #[test]
    fn access_errors_map_to_domain_errors() {
        assert_eq!(DomainError::from(AccessError::Unauthorized), DomainError::Unauthorized);
        assert!(matches!(
            DomainError::from(AccessError::Forbidden("x".into())),
            DomainError::Forbidden(_)
        ));
    }
}
