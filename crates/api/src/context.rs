use shopledger_auth::{Role, SessionClaims};
use shopledger_core::{ShopId, UserId};

/// Tenant context for a request.
///
/// Derived from the session token only; never from the path or body.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TenantContext {
    shop_id: ShopId,
}

impl TenantContext {
    pub fn new(shop_id: ShopId) -> Self {
        Self { shop_id }
    }

    pub fn shop_id(&self) -> ShopId {
        self.shop_id
    }
}

/// Principal context for a request (the validated session claims).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    claims: SessionClaims,
}

impl PrincipalContext {
    pub fn new(claims: SessionClaims) -> Self {
        Self { claims }
    }

    pub fn user_id(&self) -> UserId {
        self.claims.user_id
    }

    pub fn role(&self) -> Role {
        self.claims.role
    }

    pub fn claims(&self) -> &SessionClaims {
        &self.claims
    }
}
