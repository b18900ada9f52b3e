//! Authentication service: registration and login orchestration.

use serde::Serialize;

use shopledger_core::DomainResult;

use crate::identity::{Identity, IdentityStore, IdentityView, NewIdentity};
use crate::token::{TokenConfig, TokenService};

/// Successful login result.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutput {
    pub user: IdentityView,
    pub token: String,
}

/// Owns the identity store and the token service.
#[derive(Debug)]
pub struct AuthService {
    identities: IdentityStore,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            identities: IdentityStore::new(),
            tokens: TokenService::new(config),
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub fn identities(&self) -> &IdentityStore {
        &self.identities
    }

    pub fn register(&self, input: NewIdentity) -> DomainResult<Identity> {
        self.identities.register(input)
    }

    /// Verify credentials and issue a session token.
    pub fn login(&self, email: &str, password: &str) -> DomainResult<LoginOutput> {
        let identity = self.identities.verify_credentials(email, password).inspect_err(|_| {
            tracing::info!("login rejected");
        })?;

        let token = self.tokens.issue(&identity)?;
        tracing::info!(user_id = %identity.id, shop_id = %identity.shop_id, "login succeeded");

        Ok(LoginOutput {
            user: identity.view(),
            token,
        })
    }
}
