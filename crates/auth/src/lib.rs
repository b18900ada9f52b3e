//! Credentials, session tokens and the access guard.
//!
//! Decoupled from HTTP and from the catalog/ledger stores.

pub mod claims;
pub mod guard;
pub mod identity;
pub mod password;
pub mod roles;
pub mod service;
pub mod token;

pub use claims::{ClaimsError, SessionClaims, validate_claims};
pub use guard::{AccessError, authenticate, bearer_token, ensure_tenant, require_role};
pub use identity::{Identity, IdentityStore, IdentityView, NewIdentity};
pub use roles::Role;
pub use service::{AuthService, LoginOutput};
pub use token::{TokenConfig, TokenError, TokenService};
