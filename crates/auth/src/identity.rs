//! Identities (shop staff accounts) and their in-memory store.
//!
//! An identity belongs to exactly one shop and carries one role. Emails are
//! unique across the whole process (case-insensitive).

use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

use shopledger_core::{DomainError, DomainResult, Entity, IdSequence, ShopId, TenantOwned, UserId};

use crate::password::{self, PasswordError};
use crate::Role;

// ─────────────────────────────────────────────────────────────────────────────
// Identity
// ─────────────────────────────────────────────────────────────────────────────

/// A registered identity, including its password hash.
///
/// Not `Serialize`; use [`IdentityView`] for anything that
/// leaves the process.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub shop_id: ShopId,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    pub fn view(&self) -> IdentityView {
        IdentityView {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            shop_id: self.shop_id,
            created_at: self.created_at,
        }
    }
}

impl core::fmt::Debug for Identity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .field("shop_id", &self.shop_id)
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl Entity for Identity {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

impl TenantOwned for Identity {
    fn shop_id(&self) -> ShopId {
        self.shop_id
    }
}

/// Public projection of an identity (no password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityView {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub shop_id: ShopId,
    pub created_at: DateTime<Utc>,
}

/// Input for [`IdentityStore::register`].
#[derive(Clone)]
pub struct NewIdentity {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub shop_id: ShopId,
}

impl NewIdentity {
    fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() || self.password.is_empty() {
            return Err(DomainError::invalid("name, email, and password are required"));
        }
        if !self.email.contains('@') {
            return Err(DomainError::invalid("invalid email format"));
        }
        Ok(())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl From<PasswordError> for DomainError {
    fn from(err: PasswordError) -> Self {
        DomainError::internal(err.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct IdentityState {
    identities: Vec<Identity>,
    ids: IdSequence,
}

/// In-memory identity store guarded by a single read/write lock.
#[derive(Debug, Default)]
pub struct IdentityStore {
    inner: RwLock<IdentityState>,
}

impl IdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new identity.
    ///
    /// The shop's existence is checked by the caller (the directory of shops
    /// lives in another store). The password is hashed before the write lock
    /// is taken; uniqueness is checked again under the lock.
    pub fn register(&self, new: NewIdentity) -> DomainResult<Identity> {
        new.validate()?;
        let email = normalize_email(&new.email);

        if self.find_by_email(&email).is_some() {
            return Err(DomainError::AlreadyExists("email"));
        }

        let password_hash = password::hash_password(&new.password)?;

        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if state.identities.iter().any(|i| i.email == email) {
            return Err(DomainError::AlreadyExists("email"));
        }

        let identity = Identity {
            id: UserId::new(state.ids.advance()),
            name: new.name.trim().to_string(),
            email,
            password_hash,
            role: new.role,
            shop_id: new.shop_id,
            created_at: Utc::now(),
        };
        state.identities.push(identity.clone());

        tracing::info!(
            user_id = %identity.id,
            shop_id = %identity.shop_id,
            role = %identity.role,
            "identity registered"
        );
        Ok(identity)
    }

    /// Check an email/password pair.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller,
    /// in outcome and in hashing cost.
    pub fn verify_credentials(&self, email: &str, password: &str) -> DomainResult<Identity> {
        let Some(identity) = self.find_by_email(&normalize_email(email)) else {
            password::verify_dummy(password);
            return Err(DomainError::Unauthorized);
        };

        if password::verify_password(password, &identity.password_hash)? {
            Ok(identity)
        } else {
            Err(DomainError::Unauthorized)
        }
    }

    pub fn get(&self, id: UserId) -> DomainResult<Identity> {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        state
            .identities
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or(DomainError::NotFound("user"))
    }

    fn find_by_email(&self, email: &str) -> Option<Identity> {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        state.identities.iter().find(|i| i.email == email).cloned()
    }
}
