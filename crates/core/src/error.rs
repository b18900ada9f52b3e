//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is constructed where the failure is detected and returned
/// immediately; write paths validate before they mutate, so an error never
/// leaves partial state behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input could not be parsed at all (bad JSON, bad path parameter).
    #[error("malformed input: {0}")]
    Malformed(String),

    /// Input parsed but failed domain validation (e.g. non-positive price).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Missing, malformed, invalid or expired credential.
    #[error("unauthorized")]
    Unauthorized,

    /// Valid credential, but insufficient role or wrong tenant.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A requested resource does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A sale asked for more units than the product has in stock.
    #[error("insufficient stock (available: {available}, requested: {requested})")]
    InsufficientStock { available: u32, requested: u32 },

    /// A transaction referenced a product owned by another shop.
    #[error("product does not belong to this shop")]
    CrossTenantReference,

    /// Unique key already taken (e.g. email on registration).
    #[error("{0} already exists")]
    AlreadyExists(&'static str),

    /// Unexpected failure; the message is for logs, not for clients.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Short machine-readable kind, stable across releases.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::Malformed(_) => "malformed",
            DomainError::InvalidInput(_) => "invalid_input",
            DomainError::Unauthorized => "unauthorized",
            DomainError::Forbidden(_) => "forbidden",
            DomainError::NotFound(_) => "not_found",
            DomainError::InsufficientStock { .. } => "insufficient_stock",
            DomainError::CrossTenantReference => "cross_tenant_reference",
            DomainError::AlreadyExists(_) => "already_exists",
            DomainError::Internal(_) => "internal",
        }
    }
}
