//! Domain primitives shared by every crate.
//!
//! Identifiers, the error taxonomy and the entity trait. No IO, no locking.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::{Entity, TenantOwned};
pub use error::{DomainError, DomainResult};
pub use id::{IdSequence, ProductId, ShopId, TransactionId, UserId};
