//! Entity traits: identity + tenant ownership.

use crate::id::ShopId;

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}

/// An entity that belongs to exactly one shop (tenant).
///
/// Every by-id access to a tenant-owned entity must compare this against the
/// caller's shop before returning or mutating it.
pub trait TenantOwned: Entity {
    fn shop_id(&self) -> ShopId;
}
