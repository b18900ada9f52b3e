//! Tenant-scoped product catalog and the shop (tenant) directory.
//!
//! In-memory stores, each behind its own read/write lock. Ownership checks
//! against the caller's shop are the access guard's job; the catalog only
//! filters listings by shop.

pub mod product;
pub mod shop;
pub mod store;

pub use product::{AdminProduct, MAX_PRICE, Product, ProductFields, PublicProduct};
pub use shop::{Shop, ShopDirectory, whatsapp_link};
pub use store::{InMemoryCatalog, ProductCatalog};
