use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;

use shopledger_core::{DomainError, DomainResult, IdSequence, ProductId, ShopId};

use crate::product::{Product, ProductFields};

/// Tenant-scoped product catalog.
///
/// `get`, `update` and `delete` are global by id; callers confirm ownership
/// with the access guard before acting on the result.
pub trait ProductCatalog: Send + Sync {
    /// Products of one shop, insertion order.
    fn list(&self, shop_id: ShopId) -> Vec<Product>;
    fn get(&self, id: ProductId) -> DomainResult<Product>;
    fn create(&self, shop_id: ShopId, fields: ProductFields) -> DomainResult<Product>;
    fn update(&self, id: ProductId, fields: ProductFields) -> DomainResult<Product>;
    fn delete(&self, id: ProductId) -> DomainResult<()>;
    /// Check that `shop_id` owns the product and has at least `quantity` in
    /// stock, then decrement, all under one write lock.
    fn withdraw_stock(&self, shop_id: ShopId, id: ProductId, quantity: u32) -> DomainResult<Product>;
}

impl<S> ProductCatalog for Arc<S>
where
    S: ProductCatalog + ?Sized,
{
    fn list(&self, shop_id: ShopId) -> Vec<Product> {
        (**self).list(shop_id)
    }

    fn get(&self, id: ProductId) -> DomainResult<Product> {
        (**self).get(id)
    }

    fn create(&self, shop_id: ShopId, fields: ProductFields) -> DomainResult<Product> {
        (**self).create(shop_id, fields)
    }

    fn update(&self, id: ProductId, fields: ProductFields) -> DomainResult<Product> {
        (**self).update(id, fields)
    }

    fn delete(&self, id: ProductId) -> DomainResult<()> {
        (**self).delete(id)
    }

    fn withdraw_stock(&self, shop_id: ShopId, id: ProductId, quantity: u32) -> DomainResult<Product> {
        (**self).withdraw_stock(shop_id, id, quantity)
    }
}

#[derive(Debug, Default)]
struct CatalogState {
    products: Vec<Product>,
    // Ids of deleted products are never handed out again.
    ids: IdSequence,
}

/// In-memory catalog guarded by a single read/write lock.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    inner: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn list(&self, shop_id: ShopId) -> Vec<Product> {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        state
            .products
            .iter()
            .filter(|p| p.shop_id == shop_id)
            .cloned()
            .collect()
    }

    fn get(&self, id: ProductId) -> DomainResult<Product> {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        state
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(DomainError::NotFound("product"))
    }

    fn create(&self, shop_id: ShopId, fields: ProductFields) -> DomainResult<Product> {
        fields.validate()?;

        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let id = ProductId::new(state.ids.advance());
        let product = Product::from_fields(id, shop_id, fields, Utc::now());
        state.products.push(product.clone());

        tracing::info!(product_id = %id, shop_id = %shop_id, "product created");
        Ok(product)
    }

    fn update(&self, id: ProductId, fields: ProductFields) -> DomainResult<Product> {
        fields.validate()?;

        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DomainError::NotFound("product"))?;
        product.apply(fields);

        tracing::info!(product_id = %id, shop_id = %product.shop_id, "product updated");
        Ok(product.clone())
    }

    fn delete(&self, id: ProductId) -> DomainResult<()> {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let index = state
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(DomainError::NotFound("product"))?;
        let removed = state.products.remove(index);

        tracing::info!(product_id = %id, shop_id = %removed.shop_id, "product deleted");
        Ok(())
    }

    fn withdraw_stock(&self, shop_id: ShopId, id: ProductId, quantity: u32) -> DomainResult<Product> {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DomainError::NotFound("product"))?;

        if product.shop_id != shop_id {
            tracing::warn!(
                product_id = %id,
                owner = %product.shop_id,
                requested_by = %shop_id,
                "stock withdrawal across shops rejected"
            );
            return Err(DomainError::CrossTenantReference);
        }
        if product.stock < quantity {
            return Err(DomainError::InsufficientStock {
                available: product.stock,
                requested: quantity,
            });
        }

        product.stock -= quantity;
        tracing::debug!(product_id = %id, remaining = product.stock, "stock withdrawn");
        Ok(product.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn fields(name: &str, stock: u32) -> ProductFields {
        ProductFields {
            name: name.to_string(),
            description: "desc".to_string(),
            category: "misc".to_string(),
            purchase_price: Decimal::from(5),
            selling_price: Decimal::from(10),
            stock,
            image_url: String::new(),
        }
    }

    const T1: ShopId = ShopId::new(1);
    const T2: ShopId = ShopId::new(2);

    #[test]
    fn create_assigns_ids_that_are_never_reused() {
        let catalog = InMemoryCatalog::new();
        let a = catalog.create(T1, fields("A", 1)).unwrap();
        let b = catalog.create(T1, fields("B", 1)).unwrap();
        catalog.delete(b.id).unwrap();
        let c = catalog.create(T1, fields("C", 1)).unwrap();

        assert_eq!(a.id, ProductId::new(1));
        assert_eq!(b.id, ProductId::new(2));
        assert_eq!(c.id, ProductId::new(3));
    }

    #[test]
    fn invalid_fields_leave_the_catalog_unchanged() {
        let catalog = InMemoryCatalog::new();
        let mut bad = fields("Widget", 1);
        bad.selling_price = Decimal::ZERO;

        assert!(matches!(catalog.create(T1, bad), Err(DomainError::InvalidInput(_))));
        assert!(catalog.list(T1).is_empty());
        // The failed create did not consume an id.
        assert_eq!(catalog.create(T1, fields("Widget", 1)).unwrap().id, ProductId::new(1));
    }

    #[test]
    fn list_is_scoped_to_the_shop_in_insertion_order() {
        let catalog = InMemoryCatalog::new();
        catalog.create(T1, fields("A", 1)).unwrap();
        catalog.create(T2, fields("B", 1)).unwrap();
        catalog.create(T1, fields("C", 1)).unwrap();

        let names: Vec<_> = catalog.list(T1).into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["A", "C"]);
        assert_eq!(catalog.list(T2).len(), 1);
        assert!(catalog.list(ShopId::new(3)).is_empty());
    }

    #[test]
    fn update_replaces_fields_but_keeps_identity() {
        let catalog = InMemoryCatalog::new();
        let original = catalog.create(T2, fields("A", 1)).unwrap();

        let updated = catalog.update(original.id, fields("A2", 9)).unwrap();
        assert_eq!(updated.name, "A2");
        assert_eq!(updated.stock, 9);
        assert_eq!(updated.shop_id, T2);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(catalog.get(original.id).unwrap(), updated);
    }

    #[test]
    fn missing_products_are_not_found() {
        let catalog = InMemoryCatalog::new();
        let missing = ProductId::new(42);

        assert_eq!(catalog.get(missing).unwrap_err(), DomainError::NotFound("product"));
        assert_eq!(
            catalog.update(missing, fields("A", 1)).unwrap_err(),
            DomainError::NotFound("product")
        );
        assert_eq!(catalog.delete(missing).unwrap_err(), DomainError::NotFound("product"));
        assert_eq!(
            catalog.withdraw_stock(T1, missing, 1).unwrap_err(),
            DomainError::NotFound("product")
        );
    }

    #[test]
    fn withdraw_checks_owner_and_stock_before_decrementing() {
        let catalog = InMemoryCatalog::new();
        let widget = catalog.create(T1, fields("Widget", 2)).unwrap();

        assert_eq!(
            catalog.withdraw_stock(T2, widget.id, 1).unwrap_err(),
            DomainError::CrossTenantReference
        );
        assert_eq!(
            catalog.withdraw_stock(T1, widget.id, 3).unwrap_err(),
            DomainError::InsufficientStock { available: 2, requested: 3 }
        );
        assert_eq!(catalog.get(widget.id).unwrap().stock, 2);

        assert_eq!(catalog.withdraw_stock(T1, widget.id, 2).unwrap().stock, 0);
        assert_eq!(catalog.get(widget.id).unwrap().stock, 0);
    }

    #[test]
    fn concurrent_withdrawals_never_oversell() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let widget = catalog.create(T1, fields("Widget", 10)).unwrap();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                std::thread::spawn(move || catalog.withdraw_stock(T1, widget.id, 1).is_ok())
            })
            .collect();
        let succeeded = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(succeeded, 10);
        assert_eq!(catalog.get(widget.id).unwrap().stock, 0);
    }

    proptest! {
        /// Property: whatever mix of shops products are created under,
        /// listing one shop never yields another shop's product.
        #[test]
        fn listing_never_leaks_across_shops(owners in prop::collection::vec(1u64..=3, 0..40)) {
            let catalog = InMemoryCatalog::new();
            for (i, owner) in owners.iter().enumerate() {
                catalog.create(ShopId::new(*owner), fields(&format!("p{i}"), 1)).unwrap();
            }

            for shop in 1u64..=3 {
                let listed = catalog.list(ShopId::new(shop));
                prop_assert!(listed.iter().all(|p| p.shop_id == ShopId::new(shop)));
                prop_assert_eq!(listed.len(), owners.iter().filter(|o| **o == shop).count());
            }
        }
    }
}
