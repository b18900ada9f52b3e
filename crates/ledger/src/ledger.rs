use std::sync::{PoisonError, RwLock};

use chrono::Utc;

use shopledger_catalog::ProductCatalog;
use shopledger_core::{DomainError, DomainResult, IdSequence, ShopId, TransactionId};

use crate::dashboard::{compute_dashboard, DashboardStats};
use crate::transaction::{NewTransaction, Transaction, TransactionKind};

#[derive(Debug, Default)]
struct LedgerState {
    transactions: Vec<Transaction>,
    ids: IdSequence,
}

/// Append-only ledger over a product catalog.
///
/// The catalog is only ever reached through its public contract, and never
/// while the ledger lock is held.
#[derive(Debug)]
pub struct Ledger<C> {
    catalog: C,
    inner: RwLock<LedgerState>,
}

impl<C: ProductCatalog> Ledger<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            inner: RwLock::new(LedgerState::default()),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Validate and append a transaction for `shop_id`.
    ///
    /// A Sale withdraws its quantity from the product's stock in the same
    /// catalog operation that checks ownership and availability.
    pub fn record(&self, shop_id: ShopId, new: NewTransaction) -> DomainResult<Transaction> {
        new.validate()?;

        if let Some(product_id) = new.product_id {
            if new.kind == TransactionKind::Sale {
                self.catalog.withdraw_stock(shop_id, product_id, new.quantity)?;
            } else {
                let product = self.catalog.get(product_id)?;
                if product.shop_id != shop_id {
                    return Err(DomainError::CrossTenantReference);
                }
            }
        }

        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let tx = Transaction {
            id: TransactionId::new(state.ids.advance()),
            kind: new.kind,
            product_id: new.product_id,
            quantity: new.quantity,
            amount: new.amount,
            shop_id,
            created_at: Utc::now(),
        };
        state.transactions.push(tx.clone());

        tracing::info!(
            transaction_id = %tx.id,
            shop_id = %shop_id,
            kind = %tx.kind,
            amount = %tx.amount,
            "transaction recorded"
        );
        Ok(tx)
    }

    /// Transactions of one shop, insertion order.
    pub fn list(&self, shop_id: ShopId) -> Vec<Transaction> {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        state
            .transactions
            .iter()
            .filter(|t| t.shop_id == shop_id)
            .cloned()
            .collect()
    }

    pub fn dashboard(&self, shop_id: ShopId) -> DomainResult<DashboardStats> {
        let products = self.catalog.list(shop_id);
        let transactions = self.list(shop_id);
        compute_dashboard(&products, &transactions)
    }
}
