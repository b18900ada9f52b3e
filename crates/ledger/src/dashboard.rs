//! Per-shop dashboard aggregation.
//!
//! Pure over a snapshot of the shop's products and transactions; the ledger
//! takes the snapshot and calls [`compute_dashboard`].

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopledger_catalog::Product;
use shopledger_core::{DomainError, DomainResult};

use crate::transaction::{Transaction, TransactionKind};

/// Products with fewer units than this count as low on stock.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Sum of Sale amounts as recorded.
    pub total_sales: Decimal,
    /// Sum of Expense and Withdrawal amounts.
    pub total_expenses: Decimal,
    /// `total_revenue - total_cost - total_expenses`.
    pub net_profit: Decimal,
    pub low_stock_count: u64,
    /// Sale quantity times the product's current selling price.
    pub total_revenue: Decimal,
    /// Sale quantity times the product's current purchase price.
    pub total_cost: Decimal,
    pub products_sold: u64,
}

/// Aggregate one shop's figures.
///
/// Revenue and cost use current prices, and sales whose product has since
/// been deleted contribute to neither (they still count in `total_sales`
/// and `products_sold`). Overflow of any running total is an internal error.
pub fn compute_dashboard(products: &[Product], transactions: &[Transaction]) -> DomainResult<DashboardStats> {
    let mut stats = DashboardStats {
        low_stock_count: products
            .iter()
            .filter(|p| p.stock < LOW_STOCK_THRESHOLD)
            .count() as u64,
        ..DashboardStats::default()
    };

    let by_id: HashMap<_, _> = products.iter().map(|p| (p.id, p)).collect();

    for tx in transactions {
        match tx.kind {
            TransactionKind::Sale => {
                stats.total_sales = add(stats.total_sales, tx.amount)?;
                stats.products_sold += u64::from(tx.quantity);

                if let Some(product) = tx.product_id.and_then(|id| by_id.get(&id)) {
                    let quantity = Decimal::from(tx.quantity);
                    stats.total_revenue = add(stats.total_revenue, mul(quantity, product.selling_price)?)?;
                    stats.total_cost = add(stats.total_cost, mul(quantity, product.purchase_price)?)?;
                }
            }
            TransactionKind::Expense | TransactionKind::Withdrawal => {
                stats.total_expenses = add(stats.total_expenses, tx.amount)?;
            }
        }
    }

    stats.net_profit = stats
        .total_revenue
        .checked_sub(stats.total_cost)
        .and_then(|gross| gross.checked_sub(stats.total_expenses))
        .ok_or_else(overflow)?;
    Ok(stats)
}

fn add(a: Decimal, b: Decimal) -> DomainResult<Decimal> {
    a.checked_add(b).ok_or_else(overflow)
}

fn mul(a: Decimal, b: Decimal) -> DomainResult<Decimal> {
    a.checked_mul(b).ok_or_else(overflow)
}

fn overflow() -> DomainError {
    DomainError::internal("dashboard totals overflowed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;
    use shopledger_core::{ProductId, ShopId, TransactionId};

    const SHOP: ShopId = ShopId::new(1);

    fn product(id: u64, purchase: i64, selling: i64, stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("p{id}"),
            description: String::new(),
            category: String::new(),
            purchase_price: Decimal::from(purchase),
            selling_price: Decimal::from(selling),
            stock,
            image_url: String::new(),
            shop_id: SHOP,
            created_at: Utc::now(),
        }
    }

    fn tx(id: u64, kind: TransactionKind, product: Option<u64>, quantity: u32, amount: i64) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            kind,
            product_id: product.map(ProductId::new),
            quantity,
            amount: Decimal::from(amount),
            shop_id: SHOP,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_shop_is_all_zero() {
        assert_eq!(compute_dashboard(&[], &[]).unwrap(), DashboardStats::default());
    }

    #[test]
    fn seeded_shop_figures() {
        let products = [
            product(1, 8000, 10000, 15),
            product(2, 15000, 18000, 8),
            product(4, 1500, 2000, 3),
        ];
        let transactions = [
            tx(1, TransactionKind::Sale, Some(1), 2, 20000),
            tx(2, TransactionKind::Expense, None, 1, 5000),
        ];

        let stats = compute_dashboard(&products, &transactions).unwrap();
        assert_eq!(stats.total_sales, Decimal::from(20000));
        assert_eq!(stats.total_expenses, Decimal::from(5000));
        assert_eq!(stats.total_revenue, Decimal::from(20000));
        assert_eq!(stats.total_cost, Decimal::from(16000));
        assert_eq!(stats.net_profit, Decimal::from(-1000));
        assert_eq!(stats.products_sold, 2);
        assert_eq!(stats.low_stock_count, 1);
    }

    #[test]
    fn sales_of_deleted_products_only_count_in_sales_and_quantity() {
        let transactions = [tx(1, TransactionKind::Sale, Some(9), 4, 400)];
        let stats = compute_dashboard(&[], &transactions).unwrap();

        assert_eq!(stats.total_sales, Decimal::from(400));
        assert_eq!(stats.products_sold, 4);
        assert_eq!(stats.total_revenue, Decimal::ZERO);
        assert_eq!(stats.total_cost, Decimal::ZERO);
    }

    #[test]
    fn withdrawals_count_as_expenses() {
        let transactions = [
            tx(1, TransactionKind::Withdrawal, None, 1, 300),
            tx(2, TransactionKind::Expense, None, 1, 200),
        ];
        let stats = compute_dashboard(&[], &transactions).unwrap();
        assert_eq!(stats.total_expenses, Decimal::from(500));
        assert_eq!(stats.net_profit, Decimal::from(-500));
    }

    #[test]
    fn low_stock_threshold_is_exclusive() {
        let products = [product(1, 1, 2, 4), product(2, 1, 2, 5), product(3, 1, 2, 0)];
        assert_eq!(compute_dashboard(&products, &[]).unwrap().low_stock_count, 2);
    }

    #[test]
    fn overflowing_totals_are_an_error_not_a_panic() {
        let mut huge = tx(1, TransactionKind::Expense, None, 1, 0);
        huge.amount = Decimal::MAX;
        let expenses = [huge.clone(), Transaction { id: TransactionId::new(2), ..huge }];
        assert!(matches!(compute_dashboard(&[], &expenses), Err(DomainError::Internal(_))));

        let mut pricey = product(1, 1, 1, 10);
        pricey.selling_price = Decimal::MAX;
        let sales = [tx(1, TransactionKind::Sale, Some(1), 10, 10)];
        assert!(matches!(compute_dashboard(&[pricey], &sales), Err(DomainError::Internal(_))));
    }

    fn arb_tx() -> impl Strategy<Value = (u8, Option<u64>, u32, i64)> {
        (0u8..3, prop::option::of(1u64..=4), 1u32..50, 1i64..10_000)
    }

    proptest! {
        /// Property: totals match a plain integer recount over the same
        /// transactions, and net profit is revenue minus cost minus expenses.
        #[test]
        fn net_profit_matches_an_independent_recount(raw in prop::collection::vec(arb_tx(), 0..30)) {
            // (id, purchase, selling); product 4 is referenced but missing.
            let prices: [(u64, i64, i64); 3] = [(1, 10, 15), (2, 3, 9), (3, 0, 1)];
            let products: Vec<Product> = prices
                .iter()
                .map(|&(id, purchase, selling)| product(id, purchase, selling, 7))
                .collect();

            let mut sales = 0i64;
            let mut revenue = 0i64;
            let mut cost = 0i64;
            let mut expenses = 0i64;
            let mut sold = 0u64;
            let mut transactions = Vec::new();

            for (i, &(k, p, q, a)) in raw.iter().enumerate() {
                let kind = match k {
                    0 => TransactionKind::Sale,
                    1 => TransactionKind::Expense,
                    _ => TransactionKind::Withdrawal,
                };
                if kind == TransactionKind::Sale {
                    sales += a;
                    sold += u64::from(q);
                    if let Some(&(_, purchase, selling)) = prices.iter().find(|(id, _, _)| Some(*id) == p) {
                        revenue += i64::from(q) * selling;
                        cost += i64::from(q) * purchase;
                    }
                } else {
                    expenses += a;
                }
                transactions.push(tx(i as u64 + 1, kind, p, q, a));
            }

            let stats = compute_dashboard(&products, &transactions).unwrap();
            prop_assert_eq!(stats.total_sales, Decimal::from(sales));
            prop_assert_eq!(stats.total_revenue, Decimal::from(revenue));
            prop_assert_eq!(stats.total_cost, Decimal::from(cost));
            prop_assert_eq!(stats.total_expenses, Decimal::from(expenses));
            prop_assert_eq!(stats.net_profit, Decimal::from(revenue - cost - expenses));
            prop_assert_eq!(stats.products_sold, sold);
        }
    }
}
