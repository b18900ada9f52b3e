//! Append-only transaction ledger with per-shop dashboard aggregation.

pub mod dashboard;
pub mod ledger;
pub mod transaction;

pub use dashboard::{compute_dashboard, DashboardStats, LOW_STOCK_THRESHOLD};
pub use ledger::Ledger;
pub use transaction::{MAX_AMOUNT, NewTransaction, Transaction, TransactionKind};
