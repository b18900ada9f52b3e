use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopledger_catalog::MAX_PRICE;
use shopledger_core::{DomainError, DomainResult, Entity, ProductId, ShopId, TenantOwned, TransactionId};

/// Largest amount a single transaction may carry; same bound as prices.
pub const MAX_AMOUNT: Decimal = MAX_PRICE;

/// Kind of a ledger entry. Serialized with its exact variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Sale,
    Expense,
    Withdrawal,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Sale => "Sale",
            TransactionKind::Expense => "Expense",
            TransactionKind::Withdrawal => "Withdrawal",
        }
    }
}

impl core::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded ledger entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    pub quantity: u32,
    pub amount: Decimal,
    pub shop_id: ShopId,
    pub created_at: DateTime<Utc>,
}

impl Entity for Transaction {
    type Id = TransactionId;

    fn id(&self) -> TransactionId {
        self.id
    }
}

impl TenantOwned for Transaction {
    fn shop_id(&self) -> ShopId {
        self.shop_id
    }
}

/// Input for [`crate::Ledger::record`]; the shop comes from the caller's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub product_id: Option<ProductId>,
    pub quantity: u32,
    pub amount: Decimal,
}

impl NewTransaction {
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity == 0 || self.amount <= Decimal::ZERO {
            return Err(DomainError::invalid("quantity and amount must be positive"));
        }
        if self.amount > MAX_AMOUNT {
            return Err(DomainError::invalid("amount exceeds the allowed maximum"));
        }
        if self.kind == TransactionKind::Sale && self.product_id.is_none() {
            return Err(DomainError::invalid("product id required for sales"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new(kind: TransactionKind, product: Option<u64>, quantity: u32, amount: i64) -> NewTransaction {
        NewTransaction {
            kind,
            product_id: product.map(ProductId::new),
            quantity,
            amount: Decimal::from(amount),
        }
    }

    #[test]
    fn quantity_and_amount_must_be_positive() {
        assert!(new(TransactionKind::Expense, None, 1, 10).validate().is_ok());
        assert!(matches!(
            new(TransactionKind::Expense, None, 0, 10).validate(),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            new(TransactionKind::Withdrawal, None, 1, 0).validate(),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            new(TransactionKind::Withdrawal, None, 1, -5).validate(),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn amount_is_bounded() {
        let mut tx = new(TransactionKind::Expense, None, 1, 1);
        tx.amount = MAX_AMOUNT;
        assert!(tx.validate().is_ok());

        tx.amount = MAX_AMOUNT + Decimal::ONE;
        assert!(matches!(tx.validate(), Err(DomainError::InvalidInput(_))));
        tx.amount = Decimal::MAX;
        assert!(matches!(tx.validate(), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn sale_requires_a_product() {
        assert!(matches!(
            new(TransactionKind::Sale, None, 1, 10).validate(),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(new(TransactionKind::Sale, Some(1), 1, 10).validate().is_ok());
    }

    #[test]
    fn serializes_kind_as_type_and_omits_missing_product() {
        let tx = Transaction {
            id: TransactionId::new(2),
            kind: TransactionKind::Expense,
            product_id: None,
            quantity: 1,
            amount: Decimal::from(5000),
            shop_id: ShopId::new(1),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "Expense");
        assert!(json.get("product_id").is_none());
        assert_eq!(json["amount"], 5000.0);
    }

    #[test]
    fn kind_parses_only_exact_names() {
        let sale: TransactionKind = serde_json::from_str("\"Sale\"").unwrap();
        assert_eq!(sale, TransactionKind::Sale);
        assert!(serde_json::from_str::<TransactionKind>("\"sale\"").is_err());
        assert_eq!(TransactionKind::Withdrawal.to_string(), "Withdrawal");
    }
}
