use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopledger_auth::{NewIdentity, Role};
use shopledger_catalog::{AdminProduct, Product, ProductFields};
use shopledger_core::{DomainError, DomainResult, ProductId, ShopId};
use shopledger_ledger::{NewTransaction, TransactionKind};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub shop_id: ShopId,
}

impl From<RegisterRequest> for NewIdentity {
    fn from(body: RegisterRequest) -> Self {
        NewIdentity {
            name: body.name,
            email: body.email,
            password: body.password,
            role: body.role,
            shop_id: body.shop_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub purchase_price: Decimal,
    pub selling_price: Decimal,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub image_url: String,
}

impl TryFrom<ProductRequest> for ProductFields {
    type Error = DomainError;

    fn try_from(body: ProductRequest) -> DomainResult<Self> {
        let stock = u32::try_from(body.stock)
            .map_err(|_| DomainError::invalid("stock must be between 0 and 4294967295"))?;

        Ok(ProductFields {
            name: body.name,
            description: body.description,
            category: body.category,
            purchase_price: body.purchase_price,
            selling_price: body.selling_price,
            stock,
            image_url: body.image_url,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    pub quantity: i64,
    pub amount: Decimal,
}

impl TryFrom<TransactionRequest> for NewTransaction {
    type Error = DomainError;

    fn try_from(body: TransactionRequest) -> DomainResult<Self> {
        // Zero and negative quantities share the ledger's message.
        let quantity = u32::try_from(body.quantity.max(0))
            .map_err(|_| DomainError::invalid("quantity is too large"))?;

        Ok(NewTransaction {
            kind: body.kind,
            product_id: body.product_id,
            quantity,
            amount: body.amount,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateWhatsAppRequest {
    pub whatsapp_number: String,
}

// -------------------------
// Response mapping
// -------------------------

/// A product as the caller's role may see it.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ProductView {
    Full(Product),
    Admin(AdminProduct),
}

pub fn product_view(product: Product, role: Role) -> ProductView {
    if role.can_see_cost_price() {
        ProductView::Full(product)
    } else {
        ProductView::Admin(product.admin_view())
    }
}
