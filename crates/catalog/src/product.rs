use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopledger_core::{DomainError, DomainResult, Entity, ProductId, ShopId, TenantOwned};

use crate::shop::whatsapp_link;

/// Largest accepted price (10^12). Transaction amounts share the bound.
pub const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// A catalog product. Belongs to exactly one shop for its whole life.
///
/// The serialized form is the full view, cost price included. Callers that
/// must not see it use [`Product::admin_view`] or [`Product::public_view`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub purchase_price: Decimal,
    pub selling_price: Decimal,
    pub stock: u32,
    pub image_url: String,
    pub shop_id: ShopId,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub(crate) fn from_fields(
        id: ProductId,
        shop_id: ShopId,
        fields: ProductFields,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: fields.name.trim().to_string(),
            description: fields.description,
            category: fields.category,
            purchase_price: fields.purchase_price,
            selling_price: fields.selling_price,
            stock: fields.stock,
            image_url: fields.image_url,
            shop_id,
            created_at,
        }
    }

    /// Replace every mutable field; id, shop and creation time stay put.
    pub(crate) fn apply(&mut self, fields: ProductFields) {
        self.name = fields.name.trim().to_string();
        self.description = fields.description;
        self.category = fields.category;
        self.purchase_price = fields.purchase_price;
        self.selling_price = fields.selling_price;
        self.stock = fields.stock;
        self.image_url = fields.image_url;
    }

    pub fn admin_view(&self) -> AdminProduct {
        AdminProduct {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            selling_price: self.selling_price,
            stock: self.stock,
            image_url: self.image_url.clone(),
            shop_id: self.shop_id,
            created_at: self.created_at,
        }
    }

    /// Anonymous storefront view; `whatsapp_number` is the owning shop's.
    pub fn public_view(&self, whatsapp_number: &str) -> PublicProduct {
        PublicProduct {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            selling_price: self.selling_price,
            stock: self.stock,
            image_url: self.image_url.clone(),
            whatsapp_link: whatsapp_link(whatsapp_number, &self.name),
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

impl TenantOwned for Product {
    fn shop_id(&self) -> ShopId {
        self.shop_id
    }
}

/// Mutable product fields, as supplied on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub category: String,
    pub purchase_price: Decimal,
    pub selling_price: Decimal,
    pub stock: u32,
    pub image_url: String,
}

impl ProductFields {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() || self.selling_price <= Decimal::ZERO {
            return Err(DomainError::invalid("name and selling price are required"));
        }
        if self.purchase_price < Decimal::ZERO {
            return Err(DomainError::invalid("purchase price cannot be negative"));
        }
        if self.selling_price > MAX_PRICE || self.purchase_price > MAX_PRICE {
            return Err(DomainError::invalid("price exceeds the allowed maximum"));
        }
        Ok(())
    }
}

/// Product as shown to an Admin: no cost price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminProduct {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub selling_price: Decimal,
    pub stock: u32,
    pub image_url: String,
    pub shop_id: ShopId,
    pub created_at: DateTime<Utc>,
}

/// Product as shown on the public storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicProduct {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub selling_price: Decimal,
    pub stock: u32,
    pub image_url: String,
    pub whatsapp_link: String,
}
