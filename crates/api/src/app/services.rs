//! Store wiring and startup seeding.

use std::sync::Arc;

use rust_decimal::Decimal;

use shopledger_auth::{AuthService, Identity, NewIdentity, Role, TokenConfig};
use shopledger_catalog::{InMemoryCatalog, ProductCatalog, ProductFields, ShopDirectory};
use shopledger_core::{DomainError, DomainResult, ProductId, ShopId};
use shopledger_ledger::{Ledger, NewTransaction, TransactionKind};

use crate::config::ApiConfig;

pub type SharedCatalog = Arc<InMemoryCatalog>;

/// Every store the handlers touch. Each store carries its own lock.
#[derive(Debug)]
pub struct AppServices {
    pub auth: AuthService,
    pub shops: ShopDirectory,
    pub ledger: Ledger<SharedCatalog>,
}

impl AppServices {
    pub fn new(config: &ApiConfig) -> Self {
        let tokens = TokenConfig::new(config.jwt_secret.clone()).with_ttl(config.token_ttl);
        Self {
            auth: AuthService::new(&tokens),
            shops: ShopDirectory::new(),
            ledger: Ledger::new(Arc::new(InMemoryCatalog::new())),
        }
    }

    pub fn catalog(&self) -> &SharedCatalog {
        self.ledger.catalog()
    }

    /// Register an identity for an existing shop.
    pub fn register(&self, input: NewIdentity) -> DomainResult<Identity> {
        if !self.shops.exists(input.shop_id) {
            return Err(DomainError::invalid("shop not found"));
        }
        self.auth.register(input)
    }
}

/// Build the stores and seed them.
///
/// Shops are always created; demo identities, products and transactions
/// only when `seed_demo_data` is set.
pub fn build_services(config: &ApiConfig) -> DomainResult<AppServices> {
    let services = AppServices::new(config);
    seed_shops(&services)?;
    if config.seed_demo_data {
        seed_demo_data(&services)?;
    }
    Ok(services)
}

pub const DEMO_PASSWORD: &str = "admin123";
pub const DEMO_SUPER_ADMIN_EMAIL: &str = "super@shop1.com";
pub const DEMO_ADMIN_EMAIL: &str = "admin@shop1.com";

fn seed_shops(services: &AppServices) -> DomainResult<()> {
    services.shops.create("TechStore Casablanca", "212600000001")?;
    services.shops.create("ElectroShop Rabat", "212600000002")?;
    Ok(())
}

struct DemoProduct {
    name: &'static str,
    description: &'static str,
    category: &'static str,
    purchase_price: i64,
    selling_price: i64,
    stock: u32,
    image_url: &'static str,
    shop: u64,
}

const DEMO_PRODUCTS: [DemoProduct; 4] = [
    DemoProduct {
        name: "iPhone 14 Pro",
        description: "Latest Apple smartphone with A16 chip",
        category: "Smartphones",
        purchase_price: 8000,
        selling_price: 10000,
        stock: 15,
        image_url: "https://example.com/iphone14.jpg",
        shop: 1,
    },
    DemoProduct {
        name: "MacBook Pro M2",
        description: "Apple laptop with M2 chip",
        category: "Laptops",
        purchase_price: 15000,
        selling_price: 18000,
        stock: 8,
        image_url: "https://example.com/macbook.jpg",
        shop: 1,
    },
    DemoProduct {
        name: "Samsung Galaxy S23",
        description: "Samsung flagship smartphone",
        category: "Smartphones",
        purchase_price: 6000,
        selling_price: 7500,
        stock: 20,
        image_url: "https://example.com/galaxy-s23.jpg",
        shop: 2,
    },
    DemoProduct {
        name: "AirPods Pro",
        description: "Wireless earbuds with noise cancellation",
        category: "Accessories",
        purchase_price: 1500,
        selling_price: 2000,
        stock: 3,
        image_url: "https://example.com/airpods.jpg",
        shop: 1,
    },
];

fn seed_demo_data(services: &AppServices) -> DomainResult<()> {
    let shop = ShopId::new(1);

    for (name, email, role) in [
        ("Super Admin", DEMO_SUPER_ADMIN_EMAIL, Role::SuperAdmin),
        ("Shop Admin", DEMO_ADMIN_EMAIL, Role::Admin),
    ] {
        services.register(NewIdentity {
            name: name.to_string(),
            email: email.to_string(),
            password: DEMO_PASSWORD.to_string(),
            role,
            shop_id: shop,
        })?;
    }

    let mut first_product: Option<ProductId> = None;
    for demo in &DEMO_PRODUCTS {
        let product = services.catalog().create(
            ShopId::new(demo.shop),
            ProductFields {
                name: demo.name.to_string(),
                description: demo.description.to_string(),
                category: demo.category.to_string(),
                purchase_price: Decimal::from(demo.purchase_price),
                selling_price: Decimal::from(demo.selling_price),
                stock: demo.stock,
                image_url: demo.image_url.to_string(),
            },
        )?;
        first_product.get_or_insert(product.id);
    }

    services.ledger.record(
        shop,
        NewTransaction {
            kind: TransactionKind::Sale,
            product_id: first_product,
            quantity: 2,
            amount: Decimal::from(20000),
        },
    )?;
    services.ledger.record(
        shop,
        NewTransaction {
            kind: TransactionKind::Expense,
            product_id: None,
            quantity: 1,
            amount: Decimal::from(5000),
        },
    )?;

    tracing::info!(
        shops = services.shops.list().len(),
        products = DEMO_PRODUCTS.len(),
        "demo data seeded"
    );
    Ok(())
}
