use anyhow::Context;

use shopledger_api::app::services::{DEMO_ADMIN_EMAIL, DEMO_PASSWORD, DEMO_SUPER_ADMIN_EMAIL};
use shopledger_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env()?;
    shopledger_observability::logging::init(config.log_format);

    if config.uses_dev_secret() {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
    }

    let app = shopledger_api::app::build_app(&config)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");
    tracing::info!(
        public = "POST /register, POST /login, GET /public/:shop_id/products, GET /health",
        authenticated = "GET /whoami, GET|POST /products, PUT|DELETE /products/:id",
        admin = "GET|POST /transactions",
        super_admin = "GET /reports/dashboard, GET /shops, PUT /shops/whatsapp",
        "routes"
    );
    if config.seed_demo_data {
        tracing::info!(
            super_admin = DEMO_SUPER_ADMIN_EMAIL,
            admin = DEMO_ADMIN_EMAIL,
            password = DEMO_PASSWORD,
            "demo accounts available"
        );
    }

    axum::serve(listener, app).await?;
    Ok(())
}
