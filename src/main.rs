use dotenvy::dotenv;
use product_catalog::{ProductStore, Result, config, logging};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before reading configuration; env vars may also be set externally
    dotenv().ok();

    let app_config = config::load_app_configuration()?;
    logging::init(&app_config.logging.level);
    info!("Configuration loaded.");

    let store = ProductStore::init_db(&app_config)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    let total = store.count().await?;
    info!("Catalog ready with {} products.", total);

    Ok(())
}
