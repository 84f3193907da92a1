mod bot;
mod config;
mod directory;
mod error;
mod ledger;
mod store;
mod telegram;
mod utils;

use std::sync::Arc;

use anyhow::Result;
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "telegram_absensi=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // An unreachable spreadsheet is fatal at startup; later failures are
    // surfaced per command instead.
    let store = store::sheets::SheetsStore::connect(&config).await?;
    tracing::info!("Connected to spreadsheet {}", config.spreadsheet_id);

    bot::run(config, Arc::new(store)).await
}
