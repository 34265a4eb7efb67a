mod account;
mod product;

use clap::{Parser, Subcommand};
use sellerdesk_catalog::CatalogClient;
use sellerdesk_core::AppConfig;
use tracing_subscriber::EnvFilter;

use crate::product::ProductCommands;

#[derive(Debug, Parser)]
#[command(name = "sellerdesk")]
#[command(about = "Seller console for the product catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the signed-in account and its shop
    Account,
    /// List the attributes declared for a category
    Attributes {
        /// Category id
        category: String,
    },
    /// Product listing and editor commands
    Product {
        #[command(subcommand)]
        command: ProductCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = sellerdesk_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, base_url = %config.api_base_url, "config loaded");

    match cli.command {
        Commands::Account => account::run_account(&config).await,
        Commands::Attributes { category } => account::run_attributes(&config, &category).await,
        Commands::Product { command } => product::run(&config, command).await,
    }
}

/// Builds a catalog client and resolves the shop scope if it is not
/// configured.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the account lookup
/// fails.
pub(crate) async fn connect(config: &AppConfig) -> anyhow::Result<CatalogClient> {
    let mut client = CatalogClient::from_app_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build catalog client: {e}"))?;
    if config.api_token.is_none() {
        anyhow::bail!("SELLERDESK_API_TOKEN is not set; cannot call the catalog API");
    }
    client.ensure_shop_id().await?;
    Ok(client)
}

#[cfg(test)]
mod tests;
