use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error};

use dex_catalog::common::constants::{DEFAULT_LIMIT, DEFAULT_OFFSET};
use dex_catalog::config::Config;
use dex_catalog::{
    logging, map_category, observability, CardUseCase, CatalogClient, CatalogPort, ItemRef,
    ReqwestHttp,
};

#[derive(Parser)]
#[command(name = "dex")]
#[command(about = "Browse the creature catalog from the command line")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (defaults to $DEX_CONFIG, then ./dex.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print Prometheus metrics after the command finishes
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of the collection
    List {
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = DEFAULT_OFFSET)]
        offset: u32,
    },
    /// Show the details of one item, by numeric id or name
    Show {
        item: String,
    },
    /// Build detail cards for one page of the collection
    Cards {
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = DEFAULT_OFFSET)]
        offset: u32,
        /// Maximum concurrent detail requests (defaults to the config value)
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Map a category label to its presentation variant
    Category {
        label: Option<String>,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

fn build_client(config: &Config) -> anyhow::Result<CatalogClient> {
    let http = ReqwestHttp::new(config.timeout(), &config.catalog.user_agent)
        .context("Failed to build HTTP client")?;
    let client = CatalogClient::new(
        Arc::new(http),
        &config.catalog.base_url,
        &config.catalog.collection,
    )?;
    debug!(?client, "catalog client ready");
    Ok(client)
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    match cli.command {
        Commands::List { limit, offset } => {
            let client = build_client(&config)?;
            let items = client.list_items(limit, offset).await?;
            print_json(&items)?;
        }
        Commands::Show { item } => {
            let client = build_client(&config)?;
            let details = client.get_item_details(&ItemRef::from(item)).await?;
            print_json(&details)?;
        }
        Commands::Cards { limit, offset, concurrency } => {
            let client = build_client(&config)?;
            let concurrency = concurrency.unwrap_or(config.catalog.detail_concurrency);
            let use_case = CardUseCase::new(Arc::new(client), concurrency);
            let cards = use_case.build_page(limit, offset).await?;
            print_json(&cards)?;
        }
        Commands::Category { label } => {
            let variant = map_category(label.as_deref());
            print_json(&json!({ "label": label, "variant": variant }))?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let _guard = logging::init_logging(&config.logging);

    let print_metrics = cli.metrics;
    if print_metrics {
        observability::init_metrics();
    }

    let result = run(cli, config).await;
    if let Err(e) = &result {
        error!("Command failed: {:#}", e);
    }

    if print_metrics {
        if let Some(text) = observability::render_metrics() {
            eprintln!("{}", text);
        }
    }
    result
}
