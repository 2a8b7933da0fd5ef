//! tripctl CLI - travel-booking store administration and reports
//!
//! Thin presentation layer over `tripctl-core`:
//! - Schema creation and inspection (`schema`)
//! - Sample data (`seed`) and table listings (`list`)
//! - Parameterized updates (`client set-email`, `destination discount`)
//! - Analytical reports (`report`)

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tripctl_core::{Store, StoreConfig};

mod commands;
mod output;

use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "tripctl",
    author,
    version,
    about = "Manage and report on the travel-booking store",
    long_about = "Create the booking schema, load sample data, apply updates and run \
                  reports against a PostgreSQL store. Connection settings come from \
                  ~/.tripctl/config.toml, .env files and DB_* environment variables."
)]
struct Cli {
    /// Config file with a [database] table (default: ~/.tripctl/config.toml)
    #[arg(long, global = true, env = "TRIPCTL_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value = "human")]
    output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, global = true, conflicts_with = "output")]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check connectivity and print the server version
    Ping,
    /// Create or inspect the booking tables
    Schema(commands::schema::SchemaArgs),
    /// Insert the sample clients, destinations, bookings and items
    Seed,
    /// Print every row of a table
    List(commands::list::ListArgs),
    /// Update a client
    Client(commands::client::ClientArgs),
    /// Update destinations
    Destination(commands::destination::DestinationArgs),
    /// Run analytical reports
    Report(commands::report::ReportArgs),
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

/// Load .env from the current directory, then ~/.tripctl/.env.
/// dotenvy never overwrites variables that are already set.
fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from {}", path.display());
    }

    if let Some(env_file) = home_env_file() {
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            debug!("Loaded .env from {}", env_file.display());
        }
    }
}

fn home_env_file() -> Option<PathBuf> {
    StoreConfig::default_path().and_then(|p| p.parent().map(|dir| dir.join(".env")))
}

async fn open_store(config_path: Option<&std::path::Path>) -> Result<Store> {
    load_dotenv();
    let config = StoreConfig::load(config_path).context("Invalid store configuration")?;
    Store::connect(&config)
        .await
        .with_context(|| format!("Failed to connect to {}", config))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing().ok();
    let cli = Cli::parse();
    let format = if cli.json {
        OutputFormat::Json
    } else {
        cli.output
    };

    let store = open_store(cli.config.as_deref()).await?;

    let result = match cli.command {
        Commands::Ping => run_ping(&store, format).await,
        Commands::Schema(args) => commands::run_schema(args, &store, format).await,
        Commands::Seed => commands::run_seed(&store, format).await,
        Commands::List(args) => commands::run_list(args, &store, format).await,
        Commands::Client(args) => commands::run_client(args, &store, format).await,
        Commands::Destination(args) => commands::run_destination(args, &store, format).await,
        Commands::Report(args) => commands::run_report(args, &store, format).await,
    };

    store.close().await;
    result
}

async fn run_ping(store: &Store, format: OutputFormat) -> Result<()> {
    let version = store
        .server_version()
        .await
        .context("Connected, but the version query failed")?;
    info!("Connection OK");

    output::emit(format, &serde_json::json!({ "version": version }), || {
        format!("Connected: {}", version)
    })
}
