use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fleet_payroll::api::{AppState, create_router};
use fleet_payroll::config::ConfigLoader;
use fleet_payroll::ledger::Ledger;
use fleet_payroll::storage::JsonFileStore;

/// Serves the fleet payroll API.
#[derive(Parser, Debug)]
#[command(name = "fleet-payroll")]
#[command(about = "Driver overtime ingestion and per-branch payroll cost API")]
#[command(version)]
struct Args {
    /// Directory holding salaries.yaml and thresholds.yaml. Built-in
    /// values are used when omitted.
    #[arg(long, env = "FLEET_PAYROLL_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Directory where entries, configurations and the logo are saved.
    #[arg(long, env = "FLEET_PAYROLL_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Address to listen on.
    #[arg(long, env = "FLEET_PAYROLL_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = match &args.config_dir {
        Some(dir) => ConfigLoader::load(dir)?,
        None => ConfigLoader::default(),
    };
    info!(
        config_dir = ?args.config_dir,
        data_dir = %args.data_dir.display(),
        known_branches = config.salaries().known_base_salaries.len(),
        "Configuration loaded"
    );

    let ledger = Ledger::new(JsonFileStore::new(&args.data_dir), config);
    let app = create_router(AppState::new(ledger));

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!(address = %args.bind, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
