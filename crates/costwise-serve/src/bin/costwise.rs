//! costwise binary entry point

use anyhow::Context;
use clap::Parser;
use costwise_serve::{CostwiseServer, ServerConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Cloud cost optimization dashboard API
#[derive(Debug, Parser)]
#[command(name = "costwise", version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to bind
    #[arg(short, long)]
    port: Option<u16>,

    /// SQLite database path
    #[arg(long)]
    db_path: Option<String>,

    /// Do not load demonstration resources into an empty database
    #[arg(long)]
    no_seed: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(&self, config: &mut ServerConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(db_path) = &self.db_path {
            config.db_path = db_path.clone();
        }
        if self.no_seed {
            config.seed_demo_data = false;
        }
        if self.verbose {
            config.log_level = "debug".to_string();
        }
    }
}

/// Install the stderr subscriber; `RUST_LOG` wins over the configured level.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        ServerConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    init_logging(&config.log_level);

    info!("Costwise - Cloud Optimization Dashboard API");
    info!("  Host: {}", config.host);
    info!("  Port: {}", config.port);
    info!("  DB Path: {}", config.db_path);

    let server = CostwiseServer::new(config).context("Failed to start server")?;
    info!("Server starting on: {}", server.server_url());

    server.start().await?;

    Ok(())
}
