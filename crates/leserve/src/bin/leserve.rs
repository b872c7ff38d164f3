//! leserve binary entry point

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use leserve::{ConfigOverrides, LeServeServer, ServerConfig};

/// Task priority analysis server
#[derive(Parser, Debug)]
#[command(name = "leserve", version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Host to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to bind
    #[arg(long, short)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// Resolve config: flags > environment > file > defaults
    fn resolve_config(&self) -> anyhow::Result<ServerConfig> {
        let overrides = ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            log_level: self.log_level.clone(),
        };
        ServerConfig::layered(self.config.as_deref(), &overrides)
    }
}

/// Initialize logging; `RUST_LOG` takes precedence over the configured level
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
    let config = cli.resolve_config()?;

    init_logging(&config.log_level);

    println!("LeServe - Task Priority Analysis Server");
    println!("Configuration:");
    println!("  Host: {}", config.host);
    println!("  Port: {}", config.port);
    println!("  CORS origins: {}", config.cors_origins.join(", "));

    let server = LeServeServer::new(config).context("Failed to create server")?;

    println!();
    println!("Server starting on: {}", server.server_url());
    println!("Press Ctrl+C to stop");

    server.start().await.context("Server failed")?;

    Ok(())
}
