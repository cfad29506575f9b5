use anyhow::Result;
use clap::Parser;
use tracing::info;

use procdash_core::DashConfig;
use procdash_server::DashServer;

/// Admin dashboard for a PM2-style process supervisor.
#[derive(Parser)]
#[command(name = "procdash", version)]
struct Cli {
    /// Configuration file path.
    #[arg(short, long, default_value = "procdash.toml")]
    config: String,

    /// Port to listen on (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Supervisor API base URL (overrides config).
    #[arg(long)]
    upstream: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let cli = Cli::parse();

    let mut config = if std::path::Path::new(&cli.config).exists() {
        info!("Loading configuration from {}", cli.config);
        DashConfig::from_file(&cli.config)?
    } else {
        info!("No config file at {}, using defaults", cli.config);
        DashConfig::default()
    };

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(upstream) = cli.upstream {
        config.upstream.base_url = upstream;
    }

    DashServer::new(config)?.run().await?;

    Ok(())
}
