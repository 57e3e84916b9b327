use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use emberkit::config::Config;
use emberkit::server;

/// Serve the EmberKit site.
#[derive(Parser)]
#[command(name = "emberkit", version, about)]
struct Cli {
    /// Path to the site configuration file.
    #[arg(short, long, default_value = "emberkit.yaml")]
    config: PathBuf,

    /// Override the configured listen port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        tracing::info!(path = %cli.config.display(), "no config file found, using defaults");
        Config::default()
    };
    if let Some(port) = cli.port {
        config.port = port;
    }

    server::run_server(config).await
}
