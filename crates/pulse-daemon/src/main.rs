//! Pulse Daemon - synthetic operations dashboard feed
//!
//! The daemon provides:
//! - Metric snapshots on a fixed tick with threshold alerts
//! - Jittered request/log events
//! - A live SSE stream with history catch-up for new observers

use clap::Parser;
use pulse_daemon::{error::DaemonResult, DaemonConfig, DaemonError, Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pulse Daemon CLI
#[derive(Parser)]
#[command(name = "pulsed")]
#[command(about = "Pulse Daemon - synthetic operations dashboard feed", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "PULSE_CONFIG")]
    config: Option<String>,

    /// Listen address
    #[arg(short, long, env = "PULSE_LISTEN_ADDR")]
    listen: Option<String>,

    /// Log level
    #[arg(long, env = "PULSE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "PULSE_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = DaemonConfig::load(cli.config.as_deref())
        .map_err(|e| DaemonError::Config(e.to_string()))?;

    // Override with CLI args
    if let Some(listen) = &cli.listen {
        config.server.listen_addr = listen
            .parse()
            .map_err(|e| DaemonError::Config(format!("Invalid listen address: {}", e)))?;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.json |= cli.json;

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    config.validate()?;

    println!(
        r#"
  ___ _   _ _    ___ ___
 | _ \ | | | |  / __| __|
 |  _/ |_| | |__\__ \ _|
 |_|  \___/|____|___/___|

  Synthetic operations dashboard feed
  Version: {}
  Tick: {}ms
  Listening: {}
"#,
        env!("CARGO_PKG_VERSION"),
        config.engine.schedule.tick_interval_ms,
        config.server.listen_addr
    );

    let server = Server::new(config)?;
    server.run().await
}
