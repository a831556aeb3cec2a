//! Parley terminal client entry point.
//!
//! # Usage
//!
//! ```bash
//! # Connect to a local server
//! parley --server 127.0.0.1:8080
//!
//! # Log to a file (the terminal belongs to the UI)
//! parley --server ws://chat.example.com/ws --log-file parley.log --log-level debug
//! ```

use std::{fs::File, io, path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use parley_client::{
    SystemEnv,
    transport::{self, TransportConfig},
};
use parley_tui::{Runtime, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Parley terminal chat client
#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(about = "Terminal client for the Parley text chat protocol")]
#[command(version)]
struct Args {
    /// Server endpoint (`host:port` or a `ws://` / `wss://` URL)
    #[arg(short, long, env = "PARLEY_SERVER", default_value = "ws://127.0.0.1:8080/ws")]
    server: String,

    /// Seconds allowed for the WebSocket handshake
    #[arg(long, default_value = "10")]
    connect_timeout: u64,

    /// Write logs to this file. Logging is disabled without it.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(args: &Args) -> io::Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };

    let file = File::options().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    let endpoint = transport::normalize_endpoint(&args.server);
    tracing::info!(%endpoint, "Parley client starting");

    let config = TransportConfig {
        connect_timeout: Duration::from_secs(args.connect_timeout),
        ..Default::default()
    };
    let driver = TerminalDriver::new(config)?;

    Runtime::new(driver, SystemEnv::new(), endpoint).run().await?;

    tracing::info!("Parley client exiting");
    Ok(())
}
