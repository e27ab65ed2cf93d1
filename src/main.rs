//! Trace echo server.
//!
//! Answers every request with the span the propagation middleware assigned
//! to it: a child of the caller's trace when the request carried one, a new
//! root otherwise.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use trace_propagation::config::{load_config, TracerConfig};
use trace_propagation::http::EchoServer;
use trace_propagation::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "trace-propagation")]
#[command(about = "Echo server for trace context propagation", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => TracerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
    }

    init_logging(&config.observability)?;

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    let server = EchoServer::new(config);

    let config = server.config();
    tracing::info!(
        bind_address = %config.server.bind_address,
        trace_id_header = %config.propagation.trace_id_header,
        parent_id_header = %config.propagation.parent_id_header,
        baggage_prefix = %config.propagation.baggage_prefix,
        "Configuration loaded"
    );

    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
