//! Request Guide server.
//!
//! ```text
//! request-guide [--config PATH] [--bind ADDR]
//! ```
//!
//! Without `--config` every setting takes its default. Logging is initialized
//! first so configuration problems are reported through it.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use request_guide::config::{self, ObservabilityConfig, ServiceConfig};
use request_guide::lifecycle::{shutdown_signal, Shutdown};
use request_guide::observability::{logging, metrics};
use request_guide::HttpServer;

#[derive(Parser)]
#[command(name = "request-guide")]
#[command(about = "Lessons in declaring and validating HTTP request inputs", version)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match config::load_config(path) {
            Ok(config) => config,
            Err(e) => {
                let _ = logging::init_logging(&ObservabilityConfig::default());
                tracing::error!(path = %path.display(), error = %e, "Failed to load configuration");
                return Err(e.into());
            }
        },
        None => ServiceConfig::default(),
    };
    logging::init_logging(&config.observability)?;

    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        if let Err(errors) = config::validate_config(&config) {
            for error in &errors {
                tracing::error!(%error, "Invalid configuration");
            }
            return Err(config::ConfigError::Validation(errors).into());
        }
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_bytes = config.limits.max_body_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validation already checked the address.
        let addr = config.observability.metrics_address.parse()?;
        if let Err(e) = metrics::init_metrics(addr) {
            tracing::error!(error = %e, "Failed to start metrics exporter");
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let signals = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signals.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, shutdown.signalled()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
