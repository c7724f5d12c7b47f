//! Practice API Binary
//!
//! Starts the REST service.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin practice-api
//! ```
//!
//! # Environment Variables
//!
//! - `PRACTICE_CONFIG`: config file path (default: `config.yaml`, optional)
//! - `PORT`, `ASSISTANT_PROVIDER`, ...: referenced from the config file as `${VAR}`
//! - `RUST_LOG`: log filter (default: `observability.logging.level`)
//! - `OTEL_ENABLED`, `OTEL_EXPORTER_OTLP_ENDPOINT`, `OTEL_SERVICE_NAME`

use std::net::SocketAddr;

use anyhow::Context;
use practice_api::config::{Config, load_config};
use practice_api::infrastructure::config::Container;
use practice_api::infrastructure::http::create_router;
use practice_api::observability::{MetricsConfig, init_metrics};
use practice_api::telemetry::init_telemetry;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config = load_config(None).context("failed to load configuration")?;
    let _telemetry = init_telemetry(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting practice API");
    log_config(&config);

    start_metrics(&config)?;

    let container = Container::from_config(&config).context("failed to build adapters")?;
    let app = create_router(container.app_state(env!("CARGO_PKG_VERSION")));

    let addr: SocketAddr = config
        .server
        .listen_address()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server.listen_address()))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Practice API stopped");
    Ok(())
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Log the loaded configuration.
fn log_config(config: &Config) {
    tracing::info!(
        listen = %config.server.listen_address(),
        assistant = config.assistant.provider.as_str(),
        transcription = config.transcription.provider.as_str(),
        release_dir = %config.downloads.release_dir.display(),
        "Configuration loaded"
    );
}

/// Start the Prometheus exporter when a listen address is configured.
fn start_metrics(config: &Config) -> anyhow::Result<()> {
    let Some(address) = &config.observability.metrics.listen_address else {
        tracing::debug!("Metrics exporter disabled");
        return Ok(());
    };

    let addr: SocketAddr = address
        .parse()
        .with_context(|| format!("invalid metrics address {address}"))?;
    init_metrics(&MetricsConfig::with_addr(addr)).context("failed to start metrics exporter")?;
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// A handler that cannot be installed is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
