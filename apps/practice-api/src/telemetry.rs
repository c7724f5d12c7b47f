//! Logging and OpenTelemetry Setup
//!
//! Installs the global `tracing` subscriber: a console layer always, plus an
//! OTLP span exporter when enabled.
//!
//! # Configuration
//!
//! Values come from [`ObservabilityConfig`]; these environment variables win
//! when set:
//!
//! - `RUST_LOG`: log filter (default: `observability.logging.level`)
//! - `OTEL_ENABLED`: `true` or `false`
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP gRPC endpoint
//! - `OTEL_SERVICE_NAME`: service name attached to spans
//!
//! # Usage
//!
//! ```rust,ignore
//! use practice_api::telemetry::init_telemetry;
//!
//! let _guard = init_telemetry(&config.observability);
//! ```

use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ObservabilityConfig, OtelConfig};

/// Guard that shuts down the tracer provider on drop.
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Whether spans are exported over OTLP.
    pub const fn is_exporting(&self) -> bool {
        self.provider.is_some()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("Error shutting down tracer provider: {e:?}");
        }
    }
}

/// Apply the `OTEL_*` environment overrides to `config`.
fn resolve_otel(config: &OtelConfig) -> OtelConfig {
    let mut resolved = config.clone();
    if let Ok(enabled) = std::env::var("OTEL_ENABLED") {
        resolved.enabled = enabled != "false";
    }
    if let Ok(endpoint) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") {
        resolved.endpoint = endpoint;
    }
    if let Ok(service_name) = std::env::var("OTEL_SERVICE_NAME") {
        resolved.service_name = service_name;
    }
    resolved
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

fn init_console(config: &ObservabilityConfig) {
    let pretty = config.logging.pretty;
    // A subscriber may already be installed (tests, embedding).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.logging.level))
        .with_target(!pretty)
        .with_ansi(pretty)
        .try_init();
}

/// Initialize logging, and OTLP tracing when enabled.
///
/// Returns a guard that will shut down the tracer provider when dropped.
/// Exporter failures fall back to console logging.
#[must_use]
pub fn init_telemetry(config: &ObservabilityConfig) -> TelemetryGuard {
    let otel = resolve_otel(&config.otel);

    if !otel.enabled {
        init_console(config);
        tracing::debug!("OpenTelemetry disabled, using console logging only");
        return TelemetryGuard { provider: None };
    }

    let exporter = match opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&otel.endpoint)
        .build()
    {
        Ok(exp) => exp,
        Err(e) => {
            eprintln!("Failed to create OTLP exporter: {e:?}, falling back to console logging");
            init_console(config);
            return TelemetryGuard { provider: None };
        }
    };

    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(exporter)
        .build();
    let tracer = provider.tracer(otel.service_name.clone());

    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(!config.logging.pretty)
        .with_ansi(config.logging.pretty);

    let _ = Registry::default()
        .with(env_filter(&config.logging.level))
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();

    tracing::info!(
        service_name = %otel.service_name,
        endpoint = %otel.endpoint,
        "OpenTelemetry initialized"
    );

    TelemetryGuard {
        provider: Some(provider),
    }
}
