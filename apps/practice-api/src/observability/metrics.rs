//! Prometheus metrics for the practice API.
//!
//! Request counts and latencies, record churn per entity, and call outcomes
//! for the assistant and transcription backends.
//!
//! # Example
//!
//! ```ignore
//! use practice_api::observability::{init_metrics, MetricsConfig};
//!
//! let config = MetricsConfig::with_addr("0.0.0.0:9090".parse()?);
//! init_metrics(&config)?;
//!
//! record_created("client");
//! ```

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for latency measurements (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl MetricsConfig {
    /// Create a metrics configuration listening on `addr`.
    #[must_use]
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            listen_addr: addr,
            // 1ms to 30s; assistant calls dominate the upper range
            latency_buckets: vec![
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
            ],
        }
    }
}

/// Initialize the Prometheus metrics exporter.
///
/// This starts an HTTP server that exposes metrics at `/metrics`.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(
        addr = %config.listen_addr,
        "Prometheus metrics exporter started"
    );

    Ok(())
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

// ============================================================================
// HTTP Metrics
// ============================================================================

/// Record a handled HTTP request.
///
/// # Arguments
///
/// * `method` - HTTP method
/// * `route` - Matched route template (e.g., `/api/clients/{id}`)
/// * `status` - Response status code
/// * `duration_seconds` - Handling time in seconds
pub fn record_http_request(method: &str, route: &str, status: u16, duration_seconds: f64) {
    counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(duration_seconds);
}

// ============================================================================
// Record Metrics
// ============================================================================

/// Record a created record (e.g., "client", "session", "note").
pub fn record_created(entity: &'static str) {
    counter!("records_created_total", "entity" => entity).increment(1);
}

/// Record a deleted record.
pub fn record_deleted(entity: &'static str) {
    counter!("records_deleted_total", "entity" => entity).increment(1);
}

// ============================================================================
// Assistant Metrics
// ============================================================================

/// Record a call to the assistant model backend.
///
/// # Arguments
///
/// * `provider` - Backend label (e.g., "stub", "ollama")
/// * `status` - "ok" or "error"
pub fn record_assistant_request(provider: &'static str, status: &'static str) {
    counter!(
        "assistant_requests_total",
        "provider" => provider,
        "status" => status
    )
    .increment(1);
}

/// Record a call to the transcription backend.
///
/// # Arguments
///
/// * `provider` - Backend label (e.g., "stub", "whisper")
/// * `status` - "ok" or "error"
pub fn record_transcription_request(provider: &'static str, status: &'static str) {
    counter!(
        "transcription_requests_total",
        "provider" => provider,
        "status" => status
    )
    .increment(1);
}
