//! Observability module for metrics.
//!
//! Prometheus export plus the counters and histograms recorded by the HTTP
//! layer. Tracing setup lives in [`crate::telemetry`].

mod metrics;

pub use metrics::{
    MetricsConfig, MetricsError, init_metrics, record_assistant_request, record_created,
    record_deleted, record_http_request, record_transcription_request,
};
