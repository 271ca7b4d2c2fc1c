//! Metrics for catalog traffic.
//!
//! Recording goes through the `metrics` facade and is a no-op until
//! [`init`] installs the Prometheus recorder. The rendered text is available
//! in-process through [`render`], which is what the CLI prints on exit.

use std::fmt;
use std::sync::{Once, OnceLock};
use tracing::{info, warn};

/// All metric names emitted by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    RequestsSuccess,
    RequestsError,
    RequestDuration,
    PayloadBytes,
    CardsBuilt,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::RequestsSuccess => "dex_catalog_requests_success_total",
            MetricName::RequestsError => "dex_catalog_requests_error_total",
            MetricName::RequestDuration => "dex_catalog_request_duration_seconds",
            MetricName::PayloadBytes => "dex_catalog_payload_bytes",
            MetricName::CardsBuilt => "dex_catalog_cards_built_total",
        }
    }

    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        [
            MetricName::RequestsSuccess,
            MetricName::RequestsError,
            MetricName::RequestDuration,
            MetricName::PayloadBytes,
            MetricName::CardsBuilt,
        ]
        .into_iter()
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static INIT: Once = Once::new();
static HANDLE: OnceLock<metrics_exporter_prometheus::PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Idempotent; later calls are no-ops.
pub fn init() {
    INIT.call_once(|| {
        match metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                if HANDLE.set(handle).is_err() {
                    warn!("Prometheus handle was already set");
                }
                ::metrics::describe_counter!(
                    MetricName::RequestsSuccess.as_str(),
                    "Catalog requests answered with a success status and a valid body"
                );
                ::metrics::describe_counter!(
                    MetricName::RequestsError.as_str(),
                    "Catalog requests that failed, labelled by error kind"
                );
                ::metrics::describe_histogram!(
                    MetricName::RequestDuration.as_str(),
                    ::metrics::Unit::Seconds,
                    "Wall time of one catalog request including decoding"
                );
                ::metrics::describe_histogram!(
                    MetricName::PayloadBytes.as_str(),
                    ::metrics::Unit::Bytes,
                    "Size of successful response bodies"
                );
                ::metrics::describe_counter!(
                    MetricName::CardsBuilt.as_str(),
                    "Item cards assembled from detail records"
                );
                info!("Prometheus recorder installed");
            }
            Err(e) => {
                warn!("Failed to install Prometheus recorder: {}", e);
            }
        }
    });
}

/// Current metrics in Prometheus text format, if the recorder is installed.
pub fn render() -> Option<String> {
    HANDLE.get().map(|handle| handle.render())
}

// ============================================================================
// Catalog requests
// ============================================================================

pub mod catalog {
    use super::MetricName;

    pub fn request_success(operation: &'static str, secs: f64, bytes: usize) {
        ::metrics::counter!(MetricName::RequestsSuccess.as_str(), "operation" => operation)
            .increment(1);
        ::metrics::histogram!(MetricName::RequestDuration.as_str(), "operation" => operation)
            .record(secs);
        ::metrics::histogram!(MetricName::PayloadBytes.as_str(), "operation" => operation)
            .record(bytes as f64);
    }

    pub fn request_error(operation: &'static str, kind: &'static str, secs: f64) {
        ::metrics::counter!(
            MetricName::RequestsError.as_str(),
            "operation" => operation,
            "kind" => kind
        )
        .increment(1);
        ::metrics::histogram!(MetricName::RequestDuration.as_str(), "operation" => operation)
            .record(secs);
    }
}

// ============================================================================
// Card assembly
// ============================================================================

pub mod cards {
    use super::MetricName;

    pub fn built(count: usize) {
        ::metrics::counter!(MetricName::CardsBuilt.as_str()).increment(count as u64);
    }
}
