//! Process metrics for provider scrapes.
//!
//! A Prometheus recorder is installed once; the handle is kept so the web
//! server can render the exposition text at `/metrics`.

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::{Once, OnceLock};
use std::time::Duration;
use tracing::{info, warn};

pub const PROVIDER_EVENTS_TOTAL: &str = "nachtleven_provider_events_total";
pub const PROVIDER_ERRORS_TOTAL: &str = "nachtleven_provider_errors_total";
pub const PROVIDER_SCRAPE_DURATION_SECONDS: &str = "nachtleven_provider_scrape_duration_seconds";

static INIT: Once = Once::new();
static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Idempotent.
pub fn init_metrics() {
    INIT.call_once(|| match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if HANDLE.set(handle).is_err() {
                warn!("Metrics handle already set");
            }
            ProviderMetrics::register();
            info!("Prometheus recorder installed");
        }
        Err(e) => {
            warn!("Failed to install Prometheus recorder: {}", e);
        }
    });
}

/// Render the current metrics in Prometheus text format
pub fn render() -> Option<String> {
    HANDLE.get().map(|handle| handle.render())
}

/// Histograms are drained on upkeep; the server calls this periodically
pub fn run_upkeep() {
    if let Some(handle) = HANDLE.get() {
        handle.run_upkeep();
    }
}

/// Metrics recorded around each provider scrape
pub struct ProviderMetrics;

impl ProviderMetrics {
    fn register() {
        describe_counter!(
            PROVIDER_EVENTS_TOTAL,
            "Events returned by a provider scrape"
        );
        describe_counter!(PROVIDER_ERRORS_TOTAL, "Provider scrapes that failed");
        describe_histogram!(
            PROVIDER_SCRAPE_DURATION_SECONDS,
            metrics::Unit::Seconds,
            "Wall time of a provider scrape"
        );
    }

    pub fn record_success(provider: &'static str, events: usize, elapsed: Duration) {
        ::metrics::counter!(PROVIDER_EVENTS_TOTAL, "provider" => provider).increment(events as u64);
        ::metrics::histogram!(PROVIDER_SCRAPE_DURATION_SECONDS, "provider" => provider)
            .record(elapsed.as_secs_f64());
    }

    pub fn record_error(provider: &'static str, elapsed: Duration) {
        ::metrics::counter!(PROVIDER_ERRORS_TOTAL, "provider" => provider).increment(1);
        ::metrics::histogram!(PROVIDER_SCRAPE_DURATION_SECONDS, "provider" => provider)
            .record(elapsed.as_secs_f64());
    }
}
