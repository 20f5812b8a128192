pub mod factory;
pub mod html;
pub mod kompass;
pub mod palmarium;
pub mod wintercircus;

use crate::common::types::{Event, EventProvider};
use crate::metrics::ProviderMetrics;
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument};

/// Run each provider in order and concatenate their events.
///
/// A failing provider is logged and skipped; the others still contribute.
pub async fn collect_events(providers: &[Box<dyn EventProvider>]) -> Vec<Event> {
    let mut all_events = Vec::new();

    for provider in providers {
        let name = provider.name();
        let started = Instant::now();
        let result = provider
            .scrape_events()
            .instrument(info_span!("provider", provider = %name))
            .await;

        match result {
            Ok(events) => {
                ProviderMetrics::record_success(name, events.len(), started.elapsed());
                all_events.extend(events);
            }
            Err(e) => {
                ProviderMetrics::record_error(name, started.elapsed());
                warn!("Error scraping events from provider {}: {}", name, e);
            }
        }
    }

    info!(
        "Collected {} events from {} providers",
        all_events.len(),
        providers.len()
    );
    all_events
}
