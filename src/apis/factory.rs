use crate::apis::html::HtmlFetcher;
use crate::apis::kompass::KompassCrawler;
use crate::apis::palmarium::PalmariumCrawler;
use crate::apis::wintercircus::WintercircusCrawler;
use crate::common::constants::*;
use crate::common::types::EventProvider;
use crate::config::ProvidersConfig;
use tracing::warn;

/// Factory function to create a provider by name
pub fn create_provider(
    api_name: &str,
    config: &ProvidersConfig,
    fetcher: &HtmlFetcher,
) -> Option<Box<dyn EventProvider>> {
    match api_name {
        PALMARIUM_API => Some(Box::new(PalmariumCrawler::new(
            fetcher.clone(),
            config.palmarium_endpoint.as_str(),
        ))),
        WINTERCIRCUS_API => Some(Box::new(WintercircusCrawler::new(
            fetcher.clone(),
            config.wintercircus_endpoint.as_str(),
        ))),
        KOMPASS_API => Some(Box::new(KompassCrawler::new(
            fetcher.clone(),
            config.kompass_endpoint.as_str(),
        ))),
        _ => None,
    }
}

/// Create the given providers in order, skipping names nobody implements
pub fn create_providers<S: AsRef<str>>(
    api_names: &[S],
    config: &ProvidersConfig,
    fetcher: &HtmlFetcher,
) -> Vec<Box<dyn EventProvider>> {
    api_names
        .iter()
        .filter_map(|name| {
            let name = name.as_ref().trim();
            let provider = create_provider(name, config, fetcher);
            if provider.is_none() {
                warn!(
                    "Unknown provider '{}' (supported: {})",
                    name,
                    get_supported_apis().join(", ")
                );
            }
            provider
        })
        .collect()
}

/// Split a comma-separated `--providers` value, dropping blank entries
pub fn parse_provider_names(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Providers listed under `[providers] enabled`
pub fn create_enabled_providers(
    config: &ProvidersConfig,
    fetcher: &HtmlFetcher,
) -> Vec<Box<dyn EventProvider>> {
    create_providers(&config.enabled, config, fetcher)
}
