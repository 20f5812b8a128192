use crate::common::error::{Result, ScraperError};
use crate::config::HttpConfig;
use scraper::{ElementRef, Selector};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Thin wrapper around a shared `reqwest::Client` used by every provider
#[derive(Clone)]
pub struct HtmlFetcher {
    client: reqwest::Client,
}

impl HtmlFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// GET a page and return its body, failing on non-2xx responses
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<String> {
        info!("Visiting: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

/// Build a selector from a hardcoded CSS string
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector '{css}': {e:?}"))
}

/// Text of every descendant matching `selector`, concatenated and trimmed
pub fn child_text(element: &ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .flat_map(|matched| matched.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Attribute value of the first descendant matching `selector`
pub fn child_attr<'a>(element: &ElementRef<'a>, selector: &Selector, attr: &str) -> Option<&'a str> {
    element
        .select(selector)
        .next()
        .and_then(|matched| matched.value().attr(attr))
}
