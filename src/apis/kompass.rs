use crate::apis::html::{child_text, selector, HtmlFetcher};
use crate::common::constants::{KOMPASS_API, KOMPASS_MISSING_TITLE, KOMPASS_VENUE_NAME};
use crate::common::error::{Result, ScraperError};
use crate::common::types::{Event, EventProvider};
use crate::dates::{parse_date, parse_date_or};
use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use reqwest::Url;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("div.jet-listing-grid__item a"));
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| selector("h1.elementor-heading-title.elementor-size-default"));
static DATE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| selector("div.jet-listing-dynamic-field__content"));
static DESCRIPTION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| selector(".event-description, .tribe-events-content"));

/// Crawls the Kompass Klub event list and every linked detail page.
///
/// The listing only links to events, so each detail page is fetched in turn.
/// Crawling never goes deeper than listing -> detail and never leaves the
/// listing's host.
pub struct KompassCrawler {
    fetcher: HtmlFetcher,
    endpoint: String,
}

impl KompassCrawler {
    pub fn new(fetcher: HtmlFetcher, endpoint: impl Into<String>) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.into(),
        }
    }

    /// Detail page links on the listing, resolved against `base`, in page
    /// order and without repeats.
    pub fn parse_listing(html: &str, base: &Url) -> Vec<Url> {
        let document = Html::parse_document(html);
        let Some(allowed_host) = base.host_str() else {
            return Vec::new();
        };

        let mut visited: HashSet<Url> = HashSet::new();
        visited.insert(without_fragment(base.clone()));

        let mut links = Vec::new();
        for anchor in document.select(&LINK_SELECTOR) {
            let href = anchor.value().attr("href").unwrap_or("").trim();
            if href.is_empty() {
                continue;
            }

            let url = match base.join(href) {
                Ok(url) => without_fragment(url),
                Err(e) => {
                    debug!("Skipping unparseable link '{}': {}", href, e);
                    continue;
                }
            };

            if !is_allowed(&url, allowed_host) {
                debug!("Skipping off-site link {}", url);
                continue;
            }

            if visited.insert(url.clone()) {
                links.push(url);
            }
        }

        links
    }

    /// Build an event from a detail page. `today` stands in for dates that
    /// cannot be read.
    pub fn parse_detail(html: &str, today: NaiveDate) -> Event {
        let document = Html::parse_document(html);
        let page = document.root_element();

        let mut title = child_text(&page, &TITLE_SELECTOR);
        if title.is_empty() {
            title = KOMPASS_MISSING_TITLE.to_string();
        }

        // The date field class is shared with other dynamic fields, so try
        // each one on its own before the combined text.
        let date = document
            .select(&DATE_SELECTOR)
            .find_map(|field| parse_date(&field.text().collect::<String>()))
            .unwrap_or_else(|| parse_date_or(&child_text(&page, &DATE_SELECTOR), today));

        Event {
            title,
            description: child_text(&page, &DESCRIPTION_SELECTOR),
            date,
            location: KOMPASS_VENUE_NAME.to_string(),
        }
    }
}

fn without_fragment(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}

fn is_allowed(url: &Url, allowed_host: &str) -> bool {
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    match url.host_str() {
        Some(host) => {
            host == allowed_host
                || host
                    .strip_suffix(allowed_host)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        }
        None => false,
    }
}

/// Events are considered the same when title and date match
fn event_key(event: &Event) -> String {
    format!(
        "{}_{}_{}_{}",
        event.title, event.date.year, event.date.month, event.date.day
    )
}

#[async_trait::async_trait]
impl EventProvider for KompassCrawler {
    fn name(&self) -> &'static str {
        KOMPASS_API
    }

    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn scrape_events(&self) -> Result<Vec<Event>> {
        let base = Url::parse(&self.endpoint).map_err(|e| ScraperError::InvalidUrl {
            url: self.endpoint.clone(),
            message: e.to_string(),
        })?;

        let listing = self.fetcher.fetch(base.as_str()).await?;
        let links = Self::parse_listing(&listing, &base);
        info!("Found {} event links on the Kompass listing", links.len());

        let today = Local::now().date_naive();
        let mut seen = HashSet::new();
        let mut events = Vec::new();

        for link in links {
            let body = match self.fetcher.fetch(link.as_str()).await {
                Ok(body) => body,
                Err(e) => {
                    warn!("Skipping Kompass event page {}: {}", link, e);
                    continue;
                }
            };

            let event = Self::parse_detail(&body, today);
            if seen.insert(event_key(&event)) {
                debug!("Added event: {} on {}", event.title, event.date);
                events.push(event);
            } else {
                debug!("Duplicate event {} on {} at {}", event.title, event.date, link);
            }
        }

        info!(
            "Successfully fetched {} events from {}",
            events.len(),
            KOMPASS_VENUE_NAME
        );
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::EventDate;

    fn base() -> Url {
        Url::parse("https://kompassklub.com/event-list/").unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    }

    #[test]
    fn test_parse_listing_resolves_and_deduplicates() {
        let html = r##"
            <div class="jet-listing-grid__item"><a href="https://kompassklub.com/event/ritual/">Ritual</a></div>
            <div class="jet-listing-grid__item"><a href="/event/kompass-invites/">Invites</a></div>
            <div class="jet-listing-grid__item"><a href="https://kompassklub.com/event/ritual/#tickets">Tickets</a></div>
            <div class="jet-listing-grid__item"><a href="">Empty</a></div>
            <div class="jet-listing-grid__item"><a>No href</a></div>
            <div class="jet-listing-grid__item"><a href="https://tickets.example.com/kompass">Off-site</a></div>
            <div class="jet-listing-grid__item"><a href="https://www.kompassklub.com/event/sub/">Subdomain</a></div>
            <div class="jet-listing-grid__item"><a href="#top">Self</a></div>
            <a href="https://kompassklub.com/about/">Outside the grid</a>
        "##;

        let links: Vec<String> = KompassCrawler::parse_listing(html, &base())
            .into_iter()
            .map(String::from)
            .collect();

        assert_eq!(
            links,
            vec![
                "https://kompassklub.com/event/ritual/",
                "https://kompassklub.com/event/kompass-invites/",
                "https://www.kompassklub.com/event/sub/",
            ]
        );
    }

    #[test]
    fn test_is_allowed() {
        let allowed = "kompassklub.com";
        assert!(is_allowed(&Url::parse("https://kompassklub.com/x").unwrap(), allowed));
        assert!(is_allowed(&Url::parse("http://www.kompassklub.com/x").unwrap(), allowed));
        assert!(!is_allowed(&Url::parse("https://notkompassklub.com/x").unwrap(), allowed));
        assert!(!is_allowed(&Url::parse("mailto:info@kompassklub.com").unwrap(), allowed));
    }

    #[test]
    fn test_parse_detail() {
        let html = r#"
            <html><body>
              <h1 class="elementor-heading-title elementor-size-default">  Kompass Invites: Ben Klock  </h1>
              <div class="jet-listing-dynamic-field__content">23:00 - 07:00</div>
              <div class="jet-listing-dynamic-field__content">14 March 2025</div>
              <div class="event-description"><p>All night long.</p></div>
            </body></html>
        "#;

        let event = KompassCrawler::parse_detail(html, today());
        assert_eq!(event.title, "Kompass Invites: Ben Klock");
        assert_eq!(event.date, EventDate::new(14, 3, 2025));
        assert_eq!(event.description, "All night long.");
        assert_eq!(event.location, "Kompass Klub");
    }

    #[test]
    fn test_parse_detail_defaults() {
        let html = r#"
            <html><body>
              <h1 class="elementor-heading-title">Wrong heading size</h1>
              <div class="jet-listing-dynamic-field__content">binnenkort</div>
              <div class="tribe-events-content">Line-up TBA</div>
            </body></html>
        "#;

        let event = KompassCrawler::parse_detail(html, today());
        assert_eq!(event.title, "no title found");
        assert_eq!(event.date, EventDate::new(10, 1, 2025));
        assert_eq!(event.description, "Line-up TBA");
    }

    #[test]
    fn test_event_key_uses_title_and_date() {
        let event = Event {
            title: "Ritual".to_string(),
            description: "first".to_string(),
            date: EventDate::new(1, 2, 2025),
            location: KOMPASS_VENUE_NAME.to_string(),
        };
        let same = Event {
            description: "second".to_string(),
            ..event.clone()
        };
        assert_eq!(event_key(&event), event_key(&same));
        assert_eq!(event_key(&event), "Ritual_2025_2_1");
    }
}
