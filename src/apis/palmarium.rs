use crate::apis::html::{child_text, selector, HtmlFetcher};
use crate::common::constants::{PALMARIUM_API, PALMARIUM_VENUE_NAME};
use crate::common::error::Result;
use crate::common::types::{Event, EventDate, EventProvider};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{info, instrument};

static EVENT_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("article.event-item.has-long-title"));
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("h3"));
static DESCRIPTION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| selector("div.event-content-description p"));
static DATE_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("span.event-date-date"));

/// Scrapes the Palmarium programme hosted on democrazy.be
pub struct PalmariumCrawler {
    fetcher: HtmlFetcher,
    endpoint: String,
}

impl PalmariumCrawler {
    pub fn new(fetcher: HtmlFetcher, endpoint: impl Into<String>) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.into(),
        }
    }

    /// Extract every event block from the listing page
    pub fn parse_events(html: &str) -> Vec<Event> {
        let document = Html::parse_document(html);

        document
            .select(&EVENT_SELECTOR)
            .map(|item| Event {
                title: child_text(&item, &TITLE_SELECTOR),
                description: child_text(&item, &DESCRIPTION_SELECTOR),
                date: Self::parse_date(&child_text(&item, &DATE_SELECTOR)),
                location: PALMARIUM_VENUE_NAME.to_string(),
            })
            .collect()
    }

    /// Parse dates like "15.052025": `DD.MM` directly followed by the year.
    /// Components that do not parse, including ones with stray
    /// whitespace, are left at zero.
    fn parse_date(date_text: &str) -> EventDate {
        let mut date = EventDate::default();

        let split_at = match date_text.len().checked_sub(4) {
            Some(index) if date_text.is_char_boundary(index) => index,
            _ => return date,
        };
        let (day_month, year) = date_text.split_at(split_at);

        let parts: Vec<&str> = day_month.split('.').collect();
        if parts.len() == 2 {
            if let Ok(day) = parts[0].parse() {
                date.day = day;
            }
            if let Ok(month) = parts[1].parse() {
                date.month = month;
            }
        }

        if let Ok(year) = year.parse() {
            date.year = year;
        }

        date
    }
}

#[async_trait::async_trait]
impl EventProvider for PalmariumCrawler {
    fn name(&self) -> &'static str {
        PALMARIUM_API
    }

    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn scrape_events(&self) -> Result<Vec<Event>> {
        let body = self.fetcher.fetch(&self.endpoint).await?;
        let events = Self::parse_events(&body);

        info!(
            "Successfully fetched {} events from {}",
            events.len(),
            PALMARIUM_VENUE_NAME
        );
        Ok(events)
    }
}
