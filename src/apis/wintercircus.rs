use crate::apis::html::{child_attr, child_text, selector, HtmlFetcher};
use crate::common::constants::{WINTERCIRCUS_API, WINTERCIRCUS_VENUE_NAME};
use crate::common::error::Result;
use crate::common::types::{Event, EventDate, EventProvider};
use crate::dates::dutch_month;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, instrument};

static EVENT_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("li.wp-block-post"));
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("h2.list_title"));
static DATE_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("div.post-date-container time"));
static TIME_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("time"));

/// Scrapes the Club Wintercircus homepage listing
pub struct WintercircusCrawler {
    fetcher: HtmlFetcher,
    endpoint: String,
}

impl WintercircusCrawler {
    pub fn new(fetcher: HtmlFetcher, endpoint: impl Into<String>) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.into(),
        }
    }

    /// Extract every post block from the listing page.
    ///
    /// The listing carries no description; that would need a request per
    /// detail page.
    pub fn parse_events(html: &str) -> Vec<Event> {
        let document = Html::parse_document(html);

        document
            .select(&EVENT_SELECTOR)
            .map(|item| Event {
                title: child_text(&item, &TITLE_SELECTOR),
                description: String::new(),
                date: Self::parse_date(&item),
                location: WINTERCIRCUS_VENUE_NAME.to_string(),
            })
            .collect()
    }

    /// Dates read like "22 mrt"; the year only lives in the `datetime`
    /// attribute of the `time` element.
    fn parse_date(item: &ElementRef<'_>) -> EventDate {
        let mut date = EventDate::default();

        let date_text = child_text(item, &DATE_SELECTOR);
        let parts: Vec<&str> = date_text.split_whitespace().collect();
        if parts.len() != 2 {
            return date;
        }

        if let Ok(day) = parts[0].parse() {
            date.day = day;
        }
        date.month = dutch_month(parts[1]);

        if let Some(year) = child_attr(item, &TIME_SELECTOR, "datetime")
            .and_then(|datetime| datetime.get(..4))
            .and_then(|year| year.parse().ok())
        {
            date.year = year;
        }

        date
    }
}

#[async_trait::async_trait]
impl EventProvider for WintercircusCrawler {
    fn name(&self) -> &'static str {
        WINTERCIRCUS_API
    }

    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn scrape_events(&self) -> Result<Vec<Event>> {
        let body = self.fetcher.fetch(&self.endpoint).await?;
        let events = Self::parse_events(&body);

        info!(
            "Successfully fetched {} events from {}",
            events.len(),
            WINTERCIRCUS_VENUE_NAME
        );
        Ok(events)
    }
}
