use crate::common::error::Result;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar date of an event as extracted from a venue page.
///
/// Venue markup does not always yield every component, so each field is kept
/// separately; a zero means "not found".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl EventDate {
    pub fn new(day: u32, month: u32, year: i32) -> Self {
        Self { day, month, year }
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self {
            day: date.day(),
            month: date.month(),
            year: date.year(),
        }
    }

    /// The date as a chrono value, if every component is present and valid
    pub fn to_naive(&self) -> Option<NaiveDate> {
        if !self.is_complete() {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    pub fn is_complete(&self) -> bool {
        self.day != 0 && self.month != 0 && self.year != 0
    }
}

impl From<NaiveDate> for EventDate {
    fn from(date: NaiveDate) -> Self {
        Self::from_naive(date)
    }
}

/// Renders as `DD/MM/YYYY`
impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{}", self.day, self.month, self.year)
    }
}

/// A normalized event record produced by a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub description: String,
    pub date: EventDate,
    pub location: String,
}

/// Core trait that every venue scraper implements
#[async_trait::async_trait]
pub trait EventProvider: Send + Sync {
    /// Unique identifier for this provider
    fn name(&self) -> &'static str;

    /// Fetch the venue pages and return the events found on them
    async fn scrape_events(&self) -> Result<Vec<Event>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_day_and_month() {
        assert_eq!(EventDate::new(5, 3, 2025).to_string(), "05/03/2025");
        assert_eq!(EventDate::new(22, 11, 2024).to_string(), "22/11/2024");
    }

    #[test]
    fn test_display_of_missing_components() {
        assert_eq!(EventDate::default().to_string(), "00/00/0");
    }

    #[test]
    fn test_to_naive_requires_all_components() {
        assert_eq!(
            EventDate::new(15, 5, 2025).to_naive(),
            NaiveDate::from_ymd_opt(2025, 5, 15)
        );
        assert!(EventDate::new(15, 5, 0).to_naive().is_none());
        assert!(EventDate::new(31, 2, 2025).to_naive().is_none());
    }

    #[test]
    fn test_from_naive() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(EventDate::from(date), EventDate::new(31, 12, 2024));
    }
}
