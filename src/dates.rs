//! Date normalization for venue pages.
//!
//! Venue sites print dates in a handful of fixed shapes (`14 March 2025`,
//! `Mar 14, 2025`, `2025-03-14`, ...). [`parse_date`] tries them in a fixed
//! order and falls back to a loose `day month year` reading of the first three
//! words, which also covers trailing noise such as a start time.

use crate::common::types::EventDate;
use chrono::NaiveDate;
use tracing::debug;

/// chrono formats tried in order; the first one that parses wins.
/// `%B` and `%b` both accept full and abbreviated month names.
const DATE_FORMATS: &[&str] = &[
    "%d %B %Y",  // 2 January 2006
    "%d %b %Y",  // 2 Jan 2006
    "%b %d, %Y", // Jan 2, 2006
    "%Y-%m-%d",  // 2006-01-02
    "%d-%m-%Y",  // 02-01-2006
    "%m/%d/%Y",  // 01/02/2006
];

/// Parse a free-form date string into an [`EventDate`].
///
/// Returns `None` when neither a fixed format nor the word-based fallback
/// produce a valid calendar date.
pub fn parse_date(text: &str) -> Option<EventDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(EventDate::from_naive(date));
        }
    }

    parse_day_month_year_words(text)
}

/// Like [`parse_date`], but substitutes `fallback` when nothing parses.
pub fn parse_date_or(text: &str, fallback: NaiveDate) -> EventDate {
    parse_date(text).unwrap_or_else(|| {
        debug!("Could not parse date '{}', using {}", text.trim(), fallback);
        EventDate::from_naive(fallback)
    })
}

fn parse_day_month_year_words(text: &str) -> Option<EventDate> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() < 3 {
        return None;
    }

    let day: u32 = strip_punctuation(parts[0]).parse().ok()?;
    let month = english_month(parts[1]).or_else(|| match dutch_month(parts[1]) {
        0 => None,
        month => Some(month),
    })?;
    let year: i32 = strip_punctuation(parts[2]).parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day).map(EventDate::from_naive)
}

fn strip_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| c == ',' || c == '.')
}

/// English month name or abbreviation to its number
pub fn english_month(name: &str) -> Option<u32> {
    let month = match strip_punctuation(name).to_lowercase().as_str() {
        "january" | "jan" => 1,
        "february" | "feb" => 2,
        "march" | "mar" => 3,
        "april" | "apr" => 4,
        "may" => 5,
        "june" | "jun" => 6,
        "july" | "jul" => 7,
        "august" | "aug" => 8,
        "september" | "sept" | "sep" => 9,
        "october" | "oct" => 10,
        "november" | "nov" => 11,
        "december" | "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Dutch month abbreviation (`mrt`, `okt`, ...) or full name to its number.
/// Unknown input yields 0, the "not found" value of [`EventDate`].
pub fn dutch_month(name: &str) -> u32 {
    match strip_punctuation(name).to_lowercase().as_str() {
        "jan" | "januari" => 1,
        "feb" | "februari" => 2,
        "mrt" | "maart" => 3,
        "apr" | "april" => 4,
        "mei" => 5,
        "jun" | "juni" => 6,
        "jul" | "juli" => 7,
        "aug" | "augustus" => 8,
        "sep" | "sept" | "september" => 9,
        "okt" | "oktober" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => 0,
    }
}
