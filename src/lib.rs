//! Core logic for the CropWise market-data front end.
//!
//! Everything in this crate root and its modules is free of DOM access so it
//! can be unit tested natively; the Yew application in `main.rs` wires it to
//! the browser.

use chrono::NaiveDate;
use std::fmt;

pub mod api;
pub mod export;
pub mod models;
pub mod request;
pub mod selector;
pub mod series;
pub mod shortcuts;
pub mod stats;
pub mod toast;
pub mod view_model;

/// Default messages shown when the backend gives no detail.
pub mod defaults {
    pub const NETWORK_MESSAGE: &str = "Network error. Please check your connection and try again.";
    pub const FORECAST_FAILED: &str = "Failed to generate forecast";
    pub const MARKET_EMPTY: &str = "No data available for this selection";
    pub const LOCATION_NOT_FOUND: &str = "Please check the location and try again";
    pub const VIDEOS_FAILED: &str = "Unable to load videos";
}

/// Failure of a single JSON-over-HTTP call.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never completed (offline, DNS, CORS, aborted).
    Network(String),
    /// Non-success status whose body was not a JSON envelope.
    Http(u16),
    /// The body was not JSON, or did not have the expected shape.
    Decode(String),
    /// The backend answered `{success: false, message}`.
    Application(String),
}

impl FetchError {
    /// Text suitable for the error panel and the toast.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Application(message) => message.clone(),
            FetchError::Network(_) | FetchError::Http(_) | FetchError::Decode(_) => {
                defaults::NETWORK_MESSAGE.to_string()
            }
        }
    }

    pub fn is_transport(&self) -> bool {
        !matches!(self, FetchError::Application(_))
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(detail) => write!(f, "Request failed: {}", detail),
            FetchError::Http(status) => write!(f, "HTTP error: {}", status),
            FetchError::Decode(detail) => write!(f, "Failed to parse response: {}", detail),
            FetchError::Application(message) => write!(f, "Server reported failure: {}", message),
        }
    }
}

impl std::error::Error for FetchError {}

/// Format a price in rupees with two decimals, e.g. `₹1500.00`.
pub fn format_rupees(value: f64) -> String {
    format!("₹{:.2}", value)
}

/// Format a price in rupees without decimals, e.g. `₹1500`.
pub fn format_rupees_whole(value: f64) -> String {
    format!("₹{:.0}", value)
}

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

/// Today's date in UTC, as used for export file names.
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// `2026-11-01` → `November 1, 2026`. Unparseable input is returned as is.
pub fn format_long_date(iso: &str) -> String {
    match parse_iso_date(iso) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => iso.to_string(),
    }
}

/// `2026-11-01` → `Sun, Nov 1`. Unparseable input is returned as is.
pub fn format_day_label(iso: &str) -> String {
    match parse_iso_date(iso) {
        Some(date) => date.format("%a, %b %-d").to_string(),
        None => iso.to_string(),
    }
}

/// Pick an emoji for a free-text weather condition.
pub fn weather_icon(condition: &str) -> &'static str {
    let cond = condition.to_lowercase();
    if cond.contains("clear") {
        "☀️"
    } else if cond.contains("cloud") {
        "☁️"
    } else if cond.contains("rain") || cond.contains("drizzle") {
        "🌧️"
    } else if cond.contains("thunder") {
        "⛈️"
    } else if cond.contains("snow") {
        "❄️"
    } else if cond.contains("mist") || cond.contains("fog") {
        "🌫️"
    } else {
        "🌤️"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn today_is_a_plain_iso_day() {
        let day = today();
        let iso = day.format("%Y-%m-%d").to_string();
        assert_eq!(parse_iso_date(&iso), Some(day));
        assert!(day.year() >= 2024);
    }

    #[test]
    fn rupee_formatting() {
        assert_eq!(format_rupees(1500.0), "₹1500.00");
        assert_eq!(format_rupees(87.5), "₹87.50");
        assert_eq!(format_rupees_whole(1234.4), "₹1234");
    }

    #[test]
    fn long_date_formatting() {
        assert_eq!(format_long_date("2026-11-01"), "November 1, 2026");
        assert_eq!(format_long_date("not a date"), "not a date");
    }

    #[test]
    fn day_label_formatting() {
        assert_eq!(format_day_label("2026-11-01"), "Sun, Nov 1");
    }

    #[test]
    fn weather_icons_follow_first_matching_keyword() {
        assert_eq!(weather_icon("Clear sky"), "☀️");
        assert_eq!(weather_icon("broken clouds"), "☁️");
        assert_eq!(weather_icon("light rain"), "🌧️");
        // "thunderstorm with rain" matches rain first
        assert_eq!(weather_icon("thunderstorm with rain"), "🌧️");
        assert_eq!(weather_icon("thunderstorm"), "⛈️");
        assert_eq!(weather_icon("haze"), "🌤️");
    }

    #[test]
    fn transport_errors_share_one_message() {
        assert_eq!(
            FetchError::Http(502).user_message(),
            defaults::NETWORK_MESSAGE
        );
        assert_eq!(
            FetchError::Decode("eof".into()).user_message(),
            defaults::NETWORK_MESSAGE
        );
        assert_eq!(
            FetchError::Application("Location not found".into()).user_message(),
            "Location not found"
        );
        assert!(!FetchError::Application(String::new()).is_transport());
    }
}
