//! Application-level configuration constants and runtime settings.

use log::Level;

// UI behaviour
pub const TOAST_DURATION_MS: u32 = 5_000;
pub const DEFAULT_TARGET_DATE: &str = "2026-11-01";
pub const CHART_CANVAS_ID: &str = "professional-chart";
pub const WEATHER_FORECAST_DAYS: usize = 5;

// Page data
pub const OPTIONS_ELEMENT_ID: &str = "cropwise-options";
pub const API_BASE_META: &str = "cropwise-api-base";

// Export file name prefixes
pub const FORECAST_EXPORT_PREFIX: &str = "forecast_";
pub const MARKET_EXPORT_PREFIX: &str = "market_prices_";

// Bilingual prompts
pub const SELECT_BOTH_FORECAST: &str =
    "⚠️ कृपया पीक आणि जिल्हा निवडा! Please select crop and district!";
pub const SELECT_BOTH_MARKET: &str = "⚠️ Please select both crop and district!";
pub const SELECT_CROP: &str = "⚠️ कृपया पीक निवडा! Please select a crop!";
pub const ENTER_LOCATION: &str = "⚠️ Please enter a location!";

/// Settings resolved once from the hosting page.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Prefix for API paths; empty means same origin.
    pub api_base: String,
    pub log_level: Level,
    pub debug_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            log_level: Level::Info,
            debug_mode: false,
        }
    }
}

impl AppSettings {
    pub fn from_environment() -> Self {
        let mut settings = Self::default();
        let window = gloo_utils::window();

        if let Ok(hostname) = window.location().hostname() {
            settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            }
        }

        let selector = format!("meta[name=\"{}\"]", API_BASE_META);
        if let Ok(Some(meta)) = gloo_utils::document().query_selector(&selector) {
            if let Some(content) = meta.get_attribute("content") {
                settings.api_base = content.trim().to_string();
            }
        }

        settings
    }
}
