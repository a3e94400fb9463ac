//! Request and response bodies of the backend JSON API.
//!
//! Response types describe only the payload; the `success`/`message`
//! envelope is handled by [`crate::api`].

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub commodity: String,
    pub district: String,
    pub target_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub date: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: String,
    pub predicted_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub predicted_price: f64,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub target_date: Option<String>,
    #[serde(default)]
    pub historical: Vec<HistoricalPoint>,
    #[serde(default)]
    pub forecast: Vec<ForecastPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRequest {
    pub commodity: String,
    pub district: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommodityRequest {
    pub commodity: String,
}

/// A price cell as sent by the market data service: usually a numeric
/// string, sometimes a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(f64),
    Text(String),
}

impl PriceValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PriceValue::Number(n) => Some(*n),
            PriceValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for PriceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceValue::Number(n) => write!(f, "{}", n),
            PriceValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One arrival record of a commodity at a market.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketRecord {
    #[serde(rename = "Arrival_Date", default)]
    pub arrival_date: Option<String>,
    #[serde(rename = "State", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "District", default)]
    pub district: Option<String>,
    #[serde(rename = "Market", default)]
    pub market: Option<String>,
    #[serde(rename = "Commodity", default)]
    pub commodity: Option<String>,
    #[serde(rename = "Min_Price", default)]
    pub min_price: Option<PriceValue>,
    #[serde(rename = "Modal_Price", default)]
    pub modal_price: Option<PriceValue>,
    #[serde(rename = "Max_Price", default)]
    pub max_price: Option<PriceValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AveragePrices {
    #[serde(default)]
    pub min_avg: f64,
    #[serde(default)]
    pub modal_avg: f64,
    #[serde(default)]
    pub max_avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateData {
    pub date: String,
    pub date_formatted: String,
    #[serde(default)]
    pub prices: AveragePrices,
    #[serde(default)]
    pub records: Vec<MarketRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentDatesResponse {
    #[serde(default)]
    pub dates_data: Vec<DateData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordsResponse {
    #[serde(default)]
    pub records: Vec<MarketRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    #[default]
    City,
    Pincode,
}

impl LocationKind {
    pub fn label(&self) -> &'static str {
        match self {
            LocationKind::City => "City",
            LocationKind::Pincode => "Pincode",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRequest {
    #[serde(rename = "type")]
    pub kind: LocationKind,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub pressure: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Metres per second.
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub name: String,
    pub main: MainReadings,
    pub wind: Wind,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherResponse {
    pub data: CurrentWeather,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub condition: String,
    pub max_temp: f64,
    pub min_temp: f64,
    pub humidity: f64,
    /// Kilometres per hour.
    pub wind: f64,
    pub rain_chance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecastResponse {
    #[serde(default)]
    pub forecast: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSearchRequest {
    pub crop: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VideoId {
    #[serde(rename = "videoId", default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Thumbnails {
    #[serde(default)]
    pub medium: Option<Thumbnail>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VideoSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "channelTitle", default)]
    pub channel_title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub id: VideoId,
    #[serde(default)]
    pub snippet: VideoSnippet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSearchResponse {
    #[serde(default)]
    pub videos: Vec<Video>,
}

/// Option lists the backend renders into the page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OptionsDataset {
    #[serde(default)]
    pub commodities: Vec<String>,
    #[serde(default)]
    pub districts: Vec<String>,
    #[serde(default)]
    pub crops: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn market_record_accepts_string_and_numeric_prices() {
        let rec: MarketRecord = serde_json::from_value(json!({
            "Arrival_Date": "17/10/2026",
            "Market": "Lasalgaon",
            "Min_Price": "1200",
            "Modal_Price": 1450,
        }))
        .unwrap();
        assert_eq!(rec.market.as_deref(), Some("Lasalgaon"));
        assert_eq!(rec.min_price.as_ref().and_then(PriceValue::as_f64), Some(1200.0));
        assert_eq!(rec.modal_price.as_ref().and_then(PriceValue::as_f64), Some(1450.0));
        assert!(rec.max_price.is_none());
        assert!(rec.commodity.is_none());
    }

    #[test]
    fn weather_request_uses_type_key() {
        let body = serde_json::to_value(WeatherRequest {
            kind: LocationKind::Pincode,
            location: "422001".into(),
        })
        .unwrap();
        assert_eq!(body, json!({"type": "pincode", "location": "422001"}));
    }

    #[test]
    fn forecast_response_tolerates_missing_current_price() {
        let resp: ForecastResponse = serde_json::from_value(json!({
            "predicted_price": 1500.0,
            "historical": [{"date": "2026-10-01", "price": 1400.0}],
            "forecast": [{"date": "2026-10-02", "predicted_price": 1410.0}],
        }))
        .unwrap();
        assert_eq!(resp.current_price, None);
        assert_eq!(resp.forecast.len(), 1);
    }
}
