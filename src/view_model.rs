//! Typed view models built from successful payloads.
//!
//! Renderers only lay these out; every number formatting and derived
//! statistic happens here.

use crate::models::*;
use crate::series::CombinedSeries;
use crate::stats::{change_arrow, DayMove, ForecastSummary, Trend};
use crate::{format_day_label, format_long_date, format_rupees, format_rupees_whole, weather_icon};

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionCard {
    pub price: String,
    pub date: String,
    pub commodity: String,
    pub district: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCards {
    pub current: String,
    pub average: String,
    pub range: String,
    pub trend: Trend,
    /// `↑ 7.1%` style label.
    pub change: String,
    pub rising: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    pub prediction: PredictionCard,
    pub summary: Option<SummaryCards>,
    pub series: CombinedSeries,
    pub commodity: String,
    pub district: String,
}

impl ForecastView {
    pub fn build(resp: &ForecastResponse, commodity: &str, district: &str, target_date: &str) -> Self {
        let prices: Vec<f64> = resp.forecast.iter().map(|p| p.predicted_price).collect();
        let summary = ForecastSummary::compute(&prices, resp.current_price).map(|s| SummaryCards {
            current: format_rupees(s.current),
            average: format_rupees(s.stats.average),
            range: format!(
                "{} - {}",
                format_rupees_whole(s.stats.min),
                format_rupees_whole(s.stats.max)
            ),
            trend: s.trend,
            change: format!("{} {:.1}%", change_arrow(s.change_pct), s.change_pct.abs()),
            rising: s.is_rising(),
        });
        let series = CombinedSeries::build(
            &resp.historical,
            &resp.forecast,
            Some((target_date, resp.predicted_price)),
        );

        Self {
            prediction: PredictionCard {
                price: format_rupees(resp.predicted_price),
                date: format_long_date(target_date),
                commodity: commodity.to_string(),
                district: district.to_string(),
            },
            summary,
            series,
            commodity: commodity.to_string(),
            district: district.to_string(),
        }
    }
}

/// Table row of one market record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordRow {
    pub date: String,
    pub district: String,
    pub market: String,
    pub commodity: String,
    pub min: String,
    pub modal: String,
    pub max: String,
}

/// Optional columns of a record table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordColumns {
    pub district: bool,
    pub commodity: bool,
}

impl RecordColumns {
    /// Records of one district: a date tab or the last ten days.
    pub const BY_DATE: Self = Self {
        district: false,
        commodity: true,
    };
    /// One commodity compared across districts.
    pub const ACROSS_DISTRICTS: Self = Self {
        district: true,
        commodity: false,
    };

    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = vec!["Date"];
        if self.district {
            headers.push("District");
        }
        headers.push("Market");
        if self.commodity {
            headers.push("Commodity");
        }
        headers.extend(["Min Price", "Modal Price", "Max Price"]);
        headers
    }
}

fn text_or_na(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn price_or_zero(value: &Option<PriceValue>) -> String {
    match value {
        Some(PriceValue::Text(s)) if s.is_empty() => "₹0".to_string(),
        Some(v) => format!("₹{}", v),
        None => "₹0".to_string(),
    }
}

impl From<&MarketRecord> for RecordRow {
    fn from(r: &MarketRecord) -> Self {
        Self {
            date: text_or_na(&r.arrival_date),
            district: text_or_na(&r.district),
            market: text_or_na(&r.market),
            commodity: text_or_na(&r.commodity),
            min: price_or_zero(&r.min_price),
            modal: price_or_zero(&r.modal_price),
            max: price_or_zero(&r.max_price),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AverageCards {
    pub min: String,
    pub modal: String,
    pub max: String,
}

impl From<&AveragePrices> for AverageCards {
    fn from(p: &AveragePrices) -> Self {
        Self {
            min: format_rupees(p.min_avg),
            modal: format_rupees(p.modal_avg),
            max: format_rupees(p.max_avg),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateTab {
    pub label: String,
    pub averages: AverageCards,
    pub rows: Vec<RecordRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub date: String,
    pub averages: AverageCards,
    pub movement: DayMove,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketView {
    pub commodity: String,
    pub district: String,
    pub latest_label: String,
    pub latest: AverageCards,
    pub tabs: Vec<DateTab>,
    pub comparison: Vec<ComparisonRow>,
}

impl MarketView {
    /// `None` when there are no dates to show.
    pub fn build(dates: &[DateData], commodity: &str, district: &str) -> Option<Self> {
        let first = dates.first()?;
        let tabs = dates
            .iter()
            .map(|d| DateTab {
                label: d.date_formatted.clone(),
                averages: AverageCards::from(&d.prices),
                rows: d.records.iter().map(RecordRow::from).collect(),
            })
            .collect();
        let comparison = dates
            .iter()
            .enumerate()
            .map(|(i, d)| ComparisonRow {
                date: d.date.clone(),
                averages: AverageCards::from(&d.prices),
                movement: DayMove::compare(
                    d.prices.modal_avg,
                    dates.get(i + 1).map(|prev| prev.prices.modal_avg),
                ),
            })
            .collect();

        Some(Self {
            commodity: commodity.to_string(),
            district: district.to_string(),
            latest_label: first.date_formatted.clone(),
            latest: AverageCards::from(&first.prices),
            tabs,
            comparison,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub location: String,
    pub icon: &'static str,
    pub description: String,
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub pressure: String,
}

impl From<&CurrentWeather> for CurrentConditions {
    fn from(w: &CurrentWeather) -> Self {
        let description = w
            .weather
            .first()
            .map(|c| c.description.clone())
            .unwrap_or_default();
        Self {
            location: w.name.clone(),
            icon: weather_icon(&description),
            temperature: format!("{:.0}°C", w.main.temp.round()),
            feels_like: format!("{:.0}°C", w.main.feels_like.round()),
            humidity: format!("{}%", w.main.humidity),
            wind: format!("{:.0} km/h", (w.wind.speed * 3.6).round()),
            pressure: format!("{} hPa", w.main.pressure),
            description,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCard {
    pub day: String,
    pub icon: &'static str,
    pub condition: String,
    pub max_temp: String,
    pub min_temp: String,
    pub humidity: String,
    pub wind: String,
    pub rain_chance: String,
}

impl From<&ForecastDay> for DayCard {
    fn from(d: &ForecastDay) -> Self {
        Self {
            day: format_day_label(&d.date),
            icon: weather_icon(&d.condition),
            condition: d.condition.clone(),
            max_temp: format!("{}°", d.max_temp),
            min_temp: format!("{}°", d.min_temp),
            humidity: format!("{}% humidity", d.humidity),
            wind: format!("{} km/h wind", d.wind),
            rain_chance: format!("{}% rain", d.rain_chance),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoCard {
    pub video_id: String,
    pub title: String,
    pub channel: String,
    pub thumbnail: Option<String>,
}

impl VideoCard {
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.video_id)
    }

    /// Cards for videos that carry an id, first occurrence wins.
    pub fn from_videos(videos: &[Video]) -> Vec<Self> {
        let mut seen = std::collections::HashSet::new();
        videos
            .iter()
            .filter_map(|v| {
                let id = v.id.video_id.clone()?;
                seen.insert(id.clone()).then(|| VideoCard {
                    video_id: id,
                    title: v.snippet.title.clone(),
                    channel: v.snippet.channel_title.clone(),
                    thumbnail: v.snippet.thumbnails.medium.as_ref().map(|t| t.url.clone()),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn onion_forecast() -> ForecastResponse {
        let historical: Vec<serde_json::Value> = (1..=10)
            .map(|d| json!({"date": format!("2026-10-{:02}", d), "price": 1400.0}))
            .collect();
        serde_json::from_value(json!({
            "predicted_price": 1500.0,
            "current_price": 1400.0,
            "historical": historical,
            "forecast": [
                {"date": "2026-10-20", "predicted_price": 1450.0},
                {"date": "2026-11-01", "predicted_price": 1500.0},
                {"date": "2026-11-10", "predicted_price": 1550.0},
            ],
        }))
        .unwrap()
    }

    #[test]
    fn onion_in_nashik_end_to_end() {
        let view = ForecastView::build(&onion_forecast(), "Onion", "Nashik", "2026-11-01");
        assert_eq!(view.prediction.price, "₹1500.00");
        assert_eq!(view.prediction.date, "November 1, 2026");

        let summary = view.summary.unwrap();
        assert_eq!(summary.trend, Trend::Increasing);
        assert_eq!(summary.current, "₹1400.00");
        assert_eq!(summary.average, "₹1500.00");
        assert_eq!(summary.range, "₹1450 - ₹1550");
        assert_eq!(summary.change, "↑ 7.1%");

        assert_eq!(view.series.len(), 13);
        assert_eq!(view.series.target[11], Some(1500.0));
    }

    #[test]
    fn stable_and_decreasing_trends() {
        let mut resp = onion_forecast();
        resp.current_price = Some(1490.0);
        let view = ForecastView::build(&resp, "Onion", "Nashik", "2026-11-01");
        assert_eq!(view.summary.unwrap().trend, Trend::Stable);

        resp.current_price = Some(1650.0);
        let view = ForecastView::build(&resp, "Onion", "Nashik", "2026-11-01");
        let summary = view.summary.unwrap();
        assert_eq!(summary.trend, Trend::Decreasing);
        assert!(!summary.rising);
        assert_eq!(summary.change, "↓ 9.1%");
    }

    #[test]
    fn market_view_compares_each_date_with_older_one() {
        let dates: Vec<DateData> = serde_json::from_value(json!([
            {"date": "2026-10-17", "date_formatted": "17/10/2026",
             "prices": {"min_avg": 1000.0, "modal_avg": 1300.0, "max_avg": 1500.0},
             "records": [{"Arrival_Date": "17/10/2026", "Market": "Lasalgaon", "Modal_Price": "1300"}]},
            {"date": "2026-10-16", "date_formatted": "16/10/2026",
             "prices": {"min_avg": 1000.0, "modal_avg": 1200.0, "max_avg": 1500.0}, "records": []},
            {"date": "2026-10-15", "date_formatted": "15/10/2026",
             "prices": {"min_avg": 1000.0, "modal_avg": 1200.0, "max_avg": 1500.0}, "records": []},
        ]))
        .unwrap();
        let view = MarketView::build(&dates, "Onion", "Nashik").unwrap();
        assert_eq!(view.latest_label, "17/10/2026");
        assert_eq!(view.latest.modal, "₹1300.00");
        let moves: Vec<DayMove> = view.comparison.iter().map(|r| r.movement).collect();
        assert_eq!(moves, vec![DayMove::Up, DayMove::Stable, DayMove::Baseline]);

        let row = &view.tabs[0].rows[0];
        assert_eq!(row.market, "Lasalgaon");
        assert_eq!(row.modal, "₹1300");
        assert_eq!(row.min, "₹0");
        assert_eq!(row.commodity, "N/A");
    }

    #[test]
    fn empty_market_dates_have_no_view() {
        assert!(MarketView::build(&[], "Onion", "Nashik").is_none());
    }

    #[test]
    fn current_weather_rounds_and_converts_wind() {
        let w: CurrentWeather = serde_json::from_value(json!({
            "name": "Nashik",
            "main": {"temp": 27.6, "feels_like": 29.4, "humidity": 62, "pressure": 1011},
            "wind": {"speed": 3.5},
            "weather": [{"description": "scattered clouds"}],
        }))
        .unwrap();
        let c = CurrentConditions::from(&w);
        assert_eq!(c.temperature, "28°C");
        assert_eq!(c.feels_like, "29°C");
        assert_eq!(c.wind, "13 km/h");
        assert_eq!(c.humidity, "62%");
        assert_eq!(c.pressure, "1011 hPa");
        assert_eq!(c.icon, "☁️");
    }

    #[test]
    fn day_card_labels() {
        let d = ForecastDay {
            date: "2026-11-01".into(),
            condition: "light rain".into(),
            max_temp: 31.2,
            min_temp: 21.5,
            humidity: 70.0,
            wind: 12.6,
            rain_chance: 40.0,
        };
        let card = DayCard::from(&d);
        assert_eq!(card.day, "Sun, Nov 1");
        assert_eq!(card.icon, "🌧️");
        assert_eq!(card.max_temp, "31.2°");
        assert_eq!(card.rain_chance, "40% rain");
    }

    #[test]
    fn video_cards_skip_missing_and_duplicate_ids() {
        let videos: Vec<Video> = serde_json::from_value(json!([
            {"id": {"videoId": "a1"}, "snippet": {"title": "Onion farming", "channelTitle": "Krishi"}},
            {"id": {}, "snippet": {"title": "channel result"}},
            {"id": {"videoId": "a1"}, "snippet": {"title": "dup"}},
            {"id": {"videoId": "b2"}, "snippet": {"title": "Soil", "thumbnails": {"medium": {"url": "http://img"}}}},
        ]))
        .unwrap();
        let cards = VideoCard::from_videos(&videos);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "Onion farming");
        assert_eq!(cards[1].thumbnail.as_deref(), Some("http://img"));
        assert_eq!(cards[1].embed_url(), "https://www.youtube.com/embed/b2");
    }

    #[test]
    fn record_tables_pick_their_columns() {
        assert_eq!(
            RecordColumns::BY_DATE.headers(),
            ["Date", "Market", "Commodity", "Min Price", "Modal Price", "Max Price"]
        );
        assert_eq!(
            RecordColumns::ACROSS_DISTRICTS.headers(),
            ["Date", "District", "Market", "Min Price", "Modal Price", "Max Price"]
        );
    }
}
