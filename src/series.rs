//! Combined historical/forecast series for the price chart.
//!
//! Both lines share one label axis. The historical line is null after the
//! last historical date; the forecast line is null before it and repeats the
//! last historical price at that date so the two lines join without a gap.

use crate::models::{ForecastPoint, HistoricalPoint};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedSeries {
    pub labels: Vec<String>,
    pub historical: Vec<Option<f64>>,
    pub forecast: Vec<Option<f64>>,
    /// At most one non-null slot: the requested target date.
    pub target: Vec<Option<f64>>,
    /// Index of the first forecast-only slot, if any forecast exists.
    pub transition_index: Option<usize>,
}

impl CombinedSeries {
    pub fn build(
        historical: &[HistoricalPoint],
        forecast: &[ForecastPoint],
        target: Option<(&str, f64)>,
    ) -> Self {
        let h = historical.len();
        let total = h + forecast.len();

        let labels: Vec<String> = historical
            .iter()
            .map(|p| p.date.clone())
            .chain(forecast.iter().map(|p| p.date.clone()))
            .collect();

        let historical_line: Vec<Option<f64>> = historical
            .iter()
            .map(|p| Some(p.price))
            .chain(std::iter::repeat(None).take(forecast.len()))
            .collect();

        let mut forecast_line: Vec<Option<f64>> = Vec::with_capacity(total);
        if let Some(last) = historical.last() {
            forecast_line.extend(std::iter::repeat(None).take(h - 1));
            forecast_line.push(Some(last.price));
        }
        forecast_line.extend(forecast.iter().map(|p| Some(p.predicted_price)));

        let mut target_line = vec![None; total];
        if let Some((date, price)) = target {
            if let Some(idx) = labels.iter().position(|l| l == date) {
                target_line[idx] = Some(price);
            }
        }

        Self {
            labels,
            historical: historical_line,
            forecast: forecast_line,
            target: target_line,
            transition_index: (!forecast.is_empty()).then_some(h),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Presentation of the price chart. Only styling changes between modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartMode {
    #[default]
    Area,
    Line,
    Bar,
    Smooth,
}

/// Stroke and fill settings passed to the charting library.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartStyle {
    pub chart_type: &'static str,
    pub tension: f64,
    pub fill: bool,
    pub border_width: u32,
    pub historical_bg: &'static str,
    pub forecast_bg: &'static str,
    /// Dash pattern of the forecast line; empty for solid.
    pub forecast_dash: Vec<u32>,
    pub max_ticks: u32,
}

impl ChartMode {
    pub const ALL: [ChartMode; 4] = [
        ChartMode::Area,
        ChartMode::Line,
        ChartMode::Bar,
        ChartMode::Smooth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartMode::Area => "area",
            ChartMode::Line => "line",
            ChartMode::Bar => "bar",
            ChartMode::Smooth => "smooth",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartMode::Area => "📊 Area Chart",
            ChartMode::Line => "📈 Line Chart",
            ChartMode::Bar => "📊 Bar Chart",
            ChartMode::Smooth => "〰️ Smooth Curve",
        }
    }

    pub fn style(&self) -> ChartStyle {
        let dashed = vec![8, 4];
        match self {
            ChartMode::Area => ChartStyle {
                chart_type: "line",
                tension: 0.4,
                fill: true,
                border_width: 3,
                historical_bg: "rgba(33, 150, 243, 0.15)",
                forecast_bg: "rgba(255, 107, 53, 0.15)",
                forecast_dash: dashed,
                max_ticks: 15,
            },
            ChartMode::Line => ChartStyle {
                chart_type: "line",
                tension: 0.2,
                fill: false,
                border_width: 3,
                historical_bg: "transparent",
                forecast_bg: "transparent",
                forecast_dash: dashed,
                max_ticks: 15,
            },
            ChartMode::Bar => ChartStyle {
                chart_type: "bar",
                tension: 0.0,
                fill: false,
                border_width: 0,
                historical_bg: "rgba(33, 150, 243, 0.7)",
                forecast_bg: "rgba(255, 107, 53, 0.7)",
                forecast_dash: Vec::new(),
                max_ticks: 10,
            },
            ChartMode::Smooth => ChartStyle {
                chart_type: "line",
                tension: 0.5,
                fill: true,
                border_width: 3,
                historical_bg: "rgba(33, 150, 243, 0.2)",
                forecast_bg: "rgba(255, 107, 53, 0.2)",
                forecast_dash: dashed,
                max_ticks: 15,
            },
        }
    }
}

impl fmt::Display for ChartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("Unknown chart mode: {}", s))
    }
}

/// Everything the charting helper needs for one render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec<'a> {
    pub title: String,
    pub series: &'a CombinedSeries,
    pub style: ChartStyle,
}

impl<'a> ChartSpec<'a> {
    pub fn new(series: &'a CombinedSeries, mode: ChartMode, commodity: &str, district: &str) -> Self {
        Self {
            title: format!("Price Trend Analysis: {} in {}", commodity, district),
            series,
            style: mode.style(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hist(points: &[(&str, f64)]) -> Vec<HistoricalPoint> {
        points
            .iter()
            .map(|&(date, price)| HistoricalPoint {
                date: date.into(),
                price,
            })
            .collect()
    }

    fn fcst(points: &[(&str, f64)]) -> Vec<ForecastPoint> {
        points
            .iter()
            .map(|&(date, predicted_price)| ForecastPoint {
                date: date.into(),
                predicted_price,
            })
            .collect()
    }

    #[test]
    fn lines_share_exactly_the_last_historical_point() {
        let s = CombinedSeries::build(
            &hist(&[("d1", 10.0), ("d2", 12.0)]),
            &fcst(&[("d3", 14.0), ("d4", 16.0)]),
            None,
        );
        assert_eq!(s.labels, vec!["d1", "d2", "d3", "d4"]);
        assert_eq!(s.historical, vec![Some(10.0), Some(12.0), None, None]);
        assert_eq!(s.forecast, vec![None, Some(12.0), Some(14.0), Some(16.0)]);
        assert_eq!(s.transition_index, Some(2));

        let overlap = s
            .historical
            .iter()
            .zip(&s.forecast)
            .filter(|(h, f)| h.is_some() && f.is_some())
            .count();
        assert_eq!(overlap, 1);
    }

    #[test]
    fn target_marker_lands_on_matching_date_only() {
        let s = CombinedSeries::build(
            &hist(&[("2026-10-01", 1400.0)]),
            &fcst(&[("2026-10-15", 1450.0), ("2026-11-01", 1500.0)]),
            Some(("2026-11-01", 1500.0)),
        );
        assert_eq!(s.target, vec![None, None, Some(1500.0)]);

        let missing = CombinedSeries::build(
            &hist(&[("2026-10-01", 1400.0)]),
            &fcst(&[("2026-10-15", 1450.0)]),
            Some(("2027-01-01", 1.0)),
        );
        assert!(missing.target.iter().all(Option::is_none));
    }

    #[test]
    fn no_history_means_plain_forecast_line() {
        let s = CombinedSeries::build(&[], &fcst(&[("d1", 5.0), ("d2", 6.0)]), None);
        assert_eq!(s.forecast, vec![Some(5.0), Some(6.0)]);
        assert_eq!(s.historical, vec![None, None]);
        assert_eq!(s.transition_index, Some(0));
    }

    #[test]
    fn no_forecast_keeps_single_joined_point() {
        let s = CombinedSeries::build(&hist(&[("d1", 1.0), ("d2", 2.0)]), &[], None);
        assert_eq!(s.forecast, vec![None, Some(2.0)]);
        assert_eq!(s.transition_index, None);
    }

    #[test]
    fn modes_change_style_not_data() {
        assert_eq!(ChartMode::Bar.style().chart_type, "bar");
        assert!(ChartMode::Bar.style().forecast_dash.is_empty());
        for mode in [ChartMode::Area, ChartMode::Line, ChartMode::Smooth] {
            assert_eq!(mode.style().chart_type, "line");
            assert_eq!(mode.style().forecast_dash, vec![8, 4]);
        }
        for mode in ChartMode::ALL {
            assert_eq!(mode.as_str().parse::<ChartMode>(), Ok(mode));
        }
        assert!("pie".parse::<ChartMode>().is_err());
    }
}
