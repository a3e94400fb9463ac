//! Derived price statistics shown next to fetched data.

use std::fmt;

/// Percent change inside which a forecast counts as stable.
pub const TREND_DEADBAND_PCT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    /// Classify a percent change with a ±[`TREND_DEADBAND_PCT`] deadband.
    pub fn classify(change_pct: f64) -> Self {
        if change_pct > TREND_DEADBAND_PCT {
            Trend::Increasing
        } else if change_pct < -TREND_DEADBAND_PCT {
            Trend::Decreasing
        } else {
            Trend::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increasing => "Increasing",
            Trend::Decreasing => "Decreasing",
            Trend::Stable => "Stable",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arrow for a signed change: ↑, ↓ or →.
pub fn change_arrow(change_pct: f64) -> &'static str {
    if change_pct > 0.0 {
        "↑"
    } else if change_pct < 0.0 {
        "↓"
    } else {
        "→"
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceStats {
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

impl PriceStats {
    /// `None` for an empty slice.
    pub fn from_prices(prices: &[f64]) -> Option<Self> {
        if prices.is_empty() {
            return None;
        }
        let sum: f64 = prices.iter().sum();
        let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
        let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            average: sum / prices.len() as f64,
            min,
            max,
        })
    }
}

/// Summary of a forecast against the last recorded price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastSummary {
    pub current: f64,
    pub stats: PriceStats,
    pub change_pct: f64,
    pub trend: Trend,
}

impl ForecastSummary {
    /// A missing or zero current price falls back to the forecast average.
    pub fn compute(forecast_prices: &[f64], current_price: Option<f64>) -> Option<Self> {
        let stats = PriceStats::from_prices(forecast_prices)?;
        let current = current_price
            .filter(|p| *p != 0.0 && p.is_finite())
            .unwrap_or(stats.average);
        let change_pct = if current == 0.0 {
            0.0
        } else {
            (stats.average - current) / current * 100.0
        };
        Some(Self {
            current,
            stats,
            change_pct,
            trend: Trend::classify(change_pct),
        })
    }

    pub fn is_rising(&self) -> bool {
        self.change_pct >= 0.0
    }
}

/// Movement of one market date against the next-older date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayMove {
    Up,
    Down,
    Stable,
    /// Oldest date: nothing to compare with.
    Baseline,
}

impl DayMove {
    pub fn compare(current: f64, previous: Option<f64>) -> Self {
        match previous {
            None => DayMove::Baseline,
            Some(prev) if current > prev => DayMove::Up,
            Some(prev) if current < prev => DayMove::Down,
            Some(_) => DayMove::Stable,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayMove::Up => "📈 Up",
            DayMove::Down => "📉 Down",
            DayMove::Stable => "➡️ Stable",
            DayMove::Baseline => "➡️ —",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            DayMove::Up => "move-up",
            DayMove::Down => "move-down",
            DayMove::Stable | DayMove::Baseline => "move-flat",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadband_boundaries() {
        assert_eq!(Trend::classify(2.0), Trend::Stable);
        assert_eq!(Trend::classify(-2.0), Trend::Stable);
        assert_eq!(Trend::classify(2.01), Trend::Increasing);
        assert_eq!(Trend::classify(-2.01), Trend::Decreasing);
        assert_eq!(Trend::classify(0.0), Trend::Stable);
    }

    #[test]
    fn summary_of_rising_forecast() {
        // average 1500 vs current 1400 → +7.14%
        let s = ForecastSummary::compute(&[1450.0, 1500.0, 1550.0], Some(1400.0)).unwrap();
        assert_eq!(s.stats.average, 1500.0);
        assert_eq!(s.stats.min, 1450.0);
        assert_eq!(s.stats.max, 1550.0);
        assert!((s.change_pct - 7.142857).abs() < 1e-4);
        assert_eq!(s.trend, Trend::Increasing);
        assert!(s.is_rising());
    }

    #[test]
    fn summary_within_two_percent_is_stable() {
        let s = ForecastSummary::compute(&[1420.0], Some(1400.0)).unwrap();
        assert_eq!(s.trend, Trend::Stable);
        let s = ForecastSummary::compute(&[1300.0], Some(1400.0)).unwrap();
        assert_eq!(s.trend, Trend::Decreasing);
        assert!(!s.is_rising());
    }

    #[test]
    fn missing_or_zero_current_price_falls_back_to_average() {
        for current in [None, Some(0.0)] {
            let s = ForecastSummary::compute(&[10.0, 20.0], current).unwrap();
            assert_eq!(s.current, 15.0);
            assert_eq!(s.change_pct, 0.0);
            assert_eq!(s.trend, Trend::Stable);
        }
    }

    #[test]
    fn empty_forecast_has_no_summary() {
        assert!(ForecastSummary::compute(&[], Some(1.0)).is_none());
    }

    #[test]
    fn arrows() {
        assert_eq!(change_arrow(0.5), "↑");
        assert_eq!(change_arrow(-0.5), "↓");
        assert_eq!(change_arrow(0.0), "→");
    }

    #[test]
    fn day_moves() {
        assert_eq!(DayMove::compare(10.0, Some(9.0)), DayMove::Up);
        assert_eq!(DayMove::compare(8.0, Some(9.0)), DayMove::Down);
        assert_eq!(DayMove::compare(9.0, Some(9.0)), DayMove::Stable);
        assert_eq!(DayMove::compare(9.0, None), DayMove::Baseline);
    }
}
