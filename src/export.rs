//! CSV export of the last successful forecast and market payloads.

use crate::models::{ForecastPoint, MarketRecord, PriceValue};
use chrono::NaiveDate;
use std::io;

pub const FORECAST_HEADERS: [&str; 2] = ["Date", "Predicted Price"];
pub const MARKET_HEADERS: [&str; 7] = [
    "Date",
    "Market",
    "Commodity",
    "District",
    "Min Price",
    "Modal Price",
    "Max Price",
];

/// `forecast_2026-10-17.csv` style file name.
pub fn export_file_name(prefix: &str, today: NaiveDate) -> String {
    format!("{}{}.csv", prefix, today.format("%Y-%m-%d"))
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, csv::Error> {
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// `Date,Predicted Price` rows with prices to two decimals.
pub fn forecast_csv(points: &[ForecastPoint]) -> Result<String, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(FORECAST_HEADERS)?;
    for p in points {
        wtr.write_record([p.date.as_str(), &format!("{:.2}", p.predicted_price)])?;
    }
    finish(wtr)
}

fn price_cell(value: &Option<PriceValue>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

/// One row per record. Missing commodity or district columns take the
/// values the user searched for.
pub fn market_csv<'a>(
    records: impl IntoIterator<Item = &'a MarketRecord>,
    commodity: &str,
    district: &str,
) -> Result<String, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(MARKET_HEADERS)?;
    for r in records {
        wtr.write_record([
            r.arrival_date.as_deref().unwrap_or_default(),
            r.market.as_deref().unwrap_or_default(),
            r.commodity.as_deref().unwrap_or(commodity),
            r.district.as_deref().unwrap_or(district),
            &price_cell(&r.min_price),
            &price_cell(&r.modal_price),
            &price_cell(&r.max_price),
        ])?;
    }
    finish(wtr)
}
