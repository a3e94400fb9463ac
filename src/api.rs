//! Remote data fetcher.
//!
//! Every backend call is a JSON `POST` whose response carries a `success`
//! flag. Transport failures and `{success: false}` answers both come back
//! as [`FetchError`]; nothing escapes this module as a panic or a JS
//! exception.

use crate::models::*;
use crate::FetchError;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub type FetchResult<T> = Result<T, FetchError>;

/// A typed backend endpoint.
pub trait Endpoint {
    const PATH: &'static str;
    /// Message used when the backend fails without saying why.
    const FALLBACK_MESSAGE: &'static str;
    type Request: Serialize;
    type Response: DeserializeOwned;
}

macro_rules! endpoint {
    ($name:ident, $path:literal, $req:ty, $resp:ty, $fallback:expr) => {
        pub struct $name;

        impl Endpoint for $name {
            const PATH: &'static str = $path;
            const FALLBACK_MESSAGE: &'static str = $fallback;
            type Request = $req;
            type Response = $resp;
        }
    };
}

endpoint!(
    PredictSpecificDate,
    "/api/forecasting/predict-specific-date",
    ForecastRequest,
    ForecastResponse,
    crate::defaults::FORECAST_FAILED
);
endpoint!(
    RecentDatesData,
    "/api/market/recent-dates-data",
    MarketRequest,
    RecentDatesResponse,
    crate::defaults::MARKET_EMPTY
);
endpoint!(
    LastTenDays,
    "/api/market/last-10-days",
    MarketRequest,
    RecordsResponse,
    crate::defaults::MARKET_EMPTY
);
endpoint!(
    AllDistricts,
    "/api/market/all-districts",
    CommodityRequest,
    RecordsResponse,
    crate::defaults::MARKET_EMPTY
);
endpoint!(
    CurrentWeatherEndpoint,
    "/api/weather/current",
    WeatherRequest,
    CurrentWeatherResponse,
    crate::defaults::LOCATION_NOT_FOUND
);
endpoint!(
    WeatherForecastEndpoint,
    "/api/weather/forecast",
    WeatherRequest,
    WeatherForecastResponse,
    crate::defaults::LOCATION_NOT_FOUND
);
endpoint!(
    VideoSearch,
    "/api/videos/search",
    VideoSearchRequest,
    VideoSearchResponse,
    crate::defaults::VIDEOS_FAILED
);

/// Turn a parsed response body into the payload or an application failure.
///
/// A body without a `success` key counts as a failure, as does any
/// non-object body.
pub fn interpret_envelope<T: DeserializeOwned>(body: Value, fallback: &str) -> FetchResult<T> {
    let success = body.get("success").and_then(Value::as_bool).unwrap_or(false);
    if !success {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback);
        return Err(FetchError::Application(message.to_string()));
    }
    serde_json::from_value(body).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Join a configured base URL and an endpoint path without doubling slashes.
pub fn endpoint_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Issue one request to `E` under `base` (empty for same origin).
pub async fn call<E: Endpoint>(base: &str, body: &E::Request) -> FetchResult<E::Response> {
    let url = endpoint_url(base, E::PATH);
    log::debug!("POST request to: {}", url);

    let response = Request::post(&url)
        .json(body)
        .map_err(|e| {
            log::error!("POST {} - failed to serialize request: {}", E::PATH, e);
            FetchError::Decode(e.to_string())
        })?
        .send()
        .await
        .map_err(|e| {
            log::error!("POST {} - request failed: {}", E::PATH, e);
            FetchError::Network(e.to_string())
        })?;

    let status = response.status();
    let text = response.text().await.map_err(|e| {
        log::error!("POST {} - could not read body: {}", E::PATH, e);
        FetchError::Network(e.to_string())
    })?;

    match classify_response(status, response.ok(), &text, E::FALLBACK_MESSAGE) {
        Ok(payload) => {
            log::info!("POST {} - Success", E::PATH);
            Ok(payload)
        }
        Err(err) => {
            log::error!("POST {} - {} (status {})", E::PATH, err, status);
            Err(err)
        }
    }
}

/// Turn a raw response into a payload or a [`FetchError`].
///
/// A JSON body is always read as an envelope, whatever the status. A body
/// that is not JSON is an [`FetchError::Http`] on a non-2xx status and a
/// [`FetchError::Decode`] otherwise.
pub fn classify_response<T: DeserializeOwned>(
    status: u16,
    ok: bool,
    text: &str,
    fallback: &str,
) -> FetchResult<T> {
    let body: Value = match serde_json::from_str(text) {
        Ok(body) => body,
        Err(_) if !ok => return Err(FetchError::Http(status)),
        Err(e) => return Err(FetchError::Decode(e.to_string())),
    };
    interpret_envelope(body, fallback)
}
