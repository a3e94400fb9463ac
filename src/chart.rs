//! Price chart bindings. The Chart.js configuration lives in
//! chart_helpers.js; Rust hands it a serialized [`ChartSpec`].

use cropwise::series::{ChartMode, ChartSpec, CombinedSeries};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/chart_helpers.js")]
extern "C" {
    #[wasm_bindgen(js_name = renderPriceChart, catch)]
    fn render_price_chart(canvas_id: &str, spec: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = destroyChart)]
    fn destroy_chart(handle: &JsValue);
}

/// Handle to a live chart. Dropping it destroys the chart.
pub struct PriceChart {
    handle: JsValue,
}

impl Drop for PriceChart {
    fn drop(&mut self) {
        destroy_chart(&self.handle);
    }
}

/// Draw `series` into the canvas with `canvas_id`.
pub fn draw(
    canvas_id: &str,
    series: &CombinedSeries,
    mode: ChartMode,
    commodity: &str,
    district: &str,
) -> Result<PriceChart, String> {
    let spec = ChartSpec::new(series, mode, commodity, district);
    // Option::None must reach JS as null, not undefined.
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let value = spec
        .serialize(&serializer)
        .map_err(|e| format!("Failed to serialize chart: {}", e))?;
    let handle = render_price_chart(canvas_id, value)
        .map_err(|e| format!("Chart rendering failed: {:?}", e))?;
    if handle.is_null() || handle.is_undefined() {
        return Err(format!("Canvas #{} not found", canvas_id));
    }
    log::debug!("{} chart created ({} points)", mode, series.len());
    Ok(PriceChart { handle })
}
