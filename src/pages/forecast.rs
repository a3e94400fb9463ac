use super::{offer_csv, render_state, PageProps, RequestState};
use crate::chart::{self, PriceChart};
use crate::components::ComboBox;
use crate::config::*;
use crate::hooks::{use_selector, use_settings, use_shortcuts, use_toast};
use crate::views::render_forecast;
use cropwise::api::{self, PredictSpecificDate};
use cropwise::export::forecast_csv;
use cropwise::models::{ForecastRequest, ForecastResponse};
use cropwise::selector::SelectorAction;
use cropwise::series::ChartMode;
use cropwise::shortcuts::Shortcut;
use cropwise::view_model::ForecastView;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[function_component(ForecastPage)]
pub fn forecast_page(props: &PageProps) -> Html {
    let settings = use_settings();
    let toast = use_toast();
    let commodity = use_selector(props.options.commodities.clone());
    let district = use_selector(props.options.districts.clone());
    let target_date = use_state(|| DEFAULT_TARGET_DATE.to_string());
    let state = use_state(|| RequestState::<Rc<ForecastView>>::Idle);
    let mode = use_state(ChartMode::default);

    // Page-owned mutable slots: the payload kept for export, and the live chart.
    let last_payload = use_mut_ref(|| None::<ForecastResponse>);
    let chart_handle = use_mut_ref(|| None::<PriceChart>);

    // Any change of result or mode discards the chart and rebuilds it.
    {
        let chart_handle = chart_handle.clone();
        use_effect_with((state.ready(), *mode), move |(view, mode)| {
            chart_handle.borrow_mut().take();
            if let Some(view) = view {
                match chart::draw(
                    CHART_CANVAS_ID,
                    &view.series,
                    *mode,
                    &view.commodity,
                    &view.district,
                ) {
                    Ok(chart) => *chart_handle.borrow_mut() = Some(chart),
                    Err(e) => log::error!("{}", e),
                }
            }
        });
    }

    let generate = {
        let settings = settings.clone();
        let toast = toast.clone();
        let commodity = commodity.clone();
        let district = district.clone();
        let target_date = target_date.clone();
        let state = state.clone();
        let last_payload = last_payload.clone();
        Callback::from(move |_: ()| {
            let c = commodity.value().trim().to_string();
            let d = district.value().trim().to_string();
            if c.is_empty() || d.is_empty() {
                toast.error(SELECT_BOTH_FORECAST);
                return;
            }
            let request = ForecastRequest {
                commodity: c.clone(),
                district: d.clone(),
                target_date: (*target_date).clone(),
            };
            state.set(RequestState::Loading);

            let settings = settings.clone();
            let toast = toast.clone();
            let state = state.clone();
            let last_payload = last_payload.clone();
            spawn_local(async move {
                match api::call::<PredictSpecificDate>(&settings.api_base, &request).await {
                    Ok(resp) => {
                        let view = ForecastView::build(&resp, &c, &d, &request.target_date);
                        log::info!(
                            "Forecast for {} in {}: {} ({} forecast points)",
                            c,
                            d,
                            view.prediction.price,
                            resp.forecast.len()
                        );
                        *last_payload.borrow_mut() = Some(resp);
                        state.set(RequestState::Ready(Rc::new(view)));
                        toast.success("✅ Forecast generated successfully!");
                    }
                    Err(e) => state.set(RequestState::fail("Forecast", &e, &toast)),
                }
            });
        })
    };

    let export = {
        let toast = toast.clone();
        let last_payload = last_payload.clone();
        Callback::from(move |_: ()| {
            let csv = match last_payload.borrow().as_ref() {
                Some(resp) if !resp.forecast.is_empty() => match forecast_csv(&resp.forecast) {
                    Ok(csv) => Some(csv),
                    Err(e) => {
                        log::error!("Could not build forecast CSV: {}", e);
                        None
                    }
                },
                _ => None,
            };
            offer_csv(
                FORECAST_EXPORT_PREFIX,
                csv,
                "📊 Forecast data exported successfully!",
                &toast,
            );
        })
    };

    let clear = {
        let toast = toast.clone();
        let commodity = commodity.clone();
        let district = district.clone();
        let target_date = target_date.clone();
        let state = state.clone();
        Callback::from(move |_: MouseEvent| {
            commodity.dispatch(SelectorAction::Clear);
            district.dispatch(SelectorAction::Clear);
            target_date.set(DEFAULT_TARGET_DATE.to_string());
            state.set(RequestState::Idle);
            last_payload.borrow_mut().take();
            chart_handle.borrow_mut().take();
            toast.info("🔄 Form cleared");
        })
    };

    {
        let generate = generate.clone();
        let export = export.clone();
        use_shortcuts(Callback::from(move |shortcut| {
            match shortcut {
                Shortcut::Submit | Shortcut::Generate => generate.emit(()),
                Shortcut::Export => export.emit(()),
            }
            true
        }));
    }

    let on_date = {
        let target_date = target_date.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            target_date.set(input.value());
        })
    };

    let on_mode_change = {
        let mode = mode.clone();
        let toast = toast.clone();
        Callback::from(move |m: ChartMode| {
            mode.set(m);
            toast.info(format!("📊 Chart changed to {} view", m));
        })
    };

    let results = render_state(
        &state,
        "Unable to Generate Forecast",
        Some("कृपया दुसरे पीक किंवा जिल्हा निवडा. Please try a different crop or district combination."),
        |view| render_forecast(view, *mode, on_mode_change.clone()),
    );

    html! {
        <section class="page forecast-page">
            <div class="form-card">
                <h2>{ "🌾 Price Forecast" }</h2>
                <div class="form-row">
                    <ComboBox
                        selector={commodity}
                        input_id="commodity"
                        label="Crop / पीक"
                        placeholder="Type to search crops..."
                    />
                    <ComboBox
                        selector={district}
                        input_id="district"
                        label="District / जिल्हा"
                        placeholder="Type to search districts..."
                    />
                    <div class="form-group">
                        <label for="target-date">{ "Target Date" }</label>
                        <input
                            id="target-date"
                            type="date"
                            value={(*target_date).clone()}
                            oninput={on_date}
                        />
                    </div>
                </div>
                <div class="form-actions">
                    <button class="btn-primary" onclick={generate.reform(|_: MouseEvent| ())}>
                        { "🔮 Generate Forecast" }
                    </button>
                    <button class="btn-secondary" onclick={export.reform(|_: MouseEvent| ())}>
                        { "📥 Export CSV" }
                    </button>
                    <button class="btn-secondary" onclick={clear}>{ "🔄 Clear" }</button>
                </div>
            </div>
            <div class="results-area">{ results }</div>
        </section>
    }
}
