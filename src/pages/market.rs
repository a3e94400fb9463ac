use super::{offer_csv, render_state, PageProps, RequestState};
use crate::components::ComboBox;
use crate::config::*;
use crate::hooks::{use_selector, use_settings, use_shortcuts, use_toast};
use crate::views::{render_market, render_records};
use cropwise::api::{self, AllDistricts, LastTenDays, RecentDatesData};
use cropwise::defaults::MARKET_EMPTY;
use cropwise::export::market_csv;
use cropwise::models::{CommodityRequest, DateData, MarketRecord, MarketRequest};
use cropwise::selector::SelectorAction;
use cropwise::shortcuts::Shortcut;
use cropwise::view_model::{MarketView, RecordColumns, RecordRow};
use cropwise::FetchError;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// The last successful search, kept for export.
struct MarketPayload {
    dates: Vec<DateData>,
    commodity: String,
    district: String,
}

fn rows(records: &[MarketRecord]) -> Option<Rc<Vec<RecordRow>>> {
    (!records.is_empty()).then(|| Rc::new(records.iter().map(RecordRow::from).collect()))
}

#[function_component(MarketPage)]
pub fn market_page(props: &PageProps) -> Html {
    let settings = use_settings();
    let toast = use_toast();
    let commodity = use_selector(props.options.commodities.clone());
    let district = use_selector(props.options.districts.clone());
    let state = use_state(|| RequestState::<Rc<MarketView>>::Idle);
    let active_tab = use_state(|| 0usize);
    let last_ten_days = use_state(|| None::<Rc<Vec<RecordRow>>>);
    let all_districts = use_state(|| None::<Rc<Vec<RecordRow>>>);
    let last_payload = use_mut_ref(|| None::<MarketPayload>);

    let search = {
        let settings = settings.clone();
        let toast = toast.clone();
        let commodity = commodity.clone();
        let district = district.clone();
        let state = state.clone();
        let active_tab = active_tab.clone();
        let last_ten_days = last_ten_days.clone();
        let all_districts = all_districts.clone();
        let last_payload = last_payload.clone();
        Callback::from(move |_: ()| {
            let c = commodity.value().trim().to_string();
            let d = district.value().trim().to_string();
            if c.is_empty() || d.is_empty() {
                toast.error(SELECT_BOTH_MARKET);
                return;
            }
            state.set(RequestState::Loading);
            active_tab.set(0);
            last_ten_days.set(None);
            all_districts.set(None);

            let settings = settings.clone();
            let toast = toast.clone();
            let state = state.clone();
            let last_ten_days = last_ten_days.clone();
            let all_districts = all_districts.clone();
            let last_payload = last_payload.clone();
            spawn_local(async move {
                let request = MarketRequest {
                    commodity: c.clone(),
                    district: d.clone(),
                };
                let resp = match api::call::<RecentDatesData>(&settings.api_base, &request).await {
                    Ok(resp) => resp,
                    Err(e) => return state.set(RequestState::fail("Market prices", &e, &toast)),
                };
                let Some(view) = MarketView::build(&resp.dates_data, &c, &d) else {
                    let e = FetchError::Application(MARKET_EMPTY.to_string());
                    return state.set(RequestState::fail("Market prices", &e, &toast));
                };
                log::info!("Market prices for {} in {}: {} dates", c, d, resp.dates_data.len());
                *last_payload.borrow_mut() = Some(MarketPayload {
                    dates: resp.dates_data,
                    commodity: c.clone(),
                    district: d.clone(),
                });
                state.set(RequestState::Ready(Rc::new(view)));
                toast.success("✅ Market prices loaded successfully!");

                // Supplementary tables; each is shown as soon as it arrives.
                let district_request = CommodityRequest { commodity: c };
                let recent = async {
                    match api::call::<LastTenDays>(&settings.api_base, &request).await {
                        Ok(r) => last_ten_days.set(rows(&r.records)),
                        Err(e) => log::warn!("Last 10 days fetch failed: {}", e),
                    }
                };
                let districts = async {
                    match api::call::<AllDistricts>(&settings.api_base, &district_request).await {
                        Ok(r) => all_districts.set(rows(&r.records)),
                        Err(e) => log::warn!("All districts fetch failed: {}", e),
                    }
                };
                futures::join!(recent, districts);
            });
        })
    };

    let export = {
        let toast = toast.clone();
        let last_payload = last_payload.clone();
        Callback::from(move |_: ()| {
            let csv = match last_payload.borrow().as_ref() {
                Some(p) if p.dates.iter().any(|d| !d.records.is_empty()) => {
                    let records = p.dates.iter().flat_map(|d| d.records.iter());
                    match market_csv(records, &p.commodity, &p.district) {
                        Ok(csv) => Some(csv),
                        Err(e) => {
                            log::error!("Could not build market CSV: {}", e);
                            None
                        }
                    }
                }
                _ => None,
            };
            offer_csv(MARKET_EXPORT_PREFIX, csv, "✅ Data exported successfully!", &toast);
        })
    };

    let clear = {
        let toast = toast.clone();
        let commodity = commodity.clone();
        let district = district.clone();
        let state = state.clone();
        let last_ten_days = last_ten_days.clone();
        let all_districts = all_districts.clone();
        Callback::from(move |_: MouseEvent| {
            commodity.dispatch(SelectorAction::Clear);
            district.dispatch(SelectorAction::Clear);
            state.set(RequestState::Idle);
            last_ten_days.set(None);
            all_districts.set(None);
            last_payload.borrow_mut().take();
            toast.info("🔄 Form cleared");
        })
    };

    {
        let search = search.clone();
        let export = export.clone();
        use_shortcuts(Callback::from(move |shortcut| match shortcut {
            Shortcut::Submit => {
                search.emit(());
                true
            }
            Shortcut::Export => {
                export.emit(());
                true
            }
            Shortcut::Generate => false,
        }));
    }

    let on_tab = {
        let active_tab = active_tab.clone();
        Callback::from(move |i: usize| active_tab.set(i))
    };

    let results = render_state(&state, "Unable to Load Prices", None, |view| {
        html! {
            <>
                { render_market(view, *active_tab, on_tab.clone()) }
                if let Some(rows) = &*last_ten_days {
                    <div class="extra-table">
                        <h3>{ "📅 Last 10 Days" }</h3>
                        { render_records(rows, RecordColumns::BY_DATE) }
                    </div>
                }
                if let Some(rows) = &*all_districts {
                    <div class="extra-table">
                        <h3>{ format!("🗺️ {} Across Districts", view.commodity) }</h3>
                        { render_records(rows, RecordColumns::ACROSS_DISTRICTS) }
                    </div>
                }
            </>
        }
    });

    html! {
        <section class="page market-page">
            <div class="form-card">
                <h2>{ "💰 Market Prices" }</h2>
                <div class="form-row">
                    <ComboBox
                        selector={commodity}
                        input_id="market-commodity"
                        label="Crop / पीक"
                        placeholder="Type to search crops..."
                    />
                    <ComboBox
                        selector={district}
                        input_id="market-district"
                        label="District / जिल्हा"
                        placeholder="Type to search districts..."
                    />
                </div>
                <div class="form-actions">
                    <button class="btn-primary" onclick={search.reform(|_: MouseEvent| ())}>
                        { "🔍 Get Prices" }
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
