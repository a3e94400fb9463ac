use super::{render_state, RequestState};
use crate::config::*;
use crate::hooks::{use_settings, use_shortcuts, use_toast};
use crate::views::{render_current_weather, render_weather_forecast};
use cropwise::api::{self, CurrentWeatherEndpoint, WeatherForecastEndpoint};
use cropwise::models::{LocationKind, WeatherRequest};
use cropwise::shortcuts::Shortcut;
use cropwise::view_model::{CurrentConditions, DayCard};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[function_component(WeatherPage)]
pub fn weather_page() -> Html {
    let settings = use_settings();
    let toast = use_toast();
    let kind = use_state(LocationKind::default);
    let location = use_state(String::new);
    let state = use_state(|| RequestState::<Rc<CurrentConditions>>::Idle);
    let days = use_state(|| None::<Rc<Vec<DayCard>>>);

    let search = {
        let settings = settings.clone();
        let toast = toast.clone();
        let kind = kind.clone();
        let location = location.clone();
        let state = state.clone();
        let days = days.clone();
        Callback::from(move |_: ()| {
            let place = location.trim().to_string();
            if place.is_empty() {
                toast.error(ENTER_LOCATION);
                return;
            }
            let request = WeatherRequest {
                kind: *kind,
                location: place,
            };
            state.set(RequestState::Loading);
            days.set(None);

            let settings = settings.clone();
            let toast = toast.clone();
            let state = state.clone();
            let days = days.clone();
            spawn_local(async move {
                let current = match api::call::<CurrentWeatherEndpoint>(&settings.api_base, &request).await {
                    Ok(resp) => CurrentConditions::from(&resp.data),
                    Err(e) => {
                        log::error!("Current weather for {} failed: {}", request.location, e);
                        toast.error("❌ Location not found");
                        state.set(RequestState::Failed(e.user_message()));
                        return;
                    }
                };

                // The forecast is optional; current conditions stand on their own.
                match api::call::<WeatherForecastEndpoint>(&settings.api_base, &request).await {
                    Ok(resp) => days.set(Some(Rc::new(
                        resp.forecast
                            .iter()
                            .take(WEATHER_FORECAST_DAYS)
                            .map(DayCard::from)
                            .collect(),
                    ))),
                    Err(e) => log::warn!("Weather forecast for {} failed: {}", request.location, e),
                }

                log::info!("Weather loaded for {} ({})", current.location, request.kind.label());
                state.set(RequestState::Ready(Rc::new(current)));
                toast.success("✅ Weather data loaded!");
            });
        })
    };

    {
        let search = search.clone();
        use_shortcuts(Callback::from(move |shortcut| {
            let submit = shortcut == Shortcut::Submit;
            if submit {
                search.emit(());
            }
            submit
        }));
    }

    let on_location = {
        let location = location.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            location.set(input.value());
        })
    };

    let kind_choice = |k: LocationKind| {
        let onchange = {
            let kind = kind.clone();
            Callback::from(move |_: Event| kind.set(k))
        };
        html! {
            <label class="radio-label">
                <input type="radio" name="location-kind" checked={*kind == k} {onchange} />
                { k.label() }
            </label>
        }
    };

    let placeholder = match *kind {
        LocationKind::City => "Enter city name (e.g. Pune)",
        LocationKind::Pincode => "Enter 6-digit pincode",
    };

    let results = render_state(&state, "Location Not Found", None, |current| {
        html! {
            <div class="weather-results">
                { render_current_weather(current) }
                if let Some(days) = &*days {
                    { render_weather_forecast(days) }
                }
            </div>
        }
    });

    html! {
        <section class="page weather-page">
            <div class="form-card">
                <h2>{ "🌤️ Weather" }</h2>
                <div class="radio-group">
                    { kind_choice(LocationKind::City) }
                    { kind_choice(LocationKind::Pincode) }
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="location-input">{ "Location" }</label>
                        <input
                            id="location-input"
                            type="text"
                            placeholder={placeholder}
                            value={(*location).clone()}
                            oninput={on_location}
                        />
                    </div>
                </div>
                <div class="form-actions">
                    <button class="btn-primary" onclick={search.reform(|_: MouseEvent| ())}>
                        { "🔍 Get Weather" }
                    </button>
                </div>
            </div>
            <div class="results-area">{ results }</div>
        </section>
    }
}
