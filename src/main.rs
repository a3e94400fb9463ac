//! CropWise browser front end: forecast, market price, weather and video
//! pages over the CropWise JSON API.

use std::rc::Rc;
use yew::prelude::*;

mod chart;
mod components;
mod config;
mod hooks;
mod pages;
mod utils;
mod views;

use components::{NetworkStatus, ToastProvider};
use config::AppSettings;
use pages::{ForecastPage, MarketPage, PageOptions, VideosPage, WeatherPage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Forecast,
    Market,
    Weather,
    Videos,
}

impl Page {
    const ALL: [Page; 4] = [Page::Forecast, Page::Market, Page::Weather, Page::Videos];

    fn label(&self) -> &'static str {
        match self {
            Page::Forecast => "🔮 Forecast",
            Page::Market => "💰 Market",
            Page::Weather => "🌤️ Weather",
            Page::Videos => "🎥 Videos",
        }
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    settings: Rc<AppSettings>,
}

/// Page shell. Only the active page is mounted, so only its shortcuts are live.
#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let page = use_state(|| Page::Forecast);
    let options = use_memo((), |_| PageOptions::from(utils::load_options()));

    let nav = Page::ALL.iter().map(|&p| {
        let onclick = {
            let page = page.clone();
            Callback::from(move |_: MouseEvent| {
                log::debug!("Navigating to {:?}", p);
                page.set(p);
            })
        };
        html! {
            <button class={classes!("nav-link", (*page == p).then_some("active"))} {onclick}>
                { p.label() }
            </button>
        }
    });

    let body = match *page {
        Page::Forecast => html! { <ForecastPage options={options.clone()} /> },
        Page::Market => html! { <MarketPage options={options.clone()} /> },
        Page::Weather => html! { <WeatherPage /> },
        Page::Videos => html! { <VideosPage options={options.clone()} /> },
    };

    html! {
        <ContextProvider<Rc<AppSettings>> context={props.settings.clone()}>
            <ToastProvider>
                <NetworkStatus />
                <header class="app-header">
                    <h1>{ "🌾 CropWise" }</h1>
                    <nav class="app-nav">{ for nav }</nav>
                </header>
                <main class="container">{ body }</main>
            </ToastProvider>
        </ContextProvider<Rc<AppSettings>>>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    let settings = AppSettings::from_environment();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));
    log::info!(
        "CropWise starting (api base: {:?}, debug: {})",
        settings.api_base,
        settings.debug_mode
    );
    yew::Renderer::<App>::with_props(AppProps {
        settings: Rc::new(settings),
    })
    .render();
}
