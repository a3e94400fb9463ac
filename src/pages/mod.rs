//! One component per top-level page. Each page owns its selectors, its
//! last successful payload and its request state.

mod forecast;
mod market;
mod videos;
mod weather;

pub use forecast::ForecastPage;
pub use market::MarketPage;
pub use videos::VideosPage;
pub use weather::WeatherPage;

pub use cropwise::request::RequestState;

use crate::components::{ErrorPanel, Loading, ToastContext};
use crate::utils::download_text;
use cropwise::export::export_file_name;
use cropwise::models::OptionsDataset;
use std::rc::Rc;
use yew::prelude::*;

/// Option lists shared by every page's selectors.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOptions {
    pub commodities: Rc<[String]>,
    pub districts: Rc<[String]>,
    pub crops: Rc<[String]>,
}

impl From<OptionsDataset> for PageOptions {
    fn from(o: OptionsDataset) -> Self {
        Self {
            commodities: o.commodities.into(),
            districts: o.districts.into(),
            crops: o.crops.into(),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct PageProps {
    pub options: Rc<PageOptions>,
}

/// Loading spinner, error panel, or the rendered result.
pub fn render_state<T>(
    state: &RequestState<T>,
    error_title: &'static str,
    error_hint: Option<&'static str>,
    render: impl FnOnce(&T) -> Html,
) -> Html {
    match state {
        RequestState::Idle => html! {},
        RequestState::Loading => html! { <Loading /> },
        RequestState::Failed(message) => html! {
            <ErrorPanel
                title={error_title}
                message={message.clone()}
                hint={error_hint.map(AttrValue::Static)}
            />
        },
        RequestState::Ready(value) => render(value),
    }
}

/// Download `csv` under a dated file name, reporting the outcome as a toast.
pub fn offer_csv(prefix: &str, csv: Option<String>, success: &str, toast: &ToastContext) {
    let Some(csv) = csv else {
        toast.warning("No data to export");
        return;
    };
    let file_name = export_file_name(prefix, cropwise::today());
    match download_text(&file_name, &csv, "text/csv;charset=utf-8") {
        Ok(()) => {
            log::info!("Exported {} ({} bytes)", file_name, csv.len());
            toast.success(success);
        }
        Err(e) => {
            log::error!("Export of {} failed: {:?}", file_name, e);
            toast.error("❌ Export failed");
        }
    }
}
