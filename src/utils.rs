use crate::config::OPTIONS_ELEMENT_ID;
use cropwise::models::OptionsDataset;
use once_cell::sync::Lazy;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

static DEFAULT_OPTIONS: Lazy<OptionsDataset> =
    Lazy::new(|| serde_json::from_str(include_str!("options.json")).unwrap_or_default());

/// A DOM event listener that is removed when dropped.
pub struct DomListener {
    target: web_sys::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl DomListener {
    pub fn document<F>(event: &'static str, handler: F) -> Self
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        Self::attach(gloo_utils::document().into(), event, handler)
    }

    pub fn window<F>(event: &'static str, handler: F) -> Self
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        Self::attach(gloo_utils::window().into(), event, handler)
    }

    fn attach<F>(target: web_sys::EventTarget, event: &'static str, handler: F) -> Self
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(handler));
        if let Err(e) =
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            log::error!("Could not listen for {}: {:?}", event, e);
        }
        Self {
            target,
            event,
            closure,
        }
    }
}

impl Drop for DomListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Option lists embedded by the backend, or the bundled defaults.
pub fn load_options() -> OptionsDataset {
    let embedded = gloo_utils::document()
        .get_element_by_id(OPTIONS_ELEMENT_ID)
        .and_then(|el| el.text_content());
    match embedded {
        Some(text) => match serde_json::from_str::<OptionsDataset>(&text) {
            Ok(options) => {
                log::info!(
                    "Loaded {} commodities, {} districts, {} crops from page",
                    options.commodities.len(),
                    options.districts.len(),
                    options.crops.len()
                );
                options
            }
            Err(e) => {
                log::warn!("Malformed #{} data ({}), using defaults", OPTIONS_ELEMENT_ID, e);
                DEFAULT_OPTIONS.clone()
            }
        },
        None => {
            log::warn!("No #{} element, using bundled option lists", OPTIONS_ELEMENT_ID);
            DEFAULT_OPTIONS.clone()
        }
    }
}

/// Offer `contents` to the user as a downloaded file.
pub fn download_text(file_name: &str, contents: &str, mime: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let props = BlobPropertyBag::new();
    props.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &props)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = gloo_utils::document();
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    let body = gloo_utils::body();
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    Url::revoke_object_url(&url)?;
    Ok(())
}
