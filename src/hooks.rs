use crate::components::ToastContext;
use crate::config::AppSettings;
use crate::utils::DomListener;
use cropwise::selector::FilterableSelector;
use cropwise::shortcuts::Shortcut;
use cropwise::toast::Connectivity;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Element, KeyboardEvent, Node};
use yew::prelude::*;

pub type SelectorHandle = UseReducerHandle<FilterableSelector>;

/// State for one combo box over a fixed option list.
#[hook]
pub fn use_selector(options: Rc<[String]>) -> SelectorHandle {
    use_reducer(move || FilterableSelector::new(options))
}

/// Install page keyboard shortcuts on `document` while the calling
/// component is mounted. The latest `handler` is always the one invoked;
/// it returns whether the page acted on the shortcut.
#[hook]
pub fn use_shortcuts(handler: Callback<Shortcut, bool>) {
    let latest = use_mut_ref(|| handler.clone());
    *latest.borrow_mut() = handler;

    use_effect_with((), move |_| {
        let listener = DomListener::document("keydown", move |event| {
            let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let ctrl = key_event.ctrl_key() || key_event.meta_key();
            let on_button = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .is_some_and(|el| Shortcut::enter_handled_by(&el.tag_name()));
            let handled = key_event.default_prevented() || on_button;
            if let Some(shortcut) = Shortcut::from_key(&key_event.key(), ctrl, handled) {
                let consumed = latest.borrow().emit(shortcut);
                log::debug!("Shortcut {:?} (consumed: {})", shortcut, consumed);
                if shortcut.suppresses_default(consumed) {
                    key_event.prevent_default();
                }
            }
        });
        move || drop(listener)
    });
}

/// Call `on_outside` for every document click landing outside `node`.
#[hook]
pub fn use_outside_click(node: NodeRef, on_outside: Callback<()>) {
    use_effect_with(node, move |node| {
        let node = node.clone();
        let listener = DomListener::document("click", move |event| {
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            let inside = match (node.get(), target) {
                (Some(root), Some(target)) => root.contains(Some(&target)),
                _ => false,
            };
            if !inside {
                on_outside.emit(());
            }
        });
        move || drop(listener)
    });
}

/// Toast whenever the browser goes offline or comes back online.
#[hook]
pub fn use_network_toasts() {
    let toast = use_toast();
    use_effect_with((), move |_| {
        let listeners = ["online", "offline"].map(|event| {
            let toast = toast.clone();
            DomListener::window(event, move |e| {
                let Some(change) = Connectivity::from_event(&e.type_()) else {
                    return;
                };
                log::info!("Network status: {:?}", change);
                let (message, kind) = change.notice();
                toast.show(message, kind);
            })
        });
        move || drop(listeners)
    });
}

/// The page's toast host. Outside a provider, toasts are only logged.
#[hook]
pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().unwrap_or_else(ToastContext::detached)
}

/// Settings resolved at startup, provided by the app root.
#[hook]
pub fn use_settings() -> Rc<AppSettings> {
    use_context::<Rc<AppSettings>>().unwrap_or_default()
}
