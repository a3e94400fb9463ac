//! Reusable Yew components: the combo box, the toast host, and the
//! loading/error placeholders shared by every page.

use crate::config::TOAST_DURATION_MS;
use crate::hooks::{use_network_toasts, use_outside_click, SelectorHandle};
use cropwise::request::Notify;
use cropwise::selector::{highlight_segments, Direction, SelectorAction, NO_MATCHES};
use cropwise::toast::{ToastAction, ToastKind, ToastSlot};
use gloo_timers::callback::Timeout;
use web_sys::{Element, HtmlInputElement, ScrollIntoViewOptions, ScrollLogicalPosition};
use yew::prelude::*;

// ──────────────────────────────────────────────────────────────────────────────
// Combo box

#[derive(Properties, PartialEq)]
pub struct ComboBoxProps {
    pub selector: SelectorHandle,
    pub input_id: AttrValue,
    pub label: AttrValue,
    #[prop_or_default]
    pub placeholder: AttrValue,
    /// Fired with the committed option after a click or Enter.
    #[prop_or_default]
    pub on_change: Callback<String>,
}

/// Text input with a filtered dropdown, driven by a [`SelectorHandle`].
#[function_component(ComboBox)]
pub fn combo_box(props: &ComboBoxProps) -> Html {
    let wrapper_ref = use_node_ref();
    let input_ref = use_node_ref();
    let list_ref = use_node_ref();
    let dispatcher = props.selector.dispatcher();
    let state = &*props.selector;

    {
        let input_ref = input_ref.clone();
        let list_ref = list_ref.clone();
        let dispatcher = dispatcher.clone();
        let input_id = props.input_id.clone();
        use_effect_with((), move |_| {
            if input_ref.cast::<HtmlInputElement>().is_none() || list_ref.get().is_none() {
                log::error!("Combo box #{} is missing its input or list element", input_id);
                dispatcher.dispatch(SelectorAction::Disable);
            }
        });
    }

    {
        let dispatcher = dispatcher.clone();
        use_outside_click(
            wrapper_ref.clone(),
            Callback::from(move |_| dispatcher.dispatch(SelectorAction::Close)),
        );
    }

    {
        let on_change = props.on_change.clone();
        let value = state.committed().to_string();
        use_effect_with(state.commit_count(), move |count| {
            if *count > 0 {
                on_change.emit(value);
            }
        });
    }

    {
        let list_ref = list_ref.clone();
        use_effect_with(state.highlighted(), move |highlighted| {
            if let (Some(idx), Some(list)) = (*highlighted, list_ref.cast::<Element>()) {
                if let Some(item) = list.children().item(idx as u32) {
                    let options = ScrollIntoViewOptions::new();
                    options.set_block(ScrollLogicalPosition::Nearest);
                    item.scroll_into_view_with_scroll_into_view_options(&options);
                }
            }
        });
    }

    let onfocus = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |_: FocusEvent| dispatcher.dispatch(SelectorAction::Open))
    };

    let oninput = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatcher.dispatch(SelectorAction::Input(input.value()));
        })
    };

    let onkeydown = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |e: KeyboardEvent| {
            // Ctrl+Enter belongs to the page.
            if e.ctrl_key() || e.meta_key() {
                return;
            }
            let action = match e.key().as_str() {
                "ArrowDown" => SelectorAction::Navigate(Direction::Down),
                "ArrowUp" => SelectorAction::Navigate(Direction::Up),
                "Enter" => SelectorAction::CommitFirst,
                "Escape" => SelectorAction::Close,
                _ => return,
            };
            e.prevent_default();
            dispatcher.dispatch(action);
        })
    };

    let on_toggle = {
        let dispatcher = dispatcher.clone();
        let input_ref = input_ref.clone();
        let open = state.is_open();
        Callback::from(move |_: MouseEvent| {
            if open {
                dispatcher.dispatch(SelectorAction::Close);
            } else {
                dispatcher.dispatch(SelectorAction::Open);
                if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
            }
        })
    };

    let items = if state.filtered_len() == 0 {
        html! { <div class="combo-option no-results">{ NO_MATCHES }</div> }
    } else {
        state
            .filtered()
            .enumerate()
            .map(|(pos, option)| {
                let onclick = {
                    let dispatcher = dispatcher.clone();
                    let option = option.to_string();
                    Callback::from(move |_: MouseEvent| {
                        dispatcher.dispatch(SelectorAction::Choose(option.clone()))
                    })
                };
                let class = classes!(
                    "combo-option",
                    (state.highlighted() == Some(pos)).then_some("selected")
                );
                html! {
                    <div {class} {onclick} data-value={option.to_string()}>
                        { for highlight_segments(option, state.query()).into_iter().map(|seg| {
                            if seg.matched {
                                html! { <strong>{ seg.text }</strong> }
                            } else {
                                html! { <>{ seg.text }</> }
                            }
                        }) }
                    </div>
                }
            })
            .collect::<Html>()
    };

    let list_class = classes!("combo-list", state.is_open().then_some("show"));

    html! {
        <div class="form-group">
            <label for={props.input_id.clone()}>{ props.label.clone() }</label>
            <div class="combo-box" ref={wrapper_ref}>
                <input
                    ref={input_ref}
                    id={props.input_id.clone()}
                    class="combo-input"
                    type="text"
                    autocomplete="off"
                    placeholder={props.placeholder.clone()}
                    disabled={state.is_disabled()}
                    value={state.query().to_string()}
                    {onfocus}
                    {oninput}
                    {onkeydown}
                />
                <button type="button" class="combo-arrow" onclick={on_toggle}>{ "▾" }</button>
                <div class={list_class} ref={list_ref}>{ items }</div>
            </div>
        </div>
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Toasts

#[derive(Clone, PartialEq)]
pub struct ToastContext {
    show: Callback<(String, ToastKind)>,
}

impl ToastContext {
    /// A context that only logs, for components mounted without a host.
    pub fn detached() -> Self {
        Self {
            show: Callback::from(|(message, kind): (String, ToastKind)| {
                log::warn!("Toast without host ({:?}): {}", kind, message)
            }),
        }
    }

    pub fn show(&self, message: impl Into<String>, kind: ToastKind) {
        self.show.emit((message.into(), kind));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Info);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Success);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Warning);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, ToastKind::Error);
    }
}

impl Notify for ToastContext {
    fn notify(&self, message: String, kind: ToastKind) {
        self.show(message, kind);
    }
}

/// Renders nothing; reports connectivity changes through the toast host.
#[function_component(NetworkStatus)]
pub fn network_status() -> Html {
    use_network_toasts();
    html! {}
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

/// Hosts the single visible toast and provides [`ToastContext`].
#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let slot = use_reducer(ToastSlot::default);
    let current_id = slot.current().map(|t| t.id);

    // Dropping the timeout cancels it, so a replaced toast keeps the full duration.
    {
        let dispatcher = slot.dispatcher();
        use_effect_with(current_id, move |id| {
            let timeout = id.map(|id| {
                Timeout::new(TOAST_DURATION_MS, move || {
                    dispatcher.dispatch(ToastAction::Dismiss(id))
                })
            });
            move || drop(timeout)
        });
    }

    let context = {
        let dispatcher = slot.dispatcher();
        ToastContext {
            show: Callback::from(move |(message, kind): (String, ToastKind)| {
                dispatcher.dispatch(ToastAction::Show(message, kind))
            }),
        }
    };

    let toast = match slot.current() {
        Some(toast) => {
            let ondismiss = {
                let dispatcher = slot.dispatcher();
                let id = toast.id;
                Callback::from(move |_: MouseEvent| dispatcher.dispatch(ToastAction::Dismiss(id)))
            };
            html! {
                <div class={classes!("toast", "show", toast.kind.css_class())}>
                    <span class="toast-icon">{ toast.kind.icon() }</span>
                    <span class="toast-message">{ toast.message.clone() }</span>
                    <button class="toast-close" onclick={ondismiss}>{ "×" }</button>
                </div>
            }
        }
        None => html! {},
    };

    html! {
        <ContextProvider<ToastContext> {context}>
            { props.children.clone() }
            { toast }
        </ContextProvider<ToastContext>>
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Placeholders

#[derive(Properties, PartialEq)]
pub struct ErrorPanelProps {
    #[prop_or(AttrValue::Static("Something went wrong"))]
    pub title: AttrValue,
    pub message: AttrValue,
    #[prop_or_default]
    pub hint: Option<AttrValue>,
}

#[function_component(ErrorPanel)]
pub fn error_panel(props: &ErrorPanelProps) -> Html {
    html! {
        <div class="error-card">
            <div class="error-icon">{ "⚠️" }</div>
            <h3>{ props.title.clone() }</h3>
            <p class="error-text">{ props.message.clone() }</p>
            if let Some(hint) = &props.hint {
                <p class="error-hint">{ hint.clone() }</p>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    #[prop_or(AttrValue::Static("Loading..."))]
    pub message: AttrValue,
}

#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    html! {
        <div class="loading">
            <div class="spinner"></div>
            <p>{ props.message.clone() }</p>
        </div>
    }
}
