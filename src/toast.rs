//! Single-slot notification state.
//!
//! Showing a toast replaces whatever toast is visible. Each toast gets a
//! fresh id so a stale auto-dismiss timer cannot remove its successor.

use std::rc::Rc;
use yew::Reducible;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "✅",
            ToastKind::Error => "❌",
            ToastKind::Warning => "⚠️",
            ToastKind::Info => "ℹ️",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Info => "toast-info",
            ToastKind::Success => "toast-success",
            ToastKind::Warning => "toast-warning",
            ToastKind::Error => "toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastSlot {
    current: Option<Toast>,
    next_id: u64,
}

impl ToastSlot {
    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Replace the visible toast; returns the new toast's id.
    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.current = Some(Toast {
            id,
            message: message.into(),
            kind,
        });
        id
    }

    /// Remove the toast only if it is still the one with `id`.
    pub fn dismiss(&mut self, id: u64) -> bool {
        if self.current.as_ref().map(|t| t.id) == Some(id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToastAction {
    Show(String, ToastKind),
    Dismiss(u64),
}

impl Reducible for ToastSlot {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        let changed = match action {
            ToastAction::Show(message, kind) => {
                next.show(message, kind);
                true
            }
            ToastAction::Dismiss(id) => next.dismiss(id),
        };
        if changed {
            Rc::new(next)
        } else {
            self
        }
    }
}

/// Browser connectivity changes worth telling the user about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

impl Connectivity {
    /// Map a `window` event type.
    pub fn from_event(event_type: &str) -> Option<Self> {
        match event_type {
            "online" => Some(Connectivity::Online),
            "offline" => Some(Connectivity::Offline),
            _ => None,
        }
    }

    pub fn notice(&self) -> (&'static str, ToastKind) {
        match self {
            Connectivity::Online => ("🌐 Connection restored!", ToastKind::Success),
            Connectivity::Offline => ("📡 No internet connection", ToastKind::Error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_toast_replaces_previous() {
        let mut slot = ToastSlot::default();
        slot.show("first", ToastKind::Info);
        let second = slot.show("second", ToastKind::Error);
        let current = slot.current().unwrap();
        assert_eq!(current.id, second);
        assert_eq!(current.message, "second");
        assert_eq!(current.kind, ToastKind::Error);
    }

    #[test]
    fn stale_dismiss_is_ignored() {
        let mut slot = ToastSlot::default();
        let first = slot.show("first", ToastKind::Info);
        let second = slot.show("second", ToastKind::Success);
        assert!(!slot.dismiss(first));
        assert!(slot.current().is_some());
        assert!(slot.dismiss(second));
        assert!(slot.current().is_none());
        assert!(!slot.dismiss(second));
    }

    #[test]
    fn reducer_keeps_state_on_stale_dismiss() {
        let slot = Rc::new(ToastSlot::default());
        let shown = slot.reduce(ToastAction::Show("saved".into(), ToastKind::Success));
        let id = shown.current().map(|t| t.id).unwrap();
        let same = shown.clone().reduce(ToastAction::Dismiss(id + 1));
        assert!(Rc::ptr_eq(&shown, &same));
        let cleared = same.reduce(ToastAction::Dismiss(id));
        assert!(cleared.current().is_none());
    }

    #[test]
    fn connectivity_events_map_to_notices() {
        let online = Connectivity::from_event("online").unwrap();
        assert_eq!(online.notice(), ("🌐 Connection restored!", ToastKind::Success));
        let offline = Connectivity::from_event("offline").unwrap();
        assert_eq!(offline.notice().1, ToastKind::Error);
        assert_eq!(Connectivity::from_event("load"), None);
    }
}
