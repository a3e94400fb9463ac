//! Page-level keyboard shortcuts.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Plain Enter: submit the active form.
    Submit,
    /// Ctrl+Enter: generate a forecast.
    Generate,
    /// Ctrl+S: export CSV instead of the browser's save dialog.
    Export,
}

impl Shortcut {
    /// Map a keydown to a shortcut. `handled` is true when an inner widget
    /// (such as a selector committing on Enter) already consumed the key.
    pub fn from_key(key: &str, ctrl: bool, handled: bool) -> Option<Self> {
        match (key, ctrl) {
            ("Enter", true) => Some(Shortcut::Generate),
            ("s" | "S", true) => Some(Shortcut::Export),
            ("Enter", false) if !handled => Some(Shortcut::Submit),
            _ => None,
        }
    }

    /// Whether the browser default must be suppressed once the page has
    /// (or has not) `consumed` the shortcut.
    pub fn suppresses_default(&self, consumed: bool) -> bool {
        consumed && matches!(self, Shortcut::Export)
    }

    /// Elements that act on a plain Enter themselves.
    pub fn enter_handled_by(tag_name: &str) -> bool {
        tag_name.eq_ignore_ascii_case("button")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_keys() {
        assert_eq!(Shortcut::from_key("Enter", true, false), Some(Shortcut::Generate));
        assert_eq!(Shortcut::from_key("s", true, false), Some(Shortcut::Export));
        assert_eq!(Shortcut::from_key("Enter", false, false), Some(Shortcut::Submit));
        assert_eq!(Shortcut::from_key("s", false, false), None);
        assert_eq!(Shortcut::from_key("ArrowDown", false, false), None);
    }

    #[test]
    fn enter_consumed_by_widget_does_not_submit() {
        assert_eq!(Shortcut::from_key("Enter", false, true), None);
        assert_eq!(Shortcut::from_key("Enter", true, true), Some(Shortcut::Generate));
    }

    #[test]
    fn only_consumed_export_suppresses_default() {
        assert!(Shortcut::Export.suppresses_default(true));
        assert!(!Shortcut::Export.suppresses_default(false));
        assert!(!Shortcut::Submit.suppresses_default(true));
        assert!(!Shortcut::Generate.suppresses_default(true));
    }

    #[test]
    fn enter_on_a_button_is_left_to_the_button() {
        assert!(Shortcut::enter_handled_by("BUTTON"));
        assert!(!Shortcut::enter_handled_by("INPUT"));
        let handled = Shortcut::enter_handled_by("BUTTON");
        assert_eq!(Shortcut::from_key("Enter", false, handled), None);
        assert_eq!(Shortcut::from_key("Enter", true, handled), Some(Shortcut::Generate));
    }
}
