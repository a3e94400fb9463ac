//! Filterable selector: a text input over a fixed option list with a
//! dropdown of substring matches.
//!
//! The state is a plain value driven by [`SelectorAction`]s so the whole
//! interaction model can be exercised without a browser. It implements
//! [`yew::Reducible`] so components can hold it with `use_reducer`.
//!
//! Enter commits the *first* filtered option, not the highlighted one.
//! Arrow keys only move the highlight.

use regex::RegexBuilder;
use std::rc::Rc;
use yew::Reducible;

/// Placeholder rendered when nothing matches the query.
pub const NO_MATCHES: &str = "No matches found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Up,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectorAction {
    /// Input received focus, or the arrow toggle asked to open.
    Open,
    /// Escape, outside click, or the arrow toggle asked to close.
    Close,
    /// The text box content changed.
    Input(String),
    /// Enter was pressed.
    CommitFirst,
    /// An option was clicked.
    Choose(String),
    Navigate(Direction),
    /// Force the text and committed selection without validation.
    SetValue(String),
    Clear,
    /// Required anchors were missing when the widget mounted.
    Disable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterableSelector {
    options: Rc<[String]>,
    query: String,
    selected: String,
    /// Indices into `options`, in option order.
    filtered: Vec<usize>,
    open: bool,
    highlighted: Option<usize>,
    /// Bumped on every commit; consumers watch it to emit change events.
    commits: u64,
    disabled: bool,
}

impl FilterableSelector {
    pub fn new(options: impl Into<Rc<[String]>>) -> Self {
        let options = options.into();
        let filtered = (0..options.len()).collect();
        Self {
            options,
            query: String::new(),
            selected: String::new(),
            filtered,
            open: false,
            highlighted: None,
            commits: 0,
            disabled: false,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Current text box content.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Last option chosen by click or Enter (or forced with `SetValue`).
    pub fn committed(&self) -> &str {
        &self.selected
    }

    /// Text box value if non-empty, else the committed selection.
    pub fn value(&self) -> &str {
        if self.query.is_empty() {
            &self.selected
        } else {
            &self.query
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn commit_count(&self) -> u64 {
        self.commits
    }

    pub fn filtered(&self) -> impl Iterator<Item = &str> + '_ {
        self.filtered.iter().map(move |&i| self.options[i].as_str())
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Apply one action in place. Returns the committed value when the
    /// action committed a selection.
    pub fn apply(&mut self, action: SelectorAction) -> Option<String> {
        if self.disabled {
            return None;
        }
        match action {
            SelectorAction::Open => {
                if self.query.is_empty() {
                    self.filtered = (0..self.options.len()).collect();
                }
                self.open = true;
                self.reset_highlight();
                None
            }
            SelectorAction::Close => {
                self.open = false;
                None
            }
            SelectorAction::Input(text) => {
                self.filtered = filter_indices(&self.options, &text);
                self.query = text;
                self.open = true;
                self.reset_highlight();
                None
            }
            SelectorAction::CommitFirst => {
                let first = self.filtered.first().map(|&i| self.options[i].clone())?;
                Some(self.commit(first))
            }
            SelectorAction::Choose(value) => Some(self.commit(value)),
            SelectorAction::Navigate(direction) => {
                let len = self.filtered.len();
                if len == 0 {
                    return None;
                }
                let next = match (self.highlighted, direction) {
                    (None, Direction::Down) => 0,
                    (None, Direction::Up) => len - 1,
                    (Some(i), Direction::Down) => (i + 1) % len,
                    (Some(i), Direction::Up) => (i + len - 1) % len,
                };
                self.highlighted = Some(next);
                None
            }
            SelectorAction::SetValue(value) => {
                self.query = value.clone();
                self.selected = value;
                None
            }
            SelectorAction::Clear => {
                self.query.clear();
                self.selected.clear();
                self.filtered = (0..self.options.len()).collect();
                self.reset_highlight();
                None
            }
            SelectorAction::Disable => {
                self.open = false;
                self.disabled = true;
                None
            }
        }
    }

    fn commit(&mut self, value: String) -> String {
        self.selected = value.clone();
        self.query = value.clone();
        self.open = false;
        self.commits += 1;
        value
    }

    fn reset_highlight(&mut self) {
        self.highlighted = if self.filtered.is_empty() { None } else { Some(0) };
    }
}

impl Reducible for FilterableSelector {
    type Action = SelectorAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

/// Indices of options whose lowercase form contains the lowercase query,
/// in original order.
pub fn filter_indices(options: &[String], query: &str) -> Vec<usize> {
    let needle = query.to_lowercase();
    options
        .iter()
        .enumerate()
        .filter(|(_, opt)| opt.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}

/// A run of label text, emphasized when it matched the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub matched: bool,
}

/// Split `label` into matched and unmatched runs of `query`, ignoring case.
/// The query is taken literally.
pub fn highlight_segments(label: &str, query: &str) -> Vec<Segment> {
    if label.is_empty() {
        return Vec::new();
    }
    let plain = || {
        vec![Segment {
            text: label.to_string(),
            matched: false,
        }]
    };
    if query.is_empty() {
        return plain();
    }
    let re = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(_) => return plain(),
    };

    let mut out = Vec::new();
    let mut last = 0;
    for m in re.find_iter(label) {
        if m.start() > last {
            out.push(Segment {
                text: label[last..m.start()].to_string(),
                matched: false,
            });
        }
        out.push(Segment {
            text: m.as_str().to_string(),
            matched: true,
        });
        last = m.end();
    }
    if last < label.len() {
        out.push(Segment {
            text: label[last..].to_string(),
            matched: false,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crops() -> FilterableSelector {
        FilterableSelector::new(
            ["Onion", "Potato", "Green Onion", "Tomato", "Wheat"]
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>(),
        )
    }

    fn filtered(sel: &FilterableSelector) -> Vec<&str> {
        sel.filtered().collect()
    }

    #[test]
    fn starts_closed_with_full_list() {
        let sel = crops();
        assert!(!sel.is_open());
        assert_eq!(sel.filtered_len(), 5);
        assert_eq!(sel.value(), "");
    }

    #[test]
    fn input_filters_by_case_insensitive_substring_in_order() {
        let mut sel = crops();
        sel.apply(SelectorAction::Input("ONI".into()));
        assert_eq!(filtered(&sel), vec!["Onion", "Green Onion"]);
        assert!(sel.is_open());

        sel.apply(SelectorAction::Input("to".into()));
        assert_eq!(filtered(&sel), vec!["Potato", "Tomato"]);
    }

    #[test]
    fn filter_matches_reference_definition_for_many_queries() {
        let options: Vec<String> = ["Bajra", "BAJRA(Pearl Millet)", "Jowar", "Arhar", "maize", ""]
            .iter()
            .map(|s| s.to_string())
            .collect();
        for q in ["", "a", "AR", "jra", "(", "millet)", "zzz", "Maize"] {
            let expected: Vec<usize> = options
                .iter()
                .enumerate()
                .filter(|(_, o)| o.to_lowercase().contains(&q.to_lowercase()))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(filter_indices(&options, q), expected, "query {:?}", q);
        }
    }

    #[test]
    fn enter_commits_first_match_not_highlighted() {
        let mut sel = crops();
        sel.apply(SelectorAction::Input("o".into()));
        sel.apply(SelectorAction::Navigate(Direction::Down));
        sel.apply(SelectorAction::Navigate(Direction::Down));
        assert_eq!(sel.highlighted(), Some(2));

        let committed = sel.apply(SelectorAction::CommitFirst);
        assert_eq!(committed.as_deref(), Some("Onion"));
        assert_eq!(sel.value(), "Onion");
        assert_eq!(sel.committed(), "Onion");
        assert!(!sel.is_open());
        assert_eq!(sel.commit_count(), 1);
    }

    #[test]
    fn enter_with_no_matches_is_noop() {
        let mut sel = crops();
        sel.apply(SelectorAction::Input("xyz".into()));
        assert_eq!(sel.filtered_len(), 0);
        assert_eq!(sel.apply(SelectorAction::CommitFirst), None);
        assert!(sel.is_open());
        assert_eq!(sel.commit_count(), 0);
        assert_eq!(sel.committed(), "");
    }

    #[test]
    fn navigation_wraps_both_ways_without_committing() {
        let mut sel = crops();
        sel.apply(SelectorAction::Input("o".into()));
        let n = sel.filtered_len();
        assert_eq!(n, 4);
        assert_eq!(sel.highlighted(), Some(0));

        sel.apply(SelectorAction::Navigate(Direction::Up));
        assert_eq!(sel.highlighted(), Some(n - 1));
        sel.apply(SelectorAction::Navigate(Direction::Down));
        assert_eq!(sel.highlighted(), Some(0));
        for _ in 0..n {
            sel.apply(SelectorAction::Navigate(Direction::Down));
        }
        assert_eq!(sel.highlighted(), Some(0));

        assert_eq!(sel.committed(), "");
        assert_eq!(sel.commit_count(), 0);
        assert!(sel.is_open());
    }

    #[test]
    fn navigation_with_no_matches_is_noop() {
        let mut sel = crops();
        sel.apply(SelectorAction::Input("qq".into()));
        sel.apply(SelectorAction::Navigate(Direction::Down));
        assert_eq!(sel.highlighted(), None);
    }

    #[test]
    fn choose_commits_exact_string() {
        let mut sel = crops();
        sel.apply(SelectorAction::Open);
        sel.apply(SelectorAction::Choose("Tomato".into()));
        assert_eq!(sel.query(), "Tomato");
        assert_eq!(sel.value(), "Tomato");
        assert!(!sel.is_open());
    }

    #[test]
    fn close_keeps_selection() {
        let mut sel = crops();
        sel.apply(SelectorAction::Choose("Wheat".into()));
        sel.apply(SelectorAction::Open);
        sel.apply(SelectorAction::Close);
        assert_eq!(sel.committed(), "Wheat");
        assert!(!sel.is_open());
    }

    #[test]
    fn free_text_wins_over_committed_selection() {
        let mut sel = crops();
        sel.apply(SelectorAction::Choose("Wheat".into()));
        sel.apply(SelectorAction::Input("Whe".into()));
        assert_eq!(sel.value(), "Whe");
        sel.apply(SelectorAction::Input(String::new()));
        assert_eq!(sel.value(), "Wheat");
    }

    #[test]
    fn focus_with_empty_text_shows_everything() {
        let mut sel = crops();
        sel.apply(SelectorAction::Input("pot".into()));
        sel.apply(SelectorAction::Close);
        sel.apply(SelectorAction::Open);
        assert_eq!(filtered(&sel), vec!["Potato"]);

        sel.apply(SelectorAction::SetValue(String::new()));
        sel.apply(SelectorAction::Open);
        assert_eq!(sel.filtered_len(), 5);
    }

    #[test]
    fn set_value_does_not_validate() {
        let mut sel = crops();
        sel.apply(SelectorAction::SetValue("Dragonfruit".into()));
        assert_eq!(sel.value(), "Dragonfruit");
        assert_eq!(sel.committed(), "Dragonfruit");
        assert_eq!(sel.commit_count(), 0);
    }

    #[test]
    fn clear_restores_full_list_and_keeps_open_state() {
        let mut sel = crops();
        sel.apply(SelectorAction::Input("wh".into()));
        sel.apply(SelectorAction::CommitFirst);
        sel.apply(SelectorAction::Input("zz".into()));
        assert!(sel.is_open());

        sel.apply(SelectorAction::Clear);
        assert_eq!(sel.filtered_len(), 5);
        assert_eq!(sel.value(), "");
        assert!(sel.is_open());

        sel.apply(SelectorAction::Close);
        sel.apply(SelectorAction::Clear);
        assert!(!sel.is_open());
    }

    #[test]
    fn disabled_selector_ignores_actions() {
        let mut sel = crops();
        sel.apply(SelectorAction::Disable);
        sel.apply(SelectorAction::Input("on".into()));
        assert_eq!(sel.query(), "");
        assert!(!sel.is_open());
        assert!(sel.is_disabled());
    }

    #[test]
    fn reducer_matches_apply() {
        let sel = Rc::new(crops());
        let next = sel.clone().reduce(SelectorAction::Input("mat".into()));
        assert_eq!(next.filtered().collect::<Vec<_>>(), vec!["Tomato"]);
        assert_eq!(sel.filtered_len(), 5);
    }

    #[test]
    fn highlight_marks_every_case_insensitive_match() {
        let segs = highlight_segments("Green Onion onion", "ONION");
        let rendered: Vec<(&str, bool)> =
            segs.iter().map(|s| (s.text.as_str(), s.matched)).collect();
        assert_eq!(
            rendered,
            vec![("Green ", false), ("Onion", true), (" ", false), ("onion", true)]
        );
    }

    #[test]
    fn highlight_treats_query_literally() {
        let segs = highlight_segments("Arhar (Tur)", "(tur");
        assert_eq!(segs.len(), 3);
        assert!(segs[1].matched);
        assert_eq!(segs[1].text, "(Tur");
        assert_eq!(highlight_segments("Wheat", "").len(), 1);
        assert!(highlight_segments("", "x").is_empty());
    }
}
