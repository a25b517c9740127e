//! Searchable single-select picker
//!
//! [`SearchableSelect`] is headless: it owns only transient UI state (open or
//! closed, search text, highlighted row) and reads the option list and the
//! current value from [`SelectProps`] on every call. Changes are reported
//! through a caller-supplied callback; the caller owns the value.
//!
//! ```text
//! Closed --activate--> Open --select--> Closed   (on_change fired)
//! Open --dismiss/activate--> Closed              (no on_change)
//! Closed|Open --clear--> unchanged               (on_change(None, None))
//! ```

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::filter::{cap_matches, filter_options, MAX_RENDERED_RESULTS};
use crate::option::{find_option, OptionId, OptionKeys, PickOption};
use crate::pointer::{ListenerId, PointerHub, PointerSubscription, Region};
use crate::row::{OptionRow, RowRenderer};

/// Static picker settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Trigger text when nothing is selected
    pub placeholder: String,
    /// Hint shown in the empty search box
    pub search_placeholder: String,
    /// Record field names
    pub keys: OptionKeys,
    /// Disabled pickers never open and hide the clear control
    pub disabled: bool,
    /// Visible list rows
    pub max_height: u16,
    /// Cap on rendered results
    pub max_results: usize,
    /// Currency prefix for the default price badge
    pub currency: String,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            placeholder: "Select...".to_string(),
            search_placeholder: "Search...".to_string(),
            keys: OptionKeys::default(),
            disabled: false,
            max_height: 12,
            max_results: MAX_RENDERED_RESULTS,
            currency: "$".to_string(),
        }
    }
}

/// Caller-owned inputs, supplied on every call
#[derive(Debug, Clone, Copy)]
pub struct SelectProps<'a> {
    pub options: &'a [PickOption],
    pub value: Option<&'a OptionId>,
}

impl<'a> SelectProps<'a> {
    pub fn new(options: &'a [PickOption], value: Option<&'a OptionId>) -> Self {
        Self { options, value }
    }
}

/// Payload of a change notification
///
/// A clear carries neither value nor option.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent<'a> {
    pub value: Option<OptionId>,
    pub option: Option<&'a PickOption>,
}

impl ChangeEvent<'_> {
    pub fn cleared() -> Self {
        Self {
            value: None,
            option: None,
        }
    }

    pub fn is_clear(&self) -> bool {
        self.value.is_none() && self.option.is_none()
    }

    /// `{"value": <id or "">, "option": <record, text or null>}`
    pub fn to_json(&self) -> Value {
        json!({
            "value": self.value.as_ref().map(OptionId::to_json).unwrap_or_else(|| json!("")),
            "option": self.option.map(PickOption::to_json).unwrap_or(Value::Null),
        })
    }
}

/// Message shown when the list has no rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    /// No options yet and no search text
    Loading,
    /// No options at all, but the user typed something
    TypeToSearch,
    /// Options exist but none match the search text
    NoResults(String),
}

impl EmptyState {
    fn for_search(options_empty: bool, search: &str) -> Self {
        match (options_empty, search.is_empty()) {
            (true, true) => Self::Loading,
            (true, false) => Self::TypeToSearch,
            (false, _) => Self::NoResults(search.to_string()),
        }
    }
}

impl fmt::Display for EmptyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyState::Loading => write!(f, "Loading..."),
            EmptyState::TypeToSearch => write!(f, "Type to search"),
            EmptyState::NoResults(term) => write!(f, "No results for '{}'", term),
        }
    }
}

/// One rendered result
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    /// Position in the caller's option list
    pub index: usize,
    pub content: OptionRow,
    /// Whether this option is the current value
    pub selected: bool,
}

/// Rendered result list
#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub rows: Vec<ListRow>,
    /// Matches before the cap
    pub total_matches: usize,
    /// Truncation notice, present only when rows were capped
    pub footer: Option<String>,
    /// Present only when there are no rows
    pub empty: Option<EmptyState>,
}

/// Filtered single-select picker state
pub struct SearchableSelect {
    config: SelectConfig,
    renderer: Option<RowRenderer>,
    search: String,
    highlighted: usize,
    /// Held exactly while the overlay is open
    subscription: Option<PointerSubscription>,
}

impl fmt::Debug for SearchableSelect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchableSelect")
            .field("config", &self.config)
            .field("custom_renderer", &self.renderer.is_some())
            .field("search", &self.search)
            .field("highlighted", &self.highlighted)
            .field("open", &self.is_open())
            .finish()
    }
}

impl Default for SearchableSelect {
    fn default() -> Self {
        Self::new(SelectConfig::default())
    }
}

impl SearchableSelect {
    pub fn new(config: SelectConfig) -> Self {
        Self {
            config,
            renderer: None,
            search: String::new(),
            highlighted: 0,
            subscription: None,
        }
    }

    /// Replace the default row layout
    pub fn with_renderer<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&PickOption, &OptionKeys) -> OptionRow + 'static,
    {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// Toggle the disabled flag; disabling an open picker closes it
    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
        if disabled {
            self.subscription = None;
        }
    }

    pub fn is_open(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Outside-click listener id while open
    pub fn listener_id(&self) -> Option<ListenerId> {
        self.subscription.as_ref().map(PointerSubscription::id)
    }

    /// Record where the trigger and overlay were drawn
    pub fn set_regions(&self, regions: impl IntoIterator<Item = Region>) {
        if let Some(subscription) = &self.subscription {
            subscription.set_regions(regions);
        }
    }

    /// Option matching the current value (first match wins)
    pub fn selected_option<'a>(&self, props: SelectProps<'a>) -> Option<&'a PickOption> {
        let value = props.value?;
        find_option(props.options, value, &self.config.keys).map(|(_, option)| option)
    }

    /// Text shown on the closed trigger
    pub fn trigger_label<'a>(&'a self, props: SelectProps<'a>) -> Cow<'a, str> {
        match self.selected_option(props) {
            Some(option) => option.label(&self.config.keys),
            None => Cow::Borrowed(self.config.placeholder.as_str()),
        }
    }

    /// Whether the trigger shows a clear control
    pub fn show_clear(&self, props: SelectProps<'_>) -> bool {
        !self.config.disabled && props.value.is_some()
    }

    /// Trigger activation: opens a closed picker, closes an open one.
    /// Returns whether the overlay is open afterwards.
    pub fn activate_trigger(&mut self, hub: &PointerHub) -> bool {
        if self.is_open() {
            self.close("trigger");
        } else {
            self.open(hub);
        }
        self.is_open()
    }

    /// Open the overlay; no-op when disabled or already open
    pub fn open(&mut self, hub: &PointerHub) -> bool {
        if self.config.disabled {
            debug!("picker disabled, ignoring open");
            return false;
        }
        if self.subscription.is_none() {
            self.subscription = Some(hub.subscribe());
            self.highlighted = 0;
            debug!(search = %self.search, "picker opened");
        }
        true
    }

    /// Close without reporting a change (outside click, close button).
    /// Search text is kept for the next open.
    pub fn dismiss(&mut self) {
        self.close("dismiss");
    }

    fn close(&mut self, reason: &str) {
        if self.subscription.take().is_some() {
            debug!(reason, "picker closed");
        }
    }

    /// Replace the search text
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.highlighted = 0;
    }

    pub fn push_search(&mut self, ch: char) {
        self.search.push(ch);
        self.highlighted = 0;
    }

    pub fn pop_search(&mut self) {
        self.search.pop();
        self.highlighted = 0;
    }

    fn shown_indices(&self, props: SelectProps<'_>) -> Vec<usize> {
        let matches = filter_options(props.options, &self.search, &self.config.keys);
        cap_matches(matches, self.config.max_results).shown
    }

    fn render_row(&self, option: &PickOption) -> OptionRow {
        match &self.renderer {
            Some(render) => render(option, &self.config.keys),
            None => OptionRow::standard(option, &self.config.keys, &self.config.currency),
        }
    }

    /// Filter, cap and lay out the result list
    pub fn view(&self, props: SelectProps<'_>) -> ListView {
        let keys = &self.config.keys;
        let matches = filter_options(props.options, &self.search, keys);
        let capped = cap_matches(matches, self.config.max_results);

        let rows: Vec<ListRow> = capped
            .shown
            .iter()
            .map(|&index| {
                let option = &props.options[index];
                let selected = match (props.value, option.id(keys)) {
                    (Some(value), Some(id)) => id.matches(value),
                    _ => false,
                };
                ListRow {
                    index,
                    content: self.render_row(option),
                    selected,
                }
            })
            .collect();

        let footer = capped.is_truncated().then(|| {
            format!(
                "Showing {} of {} results. Type to narrow the search.",
                rows.len(),
                capped.total
            )
        });

        let empty = (capped.total == 0)
            .then(|| EmptyState::for_search(props.options.is_empty(), &self.search));

        ListView {
            rows,
            total_matches: capped.total,
            footer,
            empty,
        }
    }

    /// Move the highlight down, wrapping at the end
    pub fn highlight_next(&mut self, props: SelectProps<'_>) {
        let len = self.shown_indices(props).len();
        if len > 0 {
            self.highlighted = (self.highlighted + 1) % len;
        }
    }

    /// Move the highlight up, wrapping at the start
    pub fn highlight_prev(&mut self, props: SelectProps<'_>) {
        let len = self.shown_indices(props).len();
        if len > 0 {
            self.highlighted = self
                .highlighted
                .checked_sub(1)
                .unwrap_or(len - 1)
                .min(len - 1);
        }
    }

    /// Select the `row`-th rendered result.
    /// Returns false (and fires nothing) when closed or out of range.
    pub fn select<'a, F>(&mut self, props: SelectProps<'a>, row: usize, on_change: F) -> bool
    where
        F: FnOnce(ChangeEvent<'a>),
    {
        if !self.is_open() {
            return false;
        }
        match self.shown_indices(props).get(row) {
            Some(&index) => {
                self.commit(&props.options[index], on_change);
                true
            }
            None => false,
        }
    }

    /// Select the highlighted row
    pub fn select_highlighted<'a, F>(&mut self, props: SelectProps<'a>, on_change: F) -> bool
    where
        F: FnOnce(ChangeEvent<'a>),
    {
        let row = self.highlighted;
        self.select(props, row, on_change)
    }

    /// Select by identifier among all options, rendered or not
    pub fn select_value<'a, F>(&mut self, props: SelectProps<'a>, id: &OptionId, on_change: F) -> bool
    where
        F: FnOnce(ChangeEvent<'a>),
    {
        if !self.is_open() {
            return false;
        }
        match find_option(props.options, id, &self.config.keys) {
            Some((_, option)) => {
                self.commit(option, on_change);
                true
            }
            None => false,
        }
    }

    fn commit<'a, F>(&mut self, option: &'a PickOption, on_change: F)
    where
        F: FnOnce(ChangeEvent<'a>),
    {
        let value = option.id(&self.config.keys);
        debug!(value = ?value, "picker selection");
        on_change(ChangeEvent {
            value,
            option: Some(option),
        });
        self.search.clear();
        self.highlighted = 0;
        self.close("select");
    }

    /// Report "no selection" without touching open state.
    /// Unavailable (returns false) when disabled.
    pub fn clear<F>(&self, on_change: F) -> bool
    where
        F: FnOnce(ChangeEvent<'static>),
    {
        if self.config.disabled {
            return false;
        }
        debug!("picker cleared");
        on_change(ChangeEvent::cleared());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn materials() -> Vec<PickOption> {
        vec![
            PickOption::record([("id", json!(1)), ("name", json!("Cement"))]),
            PickOption::record([("id", json!(2)), ("name", json!("Steel"))]),
        ]
    }

    #[test]
    fn test_trigger_label_placeholder() {
        let options = materials();
        let select = SearchableSelect::default();
        assert_eq!(select.trigger_label(SelectProps::new(&options, None)), "Select...");

        let missing = OptionId::Number(99);
        assert_eq!(
            select.trigger_label(SelectProps::new(&options, Some(&missing))),
            "Select..."
        );
    }

    #[test]
    fn test_trigger_label_loose_match() {
        let options = materials();
        let select = SearchableSelect::default();
        let value = OptionId::Text("2".into());
        assert_eq!(select.trigger_label(SelectProps::new(&options, Some(&value))), "Steel");
    }

    #[test]
    fn test_trigger_label_leading_zero_code() {
        let options = vec![PickOption::text("7"), PickOption::text("007")];
        let select = SearchableSelect::default();
        let value = OptionId::parse_selection("007");
        assert_eq!(select.trigger_label(SelectProps::new(&options, value.as_ref())), "007");
    }

    #[test]
    fn test_disabled_never_opens() {
        let hub = PointerHub::new();
        let mut select = SearchableSelect::new(SelectConfig {
            disabled: true,
            ..SelectConfig::default()
        });
        assert!(!select.activate_trigger(&hub));
        assert!(!select.is_open());
        assert_eq!(hub.listener_count(), 0);

        let value = OptionId::Number(1);
        let options = materials();
        assert!(!select.show_clear(SelectProps::new(&options, Some(&value))));
        assert!(!select.clear(|_| panic!("disabled picker must not report")));
    }

    #[test]
    fn test_activate_toggles_and_keeps_search() {
        let hub = PointerHub::new();
        let mut select = SearchableSelect::default();
        assert!(select.activate_trigger(&hub));
        select.set_search("ste");
        assert!(!select.activate_trigger(&hub));
        assert_eq!(select.search(), "ste");
        assert!(select.activate_trigger(&hub));
        assert_eq!(select.search(), "ste");
    }

    #[test]
    fn test_select_closes_and_clears_search() {
        let hub = PointerHub::new();
        let options = materials();
        let mut select = SearchableSelect::default();
        select.open(&hub);
        select.set_search("st");

        let mut events = Vec::new();
        let props = SelectProps::new(&options, None);
        assert!(select.select(props, 0, |event| events.push(event)));

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].value, Some(OptionId::Number(2)));
        assert_eq!(events[0].option, Some(&options[1]));
        assert!(!select.is_open());
        assert_eq!(select.search(), "");
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_select_out_of_range() {
        let hub = PointerHub::new();
        let options = materials();
        let mut select = SearchableSelect::default();
        select.open(&hub);
        let props = SelectProps::new(&options, None);
        assert!(!select.select(props, 5, |_| panic!("no event expected")));
        assert!(select.is_open());
    }

    #[test]
    fn test_select_requires_open() {
        let options = materials();
        let mut select = SearchableSelect::default();
        let props = SelectProps::new(&options, None);
        assert!(!select.select(props, 0, |_| panic!("closed picker must not select")));
    }

    #[test]
    fn test_clear_keeps_open_state() {
        let hub = PointerHub::new();
        let select_closed = SearchableSelect::default();
        let mut cleared = 0;
        assert!(select_closed.clear(|event| {
            assert!(event.is_clear());
            cleared += 1;
        }));
        assert_eq!(cleared, 1);
        assert!(!select_closed.is_open());

        let mut select_open = SearchableSelect::default();
        select_open.open(&hub);
        assert!(select_open.clear(|_| {}));
        assert!(select_open.is_open());
    }

    #[test]
    fn test_dismiss_releases_listener() {
        let hub = PointerHub::new();
        let mut select = SearchableSelect::default();
        select.open(&hub);
        assert!(select.listener_id().is_some());
        select.dismiss();
        assert!(select.listener_id().is_none());
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_drop_releases_listener() {
        let hub = PointerHub::new();
        {
            let mut select = SearchableSelect::default();
            select.open(&hub);
            assert_eq!(hub.listener_count(), 1);
        }
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_highlight_wraps() {
        let hub = PointerHub::new();
        let options = materials();
        let props = SelectProps::new(&options, None);
        let mut select = SearchableSelect::default();
        select.open(&hub);

        select.highlight_prev(props);
        assert_eq!(select.highlighted(), 1);
        select.highlight_next(props);
        assert_eq!(select.highlighted(), 0);

        let mut picked = None;
        select.highlight_next(props);
        select.select_highlighted(props, |event| picked = event.value);
        assert_eq!(picked, Some(OptionId::Number(2)));
    }

    #[test]
    fn test_custom_renderer() {
        let options = materials();
        let select = SearchableSelect::default().with_renderer(|option, keys| {
            OptionRow::plain(format!("#{}", option.label(keys).to_uppercase()))
        });
        let view = select.view(SelectProps::new(&options, None));
        assert_eq!(view.rows[0].content.primary, "#CEMENT");
    }

    #[test]
    fn test_view_marks_selected_row() {
        let options = materials();
        let value = OptionId::Number(2);
        let select = SearchableSelect::default();
        let view = select.view(SelectProps::new(&options, Some(&value)));
        assert!(!view.rows[0].selected);
        assert!(view.rows[1].selected);
    }

    #[test]
    fn test_change_event_json() {
        let options = materials();
        let event = ChangeEvent {
            value: Some(OptionId::Number(1)),
            option: Some(&options[0]),
        };
        assert_eq!(
            event.to_json(),
            json!({"value": 1, "option": {"id": 1, "name": "Cement"}})
        );
        assert_eq!(
            ChangeEvent::cleared().to_json(),
            json!({"value": "", "option": null})
        );
    }
}
