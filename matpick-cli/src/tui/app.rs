//! Form state: one picker per field, plus focus and status

use matpick_core::{
    find_option, ChangeEvent, FieldSpec, FormSpec, OptionId, PickOption, PointerHub,
    SearchableSelect, SelectConfig, SelectProps,
};
use ratatui::layout::Rect;
use serde_json::{Map, Value};

/// A labelled picker and the value it edits
#[derive(Debug)]
pub struct Field {
    pub label: String,
    pub options: Vec<PickOption>,
    /// Caller-owned selection, updated from change events
    pub value: Option<OptionId>,
    pub select: SearchableSelect,
}

impl Field {
    pub fn new(field: FieldSpec, base: &SelectConfig) -> Self {
        let config = field.select_config(base);
        Self {
            label: field.label,
            options: field.options,
            value: field.value,
            select: SearchableSelect::new(config),
        }
    }

    pub fn props(&self) -> SelectProps<'_> {
        SelectProps::new(&self.options, self.value.as_ref())
    }

    pub fn highlight_next(&mut self) {
        self.select
            .highlight_next(SelectProps::new(&self.options, self.value.as_ref()));
    }

    pub fn highlight_prev(&mut self) {
        self.select
            .highlight_prev(SelectProps::new(&self.options, self.value.as_ref()));
    }

    /// Select the `row`-th rendered result
    pub fn select_row(&mut self, row: usize) -> bool {
        let mut changed = None;
        let picked = self.select.select(
            SelectProps::new(&self.options, self.value.as_ref()),
            row,
            |event| changed = Some(event.value),
        );
        if let Some(value) = changed {
            self.value = value;
        }
        picked
    }

    /// Clear the value through the picker
    pub fn clear(&mut self) -> bool {
        let mut cleared = false;
        self.select.clear(|event| cleared = event.is_clear());
        if cleared {
            self.value = None;
        }
        cleared
    }

    /// `{"value": ..., "option": ...}` for the current value
    pub fn result_json(&self) -> Value {
        let keys = &self.select.config().keys;
        let option = self
            .value
            .as_ref()
            .and_then(|value| find_option(&self.options, value, keys))
            .map(|(_, option)| option);
        ChangeEvent {
            value: self.value.clone(),
            option,
        }
        .to_json()
    }
}

/// Main application state
#[derive(Debug)]
pub struct App {
    pub title: String,
    pub fields: Vec<Field>,
    /// Focused field index
    pub focused: usize,
    /// Outside-click listener registry shared by all pickers
    pub hub: PointerHub,
    /// Last known terminal area
    pub viewport: Rect,
    pub should_quit: bool,
    /// Status message (shown in status bar)
    pub status_message: Option<String>,
}

impl App {
    pub fn new(form: FormSpec, base: &SelectConfig) -> Self {
        Self {
            title: form.title.unwrap_or_else(|| "Material picker".to_string()),
            fields: form
                .fields
                .into_iter()
                .map(|field| Field::new(field, base))
                .collect(),
            focused: 0,
            hub: PointerHub::new(),
            viewport: Rect::new(0, 0, 80, 24),
            should_quit: false,
            status_message: None,
        }
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Index of the field whose overlay is open
    pub fn open_field(&self) -> Option<usize> {
        self.fields.iter().position(|field| field.select.is_open())
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = self
                .focused
                .checked_sub(1)
                .unwrap_or(self.fields.len() - 1);
        }
    }

    /// Activate the trigger of field `index`
    pub fn activate(&mut self, index: usize) {
        let hub = self.hub.clone();
        let Some(field) = self.fields.get_mut(index) else {
            return;
        };
        self.focused = index;
        if field.select.config().disabled {
            let msg = format!("{} is disabled", field.label);
            self.set_status(msg);
            return;
        }
        field.select.activate_trigger(&hub);
        self.clear_status();
    }

    /// Clear field `index`, reporting the outcome in the status bar
    pub fn clear_field(&mut self, index: usize) {
        let Some(field) = self.fields.get_mut(index) else {
            return;
        };
        if !field.select.show_clear(field.props()) {
            return;
        }
        if field.clear() {
            let msg = format!("{} cleared", field.label);
            self.set_status(msg);
        }
    }

    /// Select the `row`-th result of the open field
    pub fn pick_row(&mut self, index: usize, row: usize) {
        let Some(field) = self.fields.get_mut(index) else {
            return;
        };
        if field.select_row(row) {
            let msg = format!("{}: {}", field.label, field.select.trigger_label(field.props()));
            self.set_status(msg);
        }
    }

    /// Close every overlay whose listener reported an outside press
    pub fn dispatch_outside_press(&mut self, x: u16, y: u16) {
        let outside = self.hub.dispatch(x, y);
        if outside.is_empty() {
            return;
        }
        for field in &mut self.fields {
            if field
                .select
                .listener_id()
                .is_some_and(|id| outside.contains(&id))
            {
                field.select.dismiss();
            }
        }
    }

    /// Results of all fields keyed by label
    pub fn results_json(&self) -> Value {
        let mut map = Map::new();
        for field in &self.fields {
            map.insert(field.label.clone(), field.result_json());
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn sample_form() -> FormSpec {
        let suppliers = vec![
            PickOption::record([("id", json!("S1")), ("name", json!("Acme Building Supply"))]),
            PickOption::record([("id", json!("S2")), ("name", json!("Northern Metals"))]),
        ];
        let projects = vec![PickOption::text("Tower A"), PickOption::text("Harbour Bridge")];
        let mut project = FieldSpec::new("Project", projects);
        project.value = Some(OptionId::Text("Tower A".into()));
        FormSpec {
            title: Some("Purchase request".into()),
            fields: vec![FieldSpec::new("Supplier", suppliers), project],
        }
    }

    #[test]
    fn test_field_select_updates_value() {
        let mut app = App::new(sample_form(), &SelectConfig::default());
        app.activate(0);
        assert_eq!(app.open_field(), Some(0));

        app.pick_row(0, 1);
        assert_eq!(app.fields[0].value, Some(OptionId::Text("S2".into())));
        assert_eq!(app.open_field(), None);
        assert_eq!(app.status_message.as_deref(), Some("Supplier: Northern Metals"));
        assert_eq!(app.hub.listener_count(), 0);
    }

    #[test]
    fn test_clear_field() {
        let mut app = App::new(sample_form(), &SelectConfig::default());
        app.clear_field(1);
        assert_eq!(app.fields[1].value, None);
        assert_eq!(app.status_message.as_deref(), Some("Project cleared"));

        // Nothing to clear: no status change
        app.clear_status();
        app.clear_field(0);
        assert_eq!(app.status_message, None);
    }

    #[test]
    fn test_disabled_field_reports_status() {
        let mut form = sample_form();
        form.fields[0].disabled = true;
        let mut app = App::new(form, &SelectConfig::default());
        app.activate(0);
        assert_eq!(app.open_field(), None);
        assert_eq!(app.status_message.as_deref(), Some("Supplier is disabled"));
    }

    #[test]
    fn test_results_json() {
        let app = App::new(sample_form(), &SelectConfig::default());
        assert_eq!(
            app.results_json(),
            json!({
                "Supplier": {"value": "", "option": null},
                "Project": {"value": "Tower A", "option": "Tower A"},
            })
        );
    }

    #[test]
    fn test_result_json_for_record_and_unknown_value() {
        let mut app = App::new(sample_form(), &SelectConfig::default());
        app.fields[0].value = Some(OptionId::Text("S2".into()));
        assert_eq!(
            app.fields[0].result_json(),
            json!({"value": "S2", "option": {"id": "S2", "name": "Northern Metals"}})
        );

        app.fields[0].value = Some(OptionId::Text("S9".into()));
        assert_eq!(
            app.fields[0].result_json(),
            json!({"value": "S9", "option": null})
        );
    }

    #[test]
    fn test_focus_wraps() {
        let mut app = App::new(sample_form(), &SelectConfig::default());
        app.focus_prev();
        assert_eq!(app.focused, 1);
        app.focus_next();
        assert_eq!(app.focused, 0);
    }
}
