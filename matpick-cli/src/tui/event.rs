//! Event handling for the TUI

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tracing::trace;

use super::app::App;
use super::ui::{region, screen_layout, sync_regions};

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleResult {
    /// Continue running
    Continue,
    /// Quit the application
    Quit,
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) -> HandleResult {
    // Global quit shortcut
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return HandleResult::Quit;
    }

    match app.open_field() {
        Some(index) => handle_overlay_key(app, index, key),
        None => handle_form_key(app, key),
    }
}

/// Keys while a field's overlay is open
fn handle_overlay_key(app: &mut App, index: usize, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Esc => app.fields[index].select.dismiss(),
        KeyCode::Enter => {
            let row = app.fields[index].select.highlighted();
            app.pick_row(index, row);
        }
        KeyCode::Down => app.fields[index].highlight_next(),
        KeyCode::Up => app.fields[index].highlight_prev(),
        KeyCode::Backspace => app.fields[index].select.pop_search(),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.fields[index].select.push_search(ch);
        }
        _ => {}
    }
    HandleResult::Continue
}

/// Keys while every overlay is closed
fn handle_form_key(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return HandleResult::Quit,
        KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => app.focus_prev(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate(app.focused),
        KeyCode::Backspace | KeyCode::Delete => app.clear_field(app.focused),
        _ => {}
    }
    HandleResult::Continue
}

/// Handle a mouse event
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) -> HandleResult {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return HandleResult::Continue;
    }
    let (x, y) = (mouse.column, mouse.row);
    trace!(x, y, "pointer down");

    sync_regions(app, &screen_layout(app.viewport, app));
    app.dispatch_outside_press(x, y);

    let layout = screen_layout(app.viewport, app);
    let hit = |rect| region(rect).contains(x, y);

    if let Some(overlay) = &layout.overlay {
        if hit(overlay.close) {
            app.fields[overlay.field].select.dismiss();
            return HandleResult::Continue;
        }
        if let Some(&(row, _)) = overlay.rows.iter().find(|(_, rect)| hit(*rect)) {
            app.pick_row(overlay.field, row);
            return HandleResult::Continue;
        }
        if hit(overlay.area) {
            return HandleResult::Continue;
        }
    }

    for (index, field) in layout.fields.iter().enumerate() {
        if field.clear.is_some_and(hit) {
            app.focused = index;
            app.clear_field(index);
            return HandleResult::Continue;
        }
        if hit(field.trigger) {
            app.activate(index);
            return HandleResult::Continue;
        }
    }

    HandleResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;
    use matpick_core::{FieldSpec, FormSpec, OptionId, PickOption, SelectConfig};
    use ratatui::layout::Rect;
    use serde_json::json;

    fn app() -> App {
        let materials = vec![
            PickOption::record([("id", json!(1)), ("name", json!("Steel beam"))]),
            PickOption::record([("id", json!(2)), ("name", json!("Copper pipe"))]),
            PickOption::record([("id", json!(3)), ("name", json!("Steel plate"))]),
        ];
        let units = vec![PickOption::text("kg"), PickOption::text("m")];
        let mut app = App::new(
            FormSpec {
                title: None,
                fields: vec![
                    FieldSpec::new("Material", materials),
                    FieldSpec::new("Unit", units),
                ],
            },
            &SelectConfig::default(),
        );
        app.viewport = Rect::new(0, 0, 80, 24);
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            handle_key(app, key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn test_keyboard_search_and_select() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.open_field(), Some(0));

        type_text(&mut app, "steel");
        handle_key(&mut app, key(KeyCode::Down));
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.fields[0].value, Some(OptionId::Number(3)));
        assert_eq!(app.open_field(), None);
        assert_eq!(app.fields[0].select.search(), "");
    }

    #[test]
    fn test_typing_q_in_overlay_searches() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('q'))), HandleResult::Continue);
        assert_eq!(app.fields[0].select.search(), "q");
    }

    #[test]
    fn test_escape_closes_then_quits() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(handle_key(&mut app, key(KeyCode::Esc)), HandleResult::Continue);
        assert_eq!(app.open_field(), None);
        assert_eq!(handle_key(&mut app, key(KeyCode::Esc)), HandleResult::Quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        let mut ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        ctrl_c.kind = KeyEventKind::Press;
        assert_eq!(handle_key(&mut app, ctrl_c), HandleResult::Quit);
    }

    #[test]
    fn test_delete_clears_focused_field() {
        let mut app = app();
        app.fields[1].value = Some(OptionId::Text("kg".into()));
        handle_key(&mut app, key(KeyCode::Tab));
        handle_key(&mut app, key(KeyCode::Delete));
        assert_eq!(app.fields[1].value, None);
    }

    #[test]
    fn test_click_trigger_then_row() {
        let mut app = app();
        handle_mouse(&mut app, click(3, 2));
        assert_eq!(app.open_field(), Some(0));

        let layout = screen_layout(app.viewport, &app);
        let (row, rect) = layout.overlay.unwrap().rows[1];
        handle_mouse(&mut app, click(rect.x + 1, rect.y));

        assert_eq!(row, 1);
        assert_eq!(app.fields[0].value, Some(OptionId::Number(2)));
        assert_eq!(app.open_field(), None);
    }

    #[test]
    fn test_click_outside_dismisses() {
        let mut app = app();
        handle_mouse(&mut app, click(3, 2));
        app.fields[0].select.set_search("cop");

        // Status bar row is outside trigger and overlay
        handle_mouse(&mut app, click(0, 23));
        assert_eq!(app.open_field(), None);
        assert_eq!(app.fields[0].value, None);
        assert_eq!(app.fields[0].select.search(), "cop");
        assert_eq!(app.hub.listener_count(), 0);
    }

    #[test]
    fn test_click_other_trigger_moves_overlay() {
        let mut app = app();
        handle_mouse(&mut app, click(3, 2));
        handle_mouse(&mut app, click(3, 5));
        assert_eq!(app.open_field(), Some(1));
        assert!(!app.fields[0].select.is_open());
        assert_eq!(app.hub.listener_count(), 1);
    }

    #[test]
    fn test_click_own_trigger_toggles_closed() {
        let mut app = app();
        handle_mouse(&mut app, click(3, 2));
        handle_mouse(&mut app, click(3, 2));
        assert_eq!(app.open_field(), None);
    }

    #[test]
    fn test_click_close_button() {
        let mut app = app();
        handle_mouse(&mut app, click(3, 2));
        let close = screen_layout(app.viewport, &app).overlay.unwrap().close;
        handle_mouse(&mut app, click(close.x + 1, close.y));
        assert_eq!(app.open_field(), None);
    }

    #[test]
    fn test_click_clear_glyph() {
        let mut app = app();
        app.fields[0].value = Some(OptionId::Number(1));
        let clear = screen_layout(app.viewport, &app).fields[0].clear.unwrap();
        handle_mouse(&mut app, click(clear.x + 1, clear.y));
        assert_eq!(app.fields[0].value, None);
        assert_eq!(app.open_field(), None);
    }
}
