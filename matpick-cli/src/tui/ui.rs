//! UI rendering using ratatui
//!
//! Layout is computed by [`screen_layout`] so the mouse handler hit-tests
//! exactly what was drawn.

use std::ops::Range;

use matpick_core::{ListRow, ListView, Region};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::{App, Field};

/// Primary accent color
const ACCENT: Color = Color::Cyan;
/// Secondary color for less important elements
const SECONDARY: Color = Color::DarkGray;
/// Highlight color for the highlighted row
const HIGHLIGHT: Color = Color::Yellow;
/// Selected option marker
const SUCCESS: Color = Color::Green;
/// Dim text color
const DIM: Color = Color::Rgb(100, 100, 100);

/// Below this size the overlay takes the whole screen
const COMPACT_WIDTH: u16 = 60;
const COMPACT_HEIGHT: u16 = 20;
/// Widest a centered overlay gets
const OVERLAY_WIDTH: u16 = 70;
/// Widest a trigger gets
const TRIGGER_WIDTH: u16 = 60;
/// Rows per field trigger (bordered, one line of content)
const TRIGGER_HEIGHT: u16 = 3;

/// Screen regions of one field trigger
#[derive(Debug, Clone, PartialEq)]
pub struct FieldLayout {
    pub trigger: Rect,
    /// Clear glyph, present when the field shows one
    pub clear: Option<Rect>,
    /// Scrolled out of view; `trigger` is empty
    pub visible: bool,
}

/// Screen regions of the open overlay
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayout {
    /// Field the overlay belongs to
    pub field: usize,
    pub area: Rect,
    pub fullscreen: bool,
    /// Close button in the top border
    pub close: Rect,
    pub search: Rect,
    /// Visible rows as (row index, area)
    pub rows: Vec<(usize, Rect)>,
    /// Footer or empty-state line
    pub message: Option<Rect>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenLayout {
    pub title: Rect,
    pub fields: Vec<FieldLayout>,
    /// Indices of the fields on screen
    pub visible: Range<usize>,
    pub status: Rect,
    pub overlay: Option<OverlayLayout>,
}

pub fn region(rect: Rect) -> Region {
    Region::new(rect.x, rect.y, rect.width, rect.height)
}

fn row_height(row: &ListRow) -> u16 {
    if row.content.secondary.is_some() {
        2
    } else {
        1
    }
}

/// First row to draw so the highlighted row fits in `height` lines
fn scroll_offset(rows: &[ListRow], highlighted: usize, height: u16) -> usize {
    let highlighted = highlighted.min(rows.len().saturating_sub(1));
    let mut offset = 0;
    while offset < highlighted {
        let used: u16 = rows[offset..=highlighted].iter().map(row_height).sum();
        if used <= height {
            break;
        }
        offset += 1;
    }
    offset
}

/// Compute every interactive region for the current state
pub fn screen_layout(area: Rect, app: &App) -> ScreenLayout {
    let title = Rect::new(area.x, area.y, area.width, area.height.min(1));
    let status = Rect::new(
        area.x,
        area.y + area.height.saturating_sub(1),
        area.width,
        area.height.min(1),
    );

    let trigger_width = area.width.min(TRIGGER_WIDTH);
    // Rows between the title and the status bar
    let top = area.y.saturating_add(1);
    let room = area.height.saturating_sub(2);
    let window = usize::from((room / TRIGGER_HEIGHT).max(1));
    let visible = field_window(app.fields.len(), app.focused, window);

    let fields = app
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            if !visible.contains(&i) {
                return FieldLayout {
                    trigger: Rect::default(),
                    clear: None,
                    visible: false,
                };
            }
            let slot = u16::try_from(i - visible.start).unwrap_or(u16::MAX);
            let y = top.saturating_add(TRIGGER_HEIGHT.saturating_mul(slot));
            let height = TRIGGER_HEIGHT.min(room);
            let trigger = Rect::new(area.x, y, trigger_width, height);
            let clear = (field.select.show_clear(field.props())
                && trigger.width >= 8
                && height == TRIGGER_HEIGHT)
                .then(|| Rect::new(trigger.x + trigger.width - 6, trigger.y + 1, 3, 1));
            FieldLayout {
                trigger,
                clear,
                visible: true,
            }
        })
        .collect();

    let overlay = app
        .open_field()
        .map(|index| overlay_layout(area, index, &app.fields[index]));

    ScreenLayout {
        title,
        fields,
        visible,
        status,
        overlay,
    }
}

/// Fields shown when `window` triggers fit, keeping `focused` on screen
fn field_window(count: usize, focused: usize, window: usize) -> Range<usize> {
    let start = focused
        .min(count.saturating_sub(1))
        .saturating_sub(window.saturating_sub(1));
    start..count.min(start + window)
}

fn overlay_layout(area: Rect, field: usize, state: &Field) -> OverlayLayout {
    let view = state.select.view(state.props());
    let message_lines = u16::from(view.footer.is_some() || view.empty.is_some());
    let content: u16 = view.rows.iter().map(row_height).sum();

    let fullscreen = area.width < COMPACT_WIDTH || area.height < COMPACT_HEIGHT;
    let outer = if fullscreen {
        area
    } else {
        let width = OVERLAY_WIDTH.min(area.width.saturating_sub(4));
        let list = content.clamp(1, state.select.config().max_height.max(1));
        // border + search + divider + list + message + border
        let height = (list + 4 + message_lines).min(area.height.saturating_sub(2));
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    };

    let inner = Rect::new(
        outer.x + 1,
        outer.y + 1,
        outer.width.saturating_sub(2),
        outer.height.saturating_sub(2),
    );
    let close = Rect::new(
        (outer.x + outer.width).saturating_sub(5),
        outer.y,
        3.min(outer.width),
        1.min(outer.height),
    );
    let search = Rect::new(inner.x, inner.y, inner.width, inner.height.min(1));

    let list_top = inner.y + 2;
    let list_height = inner
        .height
        .saturating_sub(2)
        .saturating_sub(message_lines);
    let offset = scroll_offset(&view.rows, state.select.highlighted(), list_height);

    let mut rows = Vec::new();
    let mut y = list_top;
    for (row, list_row) in view.rows.iter().enumerate().skip(offset) {
        let height = row_height(list_row);
        if y + height > list_top + list_height {
            break;
        }
        rows.push((row, Rect::new(inner.x, y, inner.width, height)));
        y += height;
    }

    let message = (message_lines > 0 && inner.height > 2).then(|| {
        Rect::new(
            inner.x,
            inner.y + inner.height - 1,
            inner.width,
            1,
        )
    });

    OverlayLayout {
        field,
        area: outer,
        fullscreen,
        close,
        search,
        rows,
        message,
    }
}

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let layout = screen_layout(frame.area(), app);

    let mut title = vec![Span::styled(
        format!(" {} ", app.title),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )];
    if layout.visible.len() < app.fields.len() {
        title.push(Span::styled(
            format!(
                "fields {}-{} of {}",
                layout.visible.start + 1,
                layout.visible.end,
                app.fields.len()
            ),
            Style::default().fg(SECONDARY),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(title)), layout.title);

    for (index, (field, field_layout)) in app.fields.iter().zip(&layout.fields).enumerate() {
        if field_layout.visible {
            render_trigger(frame, field, field_layout, index == app.focused);
        }
    }

    render_status_bar(frame, app, layout.status);

    if let Some(overlay) = &layout.overlay {
        render_overlay(frame, &app.fields[overlay.field], overlay);
    }
    sync_regions(app, &layout);
}

/// Record the open picker's trigger and overlay as its inside regions
pub fn sync_regions(app: &App, layout: &ScreenLayout) {
    if let Some(overlay) = &layout.overlay {
        app.fields[overlay.field].select.set_regions([
            region(layout.fields[overlay.field].trigger),
            region(overlay.area),
        ]);
    }
}

fn render_trigger(frame: &mut Frame, field: &Field, layout: &FieldLayout, focused: bool) {
    let disabled = field.select.config().disabled;
    let border_style = if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(SECONDARY)
    };

    let title = if disabled {
        format!(" {} (disabled) ", field.label)
    } else {
        format!(" {} ", field.label)
    };

    let block = Block::default()
        .title(title)
        .title_style(if focused {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(SECONDARY)
        })
        .borders(Borders::ALL)
        .border_style(border_style);

    let props = field.props();
    let label_style = if disabled || field.select.selected_option(props).is_none() {
        Style::default().fg(DIM)
    } else {
        Style::default()
    };
    let indicator = if field.select.is_open() { "▴" } else { "▾" };

    let inner_width = usize::from(layout.trigger.width.saturating_sub(2));
    let reserved = 8;
    let label = truncate(&field.select.trigger_label(props), inner_width.saturating_sub(reserved));
    let pad = inner_width
        .saturating_sub(label.chars().count())
        .saturating_sub(2);

    let mut spans = vec![Span::styled(label, label_style), Span::raw(" ".repeat(pad))];
    spans.push(Span::styled(indicator, Style::default().fg(SECONDARY)));
    spans.push(Span::raw(" "));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), layout.trigger);

    if let Some(clear) = layout.clear {
        frame.render_widget(
            Paragraph::new(Span::styled(" × ", Style::default().fg(HIGHLIGHT))),
            clear,
        );
    }
}

fn render_overlay(frame: &mut Frame, field: &Field, layout: &OverlayLayout) {
    let select = &field.select;
    let view: ListView = select.view(field.props());

    frame.render_widget(Clear, layout.area);
    let block = Block::default()
        .title(format!(" {} ", field.label))
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    frame.render_widget(block, layout.area);

    frame.render_widget(
        Paragraph::new(Span::styled("[x]", Style::default().fg(SECONDARY))),
        layout.close,
    );

    let search = if select.search().is_empty() {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(ACCENT)),
            Span::styled(
                select.config().search_placeholder.clone(),
                Style::default().fg(DIM),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled("> ", Style::default().fg(ACCENT)),
            Span::raw(select.search().to_string()),
            Span::styled("_", Style::default().fg(ACCENT)),
        ])
    };
    frame.render_widget(Paragraph::new(search), layout.search);

    for &(row, area) in &layout.rows {
        if let Some(list_row) = view.rows.get(row) {
            render_row(frame, list_row, row == select.highlighted(), area);
        }
    }

    if let Some(area) = layout.message {
        let line = match (&view.empty, &view.footer) {
            (Some(empty), _) => Span::styled(empty.to_string(), Style::default().fg(DIM)),
            (None, Some(footer)) => Span::styled(
                footer.clone(),
                Style::default().fg(HIGHLIGHT).add_modifier(Modifier::DIM),
            ),
            (None, None) => Span::raw(""),
        };
        frame.render_widget(Paragraph::new(Line::from(line)), area);
    }
}

fn render_row(frame: &mut Frame, row: &ListRow, highlighted: bool, area: Rect) {
    let width = usize::from(area.width);
    let marker = if row.selected { "✓ " } else { "  " };
    let badge = row.content.badge.as_deref().unwrap_or("");
    let room = width
        .saturating_sub(marker.chars().count())
        .saturating_sub(badge.chars().count() + 1);
    let primary = truncate(&row.content.primary, room);
    let pad = room.saturating_sub(primary.chars().count());

    let base = if highlighted {
        Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(marker, Style::default().fg(SUCCESS)),
        Span::styled(primary, base),
        Span::raw(" ".repeat(pad + 1)),
        Span::styled(badge.to_string(), Style::default().fg(SUCCESS)),
    ])];
    if let Some(secondary) = &row.content.secondary {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                truncate(secondary, width.saturating_sub(2)),
                Style::default().fg(DIM),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Render status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = if app.open_field().is_some() {
        "type to search | ↑↓ move | Enter select | Esc close"
    } else {
        "Tab next | Enter open | Del clear | q done"
    };

    let mut spans = vec![Span::styled(hints, Style::default().fg(SECONDARY))];
    if let Some(msg) = &app.status_message {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(msg.clone(), Style::default().fg(SUCCESS)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Cut `text` to `max` characters, ending in an ellipsis when shortened
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}
