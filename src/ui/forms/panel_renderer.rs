//! Panel rendering: a bordered group of fields gated by the engine

use super::field_renderer::FieldLine;
use centy_forms::state::{FormEngine, Panel};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows needed for a panel: two per field plus borders
pub fn panel_height(panel: &Panel) -> u16 {
    (panel.field_names.len() as u16) * 2 + 2
}

/// Draw one panel with its fields and errors
pub fn draw_panel(
    frame: &mut Frame,
    area: Rect,
    engine: &FormEngine,
    panel: &Panel,
    focused: Option<&str>,
    pending: &str,
) {
    let enabled = engine.is_panel_enabled(panel.number);
    let valid = engine.is_panel_valid(panel.number);
    let has_focus = focused.is_some_and(|name| panel.contains(name));

    let border_color = match (enabled, has_focus) {
        (false, _) => Color::DarkGray,
        (true, true) => Color::Cyan,
        (true, false) => Color::White,
    };
    let marker = if valid { " ✓" } else { "" };
    let block = Block::default()
        .title(format!(" {}. {}{} ", panel.number, panel.title, marker))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let mut lines: Vec<Line> = Vec::new();
    for name in &panel.field_names {
        let Some(def) = engine.registry().get(name) else {
            continue;
        };
        let field = FieldLine {
            def,
            value: engine.value(name),
            error: engine.display_error(name),
            is_active: focused == Some(*name),
            is_enabled: enabled,
            has_choices: !engine.choices_for(name).is_empty(),
            pending,
        };
        lines.extend(field.lines());
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
