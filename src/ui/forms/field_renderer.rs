//! Field rendering utilities for forms

use centy_forms::state::{FieldDef, FieldKind, FieldValue};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// How a field line should look
pub struct FieldLine<'a> {
    pub def: &'a FieldDef,
    pub value: Option<&'a FieldValue>,
    pub error: Option<&'a str>,
    pub is_active: bool,
    pub is_enabled: bool,
    pub has_choices: bool,
    /// Pending multi-select entry, shown on the active field
    pub pending: &'a str,
}

impl FieldLine<'_> {
    fn display_value(&self) -> String {
        let value = self.value.map(FieldValue::display_value).unwrap_or_default();
        if self.def.kind == FieldKind::Flag {
            return value;
        }
        if value.is_empty() && !self.is_active {
            "(empty)".to_string()
        } else {
            value
        }
    }

    /// Label/value line followed by the error line
    pub fn lines(&self) -> Vec<Line<'static>> {
        let label_style = if !self.is_enabled {
            Style::default().fg(Color::DarkGray)
        } else if self.is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        };
        let value_style = if self.is_enabled {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut spans = vec![
            Span::styled(format!("{:<28}", self.def.label), label_style),
            Span::styled(self.display_value(), value_style),
        ];
        if self.is_active {
            if self.def.kind == FieldKind::StringSet {
                spans.push(Span::styled(
                    format!("  + {}", self.pending),
                    Style::default().fg(Color::Cyan),
                ));
            }
            spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
            if self.has_choices {
                spans.push(Span::styled("  ◀ ▶", Style::default().fg(Color::DarkGray)));
            }
        }

        let error_line = match self.error {
            Some(err) => Line::from(Span::styled(
                format!("  ✗ {err}"),
                Style::default().fg(Color::Red),
            )),
            None => Line::from(""),
        };
        vec![Line::from(spans), error_line]
    }
}

/// Draw the key help line
pub fn draw_help_text(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(": next  "),
        Span::styled("◀ ▶", Style::default().fg(Color::Cyan)),
        Span::raw(": choose  "),
        Span::styled("Space", Style::default().fg(Color::Cyan)),
        Span::raw(": toggle  "),
        Span::styled("Ctrl+S", Style::default().fg(Color::Cyan)),
        Span::raw(": submit  "),
        Span::styled("Ctrl+E", Style::default().fg(Color::Cyan)),
        Span::raw(": mode  "),
        Span::styled("Ctrl+R", Style::default().fg(Color::Cyan)),
        Span::raw(": reset  "),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::raw(": quit"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line<'a>(def: &'a FieldDef, value: Option<&'a FieldValue>, error: Option<&'a str>) -> FieldLine<'a> {
        FieldLine {
            def,
            value,
            error,
            is_active: false,
            is_enabled: true,
            has_choices: false,
            pending: "",
        }
    }

    #[test]
    fn test_empty_inactive_field_shows_placeholder() {
        let def = FieldDef::text("title", "Title");
        let value = FieldValue::from("");
        assert_eq!(line(&def, Some(&value), None).display_value(), "(empty)");
    }

    #[test]
    fn test_flag_shows_checkbox() {
        let def = FieldDef::flag("ok", "Ok");
        let value = FieldValue::Flag(false);
        assert_eq!(line(&def, Some(&value), None).display_value(), "[ ]");
    }

    #[test]
    fn test_error_line_rendered() {
        let def = FieldDef::text("title", "Title");
        let lines = line(&def, None, Some("Title is required")).lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].to_string(), "  ✗ Title is required");
    }
}
