//! UI module for rendering the form

mod forms;

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(
        app.engine
            .panels()
            .iter()
            .map(|p| Constraint::Length(forms::panel_height(p))),
    );
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1)); // Status bar
    constraints.push(Constraint::Length(1)); // Help text

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    draw_header(frame, chunks[0], app);

    let focused = app.focused_field();
    for (i, panel) in app.engine.panels().iter().enumerate() {
        forms::draw_panel(frame, chunks[i + 1], &app.engine, panel, focused, &app.input);
    }

    let status_area = chunks[chunks.len() - 2];
    draw_status_bar(frame, status_area, app);
    forms::draw_help_text(frame, chunks[chunks.len() - 1]);
}

fn draw_header(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let engine = &app.engine;
    let mut spans = vec![
        Span::styled(
            format!(" {} ", engine.schema().title()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("[{}]", engine.mode().label()),
            Style::default().fg(Color::Yellow),
        ),
    ];
    if engine.is_dirty() {
        spans.push(Span::styled(" (unsaved)", Style::default().fg(Color::DarkGray)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_status_bar(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let (text, color) = match &app.status_message {
        Some(msg) => (msg.clone(), Color::Yellow),
        None if app.engine.is_form_ready_for_submission() => {
            ("Ready to submit".to_string(), Color::Green)
        }
        None => ("Fill in every panel to submit".to_string(), Color::DarkGray),
    };
    frame.render_widget(
        Paragraph::new(Span::styled(format!(" {text}"), Style::default().fg(color))),
        area,
    );
}
