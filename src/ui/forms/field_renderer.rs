//! Field rendering utilities for forms

use crate::state::{FieldError, FieldKind, FieldSpec, FieldValue};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows a field needs including its error line
pub fn field_height(spec: &FieldSpec) -> u16 {
    match spec.kind {
        FieldKind::Text { multiline: true } => 6,
        FieldKind::Text { multiline: false } | FieldKind::Choice => 4,
        FieldKind::Budget => 9,
    }
}

/// Split off the last row of `area` for an inline error
pub fn split_error_row(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

pub fn border_style(is_active: bool, has_error: bool) -> Style {
    if has_error {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Draw a text or choice field with its inline error
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    spec: &FieldSpec,
    value: &FieldValue,
    error: Option<&FieldError>,
    is_active: bool,
) {
    let (field_area, error_area) = split_error_row(area);

    let content = match spec.kind {
        FieldKind::Choice => choice_content(value, is_active),
        _ => text_content(spec, value, is_active),
    };

    let block = Block::default()
        .title(format!(" {} ", spec.label))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, error.is_some()));

    frame.render_widget(
        content.wrap(Wrap { trim: false }).block(block),
        field_area,
    );
    draw_error_line(frame, error_area, error.map(|e| e.to_string()).as_deref());
}

fn text_content<'a>(spec: &FieldSpec, value: &'a FieldValue, is_active: bool) -> Paragraph<'a> {
    let text = value.as_text();
    let cursor = Span::styled(
        if is_active { "▌" } else { "" },
        Style::default().fg(Color::Cyan),
    );

    if text.is_empty() {
        let placeholder = Span::styled(spec.placeholder, Style::default().fg(Color::DarkGray));
        return Paragraph::new(Line::from(vec![cursor, placeholder]));
    }

    let style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    if spec.is_multiline() {
        let mut lines: Vec<Line> = text
            .split('\n')
            .map(|l| Line::from(Span::styled(l, style)))
            .collect();
        if let Some(last) = lines.last_mut() {
            last.spans.push(cursor);
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![Span::styled(text, style), cursor]))
    }
}

fn choice_content(value: &FieldValue, is_active: bool) -> Paragraph<'static> {
    let unset = matches!(
        value,
        FieldValue::ProjectType(None) | FieldValue::Timeline(None)
    );
    let value_style = if unset {
        Style::default().fg(Color::DarkGray)
    } else if is_active {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let arrow_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Paragraph::new(Line::from(vec![
        Span::styled("◀ ", arrow_style),
        Span::styled(value.display_value(), value_style),
        Span::styled(" ▶", arrow_style),
    ]))
}

/// One red line under a control, or nothing
pub fn draw_error_line(frame: &mut Frame, area: Rect, message: Option<&str>) {
    if let Some(message) = message {
        let line = Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }
}
