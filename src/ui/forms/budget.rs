//! Budget slider

use super::field_renderer::{border_style, draw_error_line, split_error_row};
use crate::state::{describe_budget, tier_for, BudgetRange, BudgetTier, FieldError, FieldSpec};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Draw the budget control: value, gauge, bounds, tiers and description
pub fn draw_budget(
    frame: &mut Frame,
    area: Rect,
    spec: &FieldSpec,
    range: &BudgetRange,
    value: u32,
    error: Option<&FieldError>,
    is_active: bool,
) {
    let (field_area, error_area) = split_error_row(area);

    let block = Block::default()
        .title(format!(" {} ", spec.label))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, error.is_some()));
    let inner = block.inner(field_area);
    frame.render_widget(block, field_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // value
            Constraint::Length(1), // gauge
            Constraint::Length(1), // bounds
            Constraint::Length(1), // tiers
            Constraint::Length(1), // description
            Constraint::Min(0),
        ])
        .split(inner);

    let accent = if is_active { Color::Cyan } else { Color::Gray };
    let arrows = if is_active { "◀ ▶ to adjust" } else { "" };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                range.format(value),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(arrows, Style::default().fg(Color::DarkGray)),
        ])),
        rows[0],
    );

    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(accent).bg(Color::Black))
            .ratio(range.position(value))
            .label(""),
        rows[1],
    );

    let low = format!("${}", range.min);
    let high = format!("${}+", range.max);
    let gap = (rows[2].width as usize).saturating_sub(low.len() + high.len());
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(low, Style::default().fg(Color::DarkGray)),
            Span::raw(" ".repeat(gap)),
            Span::styled(high, Style::default().fg(Color::DarkGray)),
        ])),
        rows[2],
    );

    let current = tier_for(value);
    let mut tier_spans = Vec::new();
    for tier in BudgetTier::ALL {
        let style = if tier == current {
            Style::default()
                .fg(Color::Black)
                .bg(accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        tier_spans.push(Span::styled(
            format!(" {} {} ", tier.label(), tier.range_label()),
            style,
        ));
        tier_spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(tier_spans)), rows[3]);

    frame.render_widget(
        Paragraph::new(Span::styled(
            describe_budget(value),
            Style::default().fg(Color::Gray),
        )),
        rows[4],
    );

    draw_error_line(frame, error_area, error.map(|e| e.to_string()).as_deref());
}
