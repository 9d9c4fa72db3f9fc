//! Intake wizard overlay: header with progress, step body and button row

use super::components::{render_button, wrap_text, ButtonStyle, BUTTON_HEIGHT};
use super::forms::{
    draw_attachment_input, draw_attachment_list, draw_budget, draw_error_line, draw_field,
    field_height,
};
use super::layout::centered_rect;
use crate::state::{
    field_spec, Control, FieldKey, FieldKind, IntakeOverlay, Wizard, WizardButton, WizardStep,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

const HEADER_HEIGHT: u16 = 4;

/// Draw the overlay on top of `area`
pub fn draw(frame: &mut Frame, area: Rect, overlay: &IntakeOverlay) {
    let frame_area = centered_rect(80, 94, area);
    frame.render_widget(Clear, frame_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Start Your Project ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(frame_area);
    frame.render_widget(block, frame_area);

    let wizard = &overlay.wizard;
    if wizard.is_submitted() {
        draw_success(frame, inner, overlay.project_id());
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1), // submit error
            Constraint::Length(BUTTON_HEIGHT),
        ])
        .split(inner);

    draw_header(frame, chunks[0], wizard, overlay.progress_ratio());
    draw_step(frame, chunks[1], wizard);
    draw_error_line(frame, chunks[2], wizard.submit_error());
    draw_buttons(frame, chunks[3], wizard);
}

fn draw_header(frame: &mut Frame, area: Rect, wizard: &Wizard, ratio: f64) {
    let step = wizard.step();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let left = format!(" Step {} of {}", step.number(), WizardStep::COUNT);
    let right = format!("{}% Complete ", step.progress_percent());
    let gap = (rows[0].width as usize).saturating_sub(left.len() + right.len());
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(left, Style::default().fg(Color::Gray)),
            Span::raw(" ".repeat(gap)),
            Span::styled(right, Style::default().fg(Color::Gray)),
        ])),
        rows[0],
    );

    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
            .ratio(ratio)
            .label(""),
        rows[1],
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", step.title()),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        rows[2],
    );
}

fn control_height(control: Control) -> Constraint {
    match control {
        Control::Field(key) => Constraint::Length(field_height(field_spec(key))),
        Control::AttachmentInput => Constraint::Length(4),
        Control::AttachmentList => Constraint::Min(3),
        Control::Buttons => Constraint::Length(0),
    }
}

fn draw_step(frame: &mut Frame, area: Rect, wizard: &Wizard) {
    let controls: Vec<Control> = wizard
        .step()
        .controls()
        .iter()
        .copied()
        .filter(|c| *c != Control::Buttons)
        .collect();

    let mut constraints: Vec<Constraint> = controls.iter().map(|c| control_height(*c)).collect();
    constraints.push(Constraint::Min(0));
    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let active = wizard.active_control();
    for (control, area) in controls.iter().zip(areas.iter()) {
        let is_active = *control == active && wizard.is_editing();
        match *control {
            Control::Field(key) => draw_form_field(frame, *area, wizard, key, is_active),
            Control::AttachmentInput => draw_attachment_input(
                frame,
                *area,
                wizard.attachments(),
                &wizard.attachment_input,
                is_active,
            ),
            Control::AttachmentList => draw_attachment_list(
                frame,
                *area,
                wizard.attachments(),
                wizard.attachment_selected,
                is_active,
            ),
            Control::Buttons => {}
        }
    }
}

fn draw_form_field(frame: &mut Frame, area: Rect, wizard: &Wizard, key: FieldKey, is_active: bool) {
    let spec = field_spec(key);
    let error = wizard.errors().get(key);
    match spec.kind {
        FieldKind::Budget => draw_budget(
            frame,
            area,
            spec,
            wizard.budget_range(),
            wizard.form().budget,
            error,
            is_active,
        ),
        _ => draw_field(
            frame,
            area,
            spec,
            &wizard.form().value(key),
            error,
            is_active,
        ),
    }
}

fn button_label(wizard: &Wizard, button: WizardButton) -> &'static str {
    match button {
        WizardButton::Previous => "Previous",
        WizardButton::Advance if wizard.is_submitting() => "Submitting...",
        WizardButton::Advance if wizard.step().is_last() => "Submit Project",
        WizardButton::Advance => "Next Step",
        WizardButton::Close => "Close",
    }
}

fn draw_buttons(frame: &mut Frame, area: Rect, wizard: &Wizard) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16),
            Constraint::Min(0),
            Constraint::Length(20),
            Constraint::Length(1),
            Constraint::Length(11),
        ])
        .split(area);

    let row_active = wizard.active_control() == Control::Buttons && wizard.is_editing();
    let selected = wizard.selected_button();
    let slots = [
        (WizardButton::Previous, chunks[0]),
        (WizardButton::Advance, chunks[2]),
        (WizardButton::Close, chunks[4]),
    ];

    for (button, slot) in slots {
        let enabled = match button {
            WizardButton::Previous => wizard.is_editing() && wizard.step().previous().is_some(),
            WizardButton::Advance => wizard.is_editing(),
            WizardButton::Close => wizard.can_close(),
        };
        let style = match button {
            WizardButton::Advance => ButtonStyle::Primary,
            _ => ButtonStyle::Secondary,
        };
        render_button(
            frame,
            slot,
            button_label(wizard, button),
            style,
            row_active && selected == button,
            enabled,
        );
    }
}

fn draw_success(frame: &mut Frame, area: Rect, project_id: Option<&str>) {
    let green = Style::default().fg(Color::Green);
    let body = "Thank you for providing your project details. We'll review your \
                requirements and get back to you within 24 hours.";

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("✓", green.add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(
            "Project Submitted Successfully!",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    let width = area.width.saturating_sub(8).max(20) as usize;
    lines.extend(
        wrap_text(body, width)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(Color::Gray)))),
    );
    lines.push(Line::from(""));
    for check in [
        "✓ Project details received",
        "✓ Team notification sent",
        "✓ Initial review scheduled",
    ] {
        lines.push(Line::from(Span::styled(check, green)));
    }
    if let Some(id) = project_id {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Reference: {id}"),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let height = (lines.len() as u16).min(area.height);
    let top = area.y + area.height.saturating_sub(height) / 2;
    let body_area = Rect {
        x: area.x,
        y: top,
        width: area.width,
        height,
    };
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        body_area,
    );
}
