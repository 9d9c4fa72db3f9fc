//! Layout components (host view, status bar)

use crate::app::App;
use crate::state::SERVICE_PACKAGES;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Split into content and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Rect of `percent_x` by `percent_y` centred in `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Draw the landing view the wizard opens over
pub fn draw_host(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.host_session.session();
    let accent = Style::default().fg(Color::Cyan);
    let muted = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "ALLBYTE DIGITAL",
            accent.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Websites and web applications for growing businesses",
            muted,
        )),
        Line::from(""),
    ];

    match &session.user {
        Some(user) => {
            let name = user.full_name.as_deref().unwrap_or(user.email.as_str());
            let plan = session
                .plan()
                .map(|p| format!(" · {} plan", p.name))
                .unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled("● ", Style::default().fg(Color::Green)),
                Span::raw(format!("Signed in as {name}{plan}")),
            ]));
        }
        None => lines.push(Line::from(vec![
            Span::styled("○ ", muted),
            Span::styled("Not signed in", muted),
        ])),
    }
    lines.push(Line::from(""));

    for package in SERVICE_PACKAGES.iter() {
        let active = session.plan().is_some_and(|p| p.price_id == package.price_id);
        let name_style = if active {
            accent.add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<14}", package.name), name_style),
            Span::styled(format!("{:>10}  ", package.price), accent),
            Span::styled(package.description, muted),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("Press "),
        Span::styled("Enter", accent.add_modifier(Modifier::BOLD)),
        Span::raw(" to start your project, "),
        Span::styled("q", accent.add_modifier(Modifier::BOLD)),
        Span::raw(" to quit"),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(muted)
        .title(" Allbyte Intake ");
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];

    spans.push(Span::styled(
        status_hints(app),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

fn status_hints(app: &App) -> String {
    use crate::platform::{NEXT_SHORTCUT, PREVIOUS_SHORTCUT, SUBMIT_SHORTCUT};

    let Some(overlay) = &app.state.overlay else {
        return "Enter:start project  r:reload settings  q:quit".to_string();
    };
    let wizard = &overlay.wizard;
    if wizard.is_submitting() {
        "Submitting...".to_string()
    } else if wizard.is_submitted() {
        "Enter/Esc:close".to_string()
    } else if wizard.step().is_last() {
        format!("Tab:next field  {PREVIOUS_SHORTCUT}:back  {SUBMIT_SHORTCUT}:submit  Esc:close")
    } else {
        format!("Tab:next field  {NEXT_SHORTCUT}:next step  {PREVIOUS_SHORTCUT}:back  Esc:close")
    }
}
