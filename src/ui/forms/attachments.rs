//! Attachment input and staged file list

use super::field_renderer::{border_style, draw_error_line, split_error_row};
use crate::state::{AttachmentKind, AttachmentStager};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Path input plus the dismissible attachment error
pub fn draw_attachment_input(
    frame: &mut Frame,
    area: Rect,
    stager: &AttachmentStager,
    input: &str,
    is_active: bool,
) {
    let (input_area, error_area) = split_error_row(area);
    let limits = stager.limits;

    let cursor = Span::styled(
        if is_active { "▌" } else { "" },
        Style::default().fg(Color::Cyan),
    );
    let line = if input.is_empty() {
        Line::from(vec![
            cursor,
            Span::styled(
                "Type a path and press Enter, or drop files here",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else {
        Line::from(vec![Span::raw(input), cursor])
    };

    let block = Block::default()
        .title(" Attach Files (Optional) ")
        .title_bottom(Line::from(Span::styled(
            format!(
                " Images, PDF, Word documents, Text files · Max {} files, {}MB each ",
                limits.max_files, limits.max_size_mb
            ),
            Style::default().fg(Color::DarkGray),
        )))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, stager.error().is_some()));
    frame.render_widget(Paragraph::new(line).block(block), input_area);

    let message = stager.error().map(|e| format!("{e}  (Esc to dismiss)"));
    draw_error_line(frame, error_area, message.as_deref());
}

/// Staged files with size and type marker
pub fn draw_attachment_list(
    frame: &mut Frame,
    area: Rect,
    stager: &AttachmentStager,
    selected: usize,
    is_active: bool,
) {
    let files = stager.files();
    let title = if is_active && !files.is_empty() {
        format!(" Uploaded Files ({}) · d to remove ", files.len())
    } else {
        format!(" Uploaded Files ({}) ", files.len())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_active, false));

    if files.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No files attached",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = files
        .iter()
        .map(|file| {
            let (icon, color) = match file.kind() {
                AttachmentKind::Image => ("IMG", Color::Blue),
                AttachmentKind::Pdf => ("PDF", Color::Red),
                AttachmentKind::Other => ("DOC", Color::Gray),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("[{icon}] "), Style::default().fg(color)),
                Span::raw(file.name.clone()),
                Span::styled(
                    format!("  {}", file.display_size()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default();
    if is_active {
        state.select(Some(selected.min(files.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
