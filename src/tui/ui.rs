use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::colors::{HEADER_COLOR, HELP_TEXT};
use super::state::AppState;
use super::widgets::{
    render_album_list, render_filmstrip, render_input_dialog, render_status_bar,
};

/// Main render function
pub fn render(frame: &mut Frame, state: &AppState) {
    let size = frame.area();

    // Header on top, status bar at bottom, content between
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    render_header(frame, main_chunks[0], state);
    render_filmstrip(frame, content_chunks[0], state);
    render_album_list(frame, content_chunks[1], state);
    render_status_bar(frame, main_chunks[2], state);

    if state.show_help {
        render_help_overlay(frame, size);
    }

    if let Some(ref dialog) = state.dialog {
        render_input_dialog(frame, size, dialog);
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![
        Span::styled(
            " imagepicker ",
            Style::default()
                .fg(HEADER_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(state.session.input_root().display().to_string()),
    ];
    match state.session.output() {
        Some(output) => spans.push(Span::styled(
            format!("  → {}", output.display()),
            Style::default().fg(HELP_TEXT),
        )),
        None => spans.push(Span::styled("  (not saving)", Style::default().fg(HELP_TEXT))),
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_text = r#"
  Key Bindings

  Navigation:
    l/→/n    Next image
    h/←/p    Previous image
    o        Open another directory or list

  Albums:
    1-9      Toggle current image in album
    a        Add album
    r        Remove album (directory kept)

  Picked list (--legacy):
    space    Toggle current image

  Other:
    s        Save
    S        Save to another file
    ?        Toggle help
    q/Esc    Quit (twice with unsaved picks)
"#;

    let help_width = 46;
    let help_height = 24;
    let x = (area.width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = Rect::new(x, y, help_width.min(area.width), help_height.min(area.height));

    // Clear the area behind the popup
    frame.render_widget(Clear, help_area);

    let help = Paragraph::new(help_text)
        .block(Block::default().borders(Borders::ALL).title(" Help "));

    frame.render_widget(help, help_area);
}
