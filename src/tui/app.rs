use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::config::PickerConfig;

use super::state::{AppState, Session};
use super::ui::render;

/// Run the interactive picking session
#[instrument(skip_all, fields(input = %config.input.display(), mode = ?config.mode))]
pub fn run_tui(config: &PickerConfig) -> Result<()> {
    info!("starting TUI");

    let session = Session::open(config)?;
    let mut state = AppState::new(session);
    info!(images = state.session.browser().len(), "loaded images");

    if state.session.browser().is_empty() {
        state.status_message = Some(format!(
            "No images under {}",
            state.session.input_root().display()
        ));
    }

    // Setup terminal
    debug!("setting up terminal");
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Main loop
    let result = run_app(&mut terminal, &mut state);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("session ended");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, state))?;

        if event::poll(Duration::from_secs(1))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let KeyAction::Quit = handle_key(key.code, state) {
                        return Ok(());
                    }
                }
            }
        }

        // Drain pending events to avoid lag during rapid navigation
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let KeyAction::Quit = handle_key(key.code, state) {
                        return Ok(());
                    }
                }
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum KeyAction {
    Quit,
    Continue,
}

/// Handle a key press. Returns KeyAction indicating what to do next.
fn handle_key(code: KeyCode, state: &mut AppState) -> KeyAction {
    // Handle input dialog if active
    if let Some(ref mut dialog) = state.dialog {
        match code {
            KeyCode::Esc => state.close_dialog(),
            KeyCode::Enter => state.apply_dialog(),
            KeyCode::Backspace => dialog.backspace(),
            KeyCode::Delete => dialog.delete(),
            KeyCode::Left => dialog.move_cursor_left(),
            KeyCode::Right => dialog.move_cursor_right(),
            KeyCode::Home => dialog.move_cursor_home(),
            KeyCode::End => dialog.move_cursor_end(),
            KeyCode::Char(c) => dialog.insert_char(c),
            _ => {}
        }
        return KeyAction::Continue;
    }

    if state.show_help {
        // Any key closes help
        state.toggle_help();
        return KeyAction::Continue;
    }

    if let KeyCode::Char('q') | KeyCode::Esc = code {
        return if state.request_quit() {
            KeyAction::Quit
        } else {
            KeyAction::Continue
        };
    }
    state.confirm_quit = false;

    match code {
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => state.advance(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => state.retreat(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(digit) = c.to_digit(10) {
                state.toggle_album(digit as usize - 1);
            }
        }
        KeyCode::Char(' ') => state.toggle_picked(),
        KeyCode::Char('s') => state.save(),
        KeyCode::Char('S') => state.open_save_as_dialog(),
        KeyCode::Char('a') => state.open_add_album_dialog(),
        KeyCode::Char('r') => state.open_remove_album_dialog(),
        KeyCode::Char('o') => state.open_open_dialog(),
        KeyCode::Char('?') => state.toggle_help(),
        _ => {}
    }
    KeyAction::Continue
}
