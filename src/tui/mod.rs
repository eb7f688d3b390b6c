// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks)
// - Drawing the shared document each frame
//
// Rebuilds run on their own tasks and swap the document under its lock; the
// loop just redraws whatever is there on every tick.

pub mod app;
pub mod components;
pub mod scroll;
pub mod ui;

use crate::logging::LogBuffer;
use crate::view::ViewOrchestrator;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// Run the TUI until the user quits
pub async fn run_tui(view: ViewOrchestrator, log_buffer: LogBuffer) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(log_buffer);
    let result = run_event_loop(&mut terminal, &mut app, &view).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on keyboard input and a redraw tick with tokio::select!, whichever
/// comes first.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    view: &ViewOrchestrator,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        let fetch = view.data().status();
        let source = view.data().source_name();
        {
            let state = view.lock_state();
            terminal
                .draw(|f| ui::draw(f, app, &state, source, fetch))
                .context("Failed to draw terminal")?;
        }

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, view, key_event);
                    }
                }
            } => {}

            // Periodic tick so finished rebuilds show up without a key press
            _ = tick_interval.tick() => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
fn handle_key_event(app: &mut App, view: &ViewOrchestrator, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Tab | KeyCode::BackTab => app.focus_next(),
        KeyCode::Up | KeyCode::Char('k') => {
            let state = view.lock_state();
            app.move_cursor(&state.document, -1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let state = view.lock_state();
            app.move_cursor(&state.document, 1);
        }
        KeyCode::PageUp => app.posts_scroll.page_up(),
        KeyCode::PageDown => app.posts_scroll.page_down(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let reached = app.activate(view);
            tracing::trace!(reached, focus = ?app.focus, "Activated");
        }
        _ => {}
    }
}
