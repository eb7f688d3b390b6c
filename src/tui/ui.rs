// UI layout
//
// ┌ Employees ┐┌ Posts ──────────────────┐
// │           ││                         │
// └───────────┘└─────────────────────────┘
// ┌ Logs ─────────────────────────────────┐
// └───────────────────────────────────────┘
//  status line

use super::app::{App, Focus};
use super::components::logs_panel::VISIBLE_HISTORY;
use super::components::status_bar::StatusInfo;
use super::components::{employee_list, posts_panel, status_bar};
use crate::api::FetchStatus;
use crate::view::ViewState;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// Draw one frame from the locked view state
pub fn draw(f: &mut Frame, app: &mut App, state: &ViewState, source: &'static str, fetch: FetchStatus) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Employees + posts
            Constraint::Length(8), // Logs - fixed height
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(20)])
        .split(chunks[0]);

    employee_list::render(
        f,
        top[0],
        &state.document,
        app.employee_cursor,
        state.selected,
        app.focus == Focus::Employees,
    );

    let selected_toggle = match app.focus {
        Focus::Posts => app.selected_toggle(&state.document),
        Focus::Employees => None,
    };
    posts_panel::render(
        f,
        top[1],
        &state.document,
        selected_toggle,
        &mut app.posts_scroll,
        app.focus == Focus::Posts,
        std::mem::take(&mut app.reveal_toggle),
    );

    let entries = app.log_buffer.recent(VISIBLE_HISTORY);
    app.logs_panel.render(f, chunks[1], &entries);

    let info = StatusInfo::gather(app.uptime(), source, state, fetch);
    status_bar::render(f, chunks[2], &info);
}
