// TUI application state
//
// Focus, cursors and scroll positions. The posts themselves live in the
// shared document; App only remembers where the user is pointing and turns
// key presses into DOM events on that document.

use super::components::logs_panel::LogsPanel;
use super::scroll::ScrollState;
use crate::dom::{Document, DomEvent, NodeId, NodeKind, POST_ID_ATTR};
use crate::logging::LogBuffer;
use crate::view::ViewOrchestrator;
use std::time::Instant;

/// Which panel receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Employees,
    Posts,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Employees => Focus::Posts,
            Focus::Posts => Focus::Employees,
        }
    }
}

/// Selector options as (employee id, label), document order
pub fn employee_options(document: &Document) -> Vec<(u64, String)> {
    document
        .selector()
        .children()
        .iter()
        .filter(|n| n.kind() == NodeKind::Option)
        .filter_map(|n| Some((n.value()?.parse().ok()?, n.text().to_string())))
        .collect()
}

/// Toggle buttons in the main view, document order
pub fn toggle_targets(document: &Document) -> Vec<NodeId> {
    document
        .main()
        .find_all(&|n| n.kind() == NodeKind::Button && n.data(POST_ID_ATTR).is_some())
        .into_iter()
        .map(|n| n.id())
        .collect()
}

/// Main application state for the TUI
pub struct App {
    pub focus: Focus,

    /// Highlighted row in the employee list
    pub employee_cursor: usize,

    /// Index into [`toggle_targets`] of the highlighted toggle
    pub toggle_cursor: usize,

    pub posts_scroll: ScrollState,

    /// Scroll the highlighted toggle into view on the next draw
    pub reveal_toggle: bool,

    pub logs_panel: LogsPanel,

    /// Log buffer for the logs panel
    pub log_buffer: LogBuffer,

    /// Whether the app should quit
    pub should_quit: bool,

    /// When the app started (for uptime display)
    pub start_time: Instant,
}

impl App {
    pub fn new(log_buffer: LogBuffer) -> Self {
        Self {
            focus: Focus::default(),
            employee_cursor: 0,
            toggle_cursor: 0,
            posts_scroll: ScrollState::manual(),
            reveal_toggle: false,
            logs_panel: LogsPanel::new(),
            log_buffer,
            should_quit: false,
            start_time: Instant::now(),
        }
    }

    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
        self.reveal_toggle = self.focus == Focus::Posts;
    }

    /// Move the cursor of the focused panel by `delta`, clamped
    pub fn move_cursor(&mut self, document: &Document, delta: isize) {
        let (cursor, len) = match self.focus {
            Focus::Employees => (
                &mut self.employee_cursor,
                document.selector().children().len(),
            ),
            Focus::Posts => {
                self.reveal_toggle = true;
                (&mut self.toggle_cursor, toggle_targets(document).len())
            }
        };
        let max = len.saturating_sub(1) as isize;
        *cursor = (*cursor as isize + delta).clamp(0, max) as usize;
    }

    /// Highlighted toggle, if the view has any
    pub fn selected_toggle(&self, document: &Document) -> Option<NodeId> {
        let targets = toggle_targets(document);
        targets
            .get(self.toggle_cursor)
            .or_else(|| targets.last())
            .copied()
    }

    /// Enter/Space: pick the highlighted employee or click the highlighted toggle
    ///
    /// Returns the number of listeners the dispatched event reached.
    pub fn activate(&mut self, view: &ViewOrchestrator) -> usize {
        match self.focus {
            Focus::Employees => {
                let picked = {
                    let state = view.lock_state();
                    employee_options(&state.document)
                        .get(self.employee_cursor)
                        .map(|(id, _)| *id)
                };
                let Some(employee_id) = picked else {
                    return 0;
                };
                self.toggle_cursor = 0;
                self.posts_scroll.scroll_to_top();
                view.select_employee(employee_id)
            }
            Focus::Posts => {
                let mut state = view.lock_state();
                let Some(target) = self.selected_toggle(&state.document) else {
                    return 0;
                };
                state.document.dispatch(&DomEvent::click(target))
            }
        }
    }
}
