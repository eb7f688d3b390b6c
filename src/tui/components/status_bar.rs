// Status bar component
//
// One line at the bottom: selected employee, post and handler counts, the
// data source and the last fetch failure if there is one.

use crate::api::FetchStatus;
use crate::view::ViewState;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Everything the status line shows, gathered while the view lock is held
pub struct StatusInfo {
    pub uptime: String,
    pub source: &'static str,
    pub selected: Option<u64>,
    pub posts: usize,
    pub handlers: usize,
    pub fetch: FetchStatus,
}

impl StatusInfo {
    pub fn gather(uptime: String, source: &'static str, state: &ViewState, fetch: FetchStatus) -> Self {
        Self {
            uptime,
            source,
            selected: state.selected,
            posts: state.post_count(),
            handlers: state.handler_count(),
            fetch,
        }
    }

    /// Plain summary without the error part
    pub fn summary(&self) -> String {
        let employee = self
            .selected
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            " {} │ {} │ employee {} │ {} posts │ {} handlers │ q quit · Tab focus · Enter select ",
            self.uptime, self.source, employee, self.posts, self.handlers
        )
    }
}

pub fn render(f: &mut Frame, area: Rect, info: &StatusInfo) {
    let mut spans = vec![Span::styled(
        info.summary(),
        Style::default().fg(Color::Black).bg(Color::Gray),
    )];
    if let Some(err) = &info.fetch.last_error {
        spans.push(Span::styled(
            format!(" ✗ {} ({} failed) ", err, info.fetch.failures),
            Style::default().fg(Color::White).bg(Color::Red),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
