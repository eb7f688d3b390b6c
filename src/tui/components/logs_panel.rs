//! Logs panel component
//!
//! Shows the tail of the captured tracing output, color-coded by level,
//! pinned to the newest entry.

use super::scrollbar::render_scrollbar;
use crate::logging::{LogEntry, LogLevel};
use crate::tui::scroll::ScrollState;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Entries pulled from the buffer per frame
pub const VISIBLE_HISTORY: usize = 200;

pub struct LogsPanel {
    scroll: ScrollState,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::new(),
        }
    }

    /// Render the tail of `entries` into `area`
    pub fn render(&mut self, f: &mut Frame, area: Rect, entries: &[LogEntry]) {
        let viewport = area.height.saturating_sub(2) as usize;
        self.scroll.update_dimensions(entries.len(), viewport);

        let (start, end) = self.scroll.visible_range();
        let items: Vec<ListItem> = entries[start..end]
            .iter()
            .map(|entry| ListItem::new(format_log_entry(entry)).style(log_level_style(entry.level)))
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Logs "),
        );
        f.render_widget(list, area);
        render_scrollbar(f, area, &self.scroll);
    }
}

impl Default for LogsPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.display_line()
    )
}

fn log_level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(Color::Yellow),
        LogLevel::Info => Style::default().fg(Color::Green),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(Color::DarkGray),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_includes_level_and_fields() {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level: LogLevel::Warn,
            target: "postboard::api".to_string(),
            message: "Fetch failed".to_string(),
            fields: vec![("what".to_string(), "posts".to_string())],
        };
        let line = format_log_entry(&entry);
        assert!(line.contains("WARN "));
        assert!(line.ends_with("Fetch failed what=posts"));
    }
}
