//! Employee list: the selector's options as a navigable list

use crate::dom::Document;
use crate::tui::app::employee_options;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the options; `selected` is the employee whose posts are mounted
pub fn render(
    f: &mut Frame,
    area: Rect,
    document: &Document,
    cursor: usize,
    selected: Option<u64>,
    focused: bool,
) {
    let options = employee_options(document);
    let items: Vec<ListItem> = options
        .iter()
        .map(|(id, name)| {
            let marker = if selected == Some(*id) { "● " } else { "  " };
            ListItem::new(format!("{marker}{name}"))
        })
        .collect();

    let border = if focused { Color::Yellow } else { Color::DarkGray };
    let title = if options.is_empty() {
        " Employees (none loaded) "
    } else {
        " Employees "
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(title),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(if focused { Color::Yellow } else { Color::Gray })
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !options.is_empty() {
        state.select(Some(cursor.min(options.len() - 1)));
    }
    f.render_stateful_widget(list, area, &mut state);
}
