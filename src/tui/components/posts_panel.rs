//! Posts panel: draws the main container of the document
//!
//! The tree is walked as-is. Comment sections carrying the hidden class are
//! skipped with everything under them, so what is on screen always matches
//! the panel state held in the document.

use super::scrollbar::render_scrollbar;
use crate::dom::{Document, Node, NodeId, NodeKind};
use crate::render::{HIDDEN_CLASS, PLACEHOLDER_CLASS};
use crate::tui::scroll::ScrollState;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Flattened lines plus the index of the line holding `selected`, if drawn
pub struct PostLines {
    pub lines: Vec<Line<'static>>,
    pub selected_line: Option<usize>,
}

/// Flatten the main container into display lines
pub fn post_lines(document: &Document, selected: Option<NodeId>) -> PostLines {
    let mut out = PostLines {
        lines: Vec::new(),
        selected_line: None,
    };
    for node in document.main().children() {
        push_node(&mut out, node, 0, selected);
    }
    out
}

fn push_node(out: &mut PostLines, node: &Node, depth: usize, selected: Option<NodeId>) {
    let indent = "  ".repeat(depth);

    match node.kind() {
        NodeKind::Section if node.has_class(HIDDEN_CLASS) => {}
        NodeKind::Section => {
            for child in node.children() {
                push_node(out, child, depth + 1, selected);
            }
        }
        NodeKind::Article => {
            for child in node.children() {
                push_node(out, child, depth, selected);
            }
            if depth == 0 {
                out.lines.push(Line::default());
            }
        }
        NodeKind::H2 => out.lines.push(Line::from(Span::styled(
            format!("{indent}{}", node.text()),
            Style::default().add_modifier(Modifier::BOLD),
        ))),
        NodeKind::H3 => out.lines.push(Line::from(Span::styled(
            format!("{indent}▸ {}", node.text()),
            Style::default().fg(Color::Cyan),
        ))),
        NodeKind::P if node.has_class(PLACEHOLDER_CLASS) => out.lines.push(Line::from(Span::styled(
            format!("{indent}{}", node.text()),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))),
        NodeKind::P => {
            if !node.text().is_empty() {
                out.lines.push(Line::from(format!("{indent}{}", node.text())));
            }
        }
        NodeKind::Button => {
            let is_selected = selected == Some(node.id());
            let style = if is_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Yellow)
            };
            if is_selected {
                out.selected_line = Some(out.lines.len());
            }
            out.lines.push(Line::from(vec![
                Span::raw(indent),
                Span::styled(format!("[ {} ]", node.text()), style),
            ]));
        }
        NodeKind::Select | NodeKind::Main | NodeKind::Option => {
            for child in node.children() {
                push_node(out, child, depth, selected);
            }
        }
    }
}

/// Fit the scroll to this frame's content
///
/// The selected toggle is only scrolled into view when `reveal` is set (the
/// cursor just moved); otherwise the offset PageUp/PageDown left stands.
pub fn sync_scroll(
    scroll: &mut ScrollState,
    total: usize,
    viewport: usize,
    selected_line: Option<usize>,
    reveal: bool,
) {
    scroll.update_dimensions(total, viewport);
    if let (true, Some(line)) = (reveal, selected_line) {
        scroll.ensure_visible(line);
    }
}

/// Render the posts view
pub fn render(
    f: &mut Frame,
    area: Rect,
    document: &Document,
    selected: Option<NodeId>,
    scroll: &mut ScrollState,
    focused: bool,
    reveal: bool,
) {
    let PostLines {
        lines,
        selected_line,
    } = post_lines(document, selected);

    let viewport = area.height.saturating_sub(2) as usize;
    sync_scroll(scroll, lines.len(), viewport, selected_line, reveal);

    let border = if focused { Color::Yellow } else { Color::DarkGray };
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(" Posts "),
        )
        .scroll((scroll.offset().min(u16::MAX as usize) as u16, 0));

    f.render_widget(paragraph, area);
    render_scrollbar(f, area, scroll);
}
