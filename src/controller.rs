//! Interaction controller
//!
//! Owns the open/closed state of each comment panel (stored on the panel
//! node as the `hide` class) and keeps the toggle button label in step with
//! it. Also attaches and detaches the click handlers on toggle buttons as
//! the view is rebuilt.
//!
//! # Handler bookkeeping
//!
//! Listener removal matches by identity. A detach pass that builds new
//! closures removes nothing and leaves the old handlers attached, so every
//! rebuild would stack another handler per button and a click would flip
//! the panel twice. [`ToggleBindings`] keeps the exact `Arc` it attached,
//! keyed by post id, and detaches with that.

use crate::dom::{Document, DomEvent, EventKind, Listener, NodeId, NodeKind, POST_ID_ATTR};
use crate::render::{HIDDEN_CLASS, HIDE_LABEL, SHOW_LABEL};
use std::collections::HashMap;
use std::sync::Arc;

/// Panel state per post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

/// Current state of the panel for `post_id`, read from the tree
pub fn panel_visibility(document: &Document, post_id: u64) -> Option<Visibility> {
    let panel = document
        .main()
        .find_tagged(NodeKind::Section, POST_ID_ATTR, &post_id.to_string())?;
    Some(if panel.has_class(HIDDEN_CLASS) {
        Visibility::Hidden
    } else {
        Visibility::Visible
    })
}

/// Current label of the toggle button for `post_id`
pub fn toggle_label_text(document: &Document, post_id: u64) -> Option<&str> {
    document
        .main()
        .find_tagged(NodeKind::Button, POST_ID_ATTR, &post_id.to_string())
        .map(|button| button.text())
}

/// Flip the comment panel for `post_id`; returns the panel's id
pub fn toggle_visibility(document: &mut Document, post_id: u64) -> Option<NodeId> {
    if post_id == 0 {
        return None;
    }
    let panel = document
        .main_mut()
        .find_tagged_mut(NodeKind::Section, POST_ID_ATTR, &post_id.to_string())?;
    panel.toggle_class(HIDDEN_CLASS);
    Some(panel.id())
}

/// Flip the toggle button label for `post_id`; returns the button's id
///
/// The current text decides the next one. Panel state is not consulted.
pub fn toggle_label(document: &mut Document, post_id: u64) -> Option<NodeId> {
    if post_id == 0 {
        return None;
    }
    let button = document
        .main_mut()
        .find_tagged_mut(NodeKind::Button, POST_ID_ATTR, &post_id.to_string())?;
    let next = if button.text() == SHOW_LABEL {
        HIDE_LABEL
    } else {
        SHOW_LABEL
    };
    button.set_text(next);
    Some(button.id())
}

/// Click handler body: flip panel and label together
///
/// Returns `(panel, button)` ids, either of which may be missing from the
/// tree. `None` when the event is absent or the id is 0.
pub fn on_toggle_clicked(
    document: &mut Document,
    event: Option<&DomEvent>,
    post_id: u64,
) -> Option<(Option<NodeId>, Option<NodeId>)> {
    let event = event?;
    if post_id == 0 {
        return None;
    }

    if let Some(target) = document.node_mut(event.target) {
        target.mark_interacted();
    }

    let panel = toggle_visibility(document, post_id);
    let button = toggle_label(document, post_id);
    tracing::trace!(post_id, ?panel, ?button, "Toggled comments");
    Some((panel, button))
}

/// Side table of attached toggle handlers, keyed by post id
#[derive(Default)]
pub struct ToggleBindings {
    attached: HashMap<u64, (NodeId, Listener)>,
}

impl ToggleBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handlers currently attached through this table
    pub fn len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    /// Attach a click handler to every toggle button in the main view
    ///
    /// Buttons without a parseable, non-zero `data-post-id` are skipped. A
    /// post id that already has a handler gets the old one detached first.
    /// Returns how many handlers were attached.
    pub fn bind_all(&mut self, document: &mut Document) -> usize {
        let targets: Vec<(u64, NodeId)> = document
            .main()
            .find_all(&|n| n.kind() == NodeKind::Button)
            .into_iter()
            .filter_map(|button| {
                let post_id = button.data(POST_ID_ATTR)?.parse::<u64>().ok()?;
                (post_id != 0).then_some((post_id, button.id()))
            })
            .collect();

        for (post_id, node_id) in &targets {
            let post_id = *post_id;
            if let Some((old_node, old_handler)) = self.attached.remove(&post_id) {
                document.remove_listener(old_node, EventKind::Click, &old_handler);
            }

            let handler: Listener = Arc::new(move |doc: &mut Document, event: &DomEvent| {
                on_toggle_clicked(doc, Some(event), post_id);
            });
            document.add_listener(*node_id, EventKind::Click, handler.clone());
            self.attached.insert(post_id, (*node_id, handler));
        }

        tracing::debug!(count = targets.len(), "Bound toggle handlers");
        targets.len()
    }

    /// Detach every handler this table attached; returns how many were removed
    pub fn unbind_all(&mut self, document: &mut Document) -> usize {
        let mut removed = 0;
        for (post_id, (node_id, handler)) in self.attached.drain() {
            if document.remove_listener(node_id, EventKind::Click, &handler) {
                removed += 1;
            } else {
                tracing::debug!(post_id, "Toggle handler was already gone");
            }
        }
        removed
    }
}
