//! In-memory element tree
//!
//! The [`Document`] is the UI surface the core mutates: a `select` container
//! for the employee selector and a `main` container for the post view, plus
//! a listener registry. Hosts (the terminal UI, headless mode, tests) read the
//! tree to draw it and feed user input back in through [`Document::dispatch`].
//!
//! There is no global document. Whoever needs the tree gets a reference to
//! it, usually through the orchestrator's lock.

mod event;
mod node;

pub use event::{DomEvent, EventKind, Listener};
pub use node::{Node, NodeId, NodeKind};

use std::collections::HashMap;
use std::sync::Arc;

/// Attribute name shared by toggle controls and comment panels
pub const POST_ID_ATTR: &str = "post-id";

/// The element tree plus its event listeners
pub struct Document {
    selector: Node,
    main: Node,
    listeners: HashMap<NodeId, Vec<(EventKind, Listener)>>,
}

impl Document {
    pub fn new() -> Self {
        let mut selector = Node::new(NodeKind::Select);
        selector.set_data("role", "selectMenu");
        Self {
            selector,
            main: Node::new(NodeKind::Main),
            listeners: HashMap::new(),
        }
    }

    /// Selector container (`select#selectMenu`)
    pub fn selector(&self) -> &Node {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut Node {
        &mut self.selector
    }

    /// Main view container
    pub fn main(&self) -> &Node {
        &self.main
    }

    pub fn main_mut(&mut self) -> &mut Node {
        &mut self.main
    }

    /// Look an element up by id anywhere in the document
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        let pred = |n: &Node| n.id() == id;
        self.selector.find(&pred).or_else(|| self.main.find(&pred))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let pred = |n: &Node| n.id() == id;
        if self.selector.find(&pred).is_some() {
            return self.selector.find_mut(&pred);
        }
        self.main.find_mut(&pred)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Listeners
    // ─────────────────────────────────────────────────────────────────────

    /// Register `listener` for `kind` events on `target`
    ///
    /// Registering the same Arc twice for the same event is a no-op, like
    /// `addEventListener` with an identical function.
    pub fn add_listener(&mut self, target: NodeId, kind: EventKind, listener: Listener) {
        let entry = self.listeners.entry(target).or_default();
        if entry
            .iter()
            .any(|(k, l)| *k == kind && Arc::ptr_eq(l, &listener))
        {
            return;
        }
        entry.push((kind, listener));
    }

    /// Remove a listener by identity; returns whether one was removed
    pub fn remove_listener(&mut self, target: NodeId, kind: EventKind, listener: &Listener) -> bool {
        let Some(entry) = self.listeners.get_mut(&target) else {
            return false;
        };
        let before = entry.len();
        entry.retain(|(k, l)| !(*k == kind && Arc::ptr_eq(l, listener)));
        let removed = entry.len() != before;
        if entry.is_empty() {
            self.listeners.remove(&target);
        }
        removed
    }

    /// Listeners registered for `kind` on `target`
    pub fn listener_count_on(&self, target: NodeId, kind: EventKind) -> usize {
        self.listeners
            .get(&target)
            .map(|entry| entry.iter().filter(|(k, _)| *k == kind).count())
            .unwrap_or(0)
    }

    /// Listeners of `kind` across the whole document
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .values()
            .flatten()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    /// Run every listener registered for the event's kind and target
    ///
    /// Returns how many ran. The listener list is snapshotted first, so a
    /// handler may add or remove listeners without affecting this dispatch.
    pub fn dispatch(&mut self, event: &DomEvent) -> usize {
        let handlers: Vec<Listener> = self
            .listeners
            .get(&event.target)
            .map(|entry| {
                entry
                    .iter()
                    .filter(|(k, _)| *k == event.kind)
                    .map(|(_, l)| Arc::clone(l))
                    .collect()
            })
            .unwrap_or_default();

        for handler in &handlers {
            handler(self, event);
        }
        handlers.len()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_listener(counter: Arc<AtomicUsize>) -> Listener {
        Arc::new(move |_doc: &mut Document, _ev: &DomEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_remove_requires_the_same_listener() {
        let mut doc = Document::new();
        let target = doc.main().id();
        let counter = Arc::new(AtomicUsize::new(0));

        let attached = counting_listener(counter.clone());
        doc.add_listener(target, EventKind::Click, attached.clone());

        // A structurally identical closure is a different listener
        let lookalike = counting_listener(counter.clone());
        assert!(!doc.remove_listener(target, EventKind::Click, &lookalike));
        assert_eq!(doc.listener_count(EventKind::Click), 1);

        assert!(doc.remove_listener(target, EventKind::Click, &attached));
        assert_eq!(doc.listener_count(EventKind::Click), 0);
    }

    #[test]
    fn test_duplicate_add_is_ignored_but_distinct_closures_stack() {
        let mut doc = Document::new();
        let target = doc.main().id();
        let counter = Arc::new(AtomicUsize::new(0));

        let listener = counting_listener(counter.clone());
        doc.add_listener(target, EventKind::Click, listener.clone());
        doc.add_listener(target, EventKind::Click, listener);
        assert_eq!(doc.listener_count_on(target, EventKind::Click), 1);

        doc.add_listener(target, EventKind::Click, counting_listener(counter.clone()));
        assert_eq!(doc.dispatch(&DomEvent::click(target)), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_dispatch_filters_by_kind() {
        let mut doc = Document::new();
        let target = doc.selector().id();
        let counter = Arc::new(AtomicUsize::new(0));
        doc.add_listener(target, EventKind::Change, counting_listener(counter.clone()));

        assert_eq!(doc.dispatch(&DomEvent::click(target)), 0);
        assert_eq!(doc.dispatch(&DomEvent::change(target, "2")), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_can_mutate_document() {
        let mut doc = Document::new();
        let mut p = Node::new(NodeKind::P);
        let p_id = p.id();
        p.set_text("before");
        doc.main_mut().append(p);

        let listener: Listener = Arc::new(move |doc: &mut Document, _ev: &DomEvent| {
            if let Some(node) = doc.node_mut(p_id) {
                node.set_text("after");
            }
        });
        doc.add_listener(p_id, EventKind::Click, listener);
        doc.dispatch(&DomEvent::click(p_id));

        assert_eq!(doc.node(p_id).unwrap().text(), "after");
    }
}
