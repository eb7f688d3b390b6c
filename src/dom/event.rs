// Events and listeners
//
// Listeners are shared closures. Removal compares them by pointer (like
// removeEventListener compares function identity), so whoever attaches a
// listener must keep the Arc around to detach it again.

use super::{Document, NodeId};
use std::sync::Arc;

/// Event types the document dispatches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Change,
}

/// An event aimed at one element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub kind: EventKind,
    pub target: NodeId,
    /// Selected value for `change` events
    pub value: Option<String>,
}

impl DomEvent {
    pub fn click(target: NodeId) -> Self {
        Self {
            kind: EventKind::Click,
            target,
            value: None,
        }
    }

    pub fn change(target: NodeId, value: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Change,
            target,
            value: Some(value.into()),
        }
    }
}

/// Event handler; receives the document so it can mutate the tree
pub type Listener = Arc<dyn Fn(&mut Document, &DomEvent) + Send + Sync>;
