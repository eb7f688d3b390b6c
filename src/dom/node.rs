//! Element nodes
//!
//! A deliberately small slice of the DOM: a tag, text content, a class list,
//! `data-*` attributes, an optional form value and owned children. Nodes can
//! be built detached (fragments) and mounted later; ids stay stable across
//! the move, so listeners registered against an id keep pointing at the same
//! element.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique element id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

impl NodeId {
    fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element kinds the views are built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Select,
    Main,
    Option,
    Article,
    Section,
    H2,
    H3,
    P,
    Button,
}

impl NodeKind {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Main => "main",
            Self::Option => "option",
            Self::Article => "article",
            Self::Section => "section",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::P => "p",
            Self::Button => "button",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One element in the tree
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    text: String,
    classes: Vec<String>,
    dataset: BTreeMap<String, String>,
    value: Option<String>,
    children: Vec<Node>,
    /// Set when a listener handled an event targeting this node
    interacted: bool,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            id: NodeId::next(),
            kind,
            text: String::new(),
            classes: Vec::new(),
            dataset: BTreeMap::new(),
            value: None,
            children: Vec::new(),
            interacted: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    // ─────────────────────────────────────────────────────────────────────
    // Content and attributes
    // ─────────────────────────────────────────────────────────────────────

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class if not already present (empty names are ignored)
    pub fn add_class(&mut self, class: &str) {
        if !class.is_empty() && !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Flip a class; returns whether it is present afterwards
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    /// `data-{key}` attribute
    pub fn data(&self, key: &str) -> Option<&str> {
        self.dataset.get(key).map(String::as_str)
    }

    pub fn set_data(&mut self, key: &str, value: impl Into<String>) {
        self.dataset.insert(key.to_string(), value.into());
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    pub fn is_interacted(&self) -> bool {
        self.interacted
    }

    pub fn mark_interacted(&mut self) {
        self.interacted = true;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Children
    // ─────────────────────────────────────────────────────────────────────

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn append(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn append_all(&mut self, children: impl IntoIterator<Item = Node>) {
        self.children.extend(children);
    }

    /// Remove every child, last first; returns how many were removed
    pub fn clear_children(&mut self) -> usize {
        let mut removed = 0;
        while self.children.pop().is_some() {
            removed += 1;
        }
        removed
    }

    // ─────────────────────────────────────────────────────────────────────
    // Queries (depth-first, document order, self included)
    // ─────────────────────────────────────────────────────────────────────

    pub fn find(&self, pred: &dyn Fn(&Node) -> bool) -> Option<&Node> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(pred))
    }

    pub fn find_mut(&mut self, pred: &dyn Fn(&Node) -> bool) -> Option<&mut Node> {
        if pred(self) {
            return Some(self);
        }
        for child in &mut self.children {
            if let Some(found) = child.find_mut(pred) {
                return Some(found);
            }
        }
        None
    }

    pub fn find_all(&self, pred: &dyn Fn(&Node) -> bool) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect_into(pred, &mut out);
        out
    }

    fn collect_into<'a>(&'a self, pred: &dyn Fn(&Node) -> bool, out: &mut Vec<&'a Node>) {
        if pred(self) {
            out.push(self);
        }
        for child in &self.children {
            child.collect_into(pred, out);
        }
    }

    /// Element of `kind` whose `data-{key}` equals `value`
    pub fn find_tagged(&self, kind: NodeKind, key: &str, value: &str) -> Option<&Node> {
        self.find(&|n| n.kind == kind && n.data(key) == Some(value))
    }

    pub fn find_tagged_mut(&mut self, kind: NodeKind, key: &str, value: &str) -> Option<&mut Node> {
        self.find_mut(&|n| n.kind == kind && n.data(key) == Some(value))
    }

    /// Every node in this subtree, self included
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_len).sum::<usize>()
    }

    /// Indented outline: `tag.class[data-k=v] "text"`, one node per line
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(0, &mut out);
        out
    }

    fn write_outline(&self, depth: usize, out: &mut String) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(self.kind.tag());
        for class in &self.classes {
            out.push('.');
            out.push_str(class);
        }
        for (k, v) in &self.dataset {
            out.push_str(&format!("[data-{}={}]", k, v));
        }
        if let Some(value) = &self.value {
            out.push_str(&format!("[value={}]", value));
        }
        if !self.text.is_empty() {
            out.push_str(&format!(" {:?}", self.text));
        }
        out.push('\n');
        for child in &self.children {
            child.write_outline(depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = Node::new(NodeKind::P);
        let b = Node::new(NodeKind::P);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_toggle_class_reports_presence() {
        let mut node = Node::new(NodeKind::Section);
        node.add_class("comments");
        assert!(node.toggle_class("hide"));
        assert!(node.has_class("hide"));
        assert!(!node.toggle_class("hide"));
        assert_eq!(node.classes(), &["comments".to_string()]);
    }

    #[test]
    fn test_empty_class_is_ignored() {
        let mut node = Node::new(NodeKind::P);
        node.add_class("");
        assert!(node.classes().is_empty());
    }

    #[test]
    fn test_find_tagged_searches_depth_first() {
        let mut root = Node::new(NodeKind::Main);
        let mut article = Node::new(NodeKind::Article);
        let mut button = Node::new(NodeKind::Button);
        button.set_data("post-id", "10");
        let button_id = button.id();
        article.append(button);
        root.append(article);

        let found = root.find_tagged(NodeKind::Button, "post-id", "10").unwrap();
        assert_eq!(found.id(), button_id);
        assert!(root.find_tagged(NodeKind::Section, "post-id", "10").is_none());

        root.find_tagged_mut(NodeKind::Button, "post-id", "10")
            .unwrap()
            .set_text("Show Comments");
        assert_eq!(root.find_all(&|n| n.text() == "Show Comments").len(), 1);
    }

    #[test]
    fn test_clear_children_counts_and_keeps_self() {
        let mut root = Node::new(NodeKind::Main);
        root.append_all([Node::new(NodeKind::P), Node::new(NodeKind::P)]);
        assert_eq!(root.subtree_len(), 3);
        assert_eq!(root.clear_children(), 2);
        assert_eq!(root.subtree_len(), 1);
    }

    #[test]
    fn test_outline_format() {
        let mut section = Node::new(NodeKind::Section);
        section.add_class("comments");
        section.set_data("post-id", "7");
        let mut p = Node::new(NodeKind::P);
        p.set_text("hi");
        section.append(p);

        assert_eq!(
            section.outline(),
            "section.comments[data-post-id=7]\n  p \"hi\"\n"
        );
    }
}
