//! Primitive node builders. No fetching, no business rules.

use crate::api::Employee;
use crate::dom::{Node, NodeKind};

/// Leaf node of `kind` holding `text`; `class` is added only when non-empty
pub fn make_labeled_node(kind: NodeKind, text: impl Into<String>, class: &str) -> Node {
    let mut node = Node::new(kind);
    node.set_text(text);
    node.add_class(class);
    node
}

/// One `option` per employee (`value` = id, text = name), input order
pub fn make_option_nodes(employees: Option<&[Employee]>) -> Option<Vec<Node>> {
    let employees = employees?;
    Some(
        employees
            .iter()
            .map(|employee| {
                let mut option = make_labeled_node(NodeKind::Option, employee.name.clone(), "");
                option.set_value(employee.id.to_string());
                option
            })
            .collect(),
    )
}
