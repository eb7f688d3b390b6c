//! Render pipeline: records in, detached node fragments out
//!
//! Nothing here touches the live document except [`populate_selector`].
//! Post views are built off-tree so the orchestrator can decide, after all
//! the fetching is done, whether the result is still wanted.

use super::factory::{make_labeled_node, make_option_nodes};
use crate::api::{Comment, DataAccess, Employee, Post};
use crate::dom::{Document, Node, NodeKind, POST_ID_ATTR};

/// Toggle label while the panel is hidden
pub const SHOW_LABEL: &str = "Show Comments";
/// Toggle label while the panel is visible
pub const HIDE_LABEL: &str = "Hide Comments";
/// Class carried by every comment panel
pub const PANEL_CLASS: &str = "comments";
/// Visibility class: present = hidden
pub const HIDDEN_CLASS: &str = "hide";
/// Marker class on the empty-state message
pub const PLACEHOLDER_CLASS: &str = "default-text";
pub const PLACEHOLDER_TEXT: &str = "Select an Employee to display their posts.";

/// What a render pass produced; always exactly one of the two
#[derive(Debug, Clone)]
pub enum RenderedView {
    /// One `article` per post
    Posts(Vec<Node>),
    /// Empty-state message
    Placeholder(Node),
}

impl RenderedView {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    /// Top-level nodes this view will add
    pub fn len(&self) -> usize {
        match self {
            Self::Posts(nodes) => nodes.len(),
            Self::Placeholder(_) => 1,
        }
    }

    /// Append into `container`; returns the number of top-level nodes added
    pub fn mount(self, container: &mut Node) -> usize {
        match self {
            Self::Posts(nodes) => {
                let count = nodes.len();
                container.append_all(nodes);
                count
            }
            Self::Placeholder(node) => {
                container.append(node);
                1
            }
        }
    }
}

/// One `article` per comment: name, body, "From: {email}"
pub fn build_comment_fragment(comments: Option<&[Comment]>) -> Option<Vec<Node>> {
    let comments = comments?;
    Some(
        comments
            .iter()
            .map(|comment| {
                let mut article = Node::new(NodeKind::Article);
                article.append_all([
                    make_labeled_node(NodeKind::H3, comment.name.clone(), ""),
                    make_labeled_node(NodeKind::P, comment.body.clone(), ""),
                    make_labeled_node(NodeKind::P, format!("From: {}", comment.email), ""),
                ]);
                article
            })
            .collect(),
    )
}

/// Hidden `section.comments` tagged with `post_id`, holding its comments
pub async fn build_comment_panel(data: &DataAccess, post_id: u64) -> Option<Node> {
    if post_id == 0 {
        return None;
    }

    let mut section = Node::new(NodeKind::Section);
    section.set_data(POST_ID_ATTR, post_id.to_string());
    section.add_class(PANEL_CLASS);
    section.add_class(HIDDEN_CLASS);

    let comments = data.list_comments_for_post(post_id).await;
    if let Some(fragment) = build_comment_fragment(comments.as_deref()) {
        section.append_all(fragment);
    }
    Some(section)
}

/// One `article` per post, in input order
///
/// Author and comments for a post are fetched together; the next post waits
/// until both are in.
pub async fn build_post_fragment(data: &DataAccess, posts: Option<&[Post]>) -> Option<Vec<Node>> {
    let posts = posts?;
    let mut fragment = Vec::with_capacity(posts.len());

    for post in posts {
        let mut article = Node::new(NodeKind::Article);
        article.append_all([
            make_labeled_node(NodeKind::H2, post.title.clone(), ""),
            make_labeled_node(NodeKind::P, post.body.clone(), ""),
            make_labeled_node(NodeKind::P, format!("Post ID: {}", post.id), ""),
        ]);

        let (author, panel) = futures::join!(
            data.get_author(post.employee_id),
            build_comment_panel(data, post.id)
        );

        let (summary, catch_phrase) = match author {
            Some(author) => (author.summary(), author.company.catch_phrase),
            None => ("Author: unknown".to_string(), String::new()),
        };
        article.append(make_labeled_node(NodeKind::P, summary, ""));
        article.append(make_labeled_node(NodeKind::P, catch_phrase, ""));

        let mut button = make_labeled_node(NodeKind::Button, SHOW_LABEL, "");
        button.set_data(POST_ID_ATTR, post.id.to_string());
        article.append(button);

        if let Some(panel) = panel {
            article.append(panel);
        }
        fragment.push(article);
    }

    Some(fragment)
}

/// Posts view when there are posts, placeholder otherwise
pub async fn render_view(data: &DataAccess, posts: Option<&[Post]>) -> RenderedView {
    match posts {
        Some(posts) if !posts.is_empty() => {
            let nodes = build_post_fragment(data, Some(posts))
                .await
                .unwrap_or_default();
            RenderedView::Posts(nodes)
        }
        _ => RenderedView::Placeholder(make_labeled_node(
            NodeKind::P,
            PLACEHOLDER_TEXT,
            PLACEHOLDER_CLASS,
        )),
    }
}

/// Append one option per employee to the selector; returns how many
pub fn populate_selector(document: &mut Document, employees: Option<&[Employee]>) -> Option<usize> {
    let options = make_option_nodes(employees)?;
    let count = options.len();
    document.selector_mut().append_all(options);
    Some(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FixtureSource;
    use std::sync::Arc;

    fn data(source: FixtureSource) -> DataAccess {
        DataAccess::new(Arc::new(source))
    }

    fn texts(node: &Node) -> Vec<&str> {
        node.children().iter().map(Node::text).collect()
    }

    fn scenario_source() -> FixtureSource {
        FixtureSource::new()
            .with_employee(1, "A", "Acme", "Move fast")
            .with_post(10, 1, "T", "B")
            .with_comment(10, "X", "Y", "e@x.com")
    }

    #[test]
    fn test_populate_selector_one_option_per_employee() {
        let mut doc = Document::new();
        let employees = vec![
            Employee {
                id: 1,
                name: "A".to_string(),
            },
            Employee {
                id: 2,
                name: "B".to_string(),
            },
        ];

        assert_eq!(populate_selector(&mut doc, Some(&employees)), Some(2));
        let values: Vec<Option<&str>> = doc.selector().children().iter().map(Node::value).collect();
        assert_eq!(values, vec![Some("1"), Some("2")]);
        assert_eq!(texts(doc.selector()), vec!["A", "B"]);
    }

    #[test]
    fn test_populate_selector_absent_is_noop() {
        let mut doc = Document::new();
        assert_eq!(populate_selector(&mut doc, None), None);
        assert!(doc.selector().children().is_empty());
    }

    #[test]
    fn test_comment_fragment_shape() {
        let comments = vec![Comment {
            post_id: 10,
            name: "X".to_string(),
            body: "Y".to_string(),
            email: "e@x.com".to_string(),
        }];
        let fragment = build_comment_fragment(Some(&comments)).unwrap();
        assert_eq!(fragment.len(), 1);
        assert_eq!(fragment[0].kind(), NodeKind::Article);
        assert_eq!(texts(&fragment[0]), vec!["X", "Y", "From: e@x.com"]);

        assert!(build_comment_fragment(None).is_none());
    }

    #[tokio::test]
    async fn test_comment_panel_for_post() {
        let data = data(scenario_source());
        let panel = build_comment_panel(&data, 10).await.unwrap();

        assert_eq!(panel.kind(), NodeKind::Section);
        assert_eq!(panel.data(POST_ID_ATTR), Some("10"));
        assert!(panel.has_class(PANEL_CLASS));
        assert!(panel.has_class(HIDDEN_CLASS));
        assert_eq!(panel.children().len(), 1);
        assert_eq!(texts(&panel.children()[0]), vec!["X", "Y", "From: e@x.com"]);

        assert!(build_comment_panel(&data, 0).await.is_none());
    }

    #[tokio::test]
    async fn test_render_view_single_post_scenario() {
        let data = data(scenario_source());
        let posts = data.list_posts_for_employee(1).await;
        let view = render_view(&data, posts.as_deref()).await;

        let RenderedView::Posts(nodes) = view else {
            panic!("expected posts");
        };
        assert_eq!(nodes.len(), 1);

        let article = &nodes[0];
        let children = article.children();
        assert_eq!(
            texts(article)[..6],
            [
                "T",
                "B",
                "Post ID: 10",
                "Author: A with Acme",
                "Move fast",
                SHOW_LABEL
            ]
        );
        assert_eq!(children[5].kind(), NodeKind::Button);
        assert_eq!(children[5].data(POST_ID_ATTR), Some("10"));

        let panel = &children[6];
        assert_eq!(panel.kind(), NodeKind::Section);
        assert_eq!(panel.data(POST_ID_ATTR), Some("10"));
        assert!(panel.has_class(HIDDEN_CLASS));
    }

    #[tokio::test]
    async fn test_render_view_placeholder_for_empty_or_absent() {
        let data = data(scenario_source());

        for posts in [None, Some(Vec::new())] {
            let view = render_view(&data, posts.as_deref()).await;
            assert!(view.is_placeholder());
            assert_eq!(view.len(), 1);

            let mut main = Node::new(NodeKind::Main);
            assert_eq!(view.mount(&mut main), 1);
            assert_eq!(main.children().len(), 1);
            assert!(main.children()[0].has_class(PLACEHOLDER_CLASS));
            assert_eq!(main.children()[0].text(), PLACEHOLDER_TEXT);
            assert!(main.find(&|n| n.kind() == NodeKind::Article).is_none());
        }
    }

    #[tokio::test]
    async fn test_post_fragment_keeps_input_order() {
        let source = FixtureSource::new()
            .with_employee(1, "A", "Acme", "")
            .with_post(3, 1, "third", "")
            .with_post(1, 1, "first", "")
            .with_post(2, 1, "second", "");
        let data = data(source);
        let posts = data.list_posts_for_employee(1).await.unwrap();

        let nodes = build_post_fragment(&data, Some(&posts)).await.unwrap();
        let titles: Vec<&str> = nodes.iter().map(|a| a.children()[0].text()).collect();
        assert_eq!(titles, vec!["third", "first", "second"]);
    }

    #[tokio::test]
    async fn test_missing_author_renders_unknown() {
        let source = FixtureSource::new().with_post(5, 9, "orphan", "no owner");
        let data = data(source);
        let posts = data.list_posts_for_employee(9).await.unwrap();

        let nodes = build_post_fragment(&data, Some(&posts)).await.unwrap();
        assert_eq!(nodes[0].children()[3].text(), "Author: unknown");
        assert_eq!(nodes[0].children()[4].text(), "");
        // Panel still present, just empty
        assert!(nodes[0].children()[6].children().is_empty());
    }
}
