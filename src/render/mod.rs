//! Element factory and render pipeline

pub mod factory;
mod pipeline;

pub use pipeline::{
    build_comment_fragment, build_comment_panel, build_post_fragment, populate_selector,
    render_view, RenderedView, HIDDEN_CLASS, HIDE_LABEL, PANEL_CLASS, PLACEHOLDER_CLASS,
    PLACEHOLDER_TEXT, SHOW_LABEL,
};
