//! Headless mode: one selection, one outline dump
//!
//! Runs the same startup path as the TUI (initialize, then a change event on
//! the selector) but handles the single event inline and returns the
//! resulting document as text.

use crate::view::{RebuildOutcome, ViewOrchestrator};
use anyhow::Context;

/// Select `employee_id`, wait for the rebuild, return the document outline
pub async fn run_headless(view: &ViewOrchestrator, employee_id: u64) -> anyhow::Result<String> {
    let mut selections = view.initialize().await;

    view.select_employee(employee_id);
    let event = selections
        .recv()
        .await
        .context("selector change event was not delivered")?;

    match view.on_selection_changed(Some(&event)).await {
        Some(RebuildOutcome::Applied(summary)) => {
            tracing::info!(employee_id, mounted = summary.mounted, "Headless render complete");
        }
        Some(RebuildOutcome::Stale { .. }) => {
            tracing::warn!(employee_id, "Headless rebuild was superseded");
        }
        None => {
            tracing::warn!(employee_id, "Posts unavailable; showing the document as it was");
        }
    }

    let state = view.lock_state();
    Ok(format!(
        "{}{}",
        state.document.selector().outline(),
        state.document.main().outline()
    ))
}
