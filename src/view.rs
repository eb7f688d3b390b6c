//! View orchestrator
//!
//! Reacts to selector changes: fetch the employee's posts, render them
//! off-tree, then swap them into the main container and rebind the toggle
//! handlers in one locked step.
//!
//! # Overlapping selections
//!
//! Every selection takes a generation number when it starts. A rebuild only
//! mutates the document if its generation is still the newest when the
//! fetching is done; otherwise it is dropped. Last selection wins,
//! whichever fetch finishes first.

use crate::api::{DataAccess, Post};
use crate::controller::ToggleBindings;
use crate::dom::{Document, DomEvent, EventKind, Listener, NodeKind};
use crate::render::{populate_selector, render_view, RenderedView};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

/// Everything the host draws from, behind one lock
pub struct ViewState {
    pub document: Document,
    bindings: ToggleBindings,
    /// Employee whose posts are mounted (None before the first rebuild)
    pub selected: Option<u64>,
    /// Generation of the mounted view
    pub applied_generation: u64,
}

impl ViewState {
    fn new() -> Self {
        Self {
            document: Document::new(),
            bindings: ToggleBindings::new(),
            selected: None,
            applied_generation: 0,
        }
    }

    /// Toggle handlers currently attached
    pub fn handler_count(&self) -> usize {
        self.bindings.len()
    }

    /// Post articles in the main container
    pub fn post_count(&self) -> usize {
        self.document
            .main()
            .children()
            .iter()
            .filter(|n| n.kind() == NodeKind::Article)
            .count()
    }
}

/// What one applied rebuild did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebuildSummary {
    pub detached: usize,
    pub removed: usize,
    pub mounted: usize,
    pub attached: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildOutcome {
    Applied(RebuildSummary),
    /// A newer selection started while this one was fetching
    Stale { generation: u64, current: u64 },
}

#[derive(Clone)]
pub struct ViewOrchestrator {
    data: DataAccess,
    state: Arc<Mutex<ViewState>>,
    generation: Arc<AtomicU64>,
    default_employee: u64,
}

impl ViewOrchestrator {
    pub fn new(data: DataAccess, default_employee: u64) -> Self {
        Self {
            data,
            state: Arc::new(Mutex::new(ViewState::new())),
            generation: Arc::new(AtomicU64::new(0)),
            default_employee,
        }
    }

    pub fn data(&self) -> &DataAccess {
        &self.data
    }

    /// Lock the view state. Never hold the guard across an `.await`.
    pub fn lock_state(&self) -> MutexGuard<'_, ViewState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a new selection; older in-flight rebuilds become stale
    pub fn begin_selection(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Load employees, fill the selector, subscribe to its change event
    ///
    /// Change events are forwarded on the returned channel; hand it to
    /// [`run`](Self::run) or drain it yourself.
    pub async fn initialize(&self) -> mpsc::UnboundedReceiver<DomEvent> {
        let employees = self.data.list_employees().await;
        let (tx, rx) = mpsc::unbounded_channel();

        let mut state = self.lock_state();
        match populate_selector(&mut state.document, employees.as_deref()) {
            Some(count) => tracing::info!(count, "Selector populated"),
            None => tracing::warn!("No employees loaded; selector left empty"),
        }

        let selector = state.document.selector().id();
        let forward: Listener = Arc::new(move |_doc: &mut Document, event: &DomEvent| {
            if tx.send(event.clone()).is_err() {
                tracing::debug!("Selection channel closed, dropping change event");
            }
        });
        state
            .document
            .add_listener(selector, EventKind::Change, forward);

        rx
    }

    /// Consume selection events, one rebuild task per event
    pub async fn run(self, mut selections: mpsc::UnboundedReceiver<DomEvent>) {
        while let Some(event) = selections.recv().await {
            let this = self.clone();
            tokio::spawn(async move {
                this.on_selection_changed(Some(&event)).await;
            });
        }
        tracing::debug!("Selection stream ended");
    }

    /// Set the selector's value and fire its change event (what a user pick does)
    pub fn select_employee(&self, employee_id: u64) -> usize {
        let mut state = self.lock_state();
        let selector = state.document.selector_mut();
        selector.set_value(employee_id.to_string());
        let event = DomEvent::change(selector.id(), employee_id.to_string());
        state.document.dispatch(&event)
    }

    /// Selected id from a change event, falling back to the default employee
    fn resolve_employee(&self, event: &DomEvent) -> u64 {
        event
            .value
            .as_deref()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|id| *id != 0)
            .unwrap_or(self.default_employee)
    }

    /// Handle a selector change: fetch posts for the pick and rebuild
    pub async fn on_selection_changed(&self, event: Option<&DomEvent>) -> Option<RebuildOutcome> {
        let event = event?;
        let generation = self.begin_selection();
        let employee_id = self.resolve_employee(event);
        tracing::info!(employee_id, generation, "Selection changed");

        // Fetch errors shown from here on belong to this selection
        self.data.reset_last_error();

        let posts = self.data.list_posts_for_employee(employee_id).await?;
        Some(self.rebuild(generation, Some(employee_id), posts).await)
    }

    /// Replace the main view with `posts`; `None` if `posts` is absent
    ///
    /// Absent posts change nothing, not even the generation, so a selection
    /// still fetching keeps its claim on the view.
    pub async fn rebuild_view(&self, posts: Option<Vec<Post>>) -> Option<RebuildSummary> {
        let posts = posts?;
        let generation = self.begin_selection();
        match self.rebuild(generation, None, posts).await {
            RebuildOutcome::Applied(summary) => Some(summary),
            RebuildOutcome::Stale { .. } => None,
        }
    }

    async fn rebuild(
        &self,
        generation: u64,
        employee: Option<u64>,
        posts: Vec<Post>,
    ) -> RebuildOutcome {
        let rendered = render_view(&self.data, Some(&posts)).await;
        self.apply(generation, employee, rendered)
    }

    /// Swap `rendered` into the main container if `generation` is current
    ///
    /// Detach handlers, clear, mount, rebind: all under one lock, so nobody
    /// sees a half-built view.
    pub fn apply(
        &self,
        generation: u64,
        employee: Option<u64>,
        rendered: RenderedView,
    ) -> RebuildOutcome {
        let mut guard = self.lock_state();

        let current = self.current_generation();
        if generation != current {
            tracing::debug!(generation, current, "Discarding stale rebuild");
            return RebuildOutcome::Stale {
                generation,
                current,
            };
        }

        let state = &mut *guard;
        let detached = state.bindings.unbind_all(&mut state.document);
        let removed = state.document.main_mut().clear_children();
        let mounted = rendered.mount(state.document.main_mut());
        let attached = state.bindings.bind_all(&mut state.document);

        if employee.is_some() {
            state.selected = employee;
        }
        state.applied_generation = generation;

        let summary = RebuildSummary {
            detached,
            removed,
            mounted,
            attached,
        };
        tracing::debug!(?summary, "View rebuilt");
        RebuildOutcome::Applied(summary)
    }
}
