//! Data access layer
//!
//! Two levels:
//!
//! - [`DataSource`]: one method per remote resource, returns
//!   `Result<_, FetchError>`. Implemented by [`RemoteSource`] (HTTP) and
//!   [`FixtureSource`] (in-memory).
//! - [`DataAccess`]: the operations the render pipeline calls. Guards ids,
//!   filters client-side, and collapses every failure to `None` after
//!   logging it. The last failure is kept in [`FetchStatus`] so the host can
//!   still tell "empty" apart from "failed".

mod error;
mod fixture;
mod models;
mod remote;

pub use error::FetchError;
pub use fixture::FixtureSource;
pub use models::{Author, Comment, Company, Employee, Post};
pub use remote::{RemoteSource, DEFAULT_API_URL};

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Read-only view of the remote service
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Every employee, service order
    async fn employees(&self) -> Result<Vec<Employee>, FetchError>;

    /// Every post, service order
    async fn posts(&self) -> Result<Vec<Post>, FetchError>;

    /// User records matching `employee_id` (the service may ignore the filter)
    async fn authors(&self, employee_id: u64) -> Result<Vec<Author>, FetchError>;

    /// Every comment, service order
    async fn comments(&self) -> Result<Vec<Comment>, FetchError>;
}

/// Outcome bookkeeping for the most recent fetches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStatus {
    /// Message of the last failed fetch since the current selection began
    pub last_error: Option<String>,
    /// Failures since startup
    pub failures: u64,
}

/// Fail-silent query layer over a [`DataSource`]
#[derive(Clone)]
pub struct DataAccess {
    source: Arc<dyn DataSource>,
    status: Arc<Mutex<FetchStatus>>,
}

impl DataAccess {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            status: Arc::new(Mutex::new(FetchStatus::default())),
        }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Snapshot of the fetch bookkeeping
    pub fn status(&self) -> FetchStatus {
        self.status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Forget the last failure; the failure count is kept
    ///
    /// Called when a new selection starts. Successful fetches never clear
    /// the error, since author and comment fetches for one render race each
    /// other.
    pub fn reset_last_error(&self) {
        self.status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .last_error = None;
    }

    /// Collapse a fetch result to `Option`, recording failures
    fn settle<T>(&self, what: &str, result: Result<T, FetchError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                let mut status = self
                    .status
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                tracing::warn!(source = self.source.name(), "Failed to fetch {}: {}", what, e);
                status.failures += 1;
                status.last_error = Some(e.to_string());
                None
            }
        }
    }

    /// All employees, in service order
    pub async fn list_employees(&self) -> Option<Vec<Employee>> {
        let result = self.source.employees().await;
        self.settle("employees", result)
    }

    /// Posts whose `userId` equals `employee_id`, in service order
    pub async fn list_posts_for_employee(&self, employee_id: u64) -> Option<Vec<Post>> {
        if employee_id == 0 {
            return None;
        }
        let result = self.source.posts().await;
        let posts = self.settle("posts", result)?;
        Some(
            posts
                .into_iter()
                .filter(|p| p.employee_id == employee_id)
                .collect(),
        )
    }

    /// Author record for `employee_id`
    pub async fn get_author(&self, employee_id: u64) -> Option<Author> {
        if employee_id == 0 {
            return None;
        }
        let result = self.source.authors(employee_id).await;
        self.settle("author", result)?
            .into_iter()
            .find(|a| a.id == employee_id)
    }

    /// Comments whose `postId` equals `post_id`, in service order
    pub async fn list_comments_for_post(&self, post_id: u64) -> Option<Vec<Comment>> {
        if post_id == 0 {
            return None;
        }
        let result = self.source.comments().await;
        let comments = self.settle("comments", result)?;
        Some(
            comments
                .into_iter()
                .filter(|c| c.post_id == post_id)
                .collect(),
        )
    }
}
