// In-memory data source
//
// Backs demo mode (POSTBOARD_DEMO=1) and the test suites. Behaves like the
// remote service: whole collections come back unfiltered, and `authors`
// honours the id query the way `/users?id=` does.

use super::{Author, Comment, Company, DataSource, Employee, FetchError, Post};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Debug, Default)]
pub struct FixtureSource {
    employees: Vec<Employee>,
    posts: Vec<Post>,
    authors: Vec<Author>,
    comments: Vec<Comment>,
    failing: AtomicBool,
    requests: AtomicUsize,
    /// Release signal the next `posts` call waits on
    posts_gate: Mutex<Option<Arc<Notify>>>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an employee; also registers a matching author record
    pub fn with_employee(mut self, id: u64, name: &str, company: &str, catch_phrase: &str) -> Self {
        self.employees.push(Employee {
            id,
            name: name.to_string(),
        });
        self.authors.push(Author {
            id,
            name: name.to_string(),
            company: Company {
                name: company.to_string(),
                catch_phrase: catch_phrase.to_string(),
            },
        });
        self
    }

    pub fn with_post(mut self, id: u64, employee_id: u64, title: &str, body: &str) -> Self {
        self.posts.push(Post {
            id,
            employee_id,
            title: title.to_string(),
            body: body.to_string(),
        });
        self
    }

    pub fn with_comment(mut self, post_id: u64, name: &str, body: &str, email: &str) -> Self {
        self.comments.push(Comment {
            post_id,
            name: name.to_string(),
            body: body.to_string(),
            email: email.to_string(),
        });
        self
    }

    /// Make every subsequent call fail (simulates the service going away)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of calls served so far, failed ones included
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Hold the next `posts` call until the returned signal is notified
    ///
    /// Lets tests finish a later selection before an earlier one.
    pub fn hold_next_posts(&self) -> Arc<Notify> {
        let release = Arc::new(Notify::new());
        *self
            .posts_gate
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(release.clone());
        release
    }

    fn serve<T: Clone>(&self, what: &str, items: &[T]) -> Result<Vec<T>, FetchError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(FetchError::Unavailable(format!("fixture {} offline", what)));
        }
        Ok(items.to_vec())
    }

    /// Small office used by demo mode
    pub fn demo() -> Self {
        Self::new()
            .with_employee(1, "Leanne Graham", "Romaguera-Crona", "Multi-layered client-server neural-net")
            .with_employee(2, "Ervin Howell", "Deckow-Crist", "Proactive didactic contingency")
            .with_employee(3, "Clementine Bauch", "Romaguera-Jacobson", "Face to face bifurcated interface")
            .with_post(1, 1, "sunt aut facere repellat", "quia et suscipit suscipit recusandae")
            .with_post(2, 1, "qui est esse", "est rerum tempore vitae sequi sint")
            .with_post(3, 2, "ea molestias quasi", "et iusto sed quo iure voluptatem")
            .with_post(4, 2, "eum et est occaecati", "ullam et saepe reiciendis voluptatem")
            .with_post(5, 2, "nesciunt quas odio", "repudiandae veniam quaerat sunt sed")
            .with_comment(1, "id labore ex et quam laborum", "laudantium enim quasi est", "Eliseo@gardner.biz")
            .with_comment(1, "quo vero reiciendis velit", "est natus enim nihil est", "Jayne_Kuhic@sydney.com")
            .with_comment(2, "et omnis dolorem", "harum non quasi et ratione", "Presley.Mueller@myrl.com")
            .with_comment(3, "alias odio sit", "non et atque occaecati", "Lew@alysha.tv")
            .with_comment(4, "vero eaque aliquid", "ut dolorum nostrum id quia", "Hayden@althea.biz")
    }
}

#[async_trait]
impl DataSource for FixtureSource {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn employees(&self) -> Result<Vec<Employee>, FetchError> {
        self.serve("employees", &self.employees)
    }

    async fn posts(&self) -> Result<Vec<Post>, FetchError> {
        let gate = self
            .posts_gate
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(release) = gate {
            release.notified().await;
        }
        self.serve("posts", &self.posts)
    }

    async fn authors(&self, employee_id: u64) -> Result<Vec<Author>, FetchError> {
        let matching: Vec<Author> = self
            .authors
            .iter()
            .filter(|a| a.id == employee_id)
            .cloned()
            .collect();
        self.serve("authors", &matching)
    }

    async fn comments(&self) -> Result<Vec<Comment>, FetchError> {
        self.serve("comments", &self.comments)
    }
}
