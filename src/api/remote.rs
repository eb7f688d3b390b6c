//! HTTP data source backed by the remote JSON service
//!
//! Every call is a single GET with no retry and no timeout. Filtering by id
//! happens client-side in [`DataAccess`](super::DataAccess), so most calls
//! pull the whole collection.

use super::{Author, Comment, DataSource, Employee, FetchError, Post};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Default service root (JSONPlaceholder)
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";

/// Data source that talks to the remote service over reqwest
pub struct RemoteSource {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteSource {
    /// Create a source rooted at `base_url` (trailing slash optional)
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("postboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::debug!(base_url = %base_url, "Remote data source ready");

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base}{path}` and decode a JSON array
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::trace!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        // Read the body first so decode failures carry the serde error
        let bytes = response
            .bytes()
            .await
            .map_err(|source| FetchError::Network {
                url: url.clone(),
                source,
            })?;

        serde_json::from_slice(&bytes).map_err(|source| FetchError::Decode { url, source })
    }
}

#[async_trait]
impl DataSource for RemoteSource {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn employees(&self) -> Result<Vec<Employee>, FetchError> {
        self.get_list("/users").await
    }

    async fn posts(&self) -> Result<Vec<Post>, FetchError> {
        self.get_list("/posts").await
    }

    async fn authors(&self, employee_id: u64) -> Result<Vec<Author>, FetchError> {
        self.get_list(&format!("/users?id={}", employee_id)).await
    }

    async fn comments(&self) -> Result<Vec<Comment>, FetchError> {
        self.get_list("/comments").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    /// Serve `router` on an ephemeral port, return its base URL
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn users() -> Value {
        json!([
            {"id": 1, "name": "Leanne Graham", "company": {"name": "Romaguera-Crona", "catchPhrase": "Multi-layered"}},
            {"id": 2, "name": "Ervin Howell", "company": {"name": "Deckow-Crist", "catchPhrase": "Proactive"}}
        ])
    }

    fn fixture_router() -> Router {
        Router::new()
            .route(
                "/users",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    let all = users();
                    match q.get("id") {
                        Some(id) => {
                            let filtered: Vec<Value> = all
                                .as_array()
                                .unwrap()
                                .iter()
                                .filter(|u| u["id"].to_string() == *id)
                                .cloned()
                                .collect();
                            Json(Value::Array(filtered))
                        }
                        None => Json(all),
                    }
                }),
            )
            .route(
                "/posts",
                get(|| async {
                    Json(json!([
                        {"userId": 1, "id": 10, "title": "T", "body": "B"},
                        {"userId": 2, "id": 11, "title": "U", "body": "C"}
                    ]))
                }),
            )
            .route("/comments", get(|| async { "<html>not json</html>" }))
    }

    #[tokio::test]
    async fn test_employees_and_posts_decode() {
        let base = serve(fixture_router()).await;
        let source = RemoteSource::new(format!("{}/", base)).unwrap();
        assert_eq!(source.base_url(), base);

        let employees = source.employees().await.unwrap();
        assert_eq!(employees.len(), 2);
        assert_eq!(employees[1].name, "Ervin Howell");

        let posts = source.posts().await.unwrap();
        assert_eq!(posts[0].id, 10);
        assert_eq!(posts[1].employee_id, 2);
    }

    #[tokio::test]
    async fn test_author_lookup_uses_id_query() {
        let base = serve(fixture_router()).await;
        let source = RemoteSource::new(base).unwrap();

        let authors = source.authors(2).await.unwrap();
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].company.name, "Deckow-Crist");
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let base = serve(fixture_router()).await;
        let source = RemoteSource::new(base).unwrap();

        let err = source.comments().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_missing_route_is_status_error() {
        let base = serve(Router::new()).await;
        let source = RemoteSource::new(base).unwrap();

        match source.posts().await {
            Err(FetchError::Status { status, url }) => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/posts"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        // Bind then drop to get a port nobody is listening on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = RemoteSource::new(format!("http://{}", addr)).unwrap();
        let err = source.employees().await.unwrap_err();
        assert!(matches!(err, FetchError::Network { .. }), "got {err:?}");
    }
}
