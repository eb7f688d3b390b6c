//! Fetch error type for data sources

use thiserror::Error;

/// Why a fetch produced no data
///
/// Only the [`DataSource`](super::DataSource) layer sees these.
/// [`DataAccess`](super::DataAccess) logs them and hands callers `None`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS or body transfer failed
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Service answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Body was not the JSON shape we expected
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Source refused the call (fixture switched to failing mode)
    #[error("{0}")]
    Unavailable(String),
}
