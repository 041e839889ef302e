//! Content API client
//!
//! The content API is an external collaborator. Everything that needs it
//! takes a `ContentApi` so tests can substitute a fake.

mod prismic;

pub use prismic::PrismicClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::content::PostPage;

/// Errors talking to the content API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connect, timeout, TLS, ...)
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status
    #[error("{url} returned {status}")]
    Status { status: u16, url: String },

    /// The body was not the expected shape
    #[error("invalid response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The continuation URL does not point at the configured API
    #[error("refusing to follow foreign URL {0}")]
    ForeignUrl(String),

    /// The continuation reference is not a URL at all
    #[error("invalid URL {url:?}: {message}")]
    InvalidUrl { url: String, message: String },

    /// The API root did not advertise a master ref
    #[error("no master ref advertised by {0}")]
    NoMasterRef(String),
}

/// Parameters of the first-page query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Document type filter (`document.type` equals this)
    pub document_type: String,
    /// Results per page
    pub page_size: u32,
    /// Content ref; `None` means the master ref
    pub reference: Option<String>,
}

/// A paginated content API
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Query the first page of documents
    async fn query(&self, options: &QueryOptions) -> Result<PostPage, ApiError>;

    /// Fetch the page addressed by a continuation reference
    async fn fetch_page(&self, next_page: &str) -> Result<PostPage, ApiError>;
}
