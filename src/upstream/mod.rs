//! Upstream record store subsystem.
//!
//! # Data Flow
//! ```text
//! ArticleService
//!     → RecordStore (trait seam, injected at startup)
//!     → client.rs (HTTP calls to the store)
//!     → UpstreamResult<T>
//! ```
//!
//! # Design Decisions
//! - Any non-2xx answer is an error; 404 is reported as `NotFound`
//! - No retries; one failure is surfaced to the caller immediately
//! - Stored records are passed through as JSON, the gateway never reshapes them

pub mod client;

use std::future::Future;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::articles::Article;

pub use client::HttpRecordStore;

/// Errors that can occur while talking to the record store.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The store has no such resource.
    #[error("resource not found upstream")]
    NotFound,

    /// The store answered with a non-success status.
    #[error("upstream responded with status {0}")]
    Status(reqwest::StatusCode),

    /// Connection, timeout or body decoding failure.
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A request URL could not be built from the base URL.
    #[error("invalid upstream URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type for record store operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Operations the gateway needs from the record store.
pub trait RecordStore: Send + Sync + 'static {
    /// Fetch one article record.
    fn get_article(&self, id: &str) -> impl Future<Output = UpstreamResult<Value>> + Send;

    /// Confirm an article exists. Any 2xx answer counts, whatever its body.
    fn article_exists(&self, id: &str) -> impl Future<Output = UpstreamResult<()>> + Send;

    /// Apply a partial update and return the stored record.
    fn patch_article(
        &self,
        id: &str,
        fields: &Map<String, Value>,
    ) -> impl Future<Output = UpstreamResult<Value>> + Send;

    /// Confirm a user exists. The user record itself is never read.
    fn get_user(&self, id: &str) -> impl Future<Output = UpstreamResult<()>> + Send;

    /// All article records owned by a user.
    fn list_articles_by_owner(
        &self,
        owner_id: &str,
    ) -> impl Future<Output = UpstreamResult<Vec<Value>>> + Send;

    /// Persist a fully assembled article.
    fn create_article(&self, article: &Article) -> impl Future<Output = UpstreamResult<()>> + Send;
}
