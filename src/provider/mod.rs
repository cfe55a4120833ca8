//! GIF providers: the external data sources the fetch controllers call.
//!
//! A provider answers two questions: what is trending, and what matches a
//! query.  An empty list means "no results"; an error means the call
//! failed and nothing partial is returned.

pub mod catalog;
pub mod giphy;

use async_trait::async_trait;

use crate::core::gif::GifList;
use crate::core::request::FetchRequest;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream answered {status}")]
    Status { status: reqwest::StatusCode },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("catalog unavailable: {0}")]
    Catalog(String),
}

#[async_trait]
pub trait GifProvider: Send + Sync {
    async fn fetch_trending(&self, limit: u32) -> Result<GifList, ProviderError>;

    async fn fetch_search(&self, limit: u32, query: &str) -> Result<GifList, ProviderError>;

    /// Route a request to the matching capability.
    async fn fetch(&self, request: &FetchRequest) -> Result<GifList, ProviderError> {
        let limit = request.limit().get();
        match request {
            FetchRequest::Trending { .. } => self.fetch_trending(limit).await,
            FetchRequest::Search { query, .. } => self.fetch_search(limit, query).await,
        }
    }
}
