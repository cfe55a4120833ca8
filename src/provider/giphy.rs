//! Giphy v1 REST provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{GifProvider, ProviderError};
use crate::core::gif::{Gif, GifList};

pub const GIPHY_BASE_URL: &str = "https://api.giphy.com/v1/gifs";

pub struct GiphyProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    rating: String,
}

impl GiphyProvider {
    pub fn new(
        api_key: impl Into<String>,
        rating: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: GIPHY_BASE_URL.to_string(),
            api_key: api_key.into(),
            rating: rating.into(),
        })
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<GifList, ProviderError> {
        let url = format!("{}/{endpoint}", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("rating", self.rating.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status { status });
        }

        let body = response.bytes().await?;
        parse_response(&body)
    }
}

#[async_trait]
impl GifProvider for GiphyProvider {
    async fn fetch_trending(&self, limit: u32) -> Result<GifList, ProviderError> {
        let limit = limit.to_string();
        self.get("trending", &[("limit", limit.as_str())]).await
    }

    async fn fetch_search(&self, limit: u32, query: &str) -> Result<GifList, ProviderError> {
        let limit = limit.to_string();
        self.get("search", &[("limit", limit.as_str()), ("q", query)])
            .await
    }
}

// ───────────────────────────────────────── wire format ──────

#[derive(Debug, Deserialize)]
struct GiphyResponse {
    data: Vec<GiphyGif>,
}

#[derive(Debug, Deserialize)]
struct GiphyGif {
    id: String,
    #[serde(default)]
    title: String,
    images: GiphyImages,
}

#[derive(Debug, Deserialize)]
struct GiphyImages {
    fixed_width: Option<GiphyImage>,
    original: GiphyImage,
}

#[derive(Debug, Deserialize)]
struct GiphyImage {
    url: String,
}

/// Decode a Giphy list payload.  Any malformed item fails the whole call.
fn parse_response(body: &[u8]) -> Result<GifList, ProviderError> {
    let parsed: GiphyResponse =
        serde_json::from_slice(body).map_err(|e| ProviderError::Decode(e.to_string()))?;

    Ok(parsed
        .data
        .into_iter()
        .map(|item| {
            let preview = item
                .images
                .fixed_width
                .map(|img| img.url)
                .unwrap_or_else(|| item.images.original.url.clone());
            Gif::new(item.id, item.title, preview, item.images.original.url)
        })
        .collect())
}
