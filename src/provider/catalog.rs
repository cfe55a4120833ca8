//! Offline provider backed by a local JSON catalog.
//!
//! The file is an array of entries:
//!
//! ```json
//! [
//!   { "id": "cat-1", "title": "Dancing cat", "preview_url": "...", "url": "...",
//!     "tags": ["cat", "dance"], "trending": 1 }
//! ]
//! ```
//!
//! `trending` is an optional rank (lower is hotter); unranked entries
//! follow ranked ones in file order.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use super::{GifProvider, ProviderError};
use crate::core::gif::{Gif, GifList};
use crate::core::search::{search_entries, SearchEntry};

#[derive(Debug, Deserialize)]
struct CatalogRecord {
    #[serde(flatten)]
    gif: Gif,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    trending: Option<u32>,
}

pub struct CatalogProvider {
    /// Search index, in file order.
    entries: Vec<SearchEntry>,
    /// Indices into `entries`, hottest first.
    trending_order: Vec<usize>,
}

impl CatalogProvider {
    pub fn load(path: &Path) -> Result<Self, ProviderError> {
        let raw = std::fs::read(path)
            .map_err(|e| ProviderError::Catalog(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &[u8]) -> Result<Self, ProviderError> {
        let records: Vec<CatalogRecord> =
            serde_json::from_slice(raw).map_err(|e| ProviderError::Catalog(e.to_string()))?;

        let mut ranked: Vec<(Option<u32>, usize)> = records
            .iter()
            .enumerate()
            .map(|(idx, rec)| (rec.trending, idx))
            .collect();
        // `None` sorts before `Some`, so flip it to put unranked last.
        ranked.sort_by_key(|&(rank, idx)| (rank.is_none(), rank, idx));

        let entries = records
            .into_iter()
            .map(|rec| SearchEntry::new(rec.gif, &rec.tags))
            .collect();

        Ok(Self {
            entries,
            trending_order: ranked.into_iter().map(|(_, idx)| idx).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[async_trait]
impl GifProvider for CatalogProvider {
    async fn fetch_trending(&self, limit: u32) -> Result<GifList, ProviderError> {
        Ok(self
            .trending_order
            .iter()
            .take(limit as usize)
            .map(|&idx| self.entries[idx].gif.clone())
            .collect())
    }

    async fn fetch_search(&self, limit: u32, query: &str) -> Result<GifList, ProviderError> {
        Ok(search_entries(&self.entries, query, limit as usize))
    }
}
