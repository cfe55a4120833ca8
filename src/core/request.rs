//! What a fetch asks the provider for.

use std::fmt;
use std::num::NonZeroU32;

/// Result bound used by both the trending and the search views.
pub const DEFAULT_LIMIT: NonZeroU32 = match NonZeroU32::new(20) {
    Some(n) => n,
    None => unreachable!(),
};

/// Which of the two provider capabilities a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Trending,
    Search,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Trending => f.write_str("trending"),
            RequestKind::Search => f.write_str("search"),
        }
    }
}

/// One provider request.  A search request always carries a non-empty
/// query; the constructor refuses to build one otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    Trending { limit: NonZeroU32 },
    Search { limit: NonZeroU32, query: String },
}

impl FetchRequest {
    pub fn trending(limit: NonZeroU32) -> Self {
        FetchRequest::Trending { limit }
    }

    /// `None` for an empty query; such submissions are never started.
    pub fn search(limit: NonZeroU32, query: impl Into<String>) -> Option<Self> {
        let query = query.into();
        if query.is_empty() {
            return None;
        }
        Some(FetchRequest::Search { limit, query })
    }

    pub fn kind(&self) -> RequestKind {
        match self {
            FetchRequest::Trending { .. } => RequestKind::Trending,
            FetchRequest::Search { .. } => RequestKind::Search,
        }
    }

    pub fn limit(&self) -> NonZeroU32 {
        match self {
            FetchRequest::Trending { limit } | FetchRequest::Search { limit, .. } => *limit,
        }
    }
}
