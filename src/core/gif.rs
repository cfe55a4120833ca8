//! GIF values handed around between providers, controllers, and sinks.

use serde::{Deserialize, Serialize};

/// A single GIF: an opaque provider id plus the URLs needed to show and
/// share it.  Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gif {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Small rendition used for grid thumbnails.
    pub preview_url: String,
    /// Full-size rendition returned to the caller on selection.
    pub url: String,
}

impl Gif {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        preview_url: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            preview_url: preview_url.into(),
            url: url.into(),
        }
    }

    /// Label for grid cells: the title, or the id when the provider sent none.
    pub fn label(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}

/// Ordered provider result.  Moved, never shared, from producer to
/// controller to sink.
pub type GifList = Vec<Gif>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_falls_back_to_id() {
        let untitled = Gif::new("abc123", "  ", "p", "u");
        assert_eq!(untitled.label(), "abc123");

        let titled = Gif::new("abc123", "dancing cat", "p", "u");
        assert_eq!(titled.label(), "dancing cat");
    }
}
