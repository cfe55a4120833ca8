//! Ranked title/tag lookup over an in-memory GIF index.
//!
//! Matching is case-insensitive substring based.  Used by the offline
//! catalog provider; remote providers rank server-side.

use std::cmp::Ordering;

use crate::core::gif::{Gif, GifList};

#[derive(Debug, Clone)]
pub struct SearchEntry {
    pub gif: Gif,
    pub title_lower: String,
    pub tags_lower: Vec<String>,
}

impl SearchEntry {
    pub fn new(gif: Gif, tags: &[String]) -> Self {
        Self {
            title_lower: gif.title.to_lowercase(),
            tags_lower: tags.iter().map(|t| t.to_lowercase()).collect(),
            gif,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RankKey {
    exact: bool,
    prefix: bool,
    in_title: bool,
    match_pos: usize,
    title_len: usize,
}

impl RankKey {
    fn of(haystack: &str, needle: &str, in_title: bool, title_len: usize) -> Option<Self> {
        let pos = haystack.find(needle)?;
        Some(Self {
            exact: haystack == needle,
            prefix: pos == 0,
            in_title,
            match_pos: pos,
            title_len,
        })
    }

    fn cmp_better(self, other: Self) -> Ordering {
        // "Better" should come first in ascending sort.
        other
            .exact
            .cmp(&self.exact)
            .then_with(|| other.prefix.cmp(&self.prefix))
            .then_with(|| other.in_title.cmp(&self.in_title))
            .then_with(|| self.match_pos.cmp(&other.match_pos))
            .then_with(|| self.title_len.cmp(&other.title_len))
    }
}

/// Best-ranked matches for `query`, at most `limit` of them.  A blank
/// query matches nothing.
pub fn search_entries(entries: &[SearchEntry], query: &str, limit: usize) -> GifList {
    let q = query.trim().to_lowercase();
    if q.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(RankKey, &SearchEntry)> = Vec::new();
    for entry in entries {
        let title_len = entry.gif.title.chars().count();
        let best = std::iter::once(RankKey::of(&entry.title_lower, &q, true, title_len))
            .chain(
                entry
                    .tags_lower
                    .iter()
                    .map(|tag| RankKey::of(tag, &q, false, title_len)),
            )
            .flatten()
            .min_by(|a, b| a.cmp_better(*b));
        if let Some(key) = best {
            ranked.push((key, entry));
        }
    }

    ranked.sort_by(|(a_rank, a_entry), (b_rank, b_entry)| {
        a_rank
            .cmp_better(*b_rank)
            .then_with(|| a_entry.gif.id.cmp(&b_entry.gif.id))
    });
    ranked.truncate(limit);

    ranked.into_iter().map(|(_, e)| e.gif.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, title: &str, tags: &[&str]) -> SearchEntry {
        let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
        SearchEntry::new(Gif::new(id, title, "p", "u"), &tags)
    }

    fn ids(list: &GifList) -> Vec<&str> {
        list.iter().map(|g| g.id.as_str()).collect()
    }

    #[test]
    fn exact_then_prefix_then_position() {
        let entries = vec![
            entry("a", "a happy cat", &[]),
            entry("b", "Cat", &[]),
            entry("c", "catnap", &[]),
            entry("d", "dog", &[]),
        ];
        let found = search_entries(&entries, "CAT", 10);
        assert_eq!(ids(&found), vec!["b", "c", "a"]);
    }

    #[test]
    fn title_match_beats_tag_match() {
        let entries = vec![
            entry("tagged", "something", &["wave"]),
            entry("titled", "wave", &[]),
        ];
        let found = search_entries(&entries, "wave", 10);
        assert_eq!(ids(&found), vec!["titled", "tagged"]);
    }

    #[test]
    fn limit_truncates_and_blank_query_matches_nothing() {
        let entries: Vec<_> = (0..5)
            .map(|i| entry(&format!("id{i}"), &format!("party {i}"), &[]))
            .collect();
        assert_eq!(search_entries(&entries, "party", 3).len(), 3);
        assert!(search_entries(&entries, "   ", 3).is_empty());
    }
}
