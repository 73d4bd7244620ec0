//! Free-text and tag filtering over entry collections.
//!
//! # Invariants
//! - Results keep collection order.
//! - Free-text matching is case-insensitive substring over title, text, link
//!   and each tag; the tag filter is case-insensitive exact equality.
//! - Blank query and blank tag filter return the whole collection.

use crate::model::entry::Entry;

/// Search input as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntrySearch {
    /// Substring to look for; blank means "no query".
    pub query: String,
    /// Exact tag to require; blank means "no tag filter".
    pub tag: String,
}

impl EntrySearch {
    pub fn new(query: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            tag: tag.into(),
        }
    }

    /// Returns whether neither a query nor a tag filter is set.
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty() && self.tag.trim().is_empty()
    }

    /// Returns whether `entry` satisfies this search.
    pub fn matches(&self, entry: &Entry) -> bool {
        let query = self.query.trim().to_lowercase();
        let tag = self.tag.trim();

        if !tag.is_empty() && !entry.has_tag(tag) {
            return false;
        }
        if query.is_empty() {
            return true;
        }

        contains_folded(&entry.title, &query)
            || contains_folded(&entry.text, &query)
            || entry.tags.iter().any(|value| contains_folded(value, &query))
            || contains_folded(&entry.link, &query)
    }
}

/// Returns entries matching `query` and `tag_filter`, in collection order.
pub fn search_entries<'a>(entries: &'a [Entry], query: &str, tag_filter: &str) -> Vec<&'a Entry> {
    let search = EntrySearch::new(query, tag_filter);
    if search.is_blank() {
        return entries.iter().collect();
    }
    entries.iter().filter(|entry| search.matches(entry)).collect()
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}
