//! Full-text search over the document's own content.
//!
//! The index is a flat list of text fragments, one per sub-heading, paragraph and list item,
//! in document order. A query matches an entry when it is a case-insensitive substring of the
//! entry text or of the owning section's title. Results keep index order: the first matches
//! encountered win, there is no relevance ranking.

use crate::section::Section;
use serde::Serialize;
use std::ops::Range;

/// Number of results returned for one query.
pub const MAX_RESULTS: usize = 8;

/// Characters of entry text kept in a result snippet.
pub const SNIPPET_CHARS: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One indexed fragment of section text.
pub struct SearchEntry {
    /// Owning section's id.
    pub section_id: String,
    /// Owning section's title at the time the index was built.
    pub section_title: String,
    /// Trimmed plain text of the fragment.
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// A matching entry and where the query first occurs in its text.
pub struct SearchHit {
    /// The matching entry.
    pub entry: SearchEntry,
    /// Byte range of the first occurrence in `entry.text`, `None` when only the title matched.
    pub span: Option<Range<usize>>,
}

/// Ordered fragments of every section, rebuilt wholesale on demand.
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
    limit: usize,
}

impl SearchIndex {
    #[must_use]
    /// Indexes every searchable block of `sections`.
    pub fn build(sections: &[Section]) -> Self {
        let mut index = Self {
            entries: Vec::new(),
            limit: MAX_RESULTS,
        };
        index.rebuild(sections);
        index
    }

    #[must_use]
    /// Caps the number of results per query.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Replaces every entry with a fresh walk over `sections`.
    pub fn rebuild(&mut self, sections: &[Section]) {
        self.entries = sections
            .iter()
            .flat_map(|section| {
                section
                    .blocks
                    .iter()
                    .filter(|block| block.kind.is_searchable())
                    .map(|block| block.text.trim())
                    .filter(|text| !text.is_empty())
                    .map(|text| SearchEntry {
                        section_id: section.id.clone(),
                        section_title: section.title.clone(),
                        text: text.to_string(),
                    })
            })
            .collect();
        tracing::debug!(entries = self.entries.len(), "search index built");
    }

    #[must_use]
    /// All entries in index order.
    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    #[must_use]
    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    /// Whether nothing was indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    /// The first matching entries in index order, at most the configured limit.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        if query.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter_map(|entry| {
                let span = find_ignore_case(&entry.text, query);
                if span.is_some() || find_ignore_case(&entry.section_title, query).is_some() {
                    Some(SearchHit {
                        entry: entry.clone(),
                        span,
                    })
                } else {
                    None
                }
            })
            .take(self.limit)
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A run of snippet text, marked when it is an occurrence of the query.
pub struct SnippetPart {
    /// Text of the run.
    pub text: String,
    /// Whether the run is an occurrence of the query.
    pub highlighted: bool,
}

#[must_use]
/// Cuts `text` to `max_chars` characters, appending `...` when anything was removed.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[must_use]
/// Splits `text` into plain and highlighted runs, one highlight per occurrence of `query`.
pub fn highlight(text: &str, query: &str) -> Vec<SnippetPart> {
    let mut parts = Vec::new();
    let mut cursor = 0;
    for range in find_all_ignore_case(text, query) {
        if range.start > cursor {
            parts.push(SnippetPart {
                text: text[cursor..range.start].to_string(),
                highlighted: false,
            });
        }
        parts.push(SnippetPart {
            text: text[range.clone()].to_string(),
            highlighted: true,
        });
        cursor = range.end;
    }
    if cursor < text.len() || parts.is_empty() {
        parts.push(SnippetPart {
            text: text[cursor..].to_string(),
            highlighted: false,
        });
    }
    parts
}

#[must_use]
/// Result snippet: truncate first, then highlight within what is left.
///
/// A match lying beyond the cut is therefore not highlighted even though the entry matched.
pub fn snippet(text: &str, query: &str, max_chars: usize) -> Vec<SnippetPart> {
    highlight(&truncate_text(text, max_chars), query)
}

#[must_use]
/// Byte range of the first case-insensitive occurrence of `needle` in `haystack`.
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    let folded: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    if folded.is_empty() {
        return None;
    }
    haystack
        .char_indices()
        .find_map(|(start, _)| match_at(haystack, start, &folded).map(|end| start..end))
}

#[must_use]
/// Every non-overlapping case-insensitive occurrence, left to right.
pub fn find_all_ignore_case(haystack: &str, needle: &str) -> Vec<Range<usize>> {
    let folded: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    let mut found = Vec::new();
    if folded.is_empty() {
        return found;
    }
    let mut next_allowed = 0;
    for (start, _) in haystack.char_indices() {
        if start < next_allowed {
            continue;
        }
        if let Some(end) = match_at(haystack, start, &folded) {
            found.push(start..end);
            next_allowed = end;
        }
    }
    found
}

/// End byte of a match of `folded` starting at `start`, comparing lowercase expansions.
fn match_at(haystack: &str, start: usize, folded: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (offset, c) in haystack[start..].char_indices() {
        for lower in c.to_lowercase() {
            if matched == folded.len() || folded[matched] != lower {
                return None;
            }
            matched += 1;
        }
        if matched == folded.len() {
            return Some(start + offset + c.len_utf8());
        }
    }
    None
}

#[cfg(test)]
#[path = "tests/search.rs"]
mod tests;
