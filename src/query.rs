//! Query state for the search box and its results panel.
//!
//! Keystrokes only schedule a search; the search runs once input has been quiet for the
//! debounce delay. Clearing the box hides the panel at once instead of waiting.

use crate::debounce::Debouncer;
use crate::router::Router;
use crate::search::{snippet, SearchHit, SearchIndex, SnippetPart};
use std::time::{Duration, Instant};
use tracing::debug;

/// Title of the placeholder shown when a query matched nothing.
pub const NO_RESULTS_TITLE: &str = "No results found";
/// Hint shown under the placeholder title.
pub const NO_RESULTS_HINT: &str = "Try searching for other terms";

#[derive(Clone, Debug, PartialEq, Eq)]
/// A result as presented: section title and a highlighted snippet.
pub struct RenderedResult {
    /// Section the result navigates to.
    pub section_id: String,
    /// Title of that section.
    pub title: String,
    /// Entry text cut down and split into highlighted runs.
    pub snippet: Vec<SnippetPart>,
}

/// The search box, its pending query and the results panel.
pub struct SearchPanel {
    /// Raw contents of the search box.
    pub query: String,
    /// Whether the results panel is presented.
    pub is_open: bool,
    /// Highlighted result for keyboard selection.
    pub cursor: usize,
    results: Vec<SearchHit>,
    executed: Option<String>,
    debouncer: Debouncer<String>,
}

impl SearchPanel {
    #[must_use]
    /// An empty panel that waits `delay` after typing stops.
    pub fn new(delay: Duration) -> Self {
        Self {
            query: String::new(),
            is_open: false,
            cursor: 0,
            results: Vec::new(),
            executed: None,
            debouncer: Debouncer::new(delay),
        }
    }

    /// Records new box contents and schedules a search for them.
    pub fn on_input(&mut self, value: impl Into<String>, now: Instant) {
        self.query = value.into();
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            self.debouncer.cancel();
            self.dismiss();
            return;
        }
        self.debouncer.schedule(trimmed.to_string(), now);
    }

    /// Appends `c` to the box and reschedules the search.
    pub fn push_char(&mut self, c: char, now: Instant) {
        let mut value = std::mem::take(&mut self.query);
        value.push(c);
        self.on_input(value, now);
    }

    /// Removes the last character and reschedules the search.
    pub fn pop_char(&mut self, now: Instant) {
        let mut value = std::mem::take(&mut self.query);
        value.pop();
        self.on_input(value, now);
    }

    /// Runs the pending search if its quiet period is over. Returns whether one ran.
    pub fn tick(&mut self, index: &SearchIndex, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(query) => {
                self.run(index, &query);
                true
            }
            None => false,
        }
    }

    /// Executes `query` immediately and presents the results.
    pub fn run(&mut self, index: &SearchIndex, query: &str) {
        self.results = index.search(query);
        debug!(query, results = self.results.len(), "search executed");
        self.executed = Some(query.to_string());
        self.cursor = 0;
        self.is_open = true;
    }

    /// Drops a scheduled search without touching what is shown.
    pub fn cancel_pending(&mut self) {
        self.debouncer.cancel();
    }

    #[must_use]
    /// When the scheduled search is due.
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Focusing a box that still holds a query brings its results back.
    pub fn on_focus(&mut self) {
        if !self.query.trim().is_empty() && self.executed.is_some() {
            self.is_open = true;
        }
    }

    /// Closes the results panel.
    pub fn dismiss(&mut self) {
        self.is_open = false;
    }

    /// Empties the box and closes the panel.
    pub fn clear(&mut self) {
        self.query.clear();
        self.debouncer.cancel();
        self.dismiss();
    }

    #[must_use]
    /// Results of the last executed query.
    pub fn results(&self) -> &[SearchHit] {
        &self.results
    }

    #[must_use]
    /// The query the current results belong to.
    pub fn executed_query(&self) -> Option<&str> {
        self.executed.as_deref()
    }

    #[must_use]
    /// Whether the panel shows the no-results placeholder.
    pub fn shows_placeholder(&self) -> bool {
        self.is_open && self.results.is_empty()
    }

    /// Moves the selection by `delta`, clamped to the results.
    pub fn move_cursor(&mut self, delta: isize) {
        if self.results.is_empty() {
            return;
        }
        let last = self.results.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    /// Navigates to the result under the cursor, then clears the box and closes the panel.
    pub fn select(&mut self, router: &mut Router) -> bool {
        self.select_at(self.cursor, router)
    }

    /// Navigates to result `index`, then clears the box and closes the panel.
    pub fn select_at(&mut self, index: usize, router: &mut Router) -> bool {
        if !self.is_open {
            return false;
        }
        let Some(hit) = self.results.get(index) else {
            return false;
        };
        let section_id = hit.entry.section_id.clone();
        router.navigate_to_section(&section_id);
        self.clear();
        true
    }

    #[must_use]
    /// Current results as presented, snippets cut to `snippet_chars` and then highlighted.
    pub fn rendered(&self, snippet_chars: usize) -> Vec<RenderedResult> {
        let query = self.executed.as_deref().unwrap_or_default();
        self.results
            .iter()
            .map(|hit| RenderedResult {
                section_id: hit.entry.section_id.clone(),
                title: hit.entry.section_title.clone(),
                snippet: snippet(&hit.entry.text, query, snippet_chars),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/query.rs"]
mod tests;
