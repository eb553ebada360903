//! The addressable location: a base link plus a fragment with its own history.
//!
//! Navigation inside the reader rewrites the current entry in place, so it never adds history
//! and never raises a change. Assigning a fragment from outside, or stepping back and forward,
//! does change the location and is reported to the caller so it can run the hash-change handler.

#[derive(Clone, Debug)]
/// A base link with a fragment history and a cursor into it.
pub struct Location {
    base: String,
    entries: Vec<Option<String>>,
    cursor: usize,
}

impl Location {
    #[must_use]
    /// A location at `base` whose only history entry is `fragment`.
    pub fn new(base: impl Into<String>, fragment: Option<String>) -> Self {
        Self {
            base: base.into(),
            entries: vec![fragment.filter(|f| !f.is_empty())],
            cursor: 0,
        }
    }

    #[must_use]
    /// Splits `raw` at its first `#`, so `rules.md#combat` gives `("rules.md", Some("combat"))`.
    pub fn split(raw: &str) -> (&str, Option<String>) {
        match raw.split_once('#') {
            Some((path, fragment)) if !fragment.is_empty() => (path, Some(fragment.to_string())),
            Some((path, _)) => (path, None),
            None => (raw, None),
        }
    }

    #[must_use]
    /// The current fragment, without the `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.entries[self.cursor].as_deref()
    }

    #[must_use]
    /// The link without any fragment.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Rewrites the current entry without adding history or raising a change.
    pub fn replace_fragment(&mut self, fragment: &str) {
        self.entries[self.cursor] = Some(fragment.to_string());
    }

    /// Moves to a new fragment as an external navigation would, discarding forward history.
    ///
    /// Returns whether the fragment changed, which is when a hash change is raised. An empty
    /// fragment is ignored.
    pub fn assign_fragment(&mut self, fragment: &str) -> bool {
        if fragment.is_empty() || self.fragment() == Some(fragment) {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(Some(fragment.to_string()));
        self.cursor += 1;
        true
    }

    /// Steps back in history. Returns whether the fragment changed.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let before = self.entries[self.cursor].clone();
        self.cursor -= 1;
        self.entries[self.cursor] != before
    }

    /// Steps forward in history. Returns whether the fragment changed.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        let before = self.entries[self.cursor].clone();
        self.cursor += 1;
        self.entries[self.cursor] != before
    }

    #[must_use]
    /// Shareable link to a section.
    pub fn link_to(&self, section_id: &str) -> String {
        format!("{}#{section_id}", self.base)
    }

    #[must_use]
    /// The full current link.
    pub fn href(&self) -> String {
        match self.fragment() {
            Some(fragment) => self.link_to(fragment),
            None => self.base.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/location.rs"]
mod tests;
