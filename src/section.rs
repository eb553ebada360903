//! Section representation for a parsed rules document.
//!
//! A section is one top-level navigable block of the document, opened by a level-1 heading.
//! It carries its text blocks in document order, which serve both the content pane and the
//! search index, plus the inline links found in those blocks.

use serde::Serialize;

#[derive(Clone, Debug)]
/// Top-level navigable division of the document.
pub struct Section {
    /// Stable routing key, also used as the location fragment.
    pub id: String,
    /// Heading text without markup symbols.
    pub title: String,
    /// Whether this is the section currently shown. Exactly one section is visible at a time.
    pub is_visible: bool,
    /// Text-bearing blocks below the heading, in document order.
    pub blocks: Vec<Block>,
    /// Inline links found anywhere in the section's blocks.
    pub anchors: Vec<Anchor>,
}

impl Section {
    #[must_use]
    /// An empty, hidden section.
    pub fn new(id: String, title: String) -> Self {
        Self {
            id,
            title,
            is_visible: false,
            blocks: Vec::new(),
            anchors: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
/// The kind of content a block was parsed from.
pub enum BlockKind {
    /// A sub-heading (`##` and deeper) with its level.
    Heading(usize),
    /// A paragraph outside any list.
    Paragraph,
    /// A paragraph inside a list item.
    ListItem,
    /// Fenced or indented code. Shown but never indexed.
    Code,
}

impl BlockKind {
    #[must_use]
    /// Whether blocks of this kind feed the search index.
    pub fn is_searchable(self) -> bool {
        !matches!(self, Self::Code)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One plain-text block of a section.
pub struct Block {
    /// What the block was parsed from.
    pub kind: BlockKind,
    /// Plain text with inline markup removed.
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// An inline link inside section content.
pub struct Anchor {
    /// Link text as displayed.
    pub label: String,
    /// Raw link destination.
    pub href: String,
}

impl Anchor {
    #[must_use]
    /// The section id this link routes to, if it is an in-page fragment link.
    pub fn fragment(&self) -> Option<&str> {
        self.href.strip_prefix('#').filter(|id| !id.is_empty())
    }

    #[must_use]
    /// External links open outside the reader and are never routed.
    pub fn is_external(&self) -> bool {
        self.href.starts_with("http://") || self.href.starts_with("https://")
    }
}
