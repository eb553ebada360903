//! rulebook: section navigation and search for markdown rules documents.
//!
//! A document is split into sections at its level-1 headings. The [`router`] keeps exactly one
//! section visible and in step with the location fragment; the [`search`] index answers
//! substring queries over the document's own text. Everything else projects that state onto a
//! terminal or feeds input back into it.

pub mod app_state;
pub mod clipboard;
pub mod config;
pub mod debounce;
pub mod document;
pub mod drawer;
pub mod error;
pub mod formats;
pub mod location;
pub mod nav;
pub mod notify;
pub mod query;
pub mod router;
pub mod search;
pub mod section;
pub mod ui;
