//! Error types shared across the crate.
//!
//! Only loading a document and its configuration can fail hard. Everything that happens once
//! the reader is running degrades to a no-op or a notification instead of surfacing an error.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
/// Failures while loading or running the reader.
pub enum Error {
    #[error("I/O error: {0}")]
    /// Reading a file failed.
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    /// The configuration could not be parsed.
    Config(String),

    #[error("failed to parse document: {0}")]
    /// The grammar failed to load or the document failed to parse.
    Parse(String),

    #[error("clipboard error: {0}")]
    /// The clipboard was unavailable or refused a write.
    Clipboard(String),

    #[error("JSON error: {0}")]
    /// Serializing the index or search results failed.
    Json(#[from] serde_json::Error),

    #[error("document has no level-1 headings to use as sections")]
    /// The document has nothing to navigate.
    EmptyDocument,
}

#[cfg(test)]
#[path = "tests/error.rs"]
mod tests;
