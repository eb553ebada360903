//! Configuration to acknowledge reader preferences as well as set defaults.
//!
//! We try to find a rulebook.toml (or the file passed with `--config`), and if present we load
//! settings from there. This provides timing, result limits, the link base for copied links and
//! the submenu groupings shown in the sidebar.

use crate::error::{Error, Result};
use facet::Facet;
use std::fs;
use std::path::Path;

/// Default file looked up in the working directory.
pub const CONFIG_FILE: &str = "rulebook.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// A collapsible sidebar grouping: a header section with child sections listed under it.
pub struct NavGroup {
    /// Section id whose link acts as the grouping header.
    pub section: String,
    #[facet(default)]
    /// Section ids shown as submenu entries, in display order.
    pub children: Vec<String>,
}

#[derive(Facet, Clone, Debug)]
/// User preferences loaded from rulebook.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 300)]
    /// Quiet period after the last keystroke before a search runs.
    pub debounce_ms: u64,
    #[facet(default = 8)]
    /// Maximum number of search results shown.
    pub max_results: usize,
    #[facet(default = 100)]
    /// Characters of entry text kept in a result snippet.
    pub snippet_chars: usize,
    #[facet(default = 3000)]
    /// Lifetime of a notification toast.
    pub notification_ms: u64,
    #[facet(default = 100)]
    /// Terminal width below which the sidebar becomes a drawer.
    pub drawer_breakpoint: u16,
    #[facet(default)]
    /// Section shown when the location has no usable fragment.
    pub default_section: Option<String>,
    #[facet(default)]
    /// Prefix for copied section links; defaults to the document's file URL.
    pub base_url: Option<String>,
    #[facet(default)]
    /// Submenu groupings for the sidebar.
    pub nav: Vec<NavGroup>,
}

impl Config {
    /// Load configuration from an explicit path, or from rulebook.toml if present.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path cannot be read, or if any config file present
    /// fails to parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let contents = match path {
            Some(path) => Some(fs::read_to_string(path)?),
            None => fs::read_to_string(CONFIG_FILE).ok(),
        };
        match contents {
            Some(contents) => Self::from_toml(&contents),
            None => Self::from_toml(""),
        }
    }

    /// Parse configuration from TOML text, filling unset keys with defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the text is not valid for this schema.
    pub fn from_toml(contents: &str) -> Result<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| Error::Config(e.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
