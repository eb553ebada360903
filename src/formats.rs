//! Format trait and implementations for different document types.
//!
//! This module defines the `Format` trait which abstracts over document formats by providing the
//! tree-sitter grammars and the query used to pick out headings and text blocks.

pub mod markdown;

/// Grammars and queries describing one document format.
pub trait Format {
    /// Grammar for block structure (headings, paragraphs, lists, code).
    fn language(&self) -> tree_sitter::Language;
    /// Grammar for inline markup inside a block (emphasis, links, code spans).
    fn inline_language(&self) -> tree_sitter::Language;
    /// Query capturing `@heading`, `@paragraph` and `@code` nodes.
    fn block_query(&self) -> &str;
    /// Heading level of a captured heading node, if it has one.
    fn heading_level(&self, node: tree_sitter::Node) -> Option<usize>;
}
