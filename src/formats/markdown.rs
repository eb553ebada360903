//! Markdown format implementation using tree-sitter-md.
//!
//! This module provides tree-sitter queries for parsing markdown documents and extracting
//! sections from ATX-style headings (# syntax) along with their paragraphs and list items.

use crate::formats::Format;

/// Tree-sitter queries for ATX-style markdown documents.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn inline_language(&self) -> tree_sitter::Language {
        tree_sitter_md::INLINE_LANGUAGE.into()
    }

    fn block_query(&self) -> &'static str {
        "(atx_heading) @heading
         (paragraph) @paragraph
         (fenced_code_block) @code
         (indented_code_block) @code"
    }

    fn heading_level(&self, node: tree_sitter::Node) -> Option<usize> {
        let mut cursor = node.walk();
        let level = node.children(&mut cursor).find_map(|child| match child.kind() {
            "atx_h1_marker" => Some(1),
            "atx_h2_marker" => Some(2),
            "atx_h3_marker" => Some(3),
            "atx_h4_marker" => Some(4),
            "atx_h5_marker" => Some(5),
            "atx_h6_marker" => Some(6),
            _ => None,
        });
        level
    }
}
