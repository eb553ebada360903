//! Turns a markdown rules document into sections.
//!
//! The block grammar finds headings, paragraphs and code blocks in document order. Each level-1
//! heading opens a section; everything after it up to the next level-1 heading belongs to that
//! section. Inline markup is reduced to plain text with the inline grammar so that the content
//! pane and the search index both see the text a reader sees.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::formats::Format;
use crate::nav::NavTree;
use crate::section::{Anchor, Block, BlockKind, Section};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// A parsed document: its sections in declared order and the sidebar built over them.
pub struct Document {
    /// Sections in declared order.
    pub sections: Vec<Section>,
    /// Section shown when no fragment selects another one.
    pub default_id: String,
    /// Sidebar links over the sections.
    pub nav: NavTree,
}

impl Document {
    /// Read and parse a document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or holds no sections.
    pub fn load(path: &Path, format: &impl Format, cfg: &Config) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::parse(&source, format, cfg)
    }

    /// Parse document text into sections and the sidebar tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or the document holds no level-1
    /// headings.
    pub fn parse(source: &str, format: &impl Format, cfg: &Config) -> Result<Self> {
        let sections = extract_sections(source, format)?;
        if sections.is_empty() {
            return Err(Error::EmptyDocument);
        }

        let default_id = cfg
            .default_section
            .as_ref()
            .filter(|id| sections.iter().any(|s| &s.id == *id))
            .unwrap_or(&sections[0].id)
            .clone();
        let nav = NavTree::build(&sections, &cfg.nav);

        Ok(Self {
            sections,
            default_id,
            nav,
        })
    }
}

/// Parse `source` and group its blocks under level-1 headings.
///
/// # Errors
///
/// Returns `Error::Parse` if the grammars or query fail to load or parsing is aborted.
pub fn extract_sections(source: &str, format: &impl Format) -> Result<Vec<Section>> {
    let mut parser = Parser::new();
    parser
        .set_language(&format.language())
        .map_err(|e| Error::Parse(e.to_string()))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| Error::Parse("parser returned no tree".to_string()))?;

    let mut inline = InlineText::new(format)?;

    let query = Query::new(&format.language(), format.block_query())
        .map_err(|e| Error::Parse(e.to_string()))?;
    let capture_names = query.capture_names();

    let mut cursor = QueryCursor::new();
    let mut captures = cursor.captures(&query, tree.root_node(), source.as_bytes());

    let mut sections: Vec<Section> = Vec::new();
    let mut ids = IdAllocator::default();

    while let Some((m, idx)) = captures.next() {
        let capture = m.captures[*idx];
        let node = capture.node;

        match capture_names[capture.index as usize] {
            "heading" => {
                let level = format.heading_level(node).unwrap_or(1);
                let raw = node
                    .children(&mut node.walk())
                    .find(|c| c.kind() == "inline")
                    .map_or("", |c| &source[c.byte_range()]);
                let (text, anchors) = inline.plain(raw)?;

                if level == 1 {
                    let (title, explicit_id) = split_heading_id(&text);
                    let id = ids.allocate(explicit_id.map_or_else(|| slugify(title), str::to_string));
                    let mut section = Section::new(id, title.to_string());
                    section.anchors = anchors;
                    sections.push(section);
                } else if let Some(section) = sections.last_mut() {
                    let (title, _) = split_heading_id(&text);
                    push_block(section, BlockKind::Heading(level), title.to_string(), anchors);
                }
            }
            "paragraph" => {
                let Some(section) = sections.last_mut() else {
                    continue;
                };
                let kind = if node.parent().is_some_and(|p| p.kind() == "list_item") {
                    BlockKind::ListItem
                } else {
                    BlockKind::Paragraph
                };
                let raw = strip_continuations(&source[node.byte_range()]);
                let (text, anchors) = inline.plain(&raw)?;
                push_block(section, kind, text, anchors);
            }
            "code" => {
                let Some(section) = sections.last_mut() else {
                    continue;
                };
                let text = node
                    .children(&mut node.walk())
                    .find(|c| c.kind() == "code_fence_content")
                    .map_or_else(|| &source[node.byte_range()], |c| &source[c.byte_range()]);
                section.blocks.push(Block {
                    kind: BlockKind::Code,
                    text: text.trim_end().to_string(),
                });
            }
            _ => {}
        }
    }

    Ok(sections)
}

fn push_block(section: &mut Section, kind: BlockKind, text: String, anchors: Vec<Anchor>) {
    section.anchors.extend(anchors);
    if !text.is_empty() {
        section.blocks.push(Block { kind, text });
    }
}

/// Drop block quote markers and indentation from paragraph continuation lines.
fn strip_continuations(raw: &str) -> String {
    raw.lines()
        .map(|line| line.trim_start().trim_start_matches('>').trim_start())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split a trailing `{#id}` attribute off a heading.
fn split_heading_id(text: &str) -> (&str, Option<&str>) {
    if let Some(body) = text.strip_suffix('}') {
        if let Some(pos) = body.rfind("{#") {
            let id = body[pos + 2..].trim();
            if !id.is_empty() && !id.contains(char::is_whitespace) {
                return (body[..pos].trim_end(), Some(id));
            }
        }
    }
    (text, None)
}

#[must_use]
/// Lowercase alphanumeric runs of `title` joined by single hyphens.
pub fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Default)]
/// Hands out unique ids, suffixing repeats with `-1`, `-2`, ...
struct IdAllocator {
    seen: HashMap<String, usize>,
}

impl IdAllocator {
    fn allocate(&mut self, base: String) -> String {
        let base = if base.is_empty() {
            "section".to_string()
        } else {
            base
        };
        let mut count = self.seen.get(&base).copied().unwrap_or(0);
        let mut id = base.clone();
        while self.seen.contains_key(&id) {
            count += 1;
            id = format!("{base}-{count}");
        }
        self.seen.insert(base, count);
        self.seen.entry(id.clone()).or_insert(0);
        id
    }
}

/// Inline grammar parser reused across blocks.
struct InlineText {
    parser: Parser,
}

impl InlineText {
    fn new(format: &impl Format) -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&format.inline_language())
            .map_err(|e| Error::Parse(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Plain text of an inline run plus the links inside it.
    fn plain(&mut self, raw: &str) -> Result<(String, Vec<Anchor>)> {
        let tree = self
            .parser
            .parse(raw, None)
            .ok_or_else(|| Error::Parse("inline parser returned no tree".to_string()))?;
        let mut out = String::new();
        let mut anchors = Vec::new();
        collect_text(tree.root_node(), raw, &mut out, &mut anchors);
        Ok((collapse_whitespace(&out), anchors))
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Append the visible text under `node`. Plain text in the inline grammar lives in the gaps
/// between child nodes, so gaps are copied and markup children are handled by kind.
fn collect_text(node: Node, src: &str, out: &mut String, anchors: &mut Vec<Anchor>) {
    match node.kind() {
        "emphasis_delimiter" | "code_span_delimiter" | "link_destination" | "link_title"
        | "link_label" | "html_tag" | "hard_line_break" => return,
        "backslash_escape" => {
            out.push_str(&src[node.start_byte() + 1..node.end_byte()]);
            return;
        }
        "uri_autolink" | "email_autolink" => {
            out.push_str(src[node.byte_range()].trim_matches(|c: char| c == '<' || c == '>'));
            return;
        }
        "inline_link" | "full_reference_link" | "collapsed_reference_link" | "shortcut_link"
        | "image" => {
            let mut label = String::new();
            let mut href = None;
            let mut walker = node.walk();
            for child in node.children(&mut walker) {
                match child.kind() {
                    "link_text" | "image_description" => {
                        collect_text(child, src, &mut label, anchors);
                    }
                    "link_destination" => href = Some(src[child.byte_range()].to_string()),
                    _ => {}
                }
            }
            let label = collapse_whitespace(label.trim_matches(|c: char| c == '[' || c == ']'));
            out.push_str(&label);
            if let Some(href) = href.filter(|_| node.kind() == "inline_link") {
                anchors.push(Anchor { label, href });
            }
            return;
        }
        _ => {}
    }

    let mut cursor = node.start_byte();
    let mut walker = node.walk();
    for child in node.children(&mut walker) {
        out.push_str(&src[cursor..child.start_byte()]);
        collect_text(child, src, out, anchors);
        cursor = child.end_byte();
    }
    out.push_str(&src[cursor..node.end_byte()]);
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
