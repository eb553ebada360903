//! The sidebar navigation tree and its link highlighting.
//!
//! Every section gets exactly one link. Sections named as children of a configured group are
//! listed under that group's header entry instead of at the top level, which gives the
//! collapsible submenus of the sidebar.

use crate::config::NavGroup;
use crate::section::Section;
use std::collections::HashSet;
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Eq)]
/// A submenu link inside a group.
pub struct NavLink {
    /// Section the link navigates to.
    pub section_id: String,
    /// Text shown in the sidebar.
    pub label: String,
    /// Whether the link is highlighted.
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A top-level sidebar entry, optionally heading a collapsible group.
pub struct NavEntry {
    /// Section the entry navigates to.
    pub section_id: String,
    /// Text shown in the sidebar.
    pub label: String,
    /// Submenu links; empty for plain entries.
    pub children: Vec<NavLink>,
    /// Whether the submenu is displayed.
    pub expanded: bool,
    /// Set on the entry's own link and, for groups, on the grouping itself.
    pub active: bool,
}

impl NavEntry {
    #[must_use]
    /// Whether the entry heads a submenu.
    pub fn is_group(&self) -> bool {
        !self.children.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// An activated element that declares a target section.
pub enum LinkRef {
    /// A top-level sidebar entry (plain link or group header).
    Entry(usize),
    /// A submenu entry under a group header.
    Child {
        /// Index of the parent group entry.
        entry: usize,
        /// Index of the child within the group.
        child: usize,
    },
    /// An inline link inside content, carrying its raw destination.
    Anchor(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Sidebar links in display order.
pub struct NavTree {
    /// Top-level entries, with grouped sections nested inside.
    pub entries: Vec<NavEntry>,
}

impl NavTree {
    #[must_use]
    /// Lays out one link per section, moving grouped sections under their header.
    pub fn build(sections: &[Section], groups: &[NavGroup]) -> Self {
        let title_of = |id: &str| {
            sections
                .iter()
                .find(|s| s.id == id)
                .map(|s| s.title.clone())
        };

        let mut placed: HashSet<&str> = HashSet::new();
        let mut grouped: Vec<(&str, Vec<NavLink>)> = Vec::new();

        for group in groups {
            if title_of(&group.section).is_none() {
                warn!(section = %group.section, "nav group header names no section, skipping");
                continue;
            }
            let mut children = Vec::new();
            for child in &group.children {
                let Some(label) = title_of(child) else {
                    warn!(section = %child, "nav group child names no section, skipping");
                    continue;
                };
                if child == &group.section || !placed.insert(child.as_str()) {
                    warn!(section = %child, "section already placed in the sidebar, skipping");
                    continue;
                }
                children.push(NavLink {
                    section_id: child.clone(),
                    label,
                    active: false,
                });
            }
            grouped.push((group.section.as_str(), children));
        }

        let entries = sections
            .iter()
            .filter(|s| !placed.contains(s.id.as_str()))
            .map(|s| NavEntry {
                section_id: s.id.clone(),
                label: s.title.clone(),
                children: grouped
                    .iter()
                    .find(|(header, _)| *header == s.id)
                    .map(|(_, children)| children.clone())
                    .unwrap_or_default(),
                expanded: false,
                active: false,
            })
            .collect();

        Self { entries }
    }

    #[must_use]
    /// Target section of a sidebar link.
    pub fn target<'a>(&'a self, link: &'a LinkRef) -> Option<&'a str> {
        match link {
            LinkRef::Entry(entry) => self.entries.get(*entry).map(|e| e.section_id.as_str()),
            LinkRef::Child { entry, child } => self
                .entries
                .get(*entry)
                .and_then(|e| e.children.get(*child))
                .map(|c| c.section_id.as_str()),
            LinkRef::Anchor(href) => href.strip_prefix('#'),
        }
    }

    /// Marks exactly the links targeting `section_id` as active.
    ///
    /// When a matching link sits inside a group, the group is marked active and expanded and
    /// the group header's own link is active too. Nothing else stays active.
    pub fn highlight(&mut self, section_id: &str) {
        for entry in &mut self.entries {
            entry.active = entry.section_id == section_id;
            let mut child_active = false;
            for child in &mut entry.children {
                child.active = child.section_id == section_id;
                child_active |= child.active;
            }
            if child_active {
                entry.active = true;
                entry.expanded = true;
            }
        }
    }

    /// Flips the submenu display of a group header. Plain entries are left alone.
    pub fn toggle_group(&mut self, entry: usize) {
        if let Some(entry) = self.entries.get_mut(entry) {
            if entry.is_group() {
                entry.expanded = !entry.expanded;
            }
        }
    }

    #[must_use]
    /// Visible links in display order: every entry, plus children of expanded groups.
    pub fn rows(&self) -> Vec<LinkRef> {
        let mut rows = Vec::new();
        for (i, entry) in self.entries.iter().enumerate() {
            rows.push(LinkRef::Entry(i));
            if entry.expanded {
                rows.extend((0..entry.children.len()).map(|child| LinkRef::Child { entry: i, child }));
            }
        }
        rows
    }

    #[must_use]
    /// Whether the link is shown as active.
    pub fn is_active(&self, link: &LinkRef) -> bool {
        match link {
            LinkRef::Entry(entry) => self.entries.get(*entry).is_some_and(|e| e.active),
            LinkRef::Child { entry, child } => self
                .entries
                .get(*entry)
                .and_then(|e| e.children.get(*child))
                .is_some_and(|c| c.active),
            LinkRef::Anchor(_) => false,
        }
    }

    #[must_use]
    /// Label of a sidebar link.
    pub fn label<'a>(&'a self, link: &'a LinkRef) -> Option<&'a str> {
        match link {
            LinkRef::Entry(entry) => self.entries.get(*entry).map(|e| e.label.as_str()),
            LinkRef::Child { entry, child } => self
                .entries
                .get(*entry)
                .and_then(|e| e.children.get(*child))
                .map(|c| c.label.as_str()),
            LinkRef::Anchor(href) => Some(href.as_str()),
        }
    }
}

#[must_use]
/// Index of the next row after `current`, wrapping to the first.
pub fn next_row(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + 1) % len
    }
}

#[must_use]
/// Index of the row before `current`, wrapping to the last.
pub fn prev_row(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current == 0 {
        len - 1
    } else {
        (current - 1).min(len - 1)
    }
}

#[cfg(test)]
#[path = "tests/nav.rs"]
mod tests;
