//! The navigation state machine: which section is shown, kept in step with the location.
//!
//! The router owns the sections, the sidebar tree and the location. Its state has one value per
//! section id; every transition goes through [`Router::navigate_to_section`], which keeps these
//! invariants once it returns:
//!
//! - exactly one section has `is_visible` set, and it is the active one
//! - the location fragment equals the active section id
//! - exactly the sidebar links for the active section (and the group above them) are active
//!
//! Unknown ids are ignored rather than reported, so stale links and fragments are harmless.

use crate::document::Document;
use crate::drawer::MenuControl;
use crate::location::Location;
use crate::nav::{LinkRef, NavTree};
use crate::section::Section;
use tracing::{debug, info};

/// Owns the sections and decides which one is shown.
pub struct Router {
    sections: Vec<Section>,
    nav: NavTree,
    location: Location,
    active_section_id: Option<String>,
    /// Content viewport scroll offset, in rows.
    pub content_scroll: u16,
}

impl Router {
    #[must_use]
    /// Shows the document's default section. The location is left untouched until
    /// [`Router::handle_initial_hash`] runs.
    pub fn new(document: Document, location: Location) -> Self {
        let Document {
            mut sections,
            default_id,
            mut nav,
        } = document;

        for section in &mut sections {
            section.is_visible = section.id == default_id;
        }
        nav.highlight(&default_id);

        Self {
            sections,
            nav,
            location,
            active_section_id: Some(default_id),
            content_scroll: 0,
        }
    }

    #[must_use]
    /// Whether some section has this id.
    pub fn has_section(&self, id: &str) -> bool {
        self.sections.iter().any(|s| s.id == id)
    }

    /// Shows section `id` and brings the location, sidebar and scroll position in line.
    ///
    /// Does nothing when no section has this id.
    pub fn navigate_to_section(&mut self, id: &str) {
        if !self.has_section(id) {
            debug!(section = id, "ignoring navigation to unknown section");
            return;
        }

        self.location.replace_fragment(id);
        for section in &mut self.sections {
            section.is_visible = section.id == id;
        }
        self.active_section_id = Some(id.to_string());
        self.nav.highlight(id);
        self.content_scroll = 0;

        info!(section = id, "section viewed");
    }

    /// Reacts to the fragment changing from outside (history traversal, a typed fragment).
    pub fn handle_hash_change(&mut self) {
        let Some(fragment) = self.location.fragment().map(str::to_string) else {
            return;
        };
        if self.has_section(&fragment) && self.active_section_id.as_deref() != Some(&fragment) {
            self.navigate_to_section(&fragment);
        }
    }

    /// Applies the startup fragment if it names a section; otherwise the default stays shown.
    pub fn handle_initial_hash(&mut self) {
        if let Some(fragment) = self.location.fragment().map(str::to_string) {
            if self.has_section(&fragment) {
                self.navigate_to_section(&fragment);
            }
        }
    }

    /// Routes an activated link.
    ///
    /// Group headers also flip their submenu. Every routed activation closes the navigation
    /// drawer. Returns false when the link was not routed, which only happens for inline links
    /// that do not point at a section.
    pub fn activate(&mut self, link: &LinkRef, menu: &mut dyn MenuControl) -> bool {
        let Some(target) = self.nav.target(link).map(str::to_string) else {
            return false;
        };
        match link {
            LinkRef::Entry(entry) => self.nav.toggle_group(*entry),
            LinkRef::Child { .. } => {}
            LinkRef::Anchor(_) => {
                if !self.has_section(&target) {
                    return false;
                }
            }
        }
        self.navigate_to_section(&target);
        menu.close_menu();
        true
    }

    /// Sets the fragment as an external navigation would and handles the resulting change.
    pub fn follow_fragment(&mut self, fragment: &str) {
        if self.location.assign_fragment(fragment) {
            self.handle_hash_change();
        }
    }

    /// Steps back in location history, navigating if the fragment changed.
    pub fn history_back(&mut self) {
        if self.location.back() {
            self.handle_hash_change();
        }
    }

    /// Steps forward in location history, navigating if the fragment changed.
    pub fn history_forward(&mut self) {
        if self.location.forward() {
            self.handle_hash_change();
        }
    }

    /// Scrolls the content pane by `delta` rows, stopping at the top.
    pub fn scroll_by(&mut self, delta: i32) {
        let next = i32::from(self.content_scroll).saturating_add(delta);
        self.content_scroll = u16::try_from(next.max(0)).unwrap_or(u16::MAX);
    }

    #[must_use]
    /// Id of the section currently shown.
    pub fn active_section_id(&self) -> Option<&str> {
        self.active_section_id.as_deref()
    }

    #[must_use]
    /// The section currently shown.
    pub fn active_section(&self) -> Option<&Section> {
        self.sections.iter().find(|s| s.is_visible)
    }

    #[must_use]
    /// All sections in declared order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    /// The sidebar tree.
    pub fn nav(&self) -> &NavTree {
        &self.nav
    }

    /// Mutable access to the sidebar tree, for toggling groups.
    pub fn nav_mut(&mut self) -> &mut NavTree {
        &mut self.nav
    }

    #[must_use]
    /// The current location.
    pub fn location(&self) -> &Location {
        &self.location
    }
}

#[cfg(test)]
#[path = "tests/router.rs"]
mod tests;
