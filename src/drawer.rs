//! The collapsible navigation drawer used on narrow terminals.
//!
//! Below the breakpoint the sidebar is hidden and slides over the content when opened. Growing
//! the terminal past the breakpoint closes the drawer, since the sidebar is docked again.

/// Anything that can dismiss an open navigation menu.
pub trait MenuControl {
    /// Hides the menu if it is open.
    fn close_menu(&mut self);
}

#[derive(Debug)]
/// Open or closed state of the sidebar drawer.
pub struct MobileMenu {
    /// Whether the drawer is shown over the content.
    pub is_open: bool,
    /// Width at or below which the sidebar is a drawer.
    pub breakpoint: u16,
}

impl MobileMenu {
    #[must_use]
    /// A closed drawer used at widths up to `breakpoint`.
    pub fn new(breakpoint: u16) -> Self {
        Self {
            is_open: false,
            breakpoint,
        }
    }

    /// Opens a closed drawer, closes an open one.
    pub fn toggle_menu(&mut self) {
        if self.is_open {
            self.close_menu();
        } else {
            self.open_menu();
        }
    }

    /// Shows the drawer.
    pub fn open_menu(&mut self) {
        self.is_open = true;
    }

    /// Closes the drawer once the terminal is wide enough to dock the sidebar.
    pub fn on_resize(&mut self, width: u16) {
        if width > self.breakpoint && self.is_open {
            self.close_menu();
        }
    }

    #[must_use]
    /// Whether the sidebar is collapsed into a drawer at this width.
    pub fn is_drawer(&self, width: u16) -> bool {
        width <= self.breakpoint
    }
}

impl MenuControl for MobileMenu {
    fn close_menu(&mut self) {
        self.is_open = false;
    }
}
