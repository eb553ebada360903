//! The state behind the reader and the thin adapters that turn input into operations.
//!
//! Keys and mouse presses never touch sections or results directly: they resolve to a router
//! operation, a search panel operation or a collaborator call (drawer, clipboard, notifier).
//! Timers are driven from outside through [`AppState::tick`], so everything here can be
//! exercised headlessly with synthetic events and instants.

use crate::clipboard::{Clipboard, CopyLink};
use crate::config::Config;
use crate::document::Document;
use crate::drawer::{MenuControl, MobileMenu};
use crate::location::Location;
use crate::nav::{next_row, prev_row, LinkRef};
use crate::notify::{NotificationKind, Notifier};
use crate::query::SearchPanel;
use crate::router::Router;
use crate::search::SearchIndex;
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Confirmation shown after a link reaches the clipboard.
pub const COPY_OK: &str = "Link copied to clipboard";
/// Shown when the clipboard refused the link.
pub const COPY_FAILED: &str = "Failed to copy link";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// Which pane receives keystrokes.
pub enum Focus {
    /// Sidebar links.
    Nav,
    /// The active section's content and its inline links.
    Content,
    /// The search box and its results.
    Search,
    /// Command line input after ':'.
    Command,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// What the event loop should do after an input.
pub enum Control {
    /// Keep handling events.
    Continue,
    /// Leave the reader.
    Quit,
}

#[derive(Clone, Debug, Default)]
/// Screen areas from the last draw, used to resolve mouse presses.
pub struct HitRegions {
    /// The search box.
    pub search_input: Rect,
    /// The results popup, when shown.
    pub results: Option<Rect>,
    /// One rectangle per rendered result, in result order.
    pub result_rows: Vec<Rect>,
    /// Sidebar rows and the links they hold.
    pub nav_rows: Vec<(Rect, LinkRef)>,
}

/// Everything the reader shows, plus the collaborators input is routed to.
pub struct AppState {
    /// Navigation state: sections, sidebar and location.
    pub router: Router,
    /// Search index over the document's blocks.
    pub index: SearchIndex,
    /// Search box and results panel.
    pub search: SearchPanel,
    /// Sidebar drawer for narrow terminals.
    pub menu: MobileMenu,
    /// Toasts currently shown.
    pub notifier: Notifier,
    /// Background clipboard writes.
    pub copier: CopyLink,
    /// Pane receiving keystrokes.
    pub focus: Focus,
    /// Selected row in the sidebar.
    pub nav_cursor: usize,
    /// Selected inline link of the active section.
    pub anchor_cursor: Option<usize>,
    /// Accumulates command input after ':' is pressed.
    pub command_buffer: String,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    /// Terminal width from the last resize.
    pub width: u16,
    /// Screen areas from the last draw.
    pub hits: HitRegions,
}

impl AppState {
    #[must_use]
    /// Wires the reader over a parsed document and resolves the startup fragment.
    pub fn new(
        document: Document,
        location: Location,
        cfg: &Config,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        let mut router = Router::new(document, location);
        let index = SearchIndex::build(router.sections()).with_limit(cfg.max_results);
        router.handle_initial_hash();

        let mut app = Self {
            router,
            index,
            search: SearchPanel::new(Duration::from_millis(cfg.debounce_ms)),
            menu: MobileMenu::new(cfg.drawer_breakpoint),
            notifier: Notifier::new(Duration::from_millis(cfg.notification_ms)),
            copier: CopyLink::new(clipboard),
            focus: Focus::Nav,
            nav_cursor: 0,
            anchor_cursor: None,
            command_buffer: String::new(),
            message: None,
            width: u16::MAX,
            hits: HitRegions::default(),
        };
        app.after_navigation();
        app
    }

    /// Fires due timers: the debounced search, finished clipboard writes, expired toasts.
    pub fn tick(&mut self, now: Instant) {
        self.search.tick(&self.index, now);
        for outcome in self.copier.drain() {
            match outcome.result {
                Ok(()) => {
                    debug!(link = %outcome.text, "link copied");
                    self.notifier.show_at(COPY_OK, NotificationKind::Success, now);
                }
                Err(e) => {
                    warn!(error = %e, "clipboard write failed");
                    self.notifier.show_at(COPY_FAILED, NotificationKind::Error, now);
                }
            }
        }
        self.notifier.prune(now);
    }

    #[must_use]
    /// Earliest instant at which [`AppState::tick`] has something to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        [self.search.deadline(), self.notifier.next_deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    /// Dispatches a key press.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Control {
        if key.kind != KeyEventKind::Press {
            return Control::Continue;
        }

        let modified = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER);
        if modified && matches!(key.code, KeyCode::Char('k' | 'K')) {
            self.focus_search();
            return Control::Continue;
        }
        if key.code == KeyCode::Esc {
            self.escape();
            return Control::Continue;
        }

        match self.focus {
            Focus::Search => self.search_key(key, now),
            Focus::Command => return self.command_key(key),
            Focus::Nav => return self.nav_key(key),
            Focus::Content => return self.content_key(key),
        }
        Control::Continue
    }

    /// Dispatches a mouse event.
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        let at = Position::new(event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.press(at),
            MouseEventKind::ScrollDown => self.router.scroll_by(3),
            MouseEventKind::ScrollUp => self.router.scroll_by(-3),
            _ => {}
        }
    }

    /// Records the new terminal width and lets the drawer react.
    pub fn handle_resize(&mut self, width: u16) {
        self.width = width;
        self.menu.on_resize(width);
    }

    /// The terminal lost focus: a search still waiting to run is dropped.
    pub fn handle_focus_lost(&mut self) {
        self.search.cancel_pending();
    }

    /// Moves keyboard focus to the search box, reopening earlier results.
    pub fn focus_search(&mut self) {
        self.focus = Focus::Search;
        self.search.on_focus();
    }

    /// Copies a shareable link to the active section.
    pub fn copy_active_link(&mut self) {
        if let Some(id) = self.router.active_section_id() {
            let link = self.router.location().link_to(id);
            self.copier.copy(link);
        }
    }

    /// Rebuilds the search index from the current sections.
    pub fn reindex(&mut self) {
        self.index.rebuild(self.router.sections());
        self.message = Some(format!("Indexed {} entries", self.index.len()));
    }

    fn escape(&mut self) {
        self.search.dismiss();
        if self.menu.is_open {
            self.menu.close_menu();
        }
        match self.focus {
            Focus::Search => self.focus = Focus::Nav,
            Focus::Command => {
                self.command_buffer.clear();
                self.focus = Focus::Nav;
            }
            Focus::Nav | Focus::Content => {}
        }
    }

    fn search_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.push_char(c, now);
            }
            KeyCode::Backspace => self.search.pop_char(now),
            KeyCode::Down => self.search.move_cursor(1),
            KeyCode::Up => self.search.move_cursor(-1),
            KeyCode::Enter => {
                if self.search.deadline().is_some() {
                    let query = self.search.query.trim().to_string();
                    self.search.cancel_pending();
                    self.search.run(&self.index, &query);
                } else if self.search.select(&mut self.router) {
                    self.after_result_selected();
                }
            }
            KeyCode::Tab => self.focus = Focus::Nav,
            _ => {}
        }
    }

    fn command_key(&mut self, key: KeyEvent) -> Control {
        match key.code {
            KeyCode::Char(c) => self.command_buffer.push(c),
            KeyCode::Backspace => {
                self.command_buffer.pop();
            }
            KeyCode::Enter => {
                let cmd = std::mem::take(&mut self.command_buffer);
                self.focus = Focus::Nav;
                return self.run_command(cmd.trim());
            }
            _ => {}
        }
        Control::Continue
    }

    fn run_command(&mut self, cmd: &str) -> Control {
        match cmd {
            "q" | "quit" => return Control::Quit,
            "copy" => self.copy_active_link(),
            "back" => {
                self.router.history_back();
                self.after_navigation();
            }
            "forward" => {
                self.router.history_forward();
                self.after_navigation();
            }
            "reindex" => self.reindex(),
            _ => {
                if let Some(fragment) = cmd.strip_prefix('#') {
                    self.router.follow_fragment(fragment);
                    self.after_navigation();
                } else {
                    self.message = Some(format!("Unknown command: {cmd}"));
                }
            }
        }
        Control::Continue
    }

    fn nav_key(&mut self, key: KeyEvent) -> Control {
        let rows = self.router.nav().rows();
        match key.code {
            KeyCode::Down => self.nav_cursor = next_row(self.nav_cursor, rows.len()),
            KeyCode::Up => self.nav_cursor = prev_row(self.nav_cursor, rows.len()),
            KeyCode::Enter => {
                if let Some(link) = rows.get(self.nav_cursor) {
                    self.activate(link);
                }
            }
            KeyCode::Char(' ') => {
                if let Some(LinkRef::Entry(entry)) = rows.get(self.nav_cursor) {
                    self.router.nav_mut().toggle_group(*entry);
                }
            }
            KeyCode::Tab => self.focus = Focus::Content,
            _ => return self.common_key(key),
        }
        Control::Continue
    }

    fn content_key(&mut self, key: KeyEvent) -> Control {
        let anchors = self
            .router
            .active_section()
            .map_or(0, |section| section.anchors.len());
        match key.code {
            KeyCode::Down => self.router.scroll_by(1),
            KeyCode::Up => self.router.scroll_by(-1),
            KeyCode::PageDown => self.router.scroll_by(10),
            KeyCode::PageUp => self.router.scroll_by(-10),
            KeyCode::Tab if anchors > 0 => {
                self.anchor_cursor = Some(self.anchor_cursor.map_or(0, |i| next_row(i, anchors)));
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.anchor_cursor = None;
                self.focus = Focus::Nav;
            }
            KeyCode::Enter => self.follow_selected_anchor(),
            _ => return self.common_key(key),
        }
        Control::Continue
    }

    /// Keys shared by the sidebar and the content pane.
    fn common_key(&mut self, key: KeyEvent) -> Control {
        match key.code {
            KeyCode::Char('q') => return Control::Quit,
            KeyCode::Char('/') => self.focus_search(),
            KeyCode::Char('m') => self.menu.toggle_menu(),
            KeyCode::Char('y') => self.copy_active_link(),
            KeyCode::Char('[') => {
                self.router.history_back();
                self.after_navigation();
            }
            KeyCode::Char(']') => {
                self.router.history_forward();
                self.after_navigation();
            }
            KeyCode::Char(':') => {
                self.focus = Focus::Command;
                self.command_buffer.clear();
                self.message = None;
            }
            _ => {}
        }
        Control::Continue
    }

    fn follow_selected_anchor(&mut self) {
        let Some(anchor) = self
            .anchor_cursor
            .and_then(|i| self.router.active_section()?.anchors.get(i))
            .cloned()
        else {
            return;
        };
        if self.activate(&LinkRef::Anchor(anchor.href.clone())) {
            return;
        }
        if anchor.is_external() {
            self.message = Some(format!("External link: {}", anchor.href));
        }
    }

    /// Routes a link through the router, closing the drawer. Returns whether it was routed.
    fn activate(&mut self, link: &LinkRef) -> bool {
        let routed = self.router.activate(link, &mut self.menu);
        if routed {
            self.after_navigation();
        }
        routed
    }

    fn press(&mut self, at: Position) {
        if self.hits.search_input.contains(at) {
            self.focus_search();
            return;
        }
        if self.hits.results.is_some_and(|r| r.contains(at)) {
            if let Some(i) = self.hits.result_rows.iter().position(|r| r.contains(at)) {
                if self.search.select_at(i, &mut self.router) {
                    self.after_result_selected();
                }
            }
            return;
        }

        self.search.dismiss();
        if self.focus == Focus::Search {
            self.focus = Focus::Nav;
        }
        let link = self
            .hits
            .nav_rows
            .iter()
            .find(|(rect, _)| rect.contains(at))
            .map(|(_, link)| link.clone());
        if let Some(link) = link {
            self.focus = Focus::Nav;
            self.activate(&link);
        } else if self.menu.is_open && self.menu.is_drawer(self.width) {
            self.menu.close_menu();
        }
    }

    /// A search result was opened: it counts as a routed activation.
    fn after_result_selected(&mut self) {
        self.focus = Focus::Nav;
        self.menu.close_menu();
        self.after_navigation();
    }

    /// Resets per-section view state and points the sidebar cursor at the active link.
    fn after_navigation(&mut self) {
        self.anchor_cursor = None;
        let nav = self.router.nav();
        let rows = nav.rows();
        let Some(active) = self.router.active_section_id() else {
            return;
        };
        let exact = rows
            .iter()
            .position(|link| nav.target(link) == Some(active) && nav.is_active(link));
        if let Some(row) = exact {
            self.nav_cursor = row;
        } else {
            self.nav_cursor = self.nav_cursor.min(rows.len().saturating_sub(1));
        }
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
