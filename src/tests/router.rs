use super::Router;
use crate::config::NavGroup;
use crate::document::Document;
use crate::drawer::MenuControl;
use crate::location::Location;
use crate::nav::{LinkRef, NavTree};
use crate::section::{Anchor, Section};

#[derive(Default)]
struct CountingMenu {
    closed: usize,
}

impl MenuControl for CountingMenu {
    fn close_menu(&mut self) {
        self.closed += 1;
    }
}

fn document() -> Document {
    let mut sections: Vec<Section> = ["intro", "regras", "gerais", "combate", "faq"]
        .iter()
        .map(|id| Section::new((*id).to_string(), id.to_uppercase()))
        .collect();
    sections[0].anchors = vec![
        Anchor {
            label: "FAQ".to_string(),
            href: "#faq".to_string(),
        },
        Anchor {
            label: "Old".to_string(),
            href: "#removed".to_string(),
        },
        Anchor {
            label: "Discord".to_string(),
            href: "https://discord.gg/example".to_string(),
        },
    ];
    let groups = vec![NavGroup {
        section: "regras".to_string(),
        children: vec!["gerais".to_string(), "combate".to_string()],
    }];
    let nav = NavTree::build(&sections, &groups);
    Document {
        sections,
        default_id: "intro".to_string(),
        nav,
    }
}

fn router(fragment: Option<&str>) -> Router {
    Router::new(
        document(),
        Location::new("file:///rules.md", fragment.map(str::to_string)),
    )
}

fn visible(router: &Router) -> Vec<&str> {
    router
        .sections()
        .iter()
        .filter(|s| s.is_visible)
        .map(|s| s.id.as_str())
        .collect()
}

/// Everything a reader could observe about the router.
fn snapshot(router: &Router) -> (Vec<bool>, Option<String>, Option<String>, NavTree, u16) {
    (
        router.sections().iter().map(|s| s.is_visible).collect(),
        router.active_section_id().map(str::to_string),
        router.location().fragment().map(str::to_string),
        router.nav().clone(),
        router.content_scroll,
    )
}

#[test]
fn test_starts_on_default_section() {
    let router = router(None);

    assert_eq!(visible(&router), vec!["intro"]);
    assert_eq!(router.active_section_id(), Some("intro"));
    assert!(router.nav().entries[0].active);
    assert_eq!(router.location().fragment(), None);
}

#[test]
fn test_exactly_one_section_visible_after_each_navigation() {
    let mut router = router(None);

    for id in ["regras", "combate", "faq", "gerais", "intro", "combate"] {
        router.navigate_to_section(id);
        assert_eq!(visible(&router), vec![id]);
    }
}

#[test]
fn test_fragment_and_state_agree_after_navigation() {
    let mut router = router(None);
    router.navigate_to_section("combate");

    assert_eq!(router.location().fragment(), Some("combate"));
    assert_eq!(router.active_section_id(), Some("combate"));
    assert_eq!(router.active_section().map(|s| s.id.as_str()), Some("combate"));
}

#[test]
fn test_unknown_section_is_ignored() {
    let mut router = router(None);
    router.navigate_to_section("faq");
    let before = snapshot(&router);

    router.navigate_to_section("does-not-exist");

    assert_eq!(snapshot(&router), before);
}

#[test]
fn test_navigation_is_idempotent() {
    let mut once = router(None);
    once.navigate_to_section("gerais");

    let mut twice = router(None);
    twice.navigate_to_section("gerais");
    twice.navigate_to_section("gerais");

    assert_eq!(snapshot(&once), snapshot(&twice));
}

#[test]
fn test_navigation_highlights_group_and_resets_scroll() {
    let mut router = router(None);
    router.scroll_by(12);
    assert_eq!(router.content_scroll, 12);

    router.navigate_to_section("gerais");

    assert_eq!(router.content_scroll, 0);
    let group = &router.nav().entries[1];
    assert!(group.active && group.expanded);
    assert!(group.children[0].active);
    assert!(!group.children[1].active);
    assert!(!router.nav().entries[0].active);
}

#[test]
fn test_initial_hash_selects_section() {
    let mut router = router(Some("faq"));
    router.handle_initial_hash();
    assert_eq!(visible(&router), vec!["faq"]);

    let mut router = self::router(Some("nope"));
    router.handle_initial_hash();
    assert_eq!(visible(&router), vec!["intro"], "default stays shown");
}

#[test]
fn test_hash_change_follows_external_fragment() {
    let mut router = router(None);

    router.follow_fragment("faq");
    assert_eq!(router.active_section_id(), Some("faq"));

    router.follow_fragment("removed");
    assert_eq!(router.active_section_id(), Some("faq"), "unknown fragment is ignored");

    router.history_back();
    assert_eq!(router.active_section_id(), Some("faq"));
    router.history_back();
    assert_eq!(router.location().fragment(), None);
    assert_eq!(router.active_section_id(), Some("faq"), "no fragment, nothing to do");
}

#[test]
fn test_back_and_forward_navigate() {
    let mut router = router(Some("intro"));
    router.handle_initial_hash();
    router.follow_fragment("regras");
    router.follow_fragment("faq");

    router.history_back();
    assert_eq!(visible(&router), vec!["regras"]);
    router.history_forward();
    assert_eq!(visible(&router), vec!["faq"]);
}

#[test]
fn test_hash_change_for_current_section_is_a_no_op() {
    let mut router = router(None);
    router.navigate_to_section("faq");
    router.scroll_by(5);

    router.handle_hash_change();

    assert_eq!(router.content_scroll, 5, "no re-navigation happened");
}

#[test]
fn test_activating_group_header_toggles_and_navigates() {
    let mut router = router(None);
    let mut menu = CountingMenu::default();

    assert!(router.activate(&LinkRef::Entry(1), &mut menu));
    assert_eq!(router.active_section_id(), Some("regras"));
    assert!(router.nav().entries[1].expanded);
    assert_eq!(menu.closed, 1);

    assert!(router.activate(&LinkRef::Entry(1), &mut menu));
    assert!(!router.nav().entries[1].expanded, "second activation collapses");
    assert_eq!(router.active_section_id(), Some("regras"));
    assert_eq!(menu.closed, 2);
}

#[test]
fn test_activating_child_does_not_toggle_group() {
    let mut router = router(None);
    let mut menu = CountingMenu::default();
    router.nav_mut().toggle_group(1);

    assert!(router.activate(&LinkRef::Child { entry: 1, child: 1 }, &mut menu));

    assert_eq!(router.active_section_id(), Some("combate"));
    assert!(router.nav().entries[1].expanded);
    assert_eq!(menu.closed, 1);
}

#[test]
fn test_inline_anchors_route_only_to_known_sections() {
    let mut router = router(None);
    let mut menu = CountingMenu::default();

    assert!(router.activate(&LinkRef::Anchor("#faq".to_string()), &mut menu));
    assert_eq!(router.active_section_id(), Some("faq"));

    assert!(!router.activate(&LinkRef::Anchor("#removed".to_string()), &mut menu));
    assert!(!router.activate(
        &LinkRef::Anchor("https://discord.gg/example".to_string()),
        &mut menu
    ));
    assert_eq!(router.active_section_id(), Some("faq"));
    assert_eq!(menu.closed, 1, "unrouted links leave the menu alone");
}
