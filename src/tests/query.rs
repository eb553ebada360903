use super::{SearchPanel, NO_RESULTS_HINT, NO_RESULTS_TITLE};
use crate::config::Config;
use crate::document::Document;
use crate::formats::markdown::MarkdownFormat;
use crate::location::Location;
use crate::router::Router;
use crate::search::{SearchIndex, SnippetPart};
use std::time::{Duration, Instant};

const RULES: &str = "\
# Combat {#combat}

Combat rules apply in every zone.

# Vehicles {#vehicles}

Vehicle combat is forbidden in safe zones.

# Economy

Prices are fixed.
";

const DELAY: Duration = Duration::from_millis(300);

fn document() -> Document {
    let cfg = Config::from_toml("").unwrap();
    Document::parse(RULES, &MarkdownFormat, &cfg).unwrap()
}

fn fixture() -> (SearchIndex, Router) {
    let doc = document();
    let index = SearchIndex::build(&doc.sections);
    let router = Router::new(doc, Location::new("file:///rules.md", None));
    (index, router)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_burst_of_keystrokes_runs_one_search() {
    let (index, _) = fixture();
    let mut panel = SearchPanel::new(DELAY);
    let t0 = Instant::now();

    panel.push_char('z', t0);
    panel.push_char('o', t0 + ms(100));
    panel.push_char('n', t0 + ms(200));

    assert!(!panel.tick(&index, t0 + ms(300)), "quiet period restarted");
    assert!(!panel.is_open);
    assert!(panel.tick(&index, t0 + ms(500)));
    assert_eq!(panel.executed_query(), Some("zon"));
    assert_eq!(panel.results().len(), 2);
    assert!(panel.is_open);
    assert!(!panel.tick(&index, t0 + ms(900)), "nothing left pending");
}

#[test]
fn test_search_runs_on_trimmed_query() {
    let (index, _) = fixture();
    let mut panel = SearchPanel::new(DELAY);
    let t0 = Instant::now();

    panel.on_input("  combat ", t0);
    assert!(panel.tick(&index, t0 + DELAY));

    assert_eq!(panel.executed_query(), Some("combat"));
    assert_eq!(panel.query, "  combat ");
}

#[test]
fn test_blank_input_hides_panel_immediately() {
    let (index, _) = fixture();
    let mut panel = SearchPanel::new(DELAY);
    let t0 = Instant::now();
    panel.run(&index, "combat");
    panel.on_input("combat x", t0);

    panel.on_input("   ", t0 + ms(10));

    assert!(!panel.is_open);
    assert_eq!(panel.deadline(), None, "pending search was cancelled");
    assert!(!panel.tick(&index, t0 + ms(1000)));
}

#[test]
fn test_backspacing_to_empty_hides_panel() {
    let (index, _) = fixture();
    let mut panel = SearchPanel::new(DELAY);
    let t0 = Instant::now();
    panel.push_char('a', t0);
    panel.tick(&index, t0 + DELAY);
    assert!(panel.is_open);

    panel.pop_char(t0 + ms(400));

    assert!(panel.query.is_empty());
    assert!(!panel.is_open);
}

#[test]
fn test_no_matches_shows_placeholder() {
    let (index, _) = fixture();
    let mut panel = SearchPanel::new(DELAY);

    panel.run(&index, "xyz123");

    assert!(panel.is_open);
    assert!(panel.results().is_empty());
    assert!(panel.shows_placeholder());
    assert!(!NO_RESULTS_TITLE.is_empty() && !NO_RESULTS_HINT.is_empty());
}

#[test]
fn test_selecting_result_matches_direct_navigation() {
    let (index, mut router) = fixture();
    let (_, mut direct) = fixture();
    let mut panel = SearchPanel::new(DELAY);
    panel.on_input("combat", Instant::now());
    panel.run(&index, "combat");
    assert_eq!(panel.results()[1].entry.section_id, "vehicles");

    assert!(panel.select_at(1, &mut router));
    direct.navigate_to_section("vehicles");

    assert_eq!(router.active_section_id(), direct.active_section_id());
    assert_eq!(router.location().fragment(), Some("vehicles"));
    assert_eq!(router.nav(), direct.nav());
    assert!(panel.query.is_empty());
    assert!(!panel.is_open);
    assert_eq!(panel.deadline(), None);
}

#[test]
fn test_keyboard_selection_follows_cursor() {
    let (index, mut router) = fixture();
    let mut panel = SearchPanel::new(DELAY);
    panel.run(&index, "combat");

    panel.move_cursor(5);
    assert_eq!(panel.cursor, 1, "cursor stops at the last result");
    panel.move_cursor(-3);
    assert_eq!(panel.cursor, 0);
    panel.move_cursor(1);

    assert!(panel.select(&mut router));
    assert_eq!(router.active_section_id(), Some("vehicles"));
}

#[test]
fn test_closed_panel_selects_nothing() {
    let (index, mut router) = fixture();
    let mut panel = SearchPanel::new(DELAY);
    panel.run(&index, "combat");
    panel.dismiss();

    assert!(!panel.select_at(0, &mut router));
    assert!(!panel.select_at(7, &mut router));
    assert_eq!(router.active_section_id(), Some("combat"));
}

#[test]
fn test_focus_reopens_results_for_nonempty_query() {
    let (index, _) = fixture();
    let mut panel = SearchPanel::new(DELAY);
    panel.on_focus();
    assert!(!panel.is_open, "nothing searched yet");

    panel.on_input("prices", Instant::now());
    panel.run(&index, "prices");
    panel.dismiss();
    panel.on_focus();

    assert!(panel.is_open);
}

#[test]
fn test_rendered_results_highlight_every_occurrence() {
    let (index, _) = fixture();
    let mut panel = SearchPanel::new(DELAY);
    panel.run(&index, "COMBAT");

    let rendered = panel.rendered(100);

    assert_eq!(rendered.len(), 2);
    assert_eq!(rendered[0].title, "Combat");
    assert_eq!(
        rendered[0].snippet,
        vec![
            SnippetPart {
                text: "Combat".to_string(),
                highlighted: true,
            },
            SnippetPart {
                text: " rules apply in every zone.".to_string(),
                highlighted: false,
            },
        ]
    );
    assert_eq!(rendered[1].section_id, "vehicles");
    assert!(rendered[1]
        .snippet
        .iter()
        .any(|part| part.highlighted && part.text == "combat"));
}
