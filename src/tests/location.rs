use super::Location;

#[test]
fn test_split_path_and_fragment() {
    assert_eq!(
        Location::split("rules.md#regras"),
        ("rules.md", Some("regras".to_string()))
    );
    assert_eq!(Location::split("rules.md#"), ("rules.md", None));
    assert_eq!(Location::split("rules.md"), ("rules.md", None));
}

#[test]
fn test_replace_does_not_add_history() {
    let mut location = Location::new("file:///rules.md", None);
    location.replace_fragment("a");
    location.replace_fragment("b");

    assert_eq!(location.fragment(), Some("b"));
    assert!(!location.back(), "nothing to go back to");
}

#[test]
fn test_assign_reports_changes_only() {
    let mut location = Location::new("file:///rules.md", Some("a".to_string()));

    assert!(!location.assign_fragment("a"));
    assert!(location.assign_fragment("b"));
    assert_eq!(location.fragment(), Some("b"));
}

#[test]
fn test_empty_fragment_is_not_assigned() {
    let mut location = Location::new("file:///rules.md", None);

    assert!(!location.assign_fragment(""));
    assert_eq!(location.fragment(), None);
    assert_eq!(location.href(), "file:///rules.md");
    assert!(!location.back(), "no history entry was added");
}

#[test]
fn test_back_and_forward() {
    let mut location = Location::new("file:///rules.md", Some("a".to_string()));
    location.assign_fragment("b");
    location.assign_fragment("c");

    assert!(location.back());
    assert_eq!(location.fragment(), Some("b"));
    assert!(location.back());
    assert_eq!(location.fragment(), Some("a"));
    assert!(!location.back());

    assert!(location.forward());
    assert_eq!(location.fragment(), Some("b"));

    location.assign_fragment("d");
    assert!(!location.forward(), "assigning discards forward history");
}

#[test]
fn test_links() {
    let mut location = Location::new("https://rules.example", None);
    assert_eq!(location.href(), "https://rules.example");

    location.replace_fragment("faq");
    assert_eq!(location.href(), "https://rules.example#faq");
    assert_eq!(location.link_to("intro"), "https://rules.example#intro");
}
