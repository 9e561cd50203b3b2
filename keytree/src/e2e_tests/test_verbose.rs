//! Test the verbose diagnostic dump.

use crate::e2e_tests::helpers::*;

#[test]
fn test_verbose_tree_behaves_like_quiet_tree() {
    let words = ["dog", "cat", "bird", "fish", "elephant", "ant", "bee", "cow"];
    let commands = ["delete fish", "insert goat", "delete bee", "delete absent"];

    let mut quiet = build_tree(2, &words);
    let mut verbose = build_verbose_tree(2, &words);
    assert!(verbose.config().verbose);

    assert_eq!(replay(&mut quiet, &commands), replay(&mut verbose, &commands));
    assert_eq!(verbose.ordered_keys(), quiet.ordered_keys());
    assert_eq!(verbose.root(), quiet.root());
}

#[test]
fn test_dump_has_one_line_per_node() {
    let tree = build_verbose_tree(2, &["a", "b", "c", "d", "e", "f"]);

    assert_eq!(tree.to_string(), "b d\n|- a\n|- c\n|- e f\n");
}

#[test]
fn test_enumeration_logs_dump_when_verbose() {
    let tree = build_verbose_tree(2, &["a", "b", "c", "d", "e", "f"]);

    let mut keys = Vec::new();
    let events = capture_debug_events(|| keys = tree.ordered_keys());

    assert_eq!(keys, ["a", "b", "c", "d", "e", "f"]);
    assert_eq!(events, ["b d", "|- a", "|- c", "|- e f"]);
}

#[test]
fn test_enumeration_logs_nothing_when_quiet() {
    let tree = build_tree(2, &["a", "b", "c", "d", "e", "f"]);

    let events = capture_debug_events(|| {
        let _ = tree.ordered_keys();
    });

    assert!(events.is_empty(), "unexpected events: {events:?}");
}

#[test]
fn test_verbose_dump_follows_deletes() {
    let mut tree = build_verbose_tree(2, &["a", "b", "c", "d", "e", "f"]);
    replay(&mut tree, &["delete f", "delete e"]);

    let events = capture_debug_events(|| {
        let _ = tree.ordered_keys();
    });

    assert_eq!(events, ["b", "|- a", "|- c d"]);
}

#[test]
fn test_dump_indents_each_level() {
    let words: Vec<String> = (0..20).map(|i| format!("{i:02}")).collect();
    let refs: Vec<&str> = words.iter().map(String::as_str).collect();
    let tree = build_tree(2, &refs);
    let dump = tree.to_string();

    assert!(tree.height() >= 3);
    let deepest = "|- ".repeat(tree.height() - 1);
    assert!(dump.lines().any(|line| line.starts_with(&deepest)));
    assert!(dump.lines().next().is_some_and(|line| !line.starts_with("|- ")));
}
