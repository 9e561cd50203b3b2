//! Test the fruit workload at minimum degree 2.

use crate::CommandOutcome;
use crate::e2e_tests::helpers::*;

const FRUIT: [&str; 10] = [
    "apple",
    "banana",
    "cherry",
    "date",
    "fig",
    "grape",
    "kiwi",
    "lemon",
    "mango",
    "nectarine",
];

const COMMANDS: [&str; 5] = [
    "delete banana",
    "insert orange",
    "delete fig",
    "insert peach",
    "delete kiwi",
];

#[test]
fn test_fruit_scenario() {
    let mut tree = build_tree(2, &FRUIT);
    assert_valid(&tree);
    assert_eq!(tree.ordered_keys(), sorted(&FRUIT));

    let outcomes = replay(&mut tree, &COMMANDS);

    assert_eq!(
        outcomes,
        vec![
            CommandOutcome::Deleted("banana".to_string()),
            CommandOutcome::Inserted,
            CommandOutcome::Deleted("fig".to_string()),
            CommandOutcome::Inserted,
            CommandOutcome::Deleted("kiwi".to_string()),
        ]
    );
    assert_eq!(
        tree.ordered_keys(),
        [
            "apple",
            "cherry",
            "date",
            "grape",
            "lemon",
            "mango",
            "nectarine",
            "orange",
            "peach"
        ]
    );
    assert_eq!(tree.len(), 9);
}

#[test]
fn test_fruit_scenario_repeated_commands_are_noops() {
    let mut tree = build_tree(2, &FRUIT);
    replay(&mut tree, &COMMANDS);
    let before = tree.clone();

    let outcomes = replay(&mut tree, &COMMANDS);

    assert_eq!(
        outcomes,
        vec![
            CommandOutcome::NotFound,
            CommandOutcome::AlreadyPresent,
            CommandOutcome::NotFound,
            CommandOutcome::AlreadyPresent,
            CommandOutcome::NotFound,
        ]
    );
    assert_eq!(tree.root(), before.root());
}
