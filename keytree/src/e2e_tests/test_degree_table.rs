//! Test one replayed workload per minimum degree from 2 to 6.

use crate::e2e_tests::helpers::*;

struct Case {
    degree: usize,
    words: [&'static str; 10],
    commands: [&'static str; 5],
    expected: &'static [&'static str],
}

const CASES: [Case; 5] = [
    Case {
        degree: 2,
        words: [
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
        ],
        commands: [
            "delete banana",
            "insert orange",
            "delete fig",
            "insert peach",
            "delete kiwi",
        ],
        expected: &[
            "apple",
            "cherry",
            "date",
            "grape",
            "lemon",
            "mango",
            "nectarine",
            "orange",
            "peach",
        ],
    },
    Case {
        degree: 3,
        words: [
            "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india",
            "juliet",
        ],
        commands: [
            "delete charlie",
            "insert kilo",
            "delete echo",
            "insert lima",
            "delete hotel",
        ],
        expected: &[
            "alpha", "bravo", "delta", "foxtrot", "golf", "india", "juliet", "kilo", "lima",
        ],
    },
    Case {
        degree: 4,
        words: [
            "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        ],
        commands: [
            "delete two",
            "insert eleven",
            "delete five",
            "insert twelve",
            "delete seven",
        ],
        expected: &[
            "eight", "eleven", "four", "nine", "one", "six", "ten", "three", "twelve",
        ],
    },
    Case {
        degree: 5,
        words: [
            "x-ray", "yankee", "zulu", "alpha", "bravo", "charlie", "delta", "echo", "foxtrot",
            "golf",
        ],
        commands: [
            "delete zulu",
            "insert hotel",
            "delete yankee",
            "insert india",
            "delete x-ray",
        ],
        expected: &[
            "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india",
        ],
    },
    Case {
        degree: 6,
        words: [
            "dog", "cat", "bird", "fish", "elephant", "ant", "bee", "cow", "deer", "frog",
        ],
        commands: [
            "delete fish",
            "insert goat",
            "delete bee",
            "insert horse",
            "delete frog",
        ],
        expected: &[
            "ant", "bird", "cat", "cow", "deer", "dog", "elephant", "goat", "horse",
        ],
    },
];

#[test]
fn test_degree_table() {
    for case in &CASES {
        let mut tree = build_tree(case.degree, &case.words);
        assert_valid(&tree);
        assert_eq!(tree.degree(), case.degree);

        replay(&mut tree, &case.commands);

        assert_eq!(
            tree.ordered_keys(),
            case.expected,
            "degree {} ended with the wrong keys",
            case.degree
        );
        assert_eq!(
            tree.ordered_keys(),
            expected_after(&case.words, &case.commands)
        );
    }
}

#[test]
fn test_degree_table_every_key_searchable() {
    for case in &CASES {
        let mut tree = build_tree(case.degree, &case.words);
        replay(&mut tree, &case.commands);

        for key in case.expected {
            assert!(tree.search(key), "degree {}: '{key}' missing", case.degree);
        }
        for line in &case.commands {
            if let Some(deleted) = line.strip_prefix("delete ") {
                assert!(!tree.search(deleted), "degree {}: '{deleted}' still present", case.degree);
            }
        }
    }
}
