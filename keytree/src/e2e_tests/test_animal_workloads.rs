//! Test long interleaved animal workloads: a wide node at degree 7, and a
//! degree-2 tree built from a word list with repeats.

use crate::CommandOutcome;
use crate::e2e_tests::helpers::*;

const WIDE_COMMANDS: [&str; 46] = [
    "delete cat",
    "insert alligator",
    "delete dog",
    "insert buffalo",
    "delete eel",
    "insert crocodile",
    "delete fox",
    "insert deer",
    "delete goat",
    "insert eagle",
    "delete horse",
    "insert falcon",
    "delete jaguar",
    "insert gorilla",
    "delete koala",
    "insert hawk",
    "delete lemur",
    "insert ibis",
    "delete monkey",
    "insert jaguar",
    "delete newt",
    "insert kangaroo",
    "delete owl",
    "insert lion",
    "delete penguin",
    "insert moose",
    "delete quail",
    "insert narwhal",
    "delete rabbit",
    "insert octopus",
    "delete snake",
    "insert panda",
    "delete tiger",
    "insert quokka",
    "delete umbrella",
    "insert raccoon",
    "delete vulture",
    "insert salamander",
    "delete wolf",
    "insert turtle",
    "delete xerus",
    "insert unicorn",
    "delete yak",
    "insert viper",
    "delete zebra",
    "insert walrus",
];

const WIDE_EXPECTED: [&str; 26] = [
    "alligator", "ant", "bat", "buffalo", "crocodile", "deer",
    "eagle", "falcon", "gorilla", "hawk", "ibis", "iguana",
    "jaguar", "kangaroo", "lion", "moose", "narwhal", "octopus",
    "panda", "quokka", "raccoon", "salamander", "turtle", "unicorn",
    "viper", "walrus",
];

const MIXED_WORDS: [&str; 51] = [
    "ant", "bat", "cat", "dog", "eel", "fox",
    "goat", "horse", "iguana", "jaguar", "koala", "lemur",
    "monkey", "newt", "owl", "penguin", "quail", "rabbit",
    "snake", "tiger", "umbrella", "vulture", "wolf", "xerus",
    "yak", "zebra", "alligator", "buffalo", "crocodile", "deer",
    "eagle", "falcon", "gorilla", "hawk", "ibis", "kangaroo",
    "lion", "moose", "narwhal", "octopus", "panda", "quokka",
    "raccoon", "salamander", "turtle", "unicorn", "viper", "walrus",
    "xerus", "yak", "zebra",
];

const MIXED_COMMANDS: [&str; 52] = [
    "delete cat",
    "insert alpaca",
    "delete dog",
    "insert bison",
    "delete eel",
    "insert camel",
    "delete fox",
    "insert dingo",
    "delete goat",
    "insert emu",
    "delete horse",
    "insert ferret",
    "delete jaguar",
    "insert gazelle",
    "delete koala",
    "insert hamster",
    "delete lemur",
    "insert iguana",
    "delete monkey",
    "insert jaguarundi",
    "delete newt",
    "insert koala",
    "delete owl",
    "insert llama",
    "delete penguin",
    "insert meerkat",
    "delete quail",
    "insert nyala",
    "delete rabbit",
    "insert oryx",
    "delete snake",
    "insert platypus",
    "delete tiger",
    "insert quetzal",
    "delete umbrella",
    "insert rhino",
    "delete vulture",
    "insert sloth",
    "delete wolf",
    "insert tapir",
    "delete xerus",
    "insert uakari",
    "delete yak",
    "insert vicuna",
    "delete zebra",
    "insert warthog",
    "delete alligator",
    "insert xenomorph",
    "delete buffalo",
    "insert yak",
    "delete crocodile",
    "insert zebra",
];

const MIXED_EXPECTED: [&str; 47] = [
    "alpaca", "ant", "bat", "bison", "camel", "deer",
    "dingo", "eagle", "emu", "falcon", "ferret", "gazelle",
    "gorilla", "hamster", "hawk", "ibis", "iguana", "jaguarundi",
    "kangaroo", "koala", "lion", "llama", "meerkat", "moose",
    "narwhal", "nyala", "octopus", "oryx", "panda", "platypus",
    "quetzal", "quokka", "raccoon", "rhino", "salamander", "sloth",
    "tapir", "turtle", "uakari", "unicorn", "vicuna", "viper",
    "walrus", "warthog", "xenomorph", "yak", "zebra",
];

#[test]
fn test_wide_nodes_at_degree_seven() {
    let mut tree = build_tree(7, &ANIMALS);
    assert_valid(&tree);
    // 26 keys fit in two levels when a node holds up to 13.
    assert_eq!(tree.height(), 2);

    let outcomes = replay(&mut tree, &WIDE_COMMANDS);

    // "jaguar" is deleted and later inserted again.
    assert!(
        outcomes
            .iter()
            .all(|o| matches!(o, CommandOutcome::Inserted | CommandOutcome::Deleted(_)))
    );
    assert_eq!(tree.ordered_keys(), WIDE_EXPECTED);
    assert_eq!(tree.ordered_keys(), expected_after(&ANIMALS, &WIDE_COMMANDS));
    assert_eq!(tree.len(), 26);
}

#[test]
fn test_repeated_words_at_degree_two() {
    let mut tree = build_tree(2, &MIXED_WORDS);
    assert_valid(&tree);
    // "xerus", "yak" and "zebra" appear twice in the word list.
    assert_eq!(tree.len(), MIXED_WORDS.len() - 3);
    assert_eq!(tree.ordered_keys(), sorted(&MIXED_WORDS));

    let outcomes = replay(&mut tree, &MIXED_COMMANDS);

    // "iguana" is inserted while present, "koala" after its own delete.
    assert_eq!(outcomes[17], CommandOutcome::AlreadyPresent);
    assert_eq!(outcomes[21], CommandOutcome::Inserted);
    assert_eq!(tree.ordered_keys(), MIXED_EXPECTED);
    assert_eq!(
        tree.ordered_keys(),
        expected_after(&MIXED_WORDS, &MIXED_COMMANDS)
    );
    for command in MIXED_COMMANDS {
        if let Some(key) = command.strip_prefix("insert ") {
            assert!(tree.search(key), "'{key}' should be present");
        }
    }
}
