//! Test deleting every key in random order at minimum degree 3.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::e2e_tests::helpers::*;

#[test]
fn test_delete_all_animals_in_random_order() {
    for seed in [1_u64, 2, 3, 42, 2024] {
        let mut tree = build_tree(3, &ANIMALS);
        assert_valid(&tree);
        assert_eq!(tree.len(), 26);

        let mut order = ANIMALS.to_vec();
        order.shuffle(&mut StdRng::seed_from_u64(seed));

        for (deleted, animal) in order.iter().enumerate() {
            assert_eq!(
                tree.delete(animal),
                Some((*animal).to_string()),
                "seed {seed}: '{animal}' should be present"
            );
            assert_valid(&tree);
            assert!(!tree.search(animal));
            assert_eq!(tree.len(), 26 - deleted - 1);
        }

        assert!(tree.is_empty(), "seed {seed}: tree should be empty");
        assert!(tree.root().is_none());
        assert!(tree.ordered_keys().is_empty());
        assert_eq!(tree.height(), 0);
    }
}

#[test]
fn test_emptied_tree_is_reusable() {
    let mut tree = build_tree(3, &ANIMALS);
    for animal in ANIMALS {
        tree.delete(animal);
    }
    assert!(tree.is_empty());

    tree.extend(ANIMALS.iter().rev().map(|a| (*a).to_string()));

    assert_valid(&tree);
    assert_eq!(tree.ordered_keys(), sorted(&ANIMALS));
}
