//! Test deletes that run down the leftmost and rightmost edges of the tree,
//! where a minimal child has a sibling on one side only.

use crate::BTree;
use crate::e2e_tests::helpers::*;

fn numbered_tree(degree: usize, count: usize) -> (BTree, Vec<String>) {
    init_tracing();
    let keys: Vec<String> = (0..count).map(|i| format!("n{i:04}")).collect();
    let mut tree = BTree::new(degree).expect("valid degree");
    tree.extend(keys.iter().cloned());
    assert_valid(&tree);
    (tree, keys)
}

#[test]
fn test_delete_smallest_repeatedly() {
    for degree in 2..=5 {
        let (mut tree, keys) = numbered_tree(degree, 120);
        assert!(tree.height() >= 3, "degree {degree} tree too shallow");

        for (index, key) in keys.iter().enumerate() {
            assert_eq!(tree.ordered_keys().first(), Some(key));
            assert_eq!(tree.delete(key), Some(key.clone()));
            assert_valid(&tree);
            assert_eq!(tree.ordered_keys(), keys[index + 1..]);
        }
        assert!(tree.is_empty());
    }
}

#[test]
fn test_delete_largest_repeatedly() {
    for degree in 2..=5 {
        let (mut tree, keys) = numbered_tree(degree, 120);

        for (index, key) in keys.iter().enumerate().rev() {
            assert_eq!(tree.ordered_keys().last(), Some(key));
            assert_eq!(tree.delete(key), Some(key.clone()));
            assert_valid(&tree);
            assert_eq!(tree.ordered_keys(), keys[..index]);
        }
        assert!(tree.is_empty());
    }
}

#[test]
fn test_delete_root_separators_repeatedly() {
    for degree in 2..=4 {
        let (mut tree, keys) = numbered_tree(degree, 80);

        while let Some(separator) = tree.root().and_then(|root| root.keys().first().cloned()) {
            assert_eq!(tree.delete(&separator), Some(separator.clone()));
            assert_valid(&tree);
            assert!(!tree.search(&separator));
        }
        assert!(tree.is_empty());
        assert_eq!(keys.len(), 80);
    }
}

#[test]
fn test_absent_keys_at_edges_change_nothing() {
    let (mut tree, _) = numbered_tree(2, 50);
    let before = tree.clone();

    // Below the smallest, above the largest, and between two neighbours.
    for absent in ["a", "z", "n0010x"] {
        assert_eq!(tree.delete(absent), None);
        assert_eq!(tree.root(), before.root());
    }
    assert_eq!(tree.len(), 50);
}
