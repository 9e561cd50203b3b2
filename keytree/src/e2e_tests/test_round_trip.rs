//! Test that keys inserted in any order enumerate sorted, across many seeds.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::BTree;
use crate::e2e_tests::helpers::*;
use crate::simulation::{Simulator, SimulatorConfig};

#[test]
fn test_shuffled_inserts_enumerate_sorted() {
    init_tracing();
    let keys: Vec<String> = (0..300).map(|i| format!("k{:05}", i * 7)).collect();

    for degree in 2..=6 {
        let mut shuffled = keys.clone();
        shuffled.shuffle(&mut StdRng::seed_from_u64(degree as u64));

        let mut tree = BTree::new(degree).expect("valid degree");
        tree.extend(shuffled);

        assert_valid(&tree);
        assert_eq!(tree.ordered_keys(), keys, "degree {degree}");
        assert_eq!(tree.len(), keys.len());
    }
}

#[test]
fn test_random_workloads_match_model() {
    init_tracing();
    for seed in 0..20 {
        let config = SimulatorConfig::new(seed)
            .with_degree(2 + (seed as usize % 4))
            .with_key_space(64)
            .with_delete_rate(0.5)
            .with_absent_delete_rate(0.2);

        let result = Simulator::new(config).expect("valid config").run(400);

        assert!(
            result.passed(),
            "seed {seed}: {:?}",
            result.invariant_violations
        );
    }
}

#[test]
fn test_duplicates_collapse() {
    let tree = build_tree(3, &["pear", "fig", "pear", "apple", "fig", "fig"]);

    assert_eq!(tree.ordered_keys(), ["apple", "fig", "pear"]);
    assert_eq!(tree.len(), 3);
}
