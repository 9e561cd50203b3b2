//! Test that the same seeded workload always produces the same tree.

use crate::e2e_tests::helpers::*;
use crate::simulation::{Simulator, SimulatorConfig};

#[test]
fn test_deterministic_simulation() {
    init_tracing();
    for degree in 2..=6 {
        let config = SimulatorConfig::new(31_337)
            .with_degree(degree)
            .with_key_space(150)
            .with_delete_rate(0.45);

        let mut first = Simulator::new(config.clone()).expect("valid config");
        let mut second = Simulator::new(config).expect("valid config");
        let run1 = first.run(600);
        let run2 = second.run(600);

        assert!(run1.passed(), "degree {degree}: {:?}", run1.invariant_violations);
        assert_eq!(run1, run2, "degree {degree} runs diverged");
        assert_eq!(first.tree().root(), second.tree().root());
    }
}

#[test]
fn test_same_keys_same_shape() {
    let words = ["kiwi", "apple", "mango", "fig", "date", "lemon", "grape", "cherry"];

    let first = build_tree(2, &words);
    let second = build_tree(2, &words);

    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(first.root(), second.root());
}
