//! Main simulator harness for deterministic simulation testing.
//!
//! Ties the workload generator, the tree and a reference model together and
//! records every disagreement as an [`InvariantViolation`].

use std::collections::BTreeSet;

use crate::command::{Command, CommandOutcome};
use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::invariants::InvariantViolation;
use crate::tree::BTree;

use super::workload::{WorkloadConfig, WorkloadGenerator};

/// Configuration for the simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Random seed for reproducibility.
    pub seed: u64,
    /// Minimum degree of the tree under test.
    pub degree: usize,
    /// Number of distinct keys the workload draws from.
    pub key_space: usize,
    /// Probability of a delete instead of an insert.
    pub delete_rate: f64,
    /// Probability that a delete targets an absent key.
    pub absent_delete_rate: f64,
}

impl SimulatorConfig {
    /// Create a new simulator config with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let workload = WorkloadConfig::default();
        Self {
            seed,
            degree: TreeConfig::DEFAULT_DEGREE,
            key_space: workload.key_space,
            delete_rate: workload.delete_rate,
            absent_delete_rate: workload.absent_delete_rate,
        }
    }

    /// Set the minimum degree.
    #[must_use]
    pub const fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    /// Set the size of the key space.
    #[must_use]
    pub const fn with_key_space(mut self, key_space: usize) -> Self {
        self.key_space = key_space;
        self
    }

    /// Set the delete rate.
    #[must_use]
    pub const fn with_delete_rate(mut self, rate: f64) -> Self {
        self.delete_rate = rate;
        self
    }

    /// Set the absent-key delete rate.
    #[must_use]
    pub const fn with_absent_delete_rate(mut self, rate: f64) -> Self {
        self.absent_delete_rate = rate;
        self
    }

    fn workload(&self) -> WorkloadConfig {
        WorkloadConfig {
            key_space: self.key_space,
            delete_rate: self.delete_rate,
            absent_delete_rate: self.absent_delete_rate,
        }
    }
}

/// Results from a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    /// The seed used for this simulation.
    pub seed: u64,
    /// Number of commands applied.
    pub operations: u64,
    /// Inserts that added a key.
    pub inserts: u64,
    /// Inserts rejected because the key was present.
    pub duplicate_inserts: u64,
    /// Deletes that removed a key.
    pub deletes: u64,
    /// Deletes of keys that were not present.
    pub absent_deletes: u64,
    /// Keys stored when the run ended.
    pub final_keys: Vec<String>,
    /// Invariant violations and model disagreements detected.
    pub invariant_violations: Vec<InvariantViolation>,
}

impl SimulationResult {
    /// Check if the simulation passed (no violations).
    #[must_use]
    pub fn passed(&self) -> bool {
        self.invariant_violations.is_empty()
    }
}

/// The main simulator harness.
pub struct Simulator {
    config: SimulatorConfig,
    generator: WorkloadGenerator,
    tree: BTree,
    model: BTreeSet<String>,
}

impl Simulator {
    /// Create a new simulator with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidDegree`] for an out-of-range degree and
    /// [`TreeError::Config`] for an empty key space or a rate outside `0..=1`.
    pub fn new(config: SimulatorConfig) -> Result<Self, TreeError> {
        let tree = BTree::new(config.degree)?;
        let generator = WorkloadGenerator::with_config(config.seed, config.workload())?;

        Ok(Self {
            config,
            generator,
            tree,
            model: BTreeSet::new(),
        })
    }

    /// The tree under test.
    #[must_use]
    pub const fn tree(&self) -> &BTree {
        &self.tree
    }

    /// Run the simulation for `op_count` commands, continuing from any
    /// previous run.
    pub fn run(&mut self, op_count: usize) -> SimulationResult {
        let mut result = SimulationResult {
            seed: self.config.seed,
            operations: 0,
            inserts: 0,
            duplicate_inserts: 0,
            deletes: 0,
            absent_deletes: 0,
            final_keys: Vec::new(),
            invariant_violations: Vec::new(),
        };

        tracing::debug!(
            seed = self.config.seed,
            degree = self.config.degree,
            op_count,
            "starting simulation"
        );

        for _ in 0..op_count {
            let command = self.generator.next_command(&self.model);
            let outcome = self.tree.apply(&command);
            let expected = self.apply_to_model(&command);
            result.operations += 1;

            match &outcome {
                CommandOutcome::Inserted => result.inserts += 1,
                CommandOutcome::AlreadyPresent => result.duplicate_inserts += 1,
                CommandOutcome::Deleted(_) => result.deletes += 1,
                CommandOutcome::NotFound => result.absent_deletes += 1,
            }

            if outcome != expected {
                result.invariant_violations.push(InvariantViolation {
                    description: "Tree outcome disagrees with model".to_string(),
                    context: format!(
                        "op {}: '{command}' gave {outcome:?}, expected {expected:?}",
                        result.operations
                    ),
                });
            }

            self.check_after(&command, result.operations, &mut result.invariant_violations);

            if !result.invariant_violations.is_empty() {
                tracing::debug!(op = result.operations, %command, "stopping at first failure");
                break;
            }
        }

        result.final_keys = self.tree.ordered_keys();
        result
    }

    fn apply_to_model(&mut self, command: &Command) -> CommandOutcome {
        match command {
            Command::Insert(key) => {
                if self.model.insert(key.clone()) {
                    CommandOutcome::Inserted
                } else {
                    CommandOutcome::AlreadyPresent
                }
            }
            Command::Delete(key) => self
                .model
                .take(key.as_str())
                .map_or(CommandOutcome::NotFound, CommandOutcome::Deleted),
        }
    }

    fn check_after(&self, command: &Command, op: u64, violations: &mut Vec<InvariantViolation>) {
        for violation in self.tree.check_invariants() {
            violations.push(InvariantViolation {
                description: violation.description,
                context: format!("after op {op} '{command}': {}", violation.context),
            });
        }

        let keys = self.tree.ordered_keys();
        if !keys.iter().eq(self.model.iter()) {
            violations.push(InvariantViolation {
                description: "Enumeration disagrees with model".to_string(),
                context: format!(
                    "after op {op} '{command}': tree has {} keys, model has {}",
                    keys.len(),
                    self.model.len()
                ),
            });
        }

        if self.tree.search(command.key()) != self.model.contains(command.key()) {
            violations.push(InvariantViolation {
                description: "Search disagrees with model".to_string(),
                context: format!("after op {op} '{command}'"),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_basic() {
        let mut simulator = Simulator::new(SimulatorConfig::new(12345)).expect("valid config");

        let result = simulator.run(300);

        assert!(result.passed(), "{:?}", result.invariant_violations);
        assert_eq!(result.operations, 300);
        assert_eq!(
            result.inserts + result.duplicate_inserts + result.deletes + result.absent_deletes,
            300
        );
        assert!(result.inserts > 0);
        assert!(result.deletes > 0);
        assert_eq!(result.final_keys.len(), simulator.tree().len());
    }

    #[test]
    fn test_simulator_is_deterministic() {
        let config = SimulatorConfig::new(999).with_degree(3);

        let first = Simulator::new(config.clone()).expect("valid config").run(400);
        let second = Simulator::new(config).expect("valid config").run(400);

        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let first = Simulator::new(SimulatorConfig::new(1)).expect("valid config").run(200);
        let second = Simulator::new(SimulatorConfig::new(2)).expect("valid config").run(200);

        assert_ne!(first.final_keys, second.final_keys);
    }

    #[test]
    fn test_small_key_space_forces_collisions() {
        let config = SimulatorConfig::new(5)
            .with_key_space(8)
            .with_delete_rate(0.3)
            .with_absent_delete_rate(0.5);
        let result = Simulator::new(config).expect("valid config").run(300);

        assert!(result.passed(), "{:?}", result.invariant_violations);
        assert!(result.duplicate_inserts > 0);
        assert!(result.absent_deletes > 0);
        assert!(result.final_keys.len() <= 8);
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert_eq!(
            Simulator::new(SimulatorConfig::new(0).with_degree(1)).err(),
            Some(TreeError::InvalidDegree(1))
        );
        assert!(matches!(
            Simulator::new(SimulatorConfig::new(0).with_delete_rate(1.5)),
            Err(TreeError::Config(_))
        ));
        assert!(matches!(
            Simulator::new(SimulatorConfig::new(0).with_absent_delete_rate(-0.1)),
            Err(TreeError::Config(_))
        ));
        assert!(matches!(
            Simulator::new(SimulatorConfig::new(0).with_key_space(0)),
            Err(TreeError::Config(_))
        ));
    }

    #[test]
    fn test_runs_continue_from_previous_state() {
        let mut simulator = Simulator::new(SimulatorConfig::new(77)).expect("valid config");

        let first = simulator.run(100);
        let second = simulator.run(100);

        assert!(first.passed() && second.passed());
        assert_eq!(second.final_keys, simulator.tree().ordered_keys());
    }
}
