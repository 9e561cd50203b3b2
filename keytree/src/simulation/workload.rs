//! Workload generator for deterministic simulation testing.
//!
//! Produces reproducible sequences of [`Command`]s over a bounded key space,
//! so inserts collide with earlier keys and deletes hit both present and
//! absent keys.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::command::Command;
use crate::config::ConfigError;

/// Configuration for workload generation.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadConfig {
    /// Number of distinct keys the workload draws from.
    pub key_space: usize,
    /// Probability of generating a delete instead of an insert (0.0 - 1.0).
    pub delete_rate: f64,
    /// Probability that a delete targets a key not currently stored (0.0 - 1.0).
    pub absent_delete_rate: f64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            key_space: 200,
            delete_rate: 0.4,
            absent_delete_rate: 0.1,
        }
    }
}

impl WorkloadConfig {
    /// Check that the key space is non-empty and both rates are probabilities.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key_space == 0 {
            return Err(invalid("key_space", "must be at least 1".to_string()));
        }
        for (name, rate) in [
            ("delete_rate", self.delete_rate),
            ("absent_delete_rate", self.absent_delete_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(invalid(name, format!("{rate} is not a probability")));
            }
        }
        Ok(())
    }
}

fn invalid(name: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        name: name.to_string(),
        message,
    }
}

/// Generator for random [`Command`]s.
///
/// Deletes of present keys are picked from the caller's view of the stored
/// keys, so the generator stays in step with whatever the tree holds.
pub struct WorkloadGenerator {
    rng: StdRng,
    config: WorkloadConfig,
}

impl WorkloadGenerator {
    /// Create a generator with the given seed and default configuration.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            config: WorkloadConfig::default(),
        }
    }

    /// Create a generator with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the configuration does not
    /// pass [`WorkloadConfig::validate`].
    pub fn with_config(seed: u64, config: WorkloadConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            config,
        })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &WorkloadConfig {
        &self.config
    }

    /// Generate the next command given the keys currently stored.
    pub fn next_command(&mut self, stored: &BTreeSet<String>) -> Command {
        let is_delete = !stored.is_empty() && self.rng.random_bool(self.config.delete_rate);
        if !is_delete {
            return Command::Insert(self.random_key());
        }

        if self.rng.random_bool(self.config.absent_delete_rate) {
            return Command::Delete(self.random_key());
        }

        let present: Vec<&String> = stored.iter().collect();
        present.choose(&mut self.rng).map_or_else(
            || Command::Delete(self.random_key()),
            |key| Command::Delete((*key).clone()),
        )
    }

    /// A key drawn uniformly from the key space.
    pub fn random_key(&mut self) -> String {
        let index = self.rng.random_range(0..self.config.key_space.max(1));
        key_name(index)
    }
}

/// Key for slot `index` of the key space.
///
/// Zero padding keeps string order equal to slot order.
#[must_use]
pub fn key_name(index: usize) -> String {
    format!("key{index:06}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_commands() {
        let stored = BTreeSet::new();
        let mut first = WorkloadGenerator::new(42);
        let mut second = WorkloadGenerator::new(42);

        for _ in 0..50 {
            assert_eq!(first.next_command(&stored), second.next_command(&stored));
        }
    }

    #[test]
    fn test_empty_tree_only_gets_inserts() {
        let config = WorkloadConfig {
            delete_rate: 1.0,
            ..WorkloadConfig::default()
        };
        let mut generator = WorkloadGenerator::with_config(7, config).expect("valid config");

        for _ in 0..20 {
            assert!(matches!(
                generator.next_command(&BTreeSet::new()),
                Command::Insert(_)
            ));
        }
    }

    #[test]
    fn test_deletes_target_stored_keys() {
        let config = WorkloadConfig {
            key_space: 1000,
            delete_rate: 1.0,
            absent_delete_rate: 0.0,
        };
        let mut generator = WorkloadGenerator::with_config(3, config).expect("valid config");
        let stored: BTreeSet<String> = ["key000001", "key000500"]
            .iter()
            .map(|k| (*k).to_string())
            .collect();

        for _ in 0..20 {
            let command = generator.next_command(&stored);
            assert!(matches!(command, Command::Delete(_)));
            assert!(stored.contains(command.key()));
        }
    }

    #[test]
    fn test_keys_stay_in_key_space() {
        let config = WorkloadConfig {
            key_space: 5,
            ..WorkloadConfig::default()
        };
        let mut generator = WorkloadGenerator::with_config(11, config).expect("valid config");

        for _ in 0..100 {
            let key = generator.random_key();
            assert!(key.as_str() < key_name(5).as_str(), "{key} out of range");
        }
    }

    #[test]
    fn test_with_config_rejects_bad_rates() {
        for config in [
            WorkloadConfig {
                delete_rate: 1.5,
                ..WorkloadConfig::default()
            },
            WorkloadConfig {
                absent_delete_rate: -0.1,
                ..WorkloadConfig::default()
            },
            WorkloadConfig {
                delete_rate: f64::NAN,
                ..WorkloadConfig::default()
            },
            WorkloadConfig {
                key_space: 0,
                ..WorkloadConfig::default()
            },
        ] {
            assert!(WorkloadGenerator::with_config(0, config).is_err());
        }

        let err = WorkloadGenerator::with_config(
            0,
            WorkloadConfig {
                absent_delete_rate: 2.0,
                ..WorkloadConfig::default()
            },
        )
        .err()
        .expect("rate above 1 is rejected");
        assert_eq!(
            err.to_string(),
            "invalid value for absent_delete_rate: 2 is not a probability"
        );
    }

    #[test]
    fn test_key_name_orders_like_index() {
        assert_eq!(key_name(7), "key000007");
        assert!(key_name(9) < key_name(10));
    }
}
