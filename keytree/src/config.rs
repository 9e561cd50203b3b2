//! Tree configuration.
//!
//! A tree is configured with its minimum degree and a verbosity switch for
//! the diagnostic dump. Configuration can be built in code or loaded from
//! environment variables.
//!
//! # Environment Variables
//!
//! - `KEYTREE_DEGREE`: minimum degree `t` (default: `2`)
//! - `KEYTREE_VERBOSE`: `1`/`true`/`yes` or `0`/`false`/`no` (default: off)
//!
//! # Invariants
//!
//! - A config accepted by [`TreeConfig::validate`] has
//!   `2 <= degree <= TreeConfig::MAX_DEGREE`, so node capacity `2 * degree - 1`
//!   never overflows.

use crate::error::TreeError;

/// Environment variable holding the minimum degree.
pub const DEGREE_ENV_VAR: &str = "KEYTREE_DEGREE";

/// Environment variable enabling the diagnostic dump.
pub const VERBOSE_ENV_VAR: &str = "KEYTREE_VERBOSE";

/// Tree configuration.
///
/// # Post-conditions
///
/// After [`TreeConfig::validate`] succeeds, every node except the root holds
/// between `degree - 1` and `2 * degree - 1` keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Minimum degree `t`. Fixed for the lifetime of a tree.
    pub degree: usize,
    /// Emit an indented dump of every node visited during enumeration, and
    /// log rejected inserts and absent deletes at `info` level.
    pub verbose: bool,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DEGREE)
    }
}

impl TreeConfig {
    /// Default minimum degree.
    pub const DEFAULT_DEGREE: usize = 2;
    /// Smallest minimum degree for which a valid tree shape exists.
    pub const MIN_DEGREE: usize = 2;
    /// Largest minimum degree whose node capacity fits in a `usize`.
    pub const MAX_DEGREE: usize = usize::MAX / 2;

    /// Create a quiet configuration with the given minimum degree.
    #[must_use]
    pub const fn new(degree: usize) -> Self {
        Self {
            degree,
            verbose: false,
        }
    }

    /// Enable or disable the diagnostic dump.
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Check that the configuration describes a valid tree.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidDegree`] if `degree < 2` or
    /// `degree > MAX_DEGREE`.
    pub fn validate(&self) -> Result<(), TreeError> {
        if !(Self::MIN_DEGREE..=Self::MAX_DEGREE).contains(&self.degree) {
            return Err(TreeError::InvalidDegree(self.degree));
        }
        Ok(())
    }

    /// Load configuration from environment variables.
    ///
    /// The result is not validated; [`crate::BTree::with_config`] does that.
    ///
    /// # Errors
    ///
    /// Returns an error if `KEYTREE_DEGREE` is set but not an unsigned integer,
    /// or `KEYTREE_VERBOSE` is set but not a recognised boolean.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`TreeConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let degree = Self::load_degree(lookup(DEGREE_ENV_VAR))?;
        let verbose = Self::load_verbose(lookup(VERBOSE_ENV_VAR))?;

        Ok(Self { degree, verbose })
    }

    /// Parse the minimum degree. Returns the default if not set.
    fn load_degree(value: Option<String>) -> Result<usize, ConfigError> {
        match value {
            Some(value) => value.trim().parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                name: DEGREE_ENV_VAR.to_string(),
                message: format!("'{value}' is not an unsigned integer"),
            }),
            None => Ok(Self::DEFAULT_DEGREE),
        }
    }

    /// Parse the verbosity switch. Returns `false` if not set.
    fn load_verbose(value: Option<String>) -> Result<bool, ConfigError> {
        let Some(value) = value else {
            return Ok(false);
        };

        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                name: VERBOSE_ENV_VAR.to_string(),
                message: format!("'{value}' is not a boolean"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = TreeConfig::default();
        assert_eq!(config.degree, 2);
        assert!(!config.verbose);
    }

    #[test]
    fn test_lookup_uses_defaults_when_unset() {
        let config = TreeConfig::from_lookup(lookup_from(&[])).expect("defaults");
        assert_eq!(config, TreeConfig::default());
    }

    #[test]
    fn test_lookup_reads_values() {
        let config = TreeConfig::from_lookup(lookup_from(&[
            (DEGREE_ENV_VAR, " 5 "),
            (VERBOSE_ENV_VAR, "Yes"),
        ]))
        .expect("valid values");

        assert_eq!(config.degree, 5);
        assert!(config.verbose);
    }

    #[test]
    fn test_lookup_rejects_bad_degree() {
        let err = TreeConfig::from_lookup(lookup_from(&[(DEGREE_ENV_VAR, "three")]))
            .expect_err("degree must be numeric");
        assert_eq!(
            err.to_string(),
            "invalid value for KEYTREE_DEGREE: 'three' is not an unsigned integer"
        );
    }

    #[test]
    fn test_lookup_rejects_bad_verbose() {
        let err = TreeConfig::from_lookup(lookup_from(&[(VERBOSE_ENV_VAR, "loud")]))
            .expect_err("verbose must be boolean");
        assert!(matches!(err, ConfigError::InvalidValue { ref name, .. } if name == VERBOSE_ENV_VAR));
    }

    #[test]
    fn test_validate_degree() {
        assert_eq!(
            TreeConfig::new(0).validate(),
            Err(TreeError::InvalidDegree(0))
        );
        assert_eq!(
            TreeConfig::new(1).validate(),
            Err(TreeError::InvalidDegree(1))
        );
        assert!(TreeConfig::new(2).validate().is_ok());
        assert!(TreeConfig::new(64).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_overflowing_degree() {
        assert!(TreeConfig::new(TreeConfig::MAX_DEGREE).validate().is_ok());
        assert_eq!(
            TreeConfig::new(TreeConfig::MAX_DEGREE + 1).validate(),
            Err(TreeError::InvalidDegree(TreeConfig::MAX_DEGREE + 1))
        );
        assert_eq!(
            TreeConfig::new(usize::MAX).validate(),
            Err(TreeError::InvalidDegree(usize::MAX))
        );
    }

    #[test]
    fn test_with_verbose() {
        let config = TreeConfig::new(3).with_verbose(true);
        assert_eq!(config.degree, 3);
        assert!(config.verbose);
    }
}
