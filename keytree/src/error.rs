//! Error types for tree construction.
//!
//! Lookups and mutations never fail: a duplicate insert or a delete of an
//! absent key is reported through the return value. Errors only arise when a
//! tree is built with an invalid configuration.

use crate::config::{ConfigError, TreeConfig};

/// Errors that can occur when constructing a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The minimum degree is below 2, or so large that node capacity
    /// `2t - 1` overflows.
    InvalidDegree(usize),
    /// Configuration could not be loaded.
    Config(ConfigError),
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDegree(degree) => {
                write!(
                    f,
                    "invalid minimum degree {degree}: must be between {} and {}",
                    TreeConfig::MIN_DEGREE,
                    TreeConfig::MAX_DEGREE
                )
            }
            Self::Config(e) => write!(f, "config error: {e}"),
        }
    }
}

impl std::error::Error for TreeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidDegree(_) => None,
            Self::Config(e) => Some(e),
        }
    }
}

impl From<ConfigError> for TreeError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
