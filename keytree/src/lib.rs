// Forbid unwrap() in library code; tests may use it.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

//! An in-memory B-tree of unique string keys.
//!
//! Every node except the root holds between `t - 1` and `2t - 1` keys, where
//! `t` is the tree's minimum degree. Inserts and deletes rebalance in a single
//! pass from the root down:
//! - inserts split a full child before entering it
//! - deletes top up a minimal child by rotation or merge before entering it
//!
//! ```
//! use keytree::BTree;
//!
//! let mut tree = BTree::new(2).expect("valid degree");
//! for word in ["kiwi", "apple", "fig"] {
//!     tree.insert(word.to_string());
//! }
//! assert!(tree.search("fig"));
//! assert_eq!(tree.delete("apple"), Some("apple".to_string()));
//! assert_eq!(tree.ordered_keys(), ["fig", "kiwi"]);
//! ```

mod command;
pub mod config;
mod error;
pub mod invariants;
mod node;
pub mod simulation;
mod tree;

mod e2e_tests;

pub use command::{Command, CommandError, CommandOutcome};
pub use config::{ConfigError, TreeConfig};
pub use error::TreeError;
pub use node::Node;
pub use tree::BTree;
