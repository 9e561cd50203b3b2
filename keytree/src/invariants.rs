//! Structural invariant checking.
//!
//! Walks a tree and records every broken rule instead of stopping at the
//! first one, so a failing test shows the whole picture. Checked rules:
//! - every non-root node holds between `t - 1` and `2t - 1` keys
//! - the root holds at most `2t - 1` keys and is never empty
//! - internal nodes have exactly one more child than keys
//! - keys are strictly increasing within each node and across the tree
//! - every leaf sits at the same depth
//! - the tracked key count matches the number of stored keys

use crate::node::Node;
use crate::tree::BTree;

/// An invariant violation found in a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violation.
    pub description: String,
    /// Where it was found and the offending values.
    pub context: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description, self.context)
    }
}

/// Checker for tree invariants.
pub struct InvariantChecker {
    /// Detected violations.
    violations: Vec<InvariantViolation>,
    /// Depth of the first leaf reached; every other leaf must match it.
    leaf_depth: Option<usize>,
    /// Last key seen in the in-order walk.
    previous_key: Option<String>,
    /// Keys seen in the in-order walk.
    key_count: usize,
}

impl Default for InvariantChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantChecker {
    /// Create a new invariant checker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            violations: Vec::new(),
            leaf_depth: None,
            previous_key: None,
            key_count: 0,
        }
    }

    /// Get all violations.
    #[must_use]
    pub fn violations(&self) -> &[InvariantViolation] {
        &self.violations
    }

    /// Consume the checker, returning its violations.
    #[must_use]
    pub fn into_violations(self) -> Vec<InvariantViolation> {
        self.violations
    }

    /// Check if any violations were detected.
    #[must_use]
    pub const fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Clear all recorded violations and walk state.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Add a violation.
    pub fn add_violation(&mut self, violation: InvariantViolation) {
        self.violations.push(violation);
    }

    /// Run every structural check on `tree`.
    pub fn check_tree(&mut self, tree: &BTree) {
        self.leaf_depth = None;
        self.previous_key = None;
        self.key_count = 0;

        let degree = tree.degree();
        if let Some(root) = tree.root() {
            if root.is_empty() {
                self.record("Root is empty", "an empty tree must have no root".to_string());
            }
            self.check_node(root, degree, 0, true);
        }

        if self.key_count != tree.len() {
            self.record(
                "Tracked length does not match stored keys",
                format!("len() = {}, stored = {}", tree.len(), self.key_count),
            );
        }
    }

    fn check_node(&mut self, node: &Node, degree: usize, depth: usize, is_root: bool) {
        let max_keys = 2 * degree - 1;
        let min_keys = if is_root { 0 } else { degree - 1 };

        if node.len() > max_keys || node.len() < min_keys {
            self.record(
                "Node key count out of range",
                format!(
                    "depth {depth}: {} keys, allowed {min_keys}..={max_keys}",
                    node.len()
                ),
            );
        }

        if let Some(pair) = node.keys().windows(2).find(|pair| pair[0] >= pair[1]) {
            self.record(
                "Node keys not strictly increasing",
                format!("depth {depth}: '{}' before '{}'", pair[0], pair[1]),
            );
        }

        if node.is_leaf() {
            self.check_leaf_depth(depth);
            for key in node.keys() {
                self.visit_key(key);
            }
            return;
        }

        if node.children().len() != node.len() + 1 {
            self.record(
                "Internal node has wrong number of children",
                format!(
                    "depth {depth}: {} keys, {} children",
                    node.len(),
                    node.children().len()
                ),
            );
        }

        for (index, child) in node.children().iter().enumerate() {
            self.check_node(child, degree, depth + 1, false);
            if let Some(key) = node.keys().get(index) {
                self.visit_key(key);
            }
        }
    }

    fn check_leaf_depth(&mut self, depth: usize) {
        match self.leaf_depth {
            None => self.leaf_depth = Some(depth),
            Some(expected) if expected != depth => self.record(
                "Leaves at different depths",
                format!("expected {expected}, found {depth}"),
            ),
            Some(_) => {}
        }
    }

    fn visit_key(&mut self, key: &str) {
        self.key_count += 1;
        if let Some(previous) = &self.previous_key {
            if previous.as_str() >= key {
                let context = format!("'{previous}' before '{key}'");
                self.record("In-order keys not strictly increasing", context);
            }
        }
        self.previous_key = Some(key.to_string());
    }

    fn record(&mut self, description: &str, context: String) {
        self.violations.push(InvariantViolation {
            description: description.to_string(),
            context,
        });
    }
}
