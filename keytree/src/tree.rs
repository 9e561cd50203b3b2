//! In-memory B-tree over string keys.
//!
//! All rebalancing happens on the way down:
//! - insertion splits a full node before stepping into it
//! - deletion tops up a minimal node (rotation or merge) before stepping into it
//!
//! so no operation ever walks back up to repair an ancestor.

use crate::command::{Command, CommandOutcome};
use crate::config::TreeConfig;
use crate::error::TreeError;
use crate::invariants::{InvariantChecker, InvariantViolation};
use crate::node::{Node, dump_prefix};

/// A B-tree of unique string keys with a fixed minimum degree.
///
/// Not synchronized: callers sharing a tree across threads must hold one
/// exclusive lock per operation.
#[derive(Debug, Clone)]
pub struct BTree {
    config: TreeConfig,
    /// Absent exactly when the tree holds no keys.
    root: Option<Node>,
    len: usize,
}

impl BTree {
    /// Create an empty tree with minimum degree `degree`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidDegree`] if `degree < 2` or the node
    /// capacity `2 * degree - 1` would overflow.
    pub fn new(degree: usize) -> Result<Self, TreeError> {
        Self::with_config(TreeConfig::new(degree))
    }

    /// Create an empty tree from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidDegree`] if `config.degree` is out of range.
    pub fn with_config(config: TreeConfig) -> Result<Self, TreeError> {
        config.validate()?;
        Ok(Self {
            config,
            root: None,
            len: 0,
        })
    }

    /// Create an empty tree configured from `KEYTREE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Config`] if a variable does not parse, or
    /// [`TreeError::InvalidDegree`] if the configured degree is below 2.
    pub fn from_env() -> Result<Self, TreeError> {
        Self::with_config(TreeConfig::from_env()?)
    }

    /// Build a tree by inserting every key from `keys` in order.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidDegree`] if `degree` is out of range.
    pub fn from_keys<I>(degree: usize, keys: I) -> Result<Self, TreeError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut tree = Self::new(degree)?;
        for key in keys {
            tree.insert(key.into());
        }
        Ok(tree)
    }

    /// The minimum degree `t`.
    #[must_use]
    pub const fn degree(&self) -> usize {
        self.config.degree
    }

    /// The configuration this tree was built with.
    #[must_use]
    pub const fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Number of keys in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, if the tree holds any keys.
    #[must_use]
    pub const fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Number of node levels; 0 for an empty tree.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut next = self.root.as_ref();
        while let Some(node) = next {
            height += 1;
            next = node.children().first();
        }
        height
    }

    /// Whether `key` is in the tree.
    #[must_use]
    pub fn search(&self, key: &str) -> bool {
        let mut next = self.root.as_ref();
        while let Some(node) = next {
            match node.search(key) {
                Ok(_) => return true,
                Err(index) => next = node.children().get(index),
            }
        }
        false
    }

    /// Alias of [`BTree::search`].
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.search(key)
    }

    /// Insert `key`.
    ///
    /// Returns `false` and leaves the tree untouched if the key is already
    /// present.
    pub fn insert(&mut self, key: String) -> bool {
        if self.search(&key) {
            self.log_rejected_insert(&key);
            return false;
        }

        let degree = self.config.degree;
        let Some(root) = self.root.as_mut() else {
            tracing::trace!(key = %key, "created root leaf");
            self.root = Some(Node::leaf_with(key));
            self.len = 1;
            return true;
        };

        // Growing the root is the only way the tree gains height.
        if root.is_full(degree) {
            let old_root = std::mem::take(root);
            *root = Node::with_child(old_root);
            root.split_child(0, degree);
            tracing::trace!("split full root");
        }

        let mut node = root;
        loop {
            let index = match node.search(&key) {
                Ok(_) => return false,
                Err(index) => index,
            };

            if node.is_leaf() {
                node.keys.insert(index, key);
                self.len += 1;
                return true;
            }

            if node.children[index].is_full(degree) {
                // The split may move the branch point; search this node again.
                node.split_child(index, degree);
                continue;
            }

            node = &mut node.children[index];
        }
    }

    /// Delete `key`, returning it if it was present.
    ///
    /// Deleting an absent key returns `None` and leaves the tree untouched.
    pub fn delete(&mut self, key: &str) -> Option<String> {
        if !self.search(key) {
            self.log_absent_delete(key);
            return None;
        }

        let degree = self.config.degree;
        let root = self.root.as_mut()?;
        let removed = remove_from(root, key, degree);
        self.collapse_root();

        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Apply a replayed command.
    pub fn apply(&mut self, command: &Command) -> CommandOutcome {
        match command {
            Command::Insert(key) => {
                if self.insert(key.clone()) {
                    CommandOutcome::Inserted
                } else {
                    CommandOutcome::AlreadyPresent
                }
            }
            Command::Delete(key) => self
                .delete(key)
                .map_or(CommandOutcome::NotFound, CommandOutcome::Deleted),
        }
    }

    /// All keys in ascending order.
    ///
    /// When the tree is verbose, every visited node is also logged as one line
    /// of an indented dump.
    #[must_use]
    pub fn ordered_keys(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.len);
        if let Some(root) = &self.root {
            self.collect_in_order(root, 0, &mut keys);
        }
        keys
    }

    /// Check every structural invariant, returning each violation found.
    #[must_use]
    pub fn check_invariants(&self) -> Vec<InvariantViolation> {
        let mut checker = InvariantChecker::new();
        checker.check_tree(self);
        checker.into_violations()
    }

    fn collect_in_order(&self, node: &Node, depth: usize, keys: &mut Vec<String>) {
        if self.config.verbose {
            tracing::debug!("{}{}", dump_prefix(depth), node.keys().join(" "));
        }

        if node.is_leaf() {
            keys.extend_from_slice(node.keys());
            return;
        }

        for (index, child) in node.children().iter().enumerate() {
            self.collect_in_order(child, depth + 1, keys);
            if let Some(key) = node.keys().get(index) {
                keys.push(key.clone());
            }
        }
    }

    /// Drop an emptied root: a keyless internal root hands over to its only
    /// child, a keyless leaf root leaves the tree empty.
    fn collapse_root(&mut self) {
        let Some(root) = self.root.as_mut() else {
            return;
        };
        if !root.is_empty() {
            return;
        }

        self.root = root.children.pop();
        tracing::trace!(empty = self.root.is_none(), "collapsed root");
    }

    fn log_rejected_insert(&self, key: &str) {
        if self.config.verbose {
            tracing::info!("Key '{key}' is already in the tree");
        } else {
            tracing::debug!(key, "duplicate insert ignored");
        }
    }

    fn log_absent_delete(&self, key: &str) {
        if self.config.verbose {
            tracing::info!("Key '{key}' not found");
        } else {
            tracing::debug!(key, "delete of absent key ignored");
        }
    }
}

impl Extend<String> for BTree {
    fn extend<I: IntoIterator<Item = String>>(&mut self, keys: I) {
        for key in keys {
            self.insert(key);
        }
    }
}

impl std::fmt::Display for BTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.root {
            None => writeln!(f, "(empty)"),
            Some(root) => root.write_dump(f, 0),
        }
    }
}

/// Remove `key` from the subtree rooted at `node`.
///
/// `node` must be able to lose a key: it holds at least `t` keys or is the
/// root. Every child is topped up before it is entered, so the same holds at
/// each level of the recursion.
fn remove_from(node: &mut Node, key: &str, degree: usize) -> Option<String> {
    match node.search(key) {
        Ok(index) if node.is_leaf() => Some(node.keys.remove(index)),
        Ok(index) => remove_separator(node, index, key, degree),
        Err(_) if node.is_leaf() => None,
        Err(index) => {
            let index = fill_child(node, index, degree);
            remove_from(&mut node.children[index], key, degree)
        }
    }
}

/// Remove `keys[index]` (equal to `key`) from an internal node.
fn remove_separator(node: &mut Node, index: usize, key: &str, degree: usize) -> Option<String> {
    if !node.children[index].is_minimal(degree) {
        let predecessor = node.predecessor_of(index).to_string();
        let removed = std::mem::replace(&mut node.keys[index], predecessor);
        let moved = remove_from(&mut node.children[index], &node.keys[index], degree);
        debug_assert!(moved.is_some(), "predecessor must exist in left subtree");
        return Some(removed);
    }

    if !node.children[index + 1].is_minimal(degree) {
        let successor = node.successor_of(index).to_string();
        let removed = std::mem::replace(&mut node.keys[index], successor);
        let moved = remove_from(&mut node.children[index + 1], &node.keys[index], degree);
        debug_assert!(moved.is_some(), "successor must exist in right subtree");
        return Some(removed);
    }

    // Both neighbours are minimal: pull the key down into their merge.
    let merged = node.merge_children(index);
    remove_from(merged, key, degree)
}

/// Make sure `children[index]` can lose a key before descending into it.
///
/// Returns the index of the child to descend into, which moves one to the
/// left when the child is merged into its left sibling.
fn fill_child(node: &mut Node, index: usize, degree: usize) -> usize {
    if !node.children[index].is_minimal(degree) {
        return index;
    }

    let has_right_sibling = index < node.keys.len();

    if index > 0 && !node.children[index - 1].is_minimal(degree) {
        node.rotate_from_left_sibling(index);
        index
    } else if has_right_sibling && !node.children[index + 1].is_minimal(degree) {
        node.rotate_from_right_sibling(index);
        index
    } else if has_right_sibling {
        node.merge_children(index);
        index
    } else {
        // Rightmost child: the only sibling is on the left.
        node.merge_children(index - 1);
        index - 1
    }
}
