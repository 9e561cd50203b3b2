//! B-tree node and node-local structural operations.
//!
//! A node holds sorted unique keys and, when internal, exactly one more child
//! than it has keys:
//! - `children[i]` holds keys `x` with `keys[i - 1] < x < keys[i]`
//! - a leaf has no children at all
//!
//! Every operation here touches only the node and its direct children. The
//! tree decides when each one is applied.

use std::fmt;

/// A node of the tree.
///
/// Each node is owned by exactly one parent (or by the tree, for the root).
/// Structural edits move whole child subtrees between owners; nothing is
/// shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Keys in strictly increasing order.
    pub(crate) keys: Vec<String>,
    /// Owned children. `children.len()` == `keys.len()` + 1, or 0 for a leaf.
    pub(crate) children: Vec<Self>,
}

impl Node {
    /// Create a leaf holding a single key.
    #[must_use]
    pub(crate) fn leaf_with(key: String) -> Self {
        Self {
            keys: vec![key],
            children: Vec::new(),
        }
    }

    /// Create a keyless internal node owning `child`.
    ///
    /// Only used while growing the root; the caller splits `child` right away.
    #[must_use]
    pub(crate) fn with_child(child: Self) -> Self {
        Self {
            keys: Vec::new(),
            children: vec![child],
        }
    }

    /// Keys stored in this node, in ascending order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Children of this node. Empty for a leaf.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Whether this node is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of keys in this node.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether this node holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Whether the node holds the maximum `2t - 1` keys.
    #[must_use]
    pub(crate) fn is_full(&self, degree: usize) -> bool {
        self.keys.len() >= 2 * degree - 1
    }

    /// Whether the node holds the minimum `t - 1` keys and cannot give one up.
    #[must_use]
    pub(crate) fn is_minimal(&self, degree: usize) -> bool {
        self.keys.len() < degree
    }

    /// Binary search for `key` among this node's keys.
    ///
    /// Returns `Ok(i)` if `keys[i] == key`. Otherwise returns `Err(i)` where
    /// `i` is both the sorted insert position and the child to descend into:
    /// the first index with `keys[i] > key`, or `len()` if `key` is larger
    /// than every key.
    pub fn search(&self, key: &str) -> Result<usize, usize> {
        self.keys.binary_search_by(|probe| probe.as_str().cmp(key))
    }

    /// Split a full node around its median.
    ///
    /// Keeps the first `t - 1` keys and `t` children in place and returns the
    /// median key with a new right sibling holding the last `t - 1` keys and
    /// `t` children. The sibling is a leaf exactly when `self` is.
    #[must_use]
    pub(crate) fn split(&mut self, degree: usize) -> (String, Self) {
        debug_assert_eq!(self.keys.len(), 2 * degree - 1, "split requires a full node");

        let right_keys = self.keys.split_off(degree);
        let median = self.keys.remove(degree - 1);
        let right_children = if self.is_leaf() {
            Vec::new()
        } else {
            self.children.split_off(degree)
        };

        let right = Self {
            keys: right_keys,
            children: right_children,
        };

        (median, right)
    }

    /// Split the full child at `index`.
    ///
    /// The child's median moves into `keys[index]` and its new right sibling
    /// is placed at `children[index + 1]`.
    pub(crate) fn split_child(&mut self, index: usize, degree: usize) {
        let (median, right) = self.children[index].split(degree);
        tracing::trace!(index, median = %median, "split full child");

        self.keys.insert(index, median);
        self.children.insert(index + 1, right);
    }

    /// Merge `children[index]`, `keys[index]` and `children[index + 1]`.
    ///
    /// Both children must hold `t - 1` keys, so the merged node holds exactly
    /// `2t - 1`. It replaces `children[index]` and is returned.
    pub(crate) fn merge_children(&mut self, index: usize) -> &mut Self {
        let separator = self.keys.remove(index);
        let right = self.children.remove(index + 1);
        tracing::trace!(index, separator = %separator, "merge children");

        let left = &mut self.children[index];
        left.keys.push(separator);
        left.keys.extend(right.keys);
        left.children.extend(right.children);
        left
    }

    /// Move one key from `children[index - 1]` through the parent into
    /// `children[index]`.
    ///
    /// `keys[index - 1]` becomes the child's first key, the left sibling's last
    /// key takes its place, and the sibling's last subtree (if any) becomes the
    /// child's first subtree.
    pub(crate) fn rotate_from_left_sibling(&mut self, index: usize) {
        let (before, after) = self.children.split_at_mut(index);
        let sibling = &mut before[index - 1];
        let child = &mut after[0];

        let Some(raised) = sibling.keys.pop() else {
            return;
        };
        let lowered = std::mem::replace(&mut self.keys[index - 1], raised);
        tracing::trace!(index, key = %lowered, "rotate from left sibling");

        child.keys.insert(0, lowered);
        if let Some(subtree) = sibling.children.pop() {
            child.children.insert(0, subtree);
        }
    }

    /// Move one key from `children[index + 1]` through the parent into
    /// `children[index]`. Mirror image of [`Self::rotate_from_left_sibling`].
    pub(crate) fn rotate_from_right_sibling(&mut self, index: usize) {
        let (before, after) = self.children.split_at_mut(index + 1);
        let child = &mut before[index];
        let sibling = &mut after[0];

        if sibling.keys.is_empty() {
            return;
        }
        let raised = sibling.keys.remove(0);
        let lowered = std::mem::replace(&mut self.keys[index], raised);
        tracing::trace!(index, key = %lowered, "rotate from right sibling");

        child.keys.push(lowered);
        if !sibling.is_leaf() {
            child.children.push(sibling.children.remove(0));
        }
    }

    /// In-order predecessor of `keys[index]`: the last key of the rightmost
    /// leaf under `children[index]`.
    #[must_use]
    pub(crate) fn predecessor_of(&self, index: usize) -> &str {
        let mut node = &self.children[index];
        while let Some(last) = node.children.last() {
            node = last;
        }
        &node.keys[node.keys.len() - 1]
    }

    /// In-order successor of `keys[index]`: the first key of the leftmost
    /// leaf under `children[index + 1]`.
    #[must_use]
    pub(crate) fn successor_of(&self, index: usize) -> &str {
        let mut node = &self.children[index + 1];
        while let Some(first) = node.children.first() {
            node = first;
        }
        &node.keys[0]
    }

    /// Write an indented dump of this subtree, one line per node.
    pub(crate) fn write_dump(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(f, "{}{}", dump_prefix(depth), self.keys.join(" "))?;
        for child in &self.children {
            child.write_dump(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Line prefix used by the diagnostic dump for a node at `depth`.
pub(crate) fn dump_prefix(depth: usize) -> String {
    "|- ".repeat(depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    fn leaf(words: &[&str]) -> Node {
        Node {
            keys: keys(words),
            children: Vec::new(),
        }
    }

    fn internal(words: &[&str], children: Vec<Node>) -> Node {
        Node {
            keys: keys(words),
            children,
        }
    }

    #[test]
    fn test_search_found_and_descent_index() {
        let node = leaf(&["b", "d", "f"]);

        assert_eq!(node.search("b"), Ok(0));
        assert_eq!(node.search("f"), Ok(2));

        // Less than first key -> first child
        assert_eq!(node.search("a"), Err(0));
        // Between keys -> child after the smaller key
        assert_eq!(node.search("c"), Err(1));
        assert_eq!(node.search("e"), Err(2));
        // Greater than all -> last child
        assert_eq!(node.search("z"), Err(3));
    }

    #[test]
    fn test_search_is_exact_not_prefix() {
        let node = leaf(&["app", "apple"]);

        assert_eq!(node.search("app"), Ok(0));
        assert_eq!(node.search("appl"), Err(1));
        assert_eq!(node.search("Apple"), Err(0));
    }

    #[test]
    fn test_search_empty_node() {
        let node = Node::default();
        assert_eq!(node.search("anything"), Err(0));
    }

    #[test]
    fn test_split_leaf() {
        let mut node = leaf(&["a", "b", "c", "d", "e"]);

        let (median, right) = node.split(3);

        assert_eq!(median, "c");
        assert_eq!(node.keys, keys(&["a", "b"]));
        assert_eq!(right.keys, keys(&["d", "e"]));
        assert!(node.is_leaf());
        assert!(right.is_leaf());
    }

    #[test]
    fn test_split_internal_moves_children() {
        let mut node = internal(
            &["b", "d", "f"],
            vec![leaf(&["a"]), leaf(&["c"]), leaf(&["e"]), leaf(&["g"])],
        );

        let (median, right) = node.split(2);

        assert_eq!(median, "d");
        assert_eq!(node.keys, keys(&["b"]));
        assert_eq!(node.children, vec![leaf(&["a"]), leaf(&["c"])]);
        assert_eq!(right.keys, keys(&["f"]));
        assert_eq!(right.children, vec![leaf(&["e"]), leaf(&["g"])]);
    }

    #[test]
    fn test_split_child_promotes_median() {
        let mut parent = internal(&["m"], vec![leaf(&["a", "b", "c"]), leaf(&["x"])]);

        parent.split_child(0, 2);

        assert_eq!(parent.keys, keys(&["b", "m"]));
        assert_eq!(
            parent.children,
            vec![leaf(&["a"]), leaf(&["c"]), leaf(&["x"])]
        );
    }

    #[test]
    fn test_split_child_at_last_position() {
        let mut parent = internal(&["c"], vec![leaf(&["a"]), leaf(&["d", "e", "f"])]);

        parent.split_child(1, 2);

        assert_eq!(parent.keys, keys(&["c", "e"]));
        assert_eq!(
            parent.children,
            vec![leaf(&["a"]), leaf(&["d"]), leaf(&["f"])]
        );
    }

    #[test]
    fn test_merge_children() {
        let mut parent = internal(
            &["b", "d"],
            vec![leaf(&["a"]), leaf(&["c"]), leaf(&["e"])],
        );

        let merged = parent.merge_children(1);
        assert_eq!(merged.keys, keys(&["c", "d", "e"]));

        assert_eq!(parent.keys, keys(&["b"]));
        assert_eq!(parent.children, vec![leaf(&["a"]), leaf(&["c", "d", "e"])]);
    }

    #[test]
    fn test_merge_internal_children_concatenates_subtrees() {
        let left = internal(&["b"], vec![leaf(&["a"]), leaf(&["c"])]);
        let right = internal(&["f"], vec![leaf(&["e"]), leaf(&["g"])]);
        let mut parent = internal(&["d"], vec![left, right]);

        parent.merge_children(0);

        assert!(parent.keys.is_empty());
        assert_eq!(parent.children.len(), 1);
        let merged = &parent.children[0];
        assert_eq!(merged.keys, keys(&["b", "d", "f"]));
        assert_eq!(
            merged.children,
            vec![leaf(&["a"]), leaf(&["c"]), leaf(&["e"]), leaf(&["g"])]
        );
    }

    #[test]
    fn test_rotate_from_left_sibling_leaf() {
        let mut parent = internal(&["d"], vec![leaf(&["a", "b", "c"]), leaf(&["e"])]);

        parent.rotate_from_left_sibling(1);

        assert_eq!(parent.keys, keys(&["c"]));
        assert_eq!(parent.children[0].keys, keys(&["a", "b"]));
        assert_eq!(parent.children[1].keys, keys(&["d", "e"]));
    }

    #[test]
    fn test_rotate_from_left_sibling_moves_subtree() {
        let left = internal(
            &["b", "d"],
            vec![leaf(&["a"]), leaf(&["c"]), leaf(&["e"])],
        );
        let right = internal(&["h"], vec![leaf(&["g"]), leaf(&["i"])]);
        let mut parent = internal(&["f"], vec![left, right]);

        parent.rotate_from_left_sibling(1);

        assert_eq!(parent.keys, keys(&["d"]));
        assert_eq!(parent.children[0].keys, keys(&["b"]));
        assert_eq!(parent.children[0].children, vec![leaf(&["a"]), leaf(&["c"])]);
        assert_eq!(parent.children[1].keys, keys(&["f", "h"]));
        assert_eq!(
            parent.children[1].children,
            vec![leaf(&["e"]), leaf(&["g"]), leaf(&["i"])]
        );
    }

    #[test]
    fn test_rotate_from_right_sibling_leaf() {
        let mut parent = internal(&["b"], vec![leaf(&["a"]), leaf(&["c", "d", "e"])]);

        parent.rotate_from_right_sibling(0);

        assert_eq!(parent.keys, keys(&["c"]));
        assert_eq!(parent.children[0].keys, keys(&["a", "b"]));
        assert_eq!(parent.children[1].keys, keys(&["d", "e"]));
    }

    #[test]
    fn test_rotate_from_right_sibling_moves_subtree() {
        let left = internal(&["b"], vec![leaf(&["a"]), leaf(&["c"])]);
        let right = internal(
            &["f", "h"],
            vec![leaf(&["e"]), leaf(&["g"]), leaf(&["i"])],
        );
        let mut parent = internal(&["d"], vec![left, right]);

        parent.rotate_from_right_sibling(0);

        assert_eq!(parent.keys, keys(&["f"]));
        assert_eq!(parent.children[0].keys, keys(&["b", "d"]));
        assert_eq!(
            parent.children[0].children,
            vec![leaf(&["a"]), leaf(&["c"]), leaf(&["e"])]
        );
        assert_eq!(parent.children[1].keys, keys(&["h"]));
        assert_eq!(parent.children[1].children, vec![leaf(&["g"]), leaf(&["i"])]);
    }

    #[test]
    fn test_predecessor_and_successor() {
        let left = internal(&["b"], vec![leaf(&["a"]), leaf(&["c", "cc"])]);
        let right = internal(&["h"], vec![leaf(&["e", "g"]), leaf(&["i"])]);
        let root = internal(&["d"], vec![left, right]);

        assert_eq!(root.predecessor_of(0), "cc");
        assert_eq!(root.successor_of(0), "e");
    }

    #[test]
    fn test_capacity_checks() {
        let node = leaf(&["a", "b", "c"]);
        assert!(node.is_full(2));
        assert!(!node.is_full(3));
        assert!(!node.is_minimal(2));

        let node = leaf(&["a"]);
        assert!(node.is_minimal(2));
        assert!(!node.is_minimal(1));
    }

    #[test]
    fn test_dump_prefix() {
        assert_eq!(dump_prefix(0), "");
        assert_eq!(dump_prefix(2), "|- |- ");
    }
}
