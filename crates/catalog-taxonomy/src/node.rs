//! Tree nodes produced by the taxonomy builder.

use std::fmt;
use std::mem;

use catalog_record::{CatalogRecord, RecordId};

/// One record placed in a taxonomy tree, together with its children.
///
/// A node exclusively owns its children; children keep the relative order
/// their records had in the input sequence. Nodes are immutable once built.
///
/// Dropping, cloning and comparing walk the subtree with an explicit stack,
/// so chains of any depth are safe. `Debug` prints the record and the ids
/// of the direct children only. Serialization recurses once per level, so
/// serializing very deep chains is limited by the thread's stack.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TreeNode {
    #[cfg_attr(feature = "serde", serde(flatten))]
    record: CatalogRecord,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    children: Vec<TreeNode>,
}

impl TreeNode {
    pub(crate) fn new(record: CatalogRecord, children: Vec<TreeNode>) -> Self {
        Self { record, children }
    }

    /// Returns the wrapped record.
    pub fn record(&self) -> &CatalogRecord {
        &self.record
    }

    /// Returns the record id.
    pub fn id(&self) -> &RecordId {
        self.record.id()
    }

    /// Returns the direct children in input order.
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// Returns true if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Number of nodes below this one (not counting itself).
    pub fn descendant_count(&self) -> usize {
        self.iter().count() - 1
    }

    /// Height of the subtree rooted here; a leaf has height 1.
    pub fn height(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, level)) = stack.pop() {
            max = max.max(level);
            for child in &node.children {
                stack.push((child, level + 1));
            }
        }
        max
    }

    /// Pre-order iterator over this node and all its descendants.
    pub fn iter(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }

    /// Splits the node into its record and children.
    pub fn into_parts(mut self) -> (CatalogRecord, Vec<TreeNode>) {
        let children = mem::take(&mut self.children);
        let record = mem::replace(&mut self.record, CatalogRecord::new(0));
        (record, children)
    }
}

impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut stack = mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl Clone for TreeNode {
    fn clone(&self) -> Self {
        // In reverse pre-order every node follows its descendants, so the
        // children of a node are the top `child_count` entries of `built`.
        let order: Vec<&TreeNode> = self.iter().skip(1).collect();
        let mut built: Vec<TreeNode> = Vec::with_capacity(order.len());
        for node in order.into_iter().rev() {
            let split = built.len().saturating_sub(node.children.len());
            let mut kids = built.split_off(split);
            kids.reverse();
            built.push(TreeNode::new(node.record.clone(), kids));
        }
        built.reverse();
        TreeNode::new(self.record.clone(), built)
    }
}

impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.record != b.record || a.children.len() != b.children.len() {
                return false;
            }
            stack.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl fmt::Debug for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let children: Vec<&RecordId> = self.children.iter().map(TreeNode::id).collect();
        f.debug_struct("TreeNode")
            .field("record", &self.record)
            .field("children", &children)
            .finish()
    }
}

/// Depth-first pre-order iterator over tree nodes.
///
/// Yields a node before any of its descendants, children in stored order.
#[derive(Debug, Clone)]
pub struct Preorder<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Preorder<'a> {
    pub(crate) fn over(roots: &'a [TreeNode]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl<'a> IntoIterator for &'a TreeNode {
    type Item = &'a TreeNode;
    type IntoIter = Preorder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
