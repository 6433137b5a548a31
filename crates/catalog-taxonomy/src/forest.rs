//! Building and navigating category forests.
//!
//! [`Forest::build`] turns a flat, parent-referenced record sequence into a
//! forest of [`TreeNode`]s in two linear passes: the first indexes ids and
//! groups children under their parent, the second assembles nodes bottom-up
//! from a pre-order listing. Neither pass recurses, so arbitrarily deep
//! category chains are safe.

use std::collections::HashMap;
use std::time::Instant;

use catalog_record::{CatalogRecord, RecordId};
use tracing::{debug, trace};

use crate::error::{TaxonomyError, TaxonomyResult};
use crate::node::{Preorder, TreeNode};
use crate::stats::TaxonomyStats;

/// Where a node sits: its effective parent and its index among that
/// parent's children (or among the roots).
#[derive(Debug, Clone)]
struct Slot {
    parent: Option<RecordId>,
    index: usize,
}

/// An ordered collection of root [`TreeNode`]s.
///
/// # Example
///
/// ```rust
/// use catalog_record::{CatalogRecord, RecordId};
/// use catalog_taxonomy::Forest;
///
/// let forest = Forest::build(vec![
///     CatalogRecord::new(1).with_field("name", "Apparel"),
///     CatalogRecord::new(2).with_parent(1).with_field("name", "Shoes"),
///     CatalogRecord::new(3).with_parent(2).with_field("name", "Sneakers"),
/// ])?;
///
/// assert_eq!(forest.depth(), 3);
/// assert_eq!(
///     forest.path_label(&RecordId::from(3), "name", " > ")?,
///     "Apparel > Shoes > Sneakers"
/// );
/// # Ok::<(), catalog_taxonomy::TaxonomyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Forest {
    roots: Vec<TreeNode>,
    slots: HashMap<RecordId, Slot>,
    stats: TaxonomyStats,
}

impl Forest {
    /// Builds a forest from flat records.
    ///
    /// - Records whose parent is absent or the root sentinel become roots,
    ///   in input order.
    /// - Records whose parent matches no record are treated as roots too.
    /// - Children keep their relative input order.
    ///
    /// # Errors
    ///
    /// - [`TaxonomyError::DuplicateIdentity`] if two records share an id.
    /// - [`TaxonomyError::CyclicParent`] if some records can never be
    ///   reached from a root (parent cycles, self-parented records).
    pub fn build<I>(records: I) -> TaxonomyResult<Self>
    where
        I: IntoIterator<Item = CatalogRecord>,
    {
        let start = Instant::now();
        let records: Vec<CatalogRecord> = records.into_iter().collect();
        let count = records.len();

        let mut positions: HashMap<&RecordId, usize> = HashMap::with_capacity(count);
        for (idx, record) in records.iter().enumerate() {
            if positions.insert(record.id(), idx).is_some() {
                return Err(TaxonomyError::DuplicateIdentity(record.id().clone()));
            }
        }

        // Group children by parent in a single pass.
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); count];
        let mut roots: Vec<usize> = Vec::new();
        let mut slots: HashMap<RecordId, Slot> = HashMap::with_capacity(count);
        let mut dangling = 0usize;

        for (idx, record) in records.iter().enumerate() {
            let parent = match record.parent_ref() {
                None => None,
                Some(parent_id) => match positions.get(parent_id) {
                    Some(&parent_idx) => Some((parent_id, parent_idx)),
                    None => {
                        trace!(id = %record.id(), parent = %parent_id, "dangling parent, promoting to root");
                        dangling += 1;
                        None
                    }
                },
            };

            let slot = match parent {
                Some((parent_id, parent_idx)) => {
                    children[parent_idx].push(idx);
                    Slot {
                        parent: Some(parent_id.clone()),
                        index: children[parent_idx].len() - 1,
                    }
                }
                None => {
                    roots.push(idx);
                    Slot {
                        parent: None,
                        index: roots.len() - 1,
                    }
                }
            };
            slots.insert(record.id().clone(), slot);
        }
        drop(positions);

        // Pre-order listing of everything reachable from the roots.
        let mut order: Vec<usize> = Vec::with_capacity(count);
        let mut reached = vec![false; count];
        let mut max_depth = 0usize;
        let mut stack: Vec<(usize, usize)> = roots.iter().rev().map(|&r| (r, 1)).collect();
        while let Some((idx, level)) = stack.pop() {
            reached[idx] = true;
            order.push(idx);
            max_depth = max_depth.max(level);
            stack.extend(children[idx].iter().rev().map(|&c| (c, level + 1)));
        }

        if order.len() < count {
            let ids: Vec<RecordId> = records
                .iter()
                .zip(&reached)
                .filter(|(_, seen)| !**seen)
                .map(|(record, _)| record.id().clone())
                .collect();
            debug!(unreachable = ids.len(), "taxonomy build aborted on parent cycle");
            return Err(TaxonomyError::CyclicParent { ids });
        }

        let leaf_count = children.iter().filter(|c| c.is_empty()).count();

        // Assemble bottom-up: in reverse pre-order every node comes after
        // all of its descendants.
        let mut pending: Vec<Option<CatalogRecord>> = records.into_iter().map(Some).collect();
        let mut built: Vec<Option<TreeNode>> = (0..count).map(|_| None).collect();
        for &idx in order.iter().rev() {
            let Some(record) = pending[idx].take() else {
                continue;
            };
            let kids = children[idx]
                .iter()
                .filter_map(|&c| built[c].take())
                .collect();
            built[idx] = Some(TreeNode::new(record, kids));
        }
        let root_nodes: Vec<TreeNode> = roots.iter().filter_map(|&r| built[r].take()).collect();

        let stats = TaxonomyStats {
            node_count: count,
            root_count: root_nodes.len(),
            leaf_count,
            max_depth,
            dangling_parent_count: dangling,
            build_time: start.elapsed(),
        };
        debug!(
            nodes = stats.node_count,
            roots = stats.root_count,
            depth = stats.max_depth,
            dangling = stats.dangling_parent_count,
            "built taxonomy forest"
        );

        Ok(Self {
            roots: root_nodes,
            slots,
            stats,
        })
    }

    /// Returns the top-level nodes in input order.
    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the forest has no nodes.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Returns the statistics collected while building.
    pub fn stats(&self) -> &TaxonomyStats {
        &self.stats
    }

    /// Returns true if a node with this id exists.
    pub fn contains(&self, id: &RecordId) -> bool {
        self.slots.contains_key(id)
    }

    /// Pre-order iterator over every node.
    pub fn iter(&self) -> Preorder<'_> {
        Preorder::over(&self.roots)
    }

    /// Returns the records in pre-order (node, then its descendants,
    /// children in stored order).
    pub fn flatten(&self) -> Vec<CatalogRecord> {
        self.iter().map(|node| node.record().clone()).collect()
    }

    /// Consumes the forest, returning its records in pre-order.
    pub fn into_records(self) -> Vec<CatalogRecord> {
        let mut out = Vec::with_capacity(self.slots.len());
        let mut stack: Vec<TreeNode> = self.roots.into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            let (record, children) = node.into_parts();
            out.push(record);
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// Finds the node with the given id.
    ///
    /// # Errors
    ///
    /// [`TaxonomyError::NotFound`] if no node has this id.
    pub fn find(&self, id: &RecordId) -> TaxonomyResult<&TreeNode> {
        let route = self.route(id)?;
        let chain = self.chain(&route);
        match chain.last() {
            Some(node) if chain.len() == route.len() => Ok(*node),
            _ => Err(TaxonomyError::NotFound(id.clone())),
        }
    }

    /// Maximum depth of the forest: a lone root counts as 1, an empty
    /// forest as 0.
    pub fn depth(&self) -> usize {
        self.roots.iter().map(TreeNode::height).max().unwrap_or(0)
    }

    /// Depth of one node: roots are at depth 1.
    pub fn depth_of(&self, id: &RecordId) -> TaxonomyResult<usize> {
        self.route(id).map(|route| route.len())
    }

    /// Returns the chain of records from the node's root down to the node
    /// itself, both inclusive.
    ///
    /// Dangling-parent records are roots, so their chain starts with them.
    pub fn ancestor_path(&self, id: &RecordId) -> TaxonomyResult<Vec<&CatalogRecord>> {
        let route = self.route(id)?;
        Ok(self
            .chain(&route)
            .into_iter()
            .map(TreeNode::record)
            .collect())
    }

    /// Joins a string field along the ancestor path, e.g.
    /// `"Apparel > Shoes > Sneakers"`.
    ///
    /// Records where the field is missing or not a string contribute their
    /// id instead.
    pub fn path_label(&self, id: &RecordId, field: &str, separator: &str) -> TaxonomyResult<String> {
        let labels: Vec<String> = self
            .ancestor_path(id)?
            .into_iter()
            .map(|record| match record.get(field).and_then(|v| v.as_str()) {
                Some(label) => label.to_string(),
                None => record.id().to_string(),
            })
            .collect();
        Ok(labels.join(separator))
    }

    /// Returns the effective parent record, `None` for roots.
    pub fn parent_of(&self, id: &RecordId) -> TaxonomyResult<Option<&CatalogRecord>> {
        let slot = self
            .slots
            .get(id)
            .ok_or_else(|| TaxonomyError::NotFound(id.clone()))?;
        match &slot.parent {
            None => Ok(None),
            Some(parent) => self.find(parent).map(|node| Some(node.record())),
        }
    }

    /// Returns all descendants of a node in pre-order, excluding the node.
    pub fn descendants(&self, id: &RecordId) -> TaxonomyResult<Vec<&CatalogRecord>> {
        let node = self.find(id)?;
        Ok(node.iter().skip(1).map(TreeNode::record).collect())
    }

    /// Returns every leaf node in pre-order.
    pub fn leaves(&self) -> Vec<&TreeNode> {
        self.iter().filter(|node| node.is_leaf()).collect()
    }

    /// Child indices from a root down to the node, root index first.
    fn route(&self, id: &RecordId) -> TaxonomyResult<Vec<usize>> {
        let mut route = Vec::new();
        let mut current = id;
        loop {
            let slot = self
                .slots
                .get(current)
                .ok_or_else(|| TaxonomyError::NotFound(id.clone()))?;
            route.push(slot.index);
            match &slot.parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        route.reverse();
        Ok(route)
    }

    /// Nodes visited while following a route, root first.
    fn chain(&self, route: &[usize]) -> Vec<&TreeNode> {
        let mut nodes = Vec::with_capacity(route.len());
        let mut level: &[TreeNode] = &self.roots;
        for &index in route {
            let Some(node) = level.get(index) else {
                break;
            };
            nodes.push(node);
            level = node.children();
        }
        nodes
    }
}

impl<'a> IntoIterator for &'a Forest {
    type Item = &'a TreeNode;
    type IntoIter = Preorder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Serializes the roots as nested JSON-style objects; nesting follows the
/// forest depth.
#[cfg(feature = "serde")]
impl serde::Serialize for Forest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.roots)
    }
}
