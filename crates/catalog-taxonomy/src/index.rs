//! Hierarchy lookups directly over a flat record slice.
//!
//! [`TaxonomyIndex`] answers parent/child/ancestor/descendant questions
//! without materializing a [`Forest`](crate::Forest). It borrows the records
//! and keeps only integer indexes, so it is cheap to build for one-off
//! lookups over a response page.

use std::collections::{HashMap, HashSet, VecDeque};

use catalog_record::{CatalogRecord, RecordId};

use crate::error::{TaxonomyError, TaxonomyResult};
use crate::forest::Forest;

/// Parent/child index over a borrowed record slice.
///
/// Uses the same policy as [`Forest::build`]: duplicate ids are rejected,
/// dangling parents are treated as roots. Parent cycles are tolerated here;
/// traversals stop when they revisit a record.
///
/// # Example
///
/// ```rust
/// use catalog_record::{CatalogRecord, RecordId};
/// use catalog_taxonomy::TaxonomyIndex;
///
/// let records = vec![
///     CatalogRecord::new(1),
///     CatalogRecord::new(2).with_parent(1),
///     CatalogRecord::new(3).with_parent(2),
/// ];
/// let index = TaxonomyIndex::new(&records)?;
///
/// let ancestors: Vec<_> = index
///     .ancestors(&RecordId::from(3))?
///     .into_iter()
///     .map(|r| r.id().clone())
///     .collect();
/// assert_eq!(ancestors, vec![RecordId::from(2), RecordId::from(1)]);
/// # Ok::<(), catalog_taxonomy::TaxonomyError>(())
/// ```
#[derive(Debug)]
pub struct TaxonomyIndex<'a> {
    records: &'a [CatalogRecord],
    positions: HashMap<&'a RecordId, usize>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

impl<'a> TaxonomyIndex<'a> {
    /// Indexes the given records.
    ///
    /// # Errors
    ///
    /// [`TaxonomyError::DuplicateIdentity`] if two records share an id.
    pub fn new(records: &'a [CatalogRecord]) -> TaxonomyResult<Self> {
        let mut positions = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            if positions.insert(record.id(), idx).is_some() {
                return Err(TaxonomyError::DuplicateIdentity(record.id().clone()));
            }
        }

        let mut parents = vec![None; records.len()];
        let mut children = vec![Vec::new(); records.len()];
        let mut roots = Vec::new();
        for (idx, record) in records.iter().enumerate() {
            match record.parent_ref().and_then(|p| positions.get(p)) {
                Some(&parent_idx) => {
                    parents[idx] = Some(parent_idx);
                    children[parent_idx].push(idx);
                }
                None => roots.push(idx),
            }
        }

        Ok(Self {
            records,
            positions,
            parents,
            children,
            roots,
        })
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records are indexed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by id.
    pub fn find(&self, id: &RecordId) -> TaxonomyResult<&'a CatalogRecord> {
        self.position(id).map(|idx| &self.records[idx])
    }

    /// Returns the top-level records in input order.
    pub fn roots(&self) -> Vec<&'a CatalogRecord> {
        self.roots.iter().map(|&idx| &self.records[idx]).collect()
    }

    /// Returns the effective parent, `None` for roots and dangling parents.
    pub fn parent_of(&self, id: &RecordId) -> TaxonomyResult<Option<&'a CatalogRecord>> {
        let idx = self.position(id)?;
        Ok(self.parents[idx].map(|p| &self.records[p]))
    }

    /// Returns direct children in input order.
    pub fn children_of(&self, id: &RecordId) -> TaxonomyResult<Vec<&'a CatalogRecord>> {
        let idx = self.position(id)?;
        Ok(self.children[idx].iter().map(|&c| &self.records[c]).collect())
    }

    /// Returns all ancestors, nearest first. Does NOT include the record
    /// itself.
    pub fn ancestors(&self, id: &RecordId) -> TaxonomyResult<Vec<&'a CatalogRecord>> {
        let start = self.position(id)?;
        let mut visited = HashSet::new();
        visited.insert(start);

        let mut chain = Vec::new();
        let mut current = self.parents[start];
        while let Some(idx) = current {
            if !visited.insert(idx) {
                break;
            }
            chain.push(&self.records[idx]);
            current = self.parents[idx];
        }
        Ok(chain)
    }

    /// Returns the chain from the top-level ancestor down to the record,
    /// both inclusive.
    pub fn ancestor_path(&self, id: &RecordId) -> TaxonomyResult<Vec<&'a CatalogRecord>> {
        let mut path = self.ancestors(id)?;
        path.reverse();
        path.push(self.find(id)?);
        Ok(path)
    }

    /// Returns all descendants in breadth-first order. Does NOT include the
    /// record itself.
    pub fn descendants(&self, id: &RecordId) -> TaxonomyResult<Vec<&'a CatalogRecord>> {
        let start = self.position(id)?;
        let mut visited = HashSet::with_capacity(self.children[start].len() * 2);
        visited.insert(start);
        let mut queue = VecDeque::with_capacity(self.children[start].len());
        let mut out = Vec::new();

        for &child in &self.children[start] {
            if visited.insert(child) {
                queue.push_back(child);
            }
        }

        while let Some(current) = queue.pop_front() {
            out.push(&self.records[current]);
            for &child in &self.children[current] {
                if visited.insert(child) {
                    queue.push_back(child);
                }
            }
        }

        Ok(out)
    }

    /// Depth of one record: top-level records are at depth 1.
    pub fn depth_of(&self, id: &RecordId) -> TaxonomyResult<usize> {
        self.ancestors(id).map(|chain| chain.len() + 1)
    }

    /// Maximum depth over everything reachable from the roots; 0 when
    /// empty.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut queue: VecDeque<(usize, usize)> = self.roots.iter().map(|&r| (r, 1)).collect();
        while let Some((idx, level)) = queue.pop_front() {
            max = max.max(level);
            queue.extend(self.children[idx].iter().map(|&c| (c, level + 1)));
        }
        max
    }

    /// Builds an owned [`Forest`] from the indexed records.
    pub fn to_forest(&self) -> TaxonomyResult<Forest> {
        Forest::build(self.records.iter().cloned())
    }

    fn position(&self, id: &RecordId) -> TaxonomyResult<usize> {
        self.positions
            .get(id)
            .copied()
            .ok_or_else(|| TaxonomyError::NotFound(id.clone()))
    }
}
