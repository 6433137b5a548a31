//! Statistics about taxonomy builds.

use std::time::Duration;

/// Statistics collected while building a [`Forest`](crate::Forest).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaxonomyStats {
    /// Number of records placed in the forest.
    pub node_count: usize,
    /// Number of top-level nodes, dangling-parent records included.
    pub root_count: usize,
    /// Number of nodes without children.
    pub leaf_count: usize,
    /// Maximum depth of the forest (a lone root has depth 1).
    pub max_depth: usize,
    /// Records whose parent id matched no record and were promoted to roots.
    pub dangling_parent_count: usize,
    /// Time taken to build the forest.
    pub build_time: Duration,
}

impl TaxonomyStats {
    /// Average number of children per non-leaf node.
    pub fn avg_children(&self) -> f64 {
        let internal = self.node_count - self.leaf_count;
        if internal == 0 {
            return 0.0;
        }
        // Every node except the roots is someone's child.
        (self.node_count - self.root_count) as f64 / internal as f64
    }
}

impl std::fmt::Display for TaxonomyStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Taxonomy Statistics:")?;
        writeln!(f, "  Nodes:            {}", self.node_count)?;
        writeln!(f, "  Roots:            {}", self.root_count)?;
        writeln!(f, "  Leaves:           {}", self.leaf_count)?;
        writeln!(f, "  Max depth:        {}", self.max_depth)?;
        writeln!(f, "  Dangling parents: {}", self.dangling_parent_count)?;
        writeln!(f, "  Avg children:     {:.1}", self.avg_children())?;
        writeln!(f, "  Build time:       {}us", self.build_time.as_micros())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avg_children() {
        // root -> (a, b), a -> c
        let stats = TaxonomyStats {
            node_count: 4,
            root_count: 1,
            leaf_count: 2,
            max_depth: 3,
            ..Default::default()
        };
        assert_eq!(stats.avg_children(), 1.5);
    }

    #[test]
    fn test_avg_children_all_leaves() {
        let stats = TaxonomyStats {
            node_count: 3,
            root_count: 3,
            leaf_count: 3,
            max_depth: 1,
            ..Default::default()
        };
        assert_eq!(stats.avg_children(), 0.0);
    }

    #[test]
    fn test_display() {
        let stats = TaxonomyStats {
            node_count: 4,
            root_count: 1,
            leaf_count: 2,
            max_depth: 3,
            dangling_parent_count: 0,
            build_time: Duration::from_micros(15),
        };
        let report = stats.to_string();
        assert!(report.contains("Nodes:            4"));
        assert!(report.contains("Max depth:        3"));
        assert!(report.contains("Build time:       15us"));
    }
}
