//! Tree builder: validates an edge set and derives the rooted traversal scaffold.
//!
//! The solver never walks the raw edge list. It consumes a [`TreeTopology`],
//! which holds sorted adjacency lists plus, for a chosen root, the parent of
//! every node and a pre-order visit sequence. Reversing the pre-order yields a
//! valid post-order (every child before its parent), so neither pass needs
//! recursion and path-shaped trees cannot exhaust the call stack.

use std::collections::HashSet;

use crate::error::{IsingError, Result, TopologyError};
use crate::model::{edge_key, IsingModel};

/// Disjoint-set forest with path splitting and union by rank.
#[derive(Debug, Clone)]
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let next = self.parent[x];
            self.parent[x] = self.parent[next];
            x = next;
        }
        x
    }

    /// Merge the sets of `a` and `b`; returns `false` if they were already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        let (big, small) = if self.rank[ra] >= self.rank[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small] = big;
        if self.rank[big] == self.rank[small] {
            self.rank[big] += 1;
        }
        true
    }
}

/// Validated spanning tree rooted at a fixed node.
#[derive(Clone, Debug)]
pub struct TreeTopology {
    /// neighbors[v] = (neighbor, coupling), sorted by neighbor id.
    neighbors: Vec<Vec<(usize, i64)>>,
    root: usize,
    /// parent[v] for every non-root node; `None` at the root.
    parent: Vec<Option<usize>>,
    /// Coupling on the edge to the parent (0 at the root).
    parent_coupling: Vec<i64>,
    /// Pre-order from the root; children appear in ascending id order.
    order: Vec<usize>,
    height: usize,
}

impl TreeTopology {
    /// Validate `edges` as a spanning tree on `node_count` nodes and root it.
    ///
    /// Checks run in a fixed order and the first failure is reported:
    /// endpoint range, self-loop, duplicate pair, cycle, connectivity, root range.
    pub fn build<I>(node_count: usize, edges: I, root: usize) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, i64)>,
    {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("build_topology", node_count, root);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        if node_count == 0 {
            return Err(IsingError::EmptyModel);
        }

        let mut neighbors: Vec<Vec<(usize, i64)>> = vec![Vec::new(); node_count];
        let mut seen = HashSet::new();
        let mut sets = UnionFind::new(node_count);
        let mut merged = 0usize;

        for (u, v, weight) in edges {
            for node in [u, v] {
                if node >= node_count {
                    return Err(TopologyError::NodeOutOfRange { node, node_count }.into());
                }
            }
            if u == v {
                return Err(TopologyError::SelfLoop { node: u }.into());
            }
            let key = edge_key(u, v);
            if !seen.insert(key) {
                return Err(TopologyError::DuplicateEdge { u: key.0, v: key.1 }.into());
            }
            if !sets.union(u, v) {
                return Err(TopologyError::Cycle { u, v }.into());
            }
            merged += 1;
            neighbors[u].push((v, weight));
            neighbors[v].push((u, weight));
        }

        let components = node_count - merged;
        if components > 1 {
            return Err(TopologyError::Disconnected { components }.into());
        }
        if root >= node_count {
            return Err(TopologyError::NodeOutOfRange {
                node: root,
                node_count,
            }
            .into());
        }

        for list in &mut neighbors {
            list.sort_unstable_by_key(|&(n, _)| n);
        }

        let mut parent = vec![None; node_count];
        let mut parent_coupling = vec![0i64; node_count];
        let mut depth = vec![0usize; node_count];
        let mut order = Vec::with_capacity(node_count);
        let mut height = 0usize;
        let mut stack = vec![root];

        while let Some(v) = stack.pop() {
            order.push(v);
            height = height.max(depth[v]);
            // Reverse push so the smallest neighbor is visited first.
            for &(c, weight) in neighbors[v].iter().rev() {
                if Some(c) == parent[v] {
                    continue;
                }
                parent[c] = Some(v);
                parent_coupling[c] = weight;
                depth[c] = depth[v] + 1;
                stack.push(c);
            }
        }
        debug_assert_eq!(order.len(), node_count, "validated tree must be spanning");

        Ok(Self {
            neighbors,
            root,
            parent,
            parent_coupling,
            order,
            height,
        })
    }

    /// Build from a model's couplings.
    pub fn from_model(model: &IsingModel, root: usize) -> Result<Self> {
        Self::build(model.node_count(), model.edges(), root)
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    #[inline]
    pub fn root(&self) -> usize {
        self.root
    }

    /// Incident `(neighbor, coupling)` pairs of `node`, sorted by neighbor.
    #[inline]
    pub fn neighbors(&self, node: usize) -> &[(usize, i64)] {
        &self.neighbors[node]
    }

    #[inline]
    pub fn parent(&self, node: usize) -> Option<usize> {
        self.parent[node]
    }

    #[inline]
    pub fn parent_coupling(&self, node: usize) -> i64 {
        self.parent_coupling[node]
    }

    /// Children of `node` with their edge couplings, in ascending id order.
    pub fn children(&self, node: usize) -> impl Iterator<Item = (usize, i64)> + '_ {
        let parent = self.parent[node];
        self.neighbors[node]
            .iter()
            .copied()
            .filter(move |&(c, _)| Some(c) != parent)
    }

    /// Pre-order from the root.
    #[inline]
    pub fn preorder(&self) -> &[usize] {
        &self.order
    }

    /// Longest root-to-leaf edge count.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star() -> Vec<(usize, usize, i64)> {
        vec![(0, 1, 1), (1, 2, 1), (1, 3, 1)]
    }

    #[test]
    fn single_node_tree() {
        let t = TreeTopology::build(1, Vec::new(), 0).unwrap();
        assert_eq!(t.preorder(), &[0]);
        assert_eq!(t.parent(0), None);
        assert_eq!(t.height(), 0);
    }

    #[test]
    fn rooted_scaffold_shapes() {
        let t = TreeTopology::build(4, star(), 0).unwrap();
        assert_eq!(t.preorder(), &[0, 1, 2, 3]);
        assert_eq!(t.parent(1), Some(0));
        assert_eq!(t.parent(3), Some(1));
        assert_eq!(t.children(1).collect::<Vec<_>>(), vec![(2, 1), (3, 1)]);
        assert_eq!(t.neighbors(1), &[(0, 1), (2, 1), (3, 1)]);
        assert_eq!(t.height(), 2);

        let rerooted = TreeTopology::build(4, star(), 1).unwrap();
        assert_eq!(rerooted.preorder(), &[1, 0, 2, 3]);
        assert_eq!(rerooted.height(), 1);
    }

    #[test]
    fn reversed_preorder_visits_children_first() {
        let edges = vec![(0, 4, 1), (4, 2, -1), (2, 3, 2), (0, 1, 5)];
        let t = TreeTopology::build(5, edges, 0).unwrap();
        let mut done = [false; 5];
        for &v in t.preorder().iter().rev() {
            assert!(t.children(v).all(|(c, _)| done[c]));
            done[v] = true;
        }
        assert_eq!(t.parent_coupling(3), 2);
    }

    #[test]
    fn detects_cycle() {
        let err = TreeTopology::build(3, [(0, 1, 1), (1, 2, 1), (2, 0, 1)], 0).unwrap_err();
        assert!(matches!(
            err,
            IsingError::InvalidTopology(TopologyError::Cycle { u: 2, v: 0 })
        ));
    }

    #[test]
    fn detects_disconnected_forest() {
        let err = TreeTopology::build(4, [(0, 1, 1), (2, 3, 1)], 0).unwrap_err();
        assert!(matches!(
            err,
            IsingError::InvalidTopology(TopologyError::Disconnected { components: 2 })
        ));
    }

    #[test]
    fn detects_bad_edges_and_root() {
        assert!(matches!(
            TreeTopology::build(2, [(0, 2, 1)], 0),
            Err(IsingError::InvalidTopology(TopologyError::NodeOutOfRange { node: 2, .. }))
        ));
        assert!(matches!(
            TreeTopology::build(2, [(1, 1, 1)], 0),
            Err(IsingError::InvalidTopology(TopologyError::SelfLoop { node: 1 }))
        ));
        assert!(matches!(
            TreeTopology::build(3, [(0, 1, 1), (1, 0, 1)], 0),
            Err(IsingError::InvalidTopology(TopologyError::DuplicateEdge { u: 0, v: 1 }))
        ));
        assert!(matches!(
            TreeTopology::build(2, [(0, 1, 1)], 5),
            Err(IsingError::InvalidTopology(TopologyError::NodeOutOfRange { node: 5, .. }))
        ));
        assert!(matches!(
            TreeTopology::build(0, Vec::new(), 0),
            Err(IsingError::EmptyModel)
        ));
    }

    #[test]
    fn union_find_merges_once() {
        let mut uf = UnionFind::new(4);
        assert!(uf.union(0, 1));
        assert!(uf.union(2, 3));
        assert!(uf.union(1, 3));
        assert!(!uf.union(0, 2));
        assert_eq!(uf.find(0), uf.find(3));
    }
}
