//! Exact ground-state solver for tree-structured Ising models.
//!
//! The solver runs in two phases over a validated [`TreeTopology`]:
//! 1. A forward pass in post-order that folds each child's
//!    [`SubtreeCandidate`] into its parent and records one backpointer per
//!    (child, parent spin).
//! 2. A reconstruction pass in pre-order that fixes the root's best spin and
//!    reads each child's spin from its backpointer.
//!
//! Both phases touch every edge once with O(1) work per parent spin, so a solve
//! is O(n) time and O(n) space. Neither phase recurses.

use std::collections::HashMap;

use crate::candidate::{Backpointers, SubtreeCandidate};
use crate::error::{IsingError, Result};
use crate::model::{GroundState, IsingModel, Spin};
use crate::traits::GroundStateSolver;
use crate::tree::TreeTopology;

/// Linear-time exact solver for Ising models on trees.
///
/// Typical usage:
/// ```
/// use ising_tree::{GroundStateSolver, IsingModel, Spin, TreeSolver};
///
/// let model = IsingModel::new(vec![-1, -1, -1, -1], [((0, 1), 1), ((1, 2), 1), ((1, 3), 1)])?;
/// let state = TreeSolver::new().solve(&model)?;
/// assert_eq!(state.energy, -5);
/// assert_eq!(state.assignment, vec![Spin::Up, Spin::Down, Spin::Up, Spin::Up]);
/// # Ok::<(), ising_tree::IsingError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeSolver {
    root: usize,
}

/// Counters gathered during one solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub nodes: usize,
    /// Longest root-to-leaf edge count of the traversal.
    pub height: usize,
    /// Child and root choices settled by the `Up`-first tie-break.
    pub ties: usize,
}

struct ForwardArtifacts {
    root_candidate: SubtreeCandidate,
    backpointers: Backpointers,
    ties: usize,
}

impl Default for TreeSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeSolver {
    /// Root used when none is configured.
    pub const DEFAULT_ROOT: usize = 0;

    /// Create a solver rooted at node 0.
    pub fn new() -> Self {
        Self::with_root(Self::DEFAULT_ROOT)
    }

    /// Create a solver rooted at `root`. The root is checked against each
    /// model at solve time.
    pub fn with_root(root: usize) -> Self {
        Self { root }
    }

    pub fn root(&self) -> usize {
        self.root
    }

    /// Solve and also return traversal counters.
    ///
    /// # Errors
    /// - [`IsingError::EmptyModel`] if the model has no nodes.
    /// - [`IsingError::InvalidTopology`] if the couplings do not form a
    ///   spanning tree or the root is out of range.
    pub fn solve_with_stats(&self, model: &IsingModel) -> Result<(GroundState, SolveStats)> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("solve", nodes = model.node_count(), root = self.root);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        if model.is_empty() {
            return Err(IsingError::EmptyModel);
        }
        let topology = TreeTopology::from_model(model, self.root)?;

        let ForwardArtifacts {
            root_candidate,
            backpointers,
            ties,
        } = {
            #[cfg(feature = "tracing")]
            let span = tracing::debug_span!("forward_pass");
            #[cfg(feature = "tracing")]
            let _enter = span.enter();
            Self::forward_pass(model, &topology)
        };

        let (root_spin, energy) = root_candidate.best();
        let root_tie = root_candidate.cost(Spin::Up) == root_candidate.cost(Spin::Down);

        let assignment = {
            #[cfg(feature = "tracing")]
            let span = tracing::debug_span!("reconstruct");
            #[cfg(feature = "tracing")]
            let _enter = span.enter();
            Self::reconstruct(&topology, &backpointers, root_spin)
        };

        let stats = SolveStats {
            nodes: topology.node_count(),
            height: topology.height(),
            ties: ties + usize::from(root_tie),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            energy,
            height = stats.height,
            ties = stats.ties,
            "ground state found"
        );

        Ok((GroundState { energy, assignment }, stats))
    }

    /// Phase I: children-first fold of subtree candidates.
    ///
    /// Reversed pre-order guarantees every child's candidate is final before
    /// its parent reads it.
    fn forward_pass(model: &IsingModel, topology: &TreeTopology) -> ForwardArtifacts {
        let n = topology.node_count();
        let mut candidates = vec![SubtreeCandidate::leaf(0); n];
        let mut backpointers = Backpointers::new(n);
        let mut ties = 0usize;

        for &v in topology.preorder().iter().rev() {
            let folded = topology.children(v).fold(
                SubtreeCandidate::leaf(model.bias(v)),
                |acc, (child, coupling)| {
                    let step = acc.absorb(&candidates[child], coupling);
                    backpointers.record(child, step.choice);
                    ties += step.ties;
                    step.candidate
                },
            );
            candidates[v] = folded;
        }

        ForwardArtifacts {
            root_candidate: candidates[topology.root()],
            backpointers,
            ties,
        }
    }

    /// Phase II: top-down assignment from the root's chosen spin.
    fn reconstruct(
        topology: &TreeTopology,
        backpointers: &Backpointers,
        root_spin: Spin,
    ) -> Vec<Spin> {
        let mut assignment = vec![Spin::Up; topology.node_count()];
        assignment[topology.root()] = root_spin;
        for &v in topology.preorder() {
            if let Some(p) = topology.parent(v) {
                assignment[v] = backpointers.child_spin(v, assignment[p]);
            }
        }
        assignment
    }
}

impl GroundStateSolver for TreeSolver {
    fn name(&self) -> &'static str {
        "tree_dp"
    }

    fn solve(&self, model: &IsingModel) -> Result<GroundState> {
        self.solve_with_stats(model).map(|(state, _)| state)
    }
}

/// Solve from sparse bias and coupling maps, rooted at node 0.
///
/// Nodes absent from `bias` have bias 0. Coupling keys are unordered pairs.
pub fn solve(
    node_count: usize,
    bias: &HashMap<usize, i64>,
    coupling: &HashMap<(usize, usize), i64>,
) -> Result<GroundState> {
    if node_count == 0 {
        return Err(IsingError::EmptyModel);
    }
    let model = IsingModel::from_maps(node_count, bias, coupling)?;
    TreeSolver::new().solve(&model)
}
