//! Exhaustive ground-state search.
//!
//! Enumerates all 2ⁿ assignments and evaluates each directly, so it works on any
//! coupling graph, cycles included. Exponential: only meant as a reference to
//! check faster solvers against.

use crate::error::{IsingError, Result};
use crate::model::{GroundState, IsingModel, Spin};
use crate::traits::GroundStateSolver;

/// Brute-force solver with an upper bound on the node count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExhaustiveSolver {
    limit: usize,
}

impl Default for ExhaustiveSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ExhaustiveSolver {
    /// Largest model enumerated by default (about a million assignments).
    pub const DEFAULT_LIMIT: usize = 20;

    pub fn new() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
        }
    }

    /// Override the node limit. Values above 62 are clamped.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: limit.min(62),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl GroundStateSolver for ExhaustiveSolver {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    /// Assignments are visited with node 0 as the most significant position and
    /// `Up` before `Down`; the first minimum wins.
    fn solve(&self, model: &IsingModel) -> Result<GroundState> {
        let n = model.node_count();
        if n == 0 {
            return Err(IsingError::EmptyModel);
        }
        if n > self.limit {
            return Err(IsingError::ModelTooLarge {
                nodes: n,
                limit: self.limit,
            });
        }

        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("exhaustive", nodes = n);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut assignment = vec![Spin::Up; n];
        let mut best: Option<GroundState> = None;

        for mask in 0u64..(1u64 << n) {
            for (node, spin) in assignment.iter_mut().enumerate() {
                *spin = if (mask >> (n - 1 - node)) & 1 == 0 {
                    Spin::Up
                } else {
                    Spin::Down
                };
            }
            let energy = model.energy(&assignment)?;
            if best.as_ref().map_or(true, |b| energy < b.energy) {
                best = Some(GroundState {
                    energy,
                    assignment: assignment.clone(),
                });
            }
        }

        best.ok_or(IsingError::EmptyModel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Spin::{Down, Up};

    #[test]
    fn finds_first_minimum_in_enumeration_order() {
        // Three tied optima: ++, +-, -+. Enumeration sees ++ first.
        let model = IsingModel::new(vec![-1, -1], [((0, 1), 1)]).unwrap();
        let state = ExhaustiveSolver::new().solve(&model).unwrap();
        assert_eq!(state.energy, -1);
        assert_eq!(state.assignment, vec![Up, Up]);
    }

    #[test]
    fn handles_frustrated_cycle() {
        // Antiferromagnetic triangle: at best one edge is unsatisfied.
        let model = IsingModel::new(vec![0, 0, 0], [((0, 1), 1), ((1, 2), 1), ((0, 2), 1)]).unwrap();
        let state = ExhaustiveSolver::new().solve(&model).unwrap();
        assert_eq!(state.energy, -1);
        assert_eq!(state.assignment, vec![Up, Up, Down]);
    }

    #[test]
    fn respects_limit() {
        let model = IsingModel::new(vec![0; 5], Vec::new()).unwrap();
        let err = ExhaustiveSolver::with_limit(4).solve(&model).unwrap_err();
        assert!(matches!(err, IsingError::ModelTooLarge { nodes: 5, limit: 4 }));
        let empty = IsingModel::new(Vec::new(), Vec::new()).unwrap();
        assert!(matches!(
            ExhaustiveSolver::new().solve(&empty),
            Err(IsingError::EmptyModel)
        ));
    }
}
