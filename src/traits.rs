//! Solver interface.
//!
//! Anything that can produce a ground state for an [`IsingModel`] implements
//! [`GroundStateSolver`]. The crate ships two implementations:
//! - [`TreeSolver`](crate::engine::TreeSolver): exact, linear time, trees only.
//! - [`ExhaustiveSolver`](crate::exact::ExhaustiveSolver): exact by 2ⁿ
//!   enumeration on any graph, used as a verification oracle.
//!
//! Tests and the command-line tools cross-check the two through this trait.

use crate::error::Result;
use crate::model::{GroundState, IsingModel};

/// Computes a minimum-energy assignment for a model.
///
/// Contract:
/// - `Ok(state)` implies `model.energy(&state.assignment) == Ok(state.energy)`
///   and `state.assignment.len() == model.node_count()`.
/// - Repeated calls on the same model return identical results.
/// - An empty model is rejected with [`IsingError::EmptyModel`](crate::IsingError::EmptyModel).
pub trait GroundStateSolver {
    /// Short label for logs and reports.
    fn name(&self) -> &'static str;

    /// Solve `model` exactly.
    fn solve(&self, model: &IsingModel) -> Result<GroundState>;
}
