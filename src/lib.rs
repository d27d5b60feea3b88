//! Exact ground states of Ising models on trees.
//!
//! Given per-node biases `h` and per-edge couplings `J` on a tree, this crate
//! finds the ±1 spin assignment minimizing
//!
//! ```text
//! E(s) = Σ_v h_v·s_v + Σ_(u,v) J_uv·s_u·s_v
//! ```
//!
//! in O(n) time, instead of the 2ⁿ search a general graph would need.
//!
//! ## Core idea
//! 1. Root the tree and validate it ([`TreeTopology`]).
//! 2. Walk it children-first. Each node keeps two costs, one per own spin
//!    ([`SubtreeCandidate`](candidate::SubtreeCandidate)); each child is folded
//!    in by picking its best spin for each parent spin and recording that pick
//!    as a backpointer.
//! 3. At the root take the cheaper spin, then walk top-down following the
//!    backpointers to recover the full assignment.
//!
//! No step copies a whole assignment, so the solve stays linear.
//!
//! ## Quick start
//! ```
//! use std::collections::HashMap;
//! use ising_tree::{solve, Spin};
//!
//! let bias = HashMap::from([(0, -1), (1, -1)]);
//! let coupling = HashMap::from([((0, 1), 1)]);
//! let state = solve(2, &bias, &coupling)?;
//! assert_eq!(state.energy, -1);
//! assert_eq!(state.assignment, vec![Spin::Up, Spin::Up]);
//! assert_eq!(state.to_glyphs(), "++");
//! # Ok::<(), ising_tree::IsingError>(())
//! ```
//!
//! ## Around the core
//! - [`io`]: the `i j value` edge-list format (`i == j` sets a bias).
//! - [`utils`]: `+`/`-` rendering of assignments.
//! - [`exact`]: exhaustive 2ⁿ search, for cross-checking small instances.
//!
//! Enable the `tracing` feature for spans around topology building, the forward
//! pass and reconstruction.

pub mod builder;
pub mod candidate;
pub mod engine;
pub mod error;
pub mod exact;
pub mod io;
pub mod model;
pub mod traits;
pub mod tree;
pub mod utils;

pub use crate::builder::TreeSolverBuilder;
pub use crate::engine::{solve, SolveStats, TreeSolver};
pub use crate::error::{IsingError, Result, TopologyError};
pub use crate::exact::ExhaustiveSolver;
pub use crate::model::{GroundState, IsingModel, Spin};
pub use crate::traits::GroundStateSolver;
pub use crate::tree::TreeTopology;
