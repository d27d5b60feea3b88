//! Ising model data: spins, validated biases and couplings, energy evaluation.
//!
//! Energy convention used everywhere in this crate:
//!
//! ```text
//! E(s) = Σ_v bias[v]·s_v + Σ_(u,v) coupling(u,v)·s_u·s_v
//! ```
//!
//! Holding a node at `+1` adds `+bias`, holding it at `-1` adds `-bias`. This is
//! the `from_ising` convention of common binary-quadratic-model toolkits and is
//! *not* the physics Hamiltonian `-Σ h s - Σ J s s`.

use std::collections::{BTreeMap, HashMap};

use crate::error::{IsingError, Result, TopologyError};

/// A single binary spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Spin {
    Up,
    Down,
}

impl Spin {
    /// Both spins in tie-breaking order: `Up` is tried (and kept on ties) first.
    pub const BOTH: [Spin; 2] = [Spin::Up, Spin::Down];

    /// Numeric value, `+1` or `-1`.
    #[inline]
    pub fn value(self) -> i64 {
        match self {
            Spin::Up => 1,
            Spin::Down => -1,
        }
    }

    /// Slot in two-element arrays indexed by spin (`Up = 0`, `Down = 1`).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Spin::Up => 0,
            Spin::Down => 1,
        }
    }

    #[inline]
    pub fn flip(self) -> Spin {
        match self {
            Spin::Up => Spin::Down,
            Spin::Down => Spin::Up,
        }
    }

    /// Display glyph: `+` for up, `-` for down.
    #[inline]
    pub fn glyph(self) -> char {
        match self {
            Spin::Up => '+',
            Spin::Down => '-',
        }
    }
}

/// Normalize an unordered edge to `(min, max)`.
#[inline]
pub fn edge_key(u: usize, v: usize) -> (usize, usize) {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

/// An Ising model over nodes `0..node_count`.
///
/// The sum of absolute weights must fit in `i64`. Every energy and every
/// partial subtree cost is bounded by that sum, so solvers can use plain
/// `i64` arithmetic on a constructed model.
///
/// Couplings are keyed by normalized `(min, max)` pairs and kept in a
/// `BTreeMap` so iteration order (and therefore adjacency order) is
/// deterministic. Construction validates ids and pair shape but does not
/// require the edges to form a tree; that is the solver's concern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IsingModel {
    biases: Vec<i64>,
    couplings: BTreeMap<(usize, usize), i64>,
}

impl IsingModel {
    /// Build a model from a dense bias vector (one entry per node) and a list of
    /// `((u, v), coupling)` records.
    pub fn new<I>(biases: Vec<i64>, couplings: I) -> Result<Self>
    where
        I: IntoIterator<Item = ((usize, usize), i64)>,
    {
        let node_count = biases.len();
        let mut map = BTreeMap::new();
        for ((u, v), weight) in couplings {
            for node in [u, v] {
                if node >= node_count {
                    return Err(TopologyError::NodeOutOfRange { node, node_count }.into());
                }
            }
            if u == v {
                return Err(TopologyError::SelfLoop { node: u }.into());
            }
            let key = edge_key(u, v);
            if map.insert(key, weight).is_some() {
                return Err(TopologyError::DuplicateEdge { u: key.0, v: key.1 }.into());
            }
        }
        let magnitude: u128 = biases
            .iter()
            .chain(map.values())
            .map(|w| u128::from(w.unsigned_abs()))
            .sum();
        if magnitude > i64::MAX as u128 {
            return Err(IsingError::Overflow { magnitude });
        }
        Ok(Self {
            biases,
            couplings: map,
        })
    }

    /// Build a model from sparse maps. Nodes absent from `bias` get bias 0.
    ///
    /// `coupling` keys are unordered; listing both `(i, j)` and `(j, i)` is
    /// rejected as a duplicate edge.
    pub fn from_maps(
        node_count: usize,
        bias: &HashMap<usize, i64>,
        coupling: &HashMap<(usize, usize), i64>,
    ) -> Result<Self> {
        let mut biases = vec![0i64; node_count];
        for (&node, &h) in bias {
            if node >= node_count {
                return Err(TopologyError::NodeOutOfRange { node, node_count }.into());
            }
            biases[node] = h;
        }
        // HashMap order is arbitrary; sort so duplicate reporting is stable.
        let mut records: Vec<_> = coupling.iter().map(|(&k, &w)| (k, w)).collect();
        records.sort_unstable();
        Self::new(biases, records)
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.biases.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.biases.is_empty()
    }

    #[inline]
    pub fn bias(&self, node: usize) -> i64 {
        self.biases[node]
    }

    pub fn biases(&self) -> &[i64] {
        &self.biases
    }

    /// Coupling between `u` and `v`, if they share an edge.
    pub fn coupling(&self, u: usize, v: usize) -> Option<i64> {
        self.couplings.get(&edge_key(u, v)).copied()
    }

    /// Edges as `(u, v, coupling)` with `u < v`, in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, i64)> + '_ {
        self.couplings.iter().map(|(&(u, v), &w)| (u, v, w))
    }

    pub fn edge_count(&self) -> usize {
        self.couplings.len()
    }

    /// Total energy of `assignment` under the crate's sign convention.
    pub fn energy(&self, assignment: &[Spin]) -> Result<i64> {
        if assignment.len() != self.node_count() {
            return Err(IsingError::AssignmentLength {
                expected: self.node_count(),
                found: assignment.len(),
            });
        }
        let field: i64 = self
            .biases
            .iter()
            .zip(assignment)
            .map(|(&h, &s)| h * s.value())
            .sum();
        let interaction: i64 = self
            .edges()
            .map(|(u, v, j)| j * assignment[u].value() * assignment[v].value())
            .sum();
        Ok(field + interaction)
    }
}

/// A minimum-energy configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroundState {
    pub energy: i64,
    pub assignment: Vec<Spin>,
}

impl GroundState {
    /// Spin values as `+1` / `-1`.
    pub fn values(&self) -> Vec<i64> {
        self.assignment.iter().map(|s| s.value()).collect()
    }

    /// Assignment rendered as `+`/`-` glyphs.
    pub fn to_glyphs(&self) -> String {
        crate::utils::render_assignment(&self.assignment)
    }
}
