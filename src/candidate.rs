//! Per-subtree dynamic-programming state and the backpointer arena.
//!
//! A [`SubtreeCandidate`] holds, for one node `v`, the minimum energy of the
//! subtree rooted at `v` under each of `v`'s two spins. Which spin each
//! descendant takes is *not* stored here: every fold step records a single
//! backpointer per (child, parent spin) in [`Backpointers`], and the full
//! assignment is read back in one top-down pass.
//!
//! Costs are plain `i64`. Weights taken from an [`IsingModel`](crate::IsingModel)
//! have a total magnitude within `i64::MAX`, which bounds every cost built here.

use crate::model::Spin;

/// Minimum subtree energies indexed by the subtree root's spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubtreeCandidate {
    cost: [i64; 2],
}

/// Result of folding one child into a parent's accumulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Absorbed {
    pub candidate: SubtreeCandidate,
    /// Child spin chosen for each parent spin, indexed by [`Spin::index`].
    pub choice: [Spin; 2],
    /// How many of the two choices were decided by the `Up`-first tie-break.
    pub ties: usize,
}

impl SubtreeCandidate {
    /// A childless node contributes only its field term: `+bias` when up,
    /// `-bias` when down.
    #[inline]
    pub fn leaf(bias: i64) -> Self {
        Self {
            cost: [bias, -bias],
        }
    }

    #[inline]
    pub fn cost(&self, spin: Spin) -> i64 {
        self.cost[spin.index()]
    }

    /// Fold a solved child subtree joined by an edge of weight `coupling`.
    ///
    /// For each parent spin `s1` the child's spin `s2` is chosen greedily to
    /// minimize `child.cost(s2) + coupling * s1 * s2`; subtrees of distinct
    /// children share no edges, so these choices are independent. Equal
    /// candidates keep `Up`.
    pub fn absorb(self, child: &SubtreeCandidate, coupling: i64) -> Absorbed {
        let mut cost = self.cost;
        let mut choice = [Spin::Up; 2];
        let mut ties = 0;
        for s1 in Spin::BOTH {
            let mut best = Spin::Up;
            let mut best_cost = child.cost(Spin::Up) + coupling * s1.value();
            let down_cost = child.cost(Spin::Down) - coupling * s1.value();
            if down_cost < best_cost {
                best = Spin::Down;
                best_cost = down_cost;
            } else if down_cost == best_cost {
                ties += 1;
            }
            cost[s1.index()] += best_cost;
            choice[s1.index()] = best;
        }
        Absorbed {
            candidate: SubtreeCandidate { cost },
            choice,
            ties,
        }
    }

    /// Spin with the smaller cost (ties prefer `Up`) and that cost.
    #[inline]
    pub fn best(&self) -> (Spin, i64) {
        if self.cost(Spin::Up) <= self.cost(Spin::Down) {
            (Spin::Up, self.cost(Spin::Up))
        } else {
            (Spin::Down, self.cost(Spin::Down))
        }
    }
}

/// Optimal child spin per parent spin, one entry per non-root node.
///
/// Every non-root node has exactly one parent, so the child id alone
/// identifies the edge and the arena is a flat vector.
#[derive(Clone, Debug)]
pub struct Backpointers {
    choice: Vec<[Spin; 2]>,
}

impl Backpointers {
    pub fn new(node_count: usize) -> Self {
        Self {
            choice: vec![[Spin::Up; 2]; node_count],
        }
    }

    #[inline]
    pub fn record(&mut self, child: usize, choice: [Spin; 2]) {
        self.choice[child] = choice;
    }

    /// Spin `child` takes when its parent holds `parent_spin`.
    #[inline]
    pub fn child_spin(&self, child: usize, parent_spin: Spin) -> Spin {
        self.choice[child][parent_spin.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.choice.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.choice.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_applies_bias_sign() {
        let c = SubtreeCandidate::leaf(-3);
        assert_eq!(c.cost(Spin::Up), -3);
        assert_eq!(c.cost(Spin::Down), 3);
        assert_eq!(c.best(), (Spin::Up, -3));
    }

    #[test]
    fn absorb_picks_child_spin_per_parent_spin() {
        // Antiferromagnetic edge: child wants to oppose the parent.
        let parent = SubtreeCandidate::leaf(0);
        let child = SubtreeCandidate::leaf(0);
        let out = parent.absorb(&child, 2);
        assert_eq!(out.choice, [Spin::Down, Spin::Up]);
        assert_eq!(out.candidate.cost(Spin::Up), -2);
        assert_eq!(out.candidate.cost(Spin::Down), -2);
        assert_eq!(out.ties, 0);
    }

    #[test]
    fn absorb_tie_keeps_up() {
        // bias -1 child on a +1 edge under an up parent: -1+1 == 1-1.
        let parent = SubtreeCandidate::leaf(-1);
        let child = SubtreeCandidate::leaf(-1);
        let out = parent.absorb(&child, 1);
        assert_eq!(out.choice[Spin::Up.index()], Spin::Up);
        assert_eq!(out.ties, 1);
        assert_eq!(out.candidate.cost(Spin::Up), -1);
        assert_eq!(out.candidate.cost(Spin::Down), -1);
        assert_eq!(out.candidate.best(), (Spin::Up, -1));
    }

    #[test]
    fn fold_is_order_independent_in_cost() {
        let children = [SubtreeCandidate::leaf(4), SubtreeCandidate::leaf(-2)];
        let couplings = [-1, 3];
        let forward = children
            .iter()
            .zip(couplings)
            .fold(SubtreeCandidate::leaf(1), |acc, (c, j)| acc.absorb(c, j).candidate);
        let backward = children
            .iter()
            .zip(couplings)
            .rev()
            .fold(SubtreeCandidate::leaf(1), |acc, (c, j)| acc.absorb(c, j).candidate);
        assert_eq!(forward, backward);
    }

    #[test]
    fn backpointers_round_trip_choice() {
        let mut bp = Backpointers::new(3);
        bp.record(2, [Spin::Down, Spin::Up]);
        assert_eq!(bp.child_spin(2, Spin::Up), Spin::Down);
        assert_eq!(bp.child_spin(2, Spin::Down), Spin::Up);
        assert_eq!(bp.len(), 3);
        assert!(!bp.is_empty());
    }
}
