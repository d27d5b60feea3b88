use ising_tree::{ExhaustiveSolver, GroundStateSolver, IsingModel, TreeSolver};
use proptest::prelude::*;

/// Random labelled tree: node `perm[i]` attaches to `perm[seed_i % i]`.
fn tree_model(
    n: usize,
    attach: &[u32],
    biases: &[i64],
    couplings: &[i64],
    perm: &[usize],
) -> IsingModel {
    let edges = (1..n)
        .map(|i| {
            let parent = attach[i] as usize % i;
            ((perm[parent], perm[i]), couplings[i])
        })
        .collect::<Vec<_>>();
    IsingModel::new(biases[..n].to_vec(), edges).unwrap()
}

fn arb_tree() -> impl Strategy<Value = IsingModel> {
    (1usize..=12).prop_flat_map(|n| {
        (
            prop::collection::vec(any::<u32>(), n),
            prop::collection::vec(-6i64..=6, n),
            prop::collection::vec(-6i64..=6, n),
            Just((0..n).collect::<Vec<_>>()).prop_shuffle(),
        )
            .prop_map(move |(attach, biases, couplings, perm)| {
                tree_model(n, &attach, &biases, &couplings, &perm)
            })
    })
}

proptest! {
    #[test]
    fn matches_exhaustive_minimum(model in arb_tree()) {
        let state = TreeSolver::new().solve(&model).unwrap();
        let reference = ExhaustiveSolver::new().solve(&model).unwrap();
        prop_assert_eq!(state.energy, reference.energy);
    }

    #[test]
    fn reported_energy_matches_assignment(model in arb_tree()) {
        let state = TreeSolver::new().solve(&model).unwrap();
        prop_assert_eq!(state.assignment.len(), model.node_count());
        prop_assert_eq!(model.energy(&state.assignment).unwrap(), state.energy);
    }

    #[test]
    fn repeated_solves_are_identical(model in arb_tree()) {
        let solver = TreeSolver::new();
        let first = solver.solve(&model).unwrap();
        let second = solver.solve(&model).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn energy_is_root_invariant(model in arb_tree(), root_seed in any::<usize>()) {
        let root = root_seed % model.node_count();
        let base = TreeSolver::new().solve(&model).unwrap();
        let rerooted = TreeSolver::with_root(root).solve(&model).unwrap();
        prop_assert_eq!(base.energy, rerooted.energy);
        prop_assert_eq!(model.energy(&rerooted.assignment).unwrap(), rerooted.energy);
    }
}
