use ising_tree::{GroundStateSolver, IsingModel, Spin, TreeSolver};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_weights(rng: &mut StdRng, len: usize) -> Vec<i64> {
    (0..len).map(|_| rng.gen_range(-5..=5)).collect()
}

#[test]
fn long_path_does_not_overflow_the_stack() {
    let n = 200_000;
    let mut rng = StdRng::seed_from_u64(7);
    let biases = random_weights(&mut rng, n);
    let couplings = random_weights(&mut rng, n - 1);
    let edges = couplings
        .iter()
        .enumerate()
        .map(|(i, &j)| ((i, i + 1), j))
        .collect::<Vec<_>>();
    let model = IsingModel::new(biases, edges).unwrap();

    let (state, stats) = TreeSolver::new().solve_with_stats(&model).unwrap();
    assert_eq!(stats.height, n - 1);
    assert_eq!(model.energy(&state.assignment).unwrap(), state.energy);

    // Rooting in the middle halves the height, not the answer.
    let (mid, mid_stats) = TreeSolver::with_root(n / 2).solve_with_stats(&model).unwrap();
    assert_eq!(mid.energy, state.energy);
    assert_eq!(mid_stats.height, n / 2);
}

#[test]
fn wide_star_solves_exactly() {
    // Center biased up, leaves pulled down by antiferromagnetic edges.
    let n = 50_000;
    let mut biases = vec![0i64; n];
    biases[0] = -(n as i64);
    let edges = (1..n).map(|i| ((0, i), 1)).collect::<Vec<_>>();
    let model = IsingModel::new(biases, edges).unwrap();
    let state = TreeSolver::new().solve(&model).unwrap();
    assert_eq!(state.assignment[0], Spin::Up);
    assert!(state.assignment[1..].iter().all(|&s| s == Spin::Down));
    assert_eq!(state.energy, -(n as i64) - (n as i64 - 1));
}

#[test]
fn random_recursive_tree_is_energy_consistent() {
    let n = 100_000;
    let mut rng = StdRng::seed_from_u64(2024);
    let biases = random_weights(&mut rng, n);
    let edges = (1..n)
        .map(|i| ((rng.gen_range(0..i), i), rng.gen_range(-5..=5)))
        .collect::<Vec<_>>();
    let model = IsingModel::new(biases, edges).unwrap();
    let state = TreeSolver::new().solve(&model).unwrap();
    assert_eq!(model.energy(&state.assignment).unwrap(), state.energy);
}
