#![cfg(feature = "heavy")]
use ising_tree::{GroundStateSolver, IsingModel, TreeSolver};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[test]
fn heavy_stress_five_million_nodes() {
    let n = 5_000_000;
    let mut rng = StdRng::seed_from_u64(123);
    let biases = (0..n).map(|_| rng.gen_range(-100..=100)).collect::<Vec<i64>>();
    let edges = (1..n)
        .map(|i| {
            // Mostly path-like with occasional long jumps back.
            let parent = if rng.gen_bool(0.9) { i - 1 } else { rng.gen_range(0..i) };
            ((parent, i), rng.gen_range(-100..=100))
        })
        .collect::<Vec<_>>();
    let model = IsingModel::new(biases, edges).unwrap();
    let state = TreeSolver::new().solve(&model).unwrap();
    assert_eq!(model.energy(&state.assignment).unwrap(), state.energy);
}
