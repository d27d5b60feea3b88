//! Example: ground state of a small star-shaped tree.
//!
//! Run with:
//! `cargo run --example star`

use ising_tree::{GroundStateSolver, IsingModel, TreeSolver};

fn main() -> Result<(), ising_tree::IsingError> {
    // Node 1 is the hub; every node is pulled up by its bias, and every edge is
    // antiferromagnetic (positive coupling favours opposite spins).
    let model = IsingModel::new(
        vec![-1, -1, -1, -1],
        [((0, 1), 1), ((1, 2), 1), ((1, 3), 1)],
    )?;

    let (state, stats) = TreeSolver::new().solve_with_stats(&model)?;

    println!("Minimum energy: {}", state.energy);
    println!("Assignment:     {}", state.to_glyphs());
    println!("Tree height:    {}", stats.height);
    for (node, value) in state.values().into_iter().enumerate() {
        println!("  node {node}: {value:+}");
    }

    // Any root gives the same energy.
    for root in 0..model.node_count() {
        let rerooted = TreeSolver::with_root(root).solve(&model)?;
        println!("  rooted at {root}: energy {}", rerooted.energy);
    }
    Ok(())
}
