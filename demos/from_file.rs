//! Example: solve an edge-list file, or a built-in sample when no path is given.
//!
//! Run with:
//! `cargo run --example from_file -- path/to/tree.txt`

use std::env;

use ising_tree::io::{parse_edge_list, read_edge_list};
use ising_tree::{ExhaustiveSolver, GroundStateSolver, TreeSolver};

const SAMPLE: &str = "\
# i j value; i == j sets a bias
0 0 -1
1 1 2
2 2 -1
3 3 0
4 4 1
0 1 1
1 2 -2
1 3 1
3 4 -1
";

fn main() -> Result<(), ising_tree::IsingError> {
    let edges = match env::args().nth(1) {
        Some(path) => read_edge_list(path)?,
        None => parse_edge_list(SAMPLE)?,
    };
    let model = edges.into_model()?;

    let state = TreeSolver::new().solve(&model)?;
    println!("{}", state.energy);
    println!("{}", state.to_glyphs());

    match ExhaustiveSolver::new().solve(&model) {
        Ok(reference) => println!("exhaustive check: energy {}", reference.energy),
        Err(err) => println!("exhaustive check skipped: {err}"),
    }
    Ok(())
}
