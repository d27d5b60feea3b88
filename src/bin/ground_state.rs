use std::env;
use std::path::PathBuf;
use std::process;

use ising_tree::io::read_edge_list;
use ising_tree::utils::option_value;
use ising_tree::{ExhaustiveSolver, GroundStateSolver, IsingError, TreeSolverBuilder};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("ground_state: {err}");
            Options::print_help();
            process::exit(2);
        }
    };

    match run(&options) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("ground_state: {err}");
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when `--verify` found a mismatch.
fn run(options: &Options) -> Result<bool, IsingError> {
    let model = read_edge_list(&options.input)?.into_model()?;
    let mut builder = TreeSolverBuilder::new();
    if let Some(root) = options.root {
        builder = builder.with_root(root);
    }
    let (state, stats) = builder.build().solve_with_stats(&model)?;

    match options.format {
        OutputFormat::Text => {
            println!("{}", state.energy);
            println!("{}", state.to_glyphs());
        }
        OutputFormat::Json => {
            println!(
                "{{\"energy\":{},\"assignment\":\"{}\",\"nodes\":{},\"edges\":{},\"height\":{},\"ties\":{}}}",
                state.energy,
                state.to_glyphs(),
                stats.nodes,
                model.edge_count(),
                stats.height,
                stats.ties
            );
        }
    }

    if !options.verify {
        return Ok(true);
    }
    let oracle = ExhaustiveSolver::new();
    match oracle.solve(&model) {
        Ok(reference) if reference.energy == state.energy => {
            eprintln!("verified against {}: energy {}", oracle.name(), reference.energy);
            Ok(true)
        }
        Ok(reference) => {
            eprintln!(
                "verification failed: {} energy {}, tree_dp energy {}",
                oracle.name(),
                reference.energy,
                state.energy
            );
            Ok(false)
        }
        Err(IsingError::ModelTooLarge { nodes, limit }) => {
            eprintln!("verification skipped: {nodes} nodes exceeds exhaustive limit {limit}");
            Ok(true)
        }
        Err(err) => Err(err),
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Options {
    input: PathBuf,
    root: Option<usize>,
    verify: bool,
    format: OutputFormat,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut input = None;
        let mut root = None;
        let mut verify = false;
        let mut format = OutputFormat::Text;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                process::exit(0);
            } else if arg == "--verify" {
                verify = true;
            } else if let Some(value) = option_value(&arg, "--root", &mut args)? {
                root = Some(parse_root(&value)?);
            } else if let Some(value) = option_value(&arg, "--format", &mut args)? {
                format = OutputFormat::from_str(&value)?;
            } else if arg.starts_with('-') {
                return Err(format!("unrecognized argument '{arg}'"));
            } else if input.is_none() {
                input = Some(PathBuf::from(arg));
            } else {
                return Err(format!("unexpected extra input '{arg}'"));
            }
        }

        Ok(Self {
            input: input.ok_or_else(|| "missing input file".to_string())?,
            root,
            verify,
            format,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: ground_state <FILE> [options]

Reads an edge list (`i j value` per line; `i == j` sets a bias) and prints the
minimum energy followed by the assignment as +/- glyphs.

Options:
  --root <N>               Node to root the traversal at (default: 0)
  --verify                 Cross-check against exhaustive search when small enough
  --format <text|json>     Output format (default: text)
  -h, --help               Print this help message
"
        );
    }
}

fn parse_root(value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| "root must be a non-negative integer".to_string())
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }
}
