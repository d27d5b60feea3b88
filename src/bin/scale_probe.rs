use std::env;
use std::time::Instant;

use ising_tree::utils::option_value;
use ising_tree::{ExhaustiveSolver, GroundStateSolver, IsingModel, TreeSolver};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

const SIZES: &[usize] = &[8, 12, 16, 1_024, 16_384, 262_144, 1_048_576];
const SHAPES: [TreeShape; 3] = [TreeShape::Path, TreeShape::Star, TreeShape::Random];

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("scale_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    eprintln!(
        "scale_probe: {} shapes x {} sizes, exhaustive check up to n = {}",
        SHAPES.len(),
        SIZES.len(),
        options.verify_limit
    );

    let mut sys = System::new();
    let mut rows = Vec::with_capacity(SHAPES.len() * SIZES.len());
    for shape in SHAPES {
        eprintln!("[{}] {}", shape.name(), shape.describe());
        for &n in SIZES {
            let row = probe(shape, n, &options, &mut sys);
            eprintln!(
                "  n={:<9} energy={:<10} height={:<9} {:>9.3}s  {}",
                row.nodes,
                row.energy,
                row.height,
                row.wall_s,
                row.check.label()
            );
            rows.push(row);
        }
    }

    let failures = summarize(&rows);
    options.format.write(&rows);
    if failures > 0 {
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 16usize;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if let Some(value) = option_value(&arg, "--format", &mut args)? {
                format = OutputFormat::from_str(&value)?;
            } else if let Some(value) = option_value(&arg, "--verify-limit", &mut args)? {
                verify_limit = parse_limit(&value)?;
            } else {
                return Err(format!("unrecognized argument '{arg}'"));
            }
        }

        Ok(Self {
            format,
            verify_limit,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: scale_probe [options]

Solves path, star and random trees of growing size, checks each result and
reports wall time and resident-memory growth.

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Largest n cross-checked by exhaustive search (default: 16, max: {})
  -h, --help                    Print this help message
",
            ExhaustiveSolver::DEFAULT_LIMIT
        );
    }
}

fn parse_limit(value: &str) -> Result<usize, String> {
    let limit = value
        .parse::<usize>()
        .map_err(|_| "verify limit must be a non-negative integer".to_string())?;
    if limit > ExhaustiveSolver::DEFAULT_LIMIT {
        return Err(format!(
            "verify limit {limit} exceeds the exhaustive limit {}",
            ExhaustiveSolver::DEFAULT_LIMIT
        ));
    }
    Ok(limit)
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, rows: &[Measurement]) {
        match self {
            OutputFormat::Csv => {
                println!("shape,nodes,energy,height,wall_s,ns_per_node,rss_delta_kib,check");
                for r in rows {
                    println!(
                        "{},{},{},{},{:.6},{:.1},{},\"{}\"",
                        r.shape.name(),
                        r.nodes,
                        r.energy,
                        r.height,
                        r.wall_s,
                        r.ns_per_node(),
                        r.rss_delta_kib,
                        r.check.label().replace('"', "'")
                    );
                }
            }
            OutputFormat::Table => {
                println!(
                    "{:<7} {:>9} {:>11} {:>9} {:>10} {:>8} {:>10}  check",
                    "shape", "nodes", "energy", "height", "wall_s", "ns/node", "rss_kib"
                );
                for r in rows {
                    println!(
                        "{:<7} {:>9} {:>11} {:>9} {:>10.4} {:>8.1} {:>10}  {}",
                        r.shape.name(),
                        r.nodes,
                        r.energy,
                        r.height,
                        r.wall_s,
                        r.ns_per_node(),
                        r.rss_delta_kib,
                        r.check.label()
                    );
                }
            }
            OutputFormat::Json => {
                let body = rows
                    .iter()
                    .map(|r| {
                        format!(
                            "  {{\"shape\":\"{}\",\"nodes\":{},\"energy\":{},\"height\":{},\"wall_s\":{:.6},\"rss_delta_kib\":{},\"check\":\"{}\"}}",
                            r.shape.name(),
                            r.nodes,
                            r.energy,
                            r.height,
                            r.wall_s,
                            r.rss_delta_kib,
                            r.check.label().replace('"', "'")
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(",\n");
                println!("[\n{body}\n]");
            }
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum TreeShape {
    Path,
    Star,
    Random,
}

impl TreeShape {
    fn name(self) -> &'static str {
        match self {
            TreeShape::Path => "path",
            TreeShape::Star => "star",
            TreeShape::Random => "random",
        }
    }

    fn describe(self) -> &'static str {
        match self {
            TreeShape::Path => "one chain, height n-1",
            TreeShape::Star => "every node hangs off node 0",
            TreeShape::Random => "each node attaches to a pseudo-random earlier node",
        }
    }

    /// Parent of node `i > 0`.
    fn parent(self, i: usize) -> usize {
        match self {
            TreeShape::Path => i - 1,
            TreeShape::Star => 0,
            TreeShape::Random => (mix(i as u64 ^ 0xA5A5) % i as u64) as usize,
        }
    }
}

enum Check {
    /// Matched the exhaustive minimum.
    Exhaustive,
    /// Too large to enumerate; reported energy matched the assignment.
    EnergyOnly,
    Failed(String),
}

impl Check {
    fn label(&self) -> String {
        match self {
            Check::Exhaustive => "exhaustive".to_string(),
            Check::EnergyOnly => "energy_only".to_string(),
            Check::Failed(why) => format!("FAILED: {why}"),
        }
    }
}

struct Measurement {
    shape: TreeShape,
    nodes: usize,
    energy: i64,
    height: usize,
    wall_s: f64,
    rss_delta_kib: u64,
    check: Check,
}

impl Measurement {
    fn ns_per_node(&self) -> f64 {
        self.wall_s * 1e9 / self.nodes.max(1) as f64
    }
}

/// Time one solve and check it. Only the solve itself is timed.
fn probe(shape: TreeShape, n: usize, options: &Options, sys: &mut System) -> Measurement {
    let model = build_model(shape, n);

    let before = rss_kib(sys);
    let start = Instant::now();
    let solved = TreeSolver::new().solve_with_stats(&model);
    let wall_s = start.elapsed().as_secs_f64();
    let rss_delta_kib = rss_kib(sys).saturating_sub(before);

    let mut row = Measurement {
        shape,
        nodes: n,
        energy: 0,
        height: 0,
        wall_s,
        rss_delta_kib,
        check: Check::EnergyOnly,
    };
    let (state, stats) = match solved {
        Ok(out) => out,
        Err(err) => {
            row.check = Check::Failed(err.to_string());
            return row;
        }
    };
    row.energy = state.energy;
    row.height = stats.height;

    row.check = match model.energy(&state.assignment) {
        Ok(e) if e != state.energy => {
            Check::Failed(format!("assignment energy {e}, reported {}", state.energy))
        }
        Err(err) => Check::Failed(err.to_string()),
        Ok(_) if n > options.verify_limit => Check::EnergyOnly,
        Ok(_) => match ExhaustiveSolver::new().solve(&model) {
            Ok(reference) if reference.energy == state.energy => Check::Exhaustive,
            Ok(reference) => Check::Failed(format!(
                "exhaustive {}, tree_dp {}",
                reference.energy, state.energy
            )),
            Err(err) => Check::Failed(err.to_string()),
        },
    };
    row
}

/// Per-shape summary on stderr; returns the number of failed rows.
fn summarize(rows: &[Measurement]) -> usize {
    let failures = rows
        .iter()
        .filter(|r| matches!(r.check, Check::Failed(_)))
        .count();
    let exhaustive = rows
        .iter()
        .filter(|r| matches!(r.check, Check::Exhaustive))
        .count();

    eprintln!();
    eprintln!(
        "{} runs: {} exhaustive-checked, {} energy-checked only, {} failed",
        rows.len(),
        exhaustive,
        rows.len() - exhaustive - failures,
        failures
    );
    for shape in SHAPES {
        // Flat ns/node across sizes means linear scaling.
        let per_node: Vec<f64> = rows
            .iter()
            .filter(|r| r.shape == shape && r.nodes >= 1_024)
            .map(Measurement::ns_per_node)
            .collect();
        if per_node.is_empty() {
            continue;
        }
        let lo = per_node.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = per_node.iter().copied().fold(0.0, f64::max);
        let peak = rows
            .iter()
            .filter(|r| r.shape == shape)
            .map(|r| r.rss_delta_kib)
            .max()
            .unwrap_or(0);
        eprintln!(
            "  {:<7} ns/node {:.1}..{:.1}, peak rss delta {} KiB",
            shape.name(),
            lo,
            hi,
            peak
        );
    }
    for r in rows {
        if let Check::Failed(why) = &r.check {
            eprintln!("  FAILED {} n={}: {why}", r.shape.name(), r.nodes);
        }
    }
    failures
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map_or(0, |process| process.memory() / 1024)
}

/// SplitMix64 step; deterministic across runs and platforms.
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Weight in [-5, 5] derived from `salt`.
fn weight(salt: u64) -> i64 {
    (mix(salt) % 11) as i64 - 5
}

fn build_model(shape: TreeShape, n: usize) -> IsingModel {
    let biases = (0..n as u64).map(weight).collect::<Vec<_>>();
    let edges = (1..n)
        .map(|i| ((shape.parent(i), i), weight(0x1_0000_0000 + i as u64)))
        .collect::<Vec<_>>();
    match IsingModel::new(biases, edges) {
        Ok(model) => model,
        Err(err) => {
            eprintln!("scale_probe: generated model rejected: {err}");
            std::process::exit(1);
        }
    }
}
