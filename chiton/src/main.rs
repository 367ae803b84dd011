//! Chiton command-line solver.
//!
//! Run: cargo run -- input.txt

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use chiton_lib::{DEFAULT_FACTOR, report, solve};

/// Lowest total risk through a cave of digit costs.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Input file: one row of digits per line
    input: PathBuf,

    /// Tiling factor for the full cave (part 2)
    #[arg(short, long, default_value_t = DEFAULT_FACTOR)]
    factor: usize,

    /// Draw the part 1 route under the answers
    #[arg(long)]
    show_path: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let input = std::fs::read_to_string(&args.input)
        .map_err(|e| format!("reading {}: {e}", args.input.display()))?;
    log::info!("solving {}", args.input.display());
    let solution = solve(&input, args.factor)?;
    println!("{}", report(&solution, args.show_path));
    Ok(())
}
