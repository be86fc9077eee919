use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use hawk_tablebase::core::position::{Position, Side};
use hawk_tablebase::core::square::Square;
use hawk_tablebase::search::solver::{SolveOptions, Solver};
use hawk_tablebase::store::dir::DirStore;
use hawk_tablebase::store::CollectionId;
use hawk_tablebase::tablebase::{Tablebase, Verdict};
use hawk_tablebase::Result;

/// King + Hawk vs King retrograde tablebase.
#[derive(Debug, Parser)]
#[command(name = "khk", version)]
struct Cli {
    /// Store directory
    #[arg(long, global = true, default_value = "khk-tb")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Enumerate all positions and publish depth 0 plus the undecided set
    Init,
    /// Run the pass for one depth (odd: White, even: Black)
    Pass { depth: u32 },
    /// Run the next pass
    Next,
    /// Run passes until one classifies nothing
    Solve {
        #[arg(long)]
        max_depth: Option<u32>,
    },
    /// Print per-collection counts
    Stats,
    /// Look up a position, e.g. `probe a1 c1 b3 black`
    Probe {
        white_king: Square,
        black_king: Square,
        hawk: Square,
        #[arg(value_enum)]
        to_move: SideArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SideArg {
    White,
    Black,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Side {
        match side {
            SideArg::White => Side::White,
            SideArg::Black => Side::Black,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("khk: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let store = DirStore::open(&cli.dir)?;
    let mut solver = Solver::new(store);

    match cli.command {
        Command::Init => {
            let report = solver.initialize()?;
            println!("depth-0: {} mates", report.classified);
            println!("undecided: {}", report.remaining);
        }
        Command::Pass { depth } => {
            let report = solver.run_pass(depth)?;
            println!(
                "depth-{}: {} positions ({:?} to move), {} undecided",
                report.depth, report.classified, report.mover, report.remaining
            );
        }
        Command::Next => {
            let depth = solver.next_depth();
            let report = if depth == 0 {
                solver.initialize()?
            } else {
                solver.run_pass(depth)?
            };
            println!(
                "depth-{}: {} positions, {} undecided",
                report.depth, report.classified, report.remaining
            );
        }
        Command::Solve { max_depth } => {
            let summary = solver.solve(SolveOptions { max_depth })?;
            for (d, n) in summary.depth_counts.iter().enumerate() {
                println!("depth-{d}: {n}");
            }
            println!("undecided: {}", summary.undecided);
            if summary.fixed_point {
                match summary.longest_win() {
                    Some(plies) => println!("fixed point reached; longest win {plies} plies"),
                    None => println!("fixed point reached"),
                }
            } else {
                println!("stopped before the fixed point");
            }
        }
        Command::Stats => {
            let store = solver.store();
            let manifest = store.manifest();
            println!("store: {}", store.root().display());
            println!("generation: {}", manifest.generation);
            for entry in &manifest.collections {
                println!("{}: {} ({})", entry.id, entry.records, entry.file);
            }
            let summary = solver.summary()?;
            if summary.fixed_point {
                println!("solved; {} draws", summary.undecided);
            } else if !solver.is_initialized() {
                println!("not initialized");
            } else {
                println!("next depth: {}", solver.next_depth());
            }
        }
        Command::Probe {
            white_king,
            black_king,
            hawk,
            to_move,
        } => {
            let position = Position::new(white_king, black_king, hawk, to_move.into())?;
            let tablebase = Tablebase::load(solver.store())?;
            match tablebase.probe(position)? {
                Verdict::Win { plies } => println!("{position}: White wins in {plies} plies"),
                Verdict::Draw => println!("{position}: draw"),
                Verdict::Unknown => println!(
                    "{position}: undecided so far ({} not reached yet)",
                    CollectionId::Depth(solver.next_depth())
                ),
            }
        }
    }
    Ok(())
}
