//! # Rush Hour Solver CLI
//!
//! The command-line launcher described in spec §1 as an external
//! collaborator: it parses a map file, runs one or all five search
//! strategies, and prints the solution plus a statistics table. It
//! contributes no algorithmic substance of its own — adapted from the
//! teacher's `main.rs` subcommand/`comfy-table` layout, generalized from a
//! 2-3 strategy comparison to this crate's five.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use rush_hour_solver::board::Board;
use rush_hour_solver::mapfile;
use rush_hour_solver::search::astar::Astar;
use rush_hour_solver::search::bfs::Bfs;
use rush_hour_solver::search::dfs::{DEFAULT_DEPTH_LIMIT, Dfs};
use rush_hour_solver::search::ids::{DEFAULT_MAX_DEPTH, DEFAULT_TIMEOUT, Ids};
use rush_hour_solver::search::ucs::Ucs;
use rush_hour_solver::stats::{Stats, print_comparison_table, print_run_stats};
use rush_hour_solver::{SolveOutcome, Strategy};

/// Which search strategy (or strategies) to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyKind {
    Bfs,
    Dfs,
    Ids,
    Ucs,
    Astar,
    All,
}

#[derive(Parser)]
#[command(name = "rush_hour", about = "Solve a Rush Hour puzzle from a map file")]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a map file with one strategy, or all five for comparison.
    Solve {
        /// Path to the map file (first line "width,height", then one
        /// "id,x,y,length,orientation" line per vehicle).
        map_file: String,
        /// Which strategy to run.
        #[arg(short, long, value_enum, default_value_t = StrategyKind::Astar)]
        strategy: StrategyKind,
        /// DFS depth limit.
        #[arg(long, default_value_t = DEFAULT_DEPTH_LIMIT)]
        depth_limit: usize,
        /// IDS outer-loop depth ceiling.
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
        /// IDS wall-clock timeout, in seconds.
        #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs_f64())]
        timeout_secs: f64,
        /// Print every intermediate board along the solution path.
        #[arg(long)]
        animate: bool,
    },
}

fn run_one(
    label: &str,
    mut strategy: impl Strategy,
    board: &Board,
    animate: bool,
) -> (SolveOutcome, Stats) {
    log::debug!("running {label}");
    let outcome = strategy.solve(board);
    let stats = strategy.stats().clone();

    match &outcome {
        SolveOutcome::Solved(moves) => {
            println!(
                "{} {label}: solved in {} moves",
                "✓".green(),
                moves.len()
            );
            if animate {
                let mut current = board.clone();
                println!("{current}\n");
                for mv in moves {
                    current = current
                        .apply_move(mv)
                        .expect("search invariant violated: recorded move failed to replay");
                    println!("{mv}\n{current}\n");
                }
            }
        }
        SolveOutcome::NoSolution => {
            println!("{} {label}: no solution found", "✗".red());
        }
    }

    (outcome, stats)
}

fn solve(
    map_file: &str,
    strategy: StrategyKind,
    depth_limit: usize,
    max_depth: usize,
    timeout: Duration,
    animate: bool,
) -> ExitCode {
    let board = match mapfile::load(map_file) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            return ExitCode::FAILURE;
        }
    };

    println!("Initial board:\n{board}\n");

    match strategy {
        StrategyKind::Bfs => {
            let (_, stats) = run_one("BFS", Bfs::new(), &board, animate);
            print_run_stats("BFS", &stats);
        }
        StrategyKind::Dfs => {
            let (_, stats) = run_one("DFS", Dfs::new(depth_limit), &board, animate);
            print_run_stats("DFS", &stats);
        }
        StrategyKind::Ids => {
            let (_, stats) = run_one("IDS", Ids::new(max_depth, timeout), &board, animate);
            print_run_stats("IDS", &stats);
        }
        StrategyKind::Ucs => {
            let (_, stats) = run_one("UCS", Ucs::new(), &board, animate);
            print_run_stats("UCS", &stats);
        }
        StrategyKind::Astar => {
            let (_, stats) = run_one("A*", Astar::new(), &board, animate);
            print_run_stats("A*", &stats);
        }
        StrategyKind::All => {
            let (_, bfs_stats) = run_one("BFS", Bfs::new(), &board, animate);
            let (_, dfs_stats) = run_one("DFS", Dfs::new(depth_limit), &board, animate);
            let (_, ids_stats) = run_one("IDS", Ids::new(max_depth, timeout), &board, animate);
            let (_, ucs_stats) = run_one("UCS", Ucs::new(), &board, animate);
            let (_, astar_stats) = run_one("A*", Astar::new(), &board, animate);

            print_comparison_table(&[
                ("BFS", bfs_stats),
                ("DFS", dfs_stats),
                ("IDS", ids_stats),
                ("UCS", ucs_stats),
                ("A*", astar_stats),
            ]);
        }
    }

    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    env_logger::init();
    let Args { command } = Args::parse();

    match command {
        Commands::Solve {
            map_file,
            strategy,
            depth_limit,
            max_depth,
            timeout_secs,
            animate,
        } => solve(
            &map_file,
            strategy,
            depth_limit,
            max_depth,
            Duration::from_secs_f64(timeout_secs),
            animate,
        ),
    }
}
