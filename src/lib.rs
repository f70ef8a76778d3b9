//! # Rush Hour Solver
//!
//! A solver for the Rush Hour sliding-block puzzle: a rectangular grid of
//! axis-aligned vehicles that slide along their long axis without
//! rotating, where the goal is to drive the target vehicle off the right
//! edge. Five search strategies are available — breadth-first, depth-limited
//! depth-first, iterative deepening, uniform-cost, and A* with a recursive
//! blocker heuristic — each reporting wall time, peak memory, nodes
//! expanded and the solution found (see `search::Strategy`).
//!
//! The core data model lives in `board`, `vehicle` and `movedef`; the
//! search strategies live under `search`; the A* heuristic lives in
//! `heuristic`; map-file parsing (an external-loader concern, not core
//! algorithmic substance) lives in `mapfile`.

pub mod board;
pub mod error;
pub mod heuristic;
pub mod mapfile;
pub mod movedef;
pub mod search;
pub mod stats;
pub mod vehicle;

pub use board::Board;
pub use movedef::Move;
pub use search::{SolveOutcome, SolverState, Strategy};
pub use stats::Stats;
pub use vehicle::{Orientation, Vehicle};
