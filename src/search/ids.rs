//! Iterative deepening search (§4.5): an outer loop over depth-limited
//! DFS, each iteration scoped with its own fresh visited set (a global set
//! across iterations would incorrectly prune states only reachable via
//! over-long paths found earlier). Grounded on
//! `original_source/src/solver/algorithms/ids.py`, with the wall-clock
//! deadline added per spec §4.5/§6 (the original has no timeout).

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::board::Board;
use crate::movedef::Move;
use crate::stats::Stats;

use super::{MemoryProfiler, SolveOutcome, SolverState, Strategy, run_two_pass};

/// How many inner-loop node expansions pass between deadline checks
/// (negligible overhead per check per §4.5).
const DEADLINE_SAMPLE_INTERVAL: usize = 1000;

/// Default outer-loop depth ceiling.
pub const DEFAULT_MAX_DEPTH: usize = 500;

/// Default wall-clock deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Iterative deepening search. Guarantees shortest-in-moves if permitted
/// to complete; the only strategy with a built-in timeout.
pub struct Ids {
    max_depth: usize,
    timeout: Duration,
    state: SolverState,
    stats: Option<Stats>,
    timed_out: bool,
}

impl Default for Ids {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH, DEFAULT_TIMEOUT)
    }
}

impl Ids {
    pub fn new(max_depth: usize, timeout: Duration) -> Self {
        Self {
            max_depth,
            timeout,
            state: SolverState::Idle,
            stats: None,
            timed_out: false,
        }
    }

    fn search_once(
        board: &Board,
        max_depth: usize,
        timeout: Duration,
        profiler: &mut MemoryProfiler,
    ) -> (Option<Vec<Move>>, usize, bool) {
        let deadline = Instant::now() + timeout;
        let mut nodes_expanded = 0;
        let mut timed_out = false;

        'outer: for depth_limit in 0..=max_depth {
            if Instant::now() >= deadline {
                timed_out = true;
                break;
            }

            let mut visited: HashSet<String> = HashSet::new();
            let mut stack: Vec<(Board, Vec<Move>, usize)> = vec![(board.clone(), Vec::new(), 0)];
            visited.insert(board.state_key());

            while let Some((current, path, depth)) = stack.pop() {
                profiler.tick();
                nodes_expanded += 1;

                if nodes_expanded % DEADLINE_SAMPLE_INTERVAL == 0 && Instant::now() >= deadline {
                    timed_out = true;
                    break 'outer;
                }

                if current.is_solved() {
                    return (Some(path), nodes_expanded, false);
                }

                if depth >= depth_limit {
                    continue;
                }

                for mv in current.get_possible_moves().into_iter().rev() {
                    let child = current
                        .apply_move(&mv)
                        .expect("search invariant violated: successor board failed to construct");
                    let key = child.state_key();
                    if visited.insert(key) {
                        let mut child_path = path.clone();
                        child_path.push(mv);
                        stack.push((child, child_path, depth + 1));
                    }
                }
            }
        }

        (None, nodes_expanded, timed_out)
    }
}

impl Strategy for Ids {
    fn solve(&mut self, board: &Board) -> SolveOutcome {
        self.state = SolverState::Running;
        let max_depth = self.max_depth;
        let timeout = self.timeout;
        let mut timed_out_flag = false;

        let stats = run_two_pass(|profiler| {
            let (solution, nodes, timed_out) = Self::search_once(board, max_depth, timeout, profiler);
            timed_out_flag = timed_out;
            (solution, nodes)
        });

        self.timed_out = timed_out_flag;
        let outcome = match &stats.solution {
            Some(moves) => SolveOutcome::Solved(moves.clone()),
            None => SolveOutcome::NoSolution,
        };
        self.state = if stats.solution.is_some() {
            SolverState::Succeeded
        } else if self.timed_out {
            SolverState::TimedOut
        } else {
            SolverState::Exhausted
        };
        self.stats = Some(stats);
        outcome
    }

    fn stats(&self) -> &Stats {
        self.stats
            .as_ref()
            .expect("stats read before solve() reached a terminal state")
    }

    fn state(&self) -> SolverState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::{Orientation, Vehicle};

    fn v(id: &str, x: u32, y: u32, len: u32, o: Orientation) -> Vehicle {
        Vehicle::new(id, x, y, len, o)
    }

    #[test]
    fn trivial_already_solved_board() {
        let board = Board::new(6, 6, vec![v("R", 4, 2, 2, Orientation::Horizontal)]).unwrap();
        let mut ids = Ids::default();
        let outcome = ids.solve(&board);
        assert_eq!(outcome, SolveOutcome::Solved(vec![]));
        assert_eq!(ids.stats().nodes_expanded, 1);
    }

    #[test]
    fn matches_bfs_move_count_when_unbounded() {
        use crate::search::bfs::Bfs;

        let board = Board::new(
            6,
            6,
            vec![
                v("R", 0, 2, 2, Orientation::Horizontal),
                v("B", 3, 0, 3, Orientation::Vertical),
            ],
        )
        .unwrap();

        let mut bfs = Bfs::new();
        let bfs_moves = bfs.solve(&board).into_moves().unwrap();

        let mut ids = Ids::default();
        let ids_moves = ids.solve(&board).into_moves().unwrap();

        assert_eq!(bfs_moves.len(), ids_moves.len());
    }

    #[test]
    fn near_zero_timeout_reports_no_solution() {
        let board = Board::new(
            6,
            6,
            vec![
                v("R", 0, 2, 2, Orientation::Horizontal),
                v("B", 3, 0, 3, Orientation::Vertical),
            ],
        )
        .unwrap();
        let mut ids = Ids::new(DEFAULT_MAX_DEPTH, Duration::from_nanos(1));
        let outcome = ids.solve(&board);
        assert_eq!(outcome, SolveOutcome::NoSolution);
        assert_eq!(ids.state(), SolverState::TimedOut);
    }
}
