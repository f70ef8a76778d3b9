//! Depth-limited depth-first search (§4.4): iterative stack, globally
//! scoped visited set, successors pushed in reverse so popping yields the
//! board's natural move order. Grounded on
//! `original_source/src/solver/algorithms/dfs.py`.

use std::collections::HashSet;

use crate::board::Board;
use crate::movedef::Move;
use crate::stats::Stats;

use super::{MemoryProfiler, SolveOutcome, SolverState, Strategy, run_two_pass};

/// Default depth limit (§9: 50 and 500 both appear in the source history;
/// 500 is used here and exposed as a parameter).
pub const DEFAULT_DEPTH_LIMIT: usize = 500;

/// Depth-limited iterative DFS. Does not guarantee optimality; returns the
/// first solution reached.
pub struct Dfs {
    depth_limit: usize,
    state: SolverState,
    stats: Option<Stats>,
}

impl Default for Dfs {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH_LIMIT)
    }
}

impl Dfs {
    pub fn new(depth_limit: usize) -> Self {
        Self {
            depth_limit,
            state: SolverState::Idle,
            stats: None,
        }
    }

    fn search_once(
        board: &Board,
        depth_limit: usize,
        profiler: &mut MemoryProfiler,
    ) -> (Option<Vec<Move>>, usize) {
        let mut nodes_expanded = 0;
        let mut visited: HashSet<String> = HashSet::new();
        let mut stack: Vec<(Board, Vec<Move>, usize)> = vec![(board.clone(), Vec::new(), 0)];
        visited.insert(board.state_key());

        while let Some((current, path, depth)) = stack.pop() {
            profiler.tick();
            nodes_expanded += 1;

            if current.is_solved() {
                return (Some(path), nodes_expanded);
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

        (None, nodes_expanded)
    }
}

impl Strategy for Dfs {
    fn solve(&mut self, board: &Board) -> SolveOutcome {
        self.state = SolverState::Running;
        let depth_limit = self.depth_limit;
        let stats = run_two_pass(|profiler| Self::search_once(board, depth_limit, profiler));
        let outcome = match &stats.solution {
            Some(moves) => SolveOutcome::Solved(moves.clone()),
            None => SolveOutcome::NoSolution,
        };
        self.state = if stats.solution.is_some() {
            SolverState::Succeeded
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
        let mut dfs = Dfs::default();
        let outcome = dfs.solve(&board);
        assert_eq!(outcome, SolveOutcome::Solved(vec![]));
        assert_eq!(dfs.stats().nodes_expanded, 1);
    }

    #[test]
    fn soundness_every_returned_move_is_legal_and_reaches_goal() {
        let board = Board::new(
            6,
            6,
            vec![
                v("R", 0, 2, 2, Orientation::Horizontal),
                v("B", 3, 0, 3, Orientation::Vertical),
            ],
        )
        .unwrap();
        let mut dfs = Dfs::default();
        let outcome = dfs.solve(&board);
        let SolveOutcome::Solved(moves) = outcome else {
            panic!("expected a solution");
        };
        let result = board.apply_moves(&moves).unwrap();
        assert!(result.is_solved());
    }

    #[test]
    fn depth_limit_of_zero_only_admits_an_already_solved_start() {
        let board = Board::new(6, 6, vec![v("R", 0, 2, 2, Orientation::Horizontal)]).unwrap();
        let mut dfs = Dfs::new(0);
        let outcome = dfs.solve(&board);
        assert_eq!(outcome, SolveOutcome::NoSolution);
    }
}
