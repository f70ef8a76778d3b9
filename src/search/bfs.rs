//! Breadth-first search (§4.3): shortest-in-moves, early goal test on
//! child generation. Grounded directly on
//! `original_source/src/solver/algorithms/bfs.py`.

use std::collections::{HashSet, VecDeque};

use crate::board::Board;
use crate::movedef::Move;
use crate::stats::Stats;

use super::{MemoryProfiler, SolveOutcome, SolverState, Strategy, run_two_pass};

/// Breadth-first search. Guarantees the returned solution has the fewest
/// moves of any solution for the given board.
#[derive(Default)]
pub struct Bfs {
    state: SolverState,
    stats: Option<Stats>,
}

impl Bfs {
    pub fn new() -> Self {
        Self::default()
    }

    fn search_once(board: &Board, profiler: &mut MemoryProfiler) -> (Option<Vec<Move>>, usize) {
        let mut nodes_expanded = 0;
        let mut queue: VecDeque<(Board, Vec<Move>)> = VecDeque::new();
        let mut visited: HashSet<String> = HashSet::new();

        visited.insert(board.state_key());
        queue.push_back((board.clone(), Vec::new()));

        while let Some((current, path)) = queue.pop_front() {
            profiler.tick();
            nodes_expanded += 1;

            if current.is_solved() {
                return (Some(path), nodes_expanded);
            }

            for mv in current.get_possible_moves() {
                let child = current
                    .apply_move(&mv)
                    .expect("search invariant violated: successor board failed to construct");
                let key = child.state_key();

                if visited.contains(&key) {
                    continue;
                }

                if child.is_solved() {
                    let mut solved_path = path.clone();
                    solved_path.push(mv);
                    return (Some(solved_path), nodes_expanded);
                }

                visited.insert(key);
                let mut child_path = path.clone();
                child_path.push(mv);
                queue.push_back((child, child_path));
            }
        }

        (None, nodes_expanded)
    }
}

impl Strategy for Bfs {
    fn solve(&mut self, board: &Board) -> SolveOutcome {
        self.state = SolverState::Running;
        let stats = run_two_pass(|profiler| Self::search_once(board, profiler));
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
