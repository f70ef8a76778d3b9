//! Uniform-cost search (§4.6): Dijkstra-style search with move cost
//! `vehicle.length * |displacement|`, lazy stale-entry dismissal instead of
//! decrease-key, and parent-pointer path reconstruction. Grounded on
//! `original_source/src/solver/algorithms/ucs.py`.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::board::Board;
use crate::movedef::Move;
use crate::stats::Stats;

use super::{MemoryProfiler, SolveOutcome, SolverState, Strategy, reconstruct_path, run_two_pass};

/// A frontier entry ordered by `(cost, counter)` — a `BinaryHeap` is a
/// max-heap, so this type's `Ord` is reversed to make the heap pop the
/// cheapest, earliest-inserted entry first.
struct HeapEntry {
    cost: u64,
    counter: u64,
    board: Board,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.counter == other.counter
    }
}
impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.counter.cmp(&self.counter))
    }
}
impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn move_cost(board: &Board, mv: &Move) -> u64 {
    let vehicle = board
        .vehicle(&mv.vehicle_id)
        .expect("search invariant violated: move references unknown vehicle id");
    vehicle.length as u64 * mv.amount.unsigned_abs() as u64
}

/// Uniform-cost search. Guarantees the returned solution minimizes
/// cumulative `length * |displacement|` cost over all solutions.
#[derive(Default)]
pub struct Ucs {
    state: SolverState,
    stats: Option<Stats>,
}

impl Ucs {
    pub fn new() -> Self {
        Self::default()
    }

    fn search_once(board: &Board, profiler: &mut MemoryProfiler) -> (Option<Vec<Move>>, usize) {
        let mut nodes_expanded = 0;
        let start_key = board.state_key();

        let mut counter: u64 = 0;
        let mut frontier = BinaryHeap::new();
        frontier.push(HeapEntry {
            cost: 0,
            counter,
            board: board.clone(),
        });

        let mut best_known: HashMap<String, u64> = HashMap::from([(start_key.clone(), 0)]);
        let mut came_from: HashMap<String, (Option<String>, Option<Move>)> =
            HashMap::from([(start_key, (None, None))]);

        while let Some(HeapEntry { cost, board: current, .. }) = frontier.pop() {
            let current_key = current.state_key();
            if cost > *best_known.get(&current_key).unwrap_or(&u64::MAX) {
                continue;
            }

            profiler.tick();
            nodes_expanded += 1;

            if current.is_solved() {
                return (Some(reconstruct_path(&came_from, &current_key)), nodes_expanded);
            }

            for mv in current.get_possible_moves() {
                let child = current
                    .apply_move(&mv)
                    .expect("search invariant violated: successor board failed to construct");
                let child_key = child.state_key();
                let new_cost = cost + move_cost(&current, &mv);

                let better = match best_known.get(&child_key) {
                    Some(&known) => new_cost < known,
                    None => true,
                };
                if better {
                    best_known.insert(child_key.clone(), new_cost);
                    came_from.insert(child_key.clone(), (Some(current_key.clone()), Some(mv)));
                    counter += 1;
                    frontier.push(HeapEntry {
                        cost: new_cost,
                        counter,
                        board: child,
                    });
                }
            }
        }

        (None, nodes_expanded)
    }
}

impl Strategy for Ucs {
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

/// The cumulative cost of a move sequence, used by tests to assert UCS
/// optimality without duplicating the cost formula.
pub fn path_cost(board: &Board, moves: &[Move]) -> u64 {
    let mut current = board.clone();
    let mut total = 0;
    for mv in moves {
        total += move_cost(&current, mv);
        current = current.apply_move(mv).unwrap();
    }
    total
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
        let mut ucs = Ucs::new();
        let outcome = ucs.solve(&board);
        assert_eq!(outcome, SolveOutcome::Solved(vec![]));
        assert_eq!(ucs.stats().nodes_expanded, 1);
    }

    #[test]
    fn one_move_solve_cost_matches_length_times_displacement() {
        let board = Board::new(6, 6, vec![v("R", 0, 2, 2, Orientation::Horizontal)]).unwrap();
        let mut ucs = Ucs::new();
        let moves = ucs.solve(&board).into_moves().unwrap();
        assert_eq!(path_cost(&board, &moves), 8);
    }

    #[test]
    fn one_blocker_scenario_cost_is_minimal() {
        // B must clear row 2 entirely (shift down by its own length minus
        // the one row it already shares with the target, i.e. by 3) before
        // R can cross; no cheaper legal path exists.
        let board = Board::new(
            6,
            6,
            vec![
                v("R", 0, 2, 2, Orientation::Horizontal),
                v("B", 3, 0, 3, Orientation::Vertical),
            ],
        )
        .unwrap();
        let mut ucs = Ucs::new();
        let moves = ucs.solve(&board).into_moves().unwrap();
        assert_eq!(path_cost(&board, &moves), 3 * 3 + 2 * 4);
    }
}
