//! A* search (§4.7): UCS plus the recursive blocker heuristic from the
//! `heuristic` module. Structurally identical to UCS — same lazy
//! stale-entry dismissal, same tie-breaking counter, same parent-pointer
//! reconstruction — except the priority key is `f = g + h`.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::board::Board;
use crate::heuristic::{INFEASIBLE, blocker_heuristic};
use crate::movedef::Move;
use crate::stats::Stats;

use super::{MemoryProfiler, SolveOutcome, SolverState, Strategy, reconstruct_path, run_two_pass};

struct HeapEntry {
    f_cost: u64,
    g_cost: u64,
    counter: u64,
    board: Board,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.counter == other.counter
    }
}
impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_cost
            .cmp(&self.f_cost)
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

fn heuristic_cost(board: &Board, enabled: bool) -> u64 {
    if !enabled {
        return 0;
    }
    match blocker_heuristic(board) {
        INFEASIBLE => u64::from(INFEASIBLE),
        h => h as u64,
    }
}

/// A* search. With the heuristic enabled, uses the recursive blocker
/// estimate from `heuristic::blocker_heuristic`; with it disabled (see
/// `Astar::without_heuristic`), reduces exactly to UCS — used to verify
/// the "A* with h ≡ 0 equals UCS" testable property in §8.
pub struct Astar {
    heuristic_enabled: bool,
    state: SolverState,
    stats: Option<Stats>,
}

impl Default for Astar {
    fn default() -> Self {
        Self::new()
    }
}

impl Astar {
    pub fn new() -> Self {
        Self {
            heuristic_enabled: true,
            state: SolverState::Idle,
            stats: None,
        }
    }

    /// Constructs an A* instance with the heuristic forced to zero,
    /// matching UCS for testing purposes (§4.7, §8).
    pub fn without_heuristic() -> Self {
        Self {
            heuristic_enabled: false,
            state: SolverState::Idle,
            stats: None,
        }
    }

    fn search_once(
        board: &Board,
        heuristic_enabled: bool,
        profiler: &mut MemoryProfiler,
    ) -> (Option<Vec<Move>>, usize) {
        let mut nodes_expanded = 0;
        let start_key = board.state_key();

        let mut counter: u64 = 0;
        let initial_h = heuristic_cost(board, heuristic_enabled);
        let mut frontier = BinaryHeap::new();
        frontier.push(HeapEntry {
            f_cost: initial_h,
            g_cost: 0,
            counter,
            board: board.clone(),
        });

        let mut g_cost_so_far: HashMap<String, u64> = HashMap::from([(start_key.clone(), 0)]);
        let mut came_from: HashMap<String, (Option<String>, Option<Move>)> =
            HashMap::from([(start_key, (None, None))]);

        while let Some(HeapEntry { g_cost, board: current, .. }) = frontier.pop() {
            let current_key = current.state_key();
            if g_cost > *g_cost_so_far.get(&current_key).unwrap_or(&u64::MAX) {
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
                let new_g = g_cost + move_cost(&current, &mv);

                let better = match g_cost_so_far.get(&child_key) {
                    Some(&known) => new_g < known,
                    None => true,
                };
                if better {
                    g_cost_so_far.insert(child_key.clone(), new_g);
                    came_from.insert(child_key.clone(), (Some(current_key.clone()), Some(mv)));

                    let h = heuristic_cost(&child, heuristic_enabled);
                    let f = new_g.saturating_add(h);
                    counter += 1;
                    frontier.push(HeapEntry {
                        f_cost: f,
                        g_cost: new_g,
                        counter,
                        board: child,
                    });
                }
            }
        }

        (None, nodes_expanded)
    }
}

impl Strategy for Astar {
    fn solve(&mut self, board: &Board) -> SolveOutcome {
        self.state = SolverState::Running;
        let heuristic_enabled = self.heuristic_enabled;
        let stats = run_two_pass(|profiler| Self::search_once(board, heuristic_enabled, profiler));
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
    use crate::search::ucs::{Ucs, path_cost};
    use crate::vehicle::{Orientation, Vehicle};

    fn v(id: &str, x: u32, y: u32, len: u32, o: Orientation) -> Vehicle {
        Vehicle::new(id, x, y, len, o)
    }

    fn one_blocker_board() -> Board {
        Board::new(
            6,
            6,
            vec![
                v("R", 0, 2, 2, Orientation::Horizontal),
                v("B", 3, 0, 3, Orientation::Vertical),
            ],
        )
        .unwrap()
    }

    #[test]
    fn trivial_already_solved_board() {
        let board = Board::new(6, 6, vec![v("R", 4, 2, 2, Orientation::Horizontal)]).unwrap();
        let mut astar = Astar::new();
        let outcome = astar.solve(&board);
        assert_eq!(outcome, SolveOutcome::Solved(vec![]));
        assert_eq!(astar.stats().nodes_expanded, 1);
    }

    #[test]
    fn zero_heuristic_matches_ucs_cost() {
        let board = one_blocker_board();

        let mut astar = Astar::without_heuristic();
        let astar_moves = astar.solve(&board).into_moves().unwrap();

        let mut ucs = Ucs::new();
        let ucs_moves = ucs.solve(&board).into_moves().unwrap();

        assert_eq!(path_cost(&board, &astar_moves), path_cost(&board, &ucs_moves));
    }

    #[test]
    fn heuristic_enabled_still_finds_optimal_cost() {
        let board = one_blocker_board();

        let mut astar = Astar::new();
        let astar_moves = astar.solve(&board).into_moves().unwrap();

        let mut ucs = Ucs::new();
        let ucs_moves = ucs.solve(&board).into_moves().unwrap();

        assert_eq!(path_cost(&board, &astar_moves), path_cost(&board, &ucs_moves));
    }
}
