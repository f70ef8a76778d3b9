//! # Heuristic Module
//!
//! The recursive blocker heuristic used by A* (spec §4.8): an iterative
//! worklist (not literal recursion) that estimates the residual cost to
//! clear the target vehicle's row and drive it to the exit. This is an
//! enrichment over the flat one-level blocker sum found in the original
//! Python `astar.py` — it additionally chases perpendicular blockers
//! recursively and detects boxed-in deadlocks.
//!
//! Admissibility is not proven for this heuristic (see the crate's design
//! notes); the `INFEASIBLE` prune for a vehicle genuinely boxed in by two
//! other vehicles is sound, since such a vehicle truly cannot move without
//! first moving whichever pins it.

use std::collections::{HashSet, VecDeque};

use crate::board::Board;
use crate::vehicle::{Orientation, Vehicle};

/// Sentinel for "this branch cannot be cleared" (a perpendicular blocker is
/// boxed in on both sides). Finite so it fits in the same `u32` cost
/// arithmetic as every other part of the search, but large enough to never
/// be mistaken for a real cost.
pub const INFEASIBLE: u32 = u32::MAX;

/// Estimates the remaining cost to solve `board`, per spec §4.8.
///
/// Returns `0` if already solved, `INFEASIBLE` if a perpendicular blocker
/// is deadlocked, otherwise a finite non-negative estimate.
pub fn blocker_heuristic(board: &Board) -> u32 {
    if board.is_solved() {
        return 0;
    }

    let target = board.target();
    let mut processed: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();
    let mut total: u64 = 0;

    // Seed with every vehicle occupying the target's row to its right.
    for x in target.far_edge()..board.width {
        if let Some(v) = board.occupant_at(x, target.y) {
            if v.id != target.id && processed.insert(v.id.clone()) {
                queue.push_back(v.id.clone());
            }
        }
    }

    while let Some(vehicle_id) = queue.pop_front() {
        let v = board
            .vehicle(&vehicle_id)
            .expect("heuristic invariant: a tracked vehicle id vanished from the board");
        total += v.length as u64;

        // Classic Rush Hour boards have a horizontal target; a blocker
        // sharing its row is perpendicular exactly when it is vertical.
        // The parallel-blocker branch (a horizontal blocker in the
        // target's row) is left unimplemented, matching the original
        // design's simplified scope.
        if v.orientation == Orientation::Vertical {
            match escape_directions(board, v) {
                None => return INFEASIBLE,
                Some(blockers) => {
                    for blocker_id in blockers {
                        if processed.insert(blocker_id.clone()) {
                            queue.push_back(blocker_id);
                        }
                    }
                }
            }
        }
    }

    let remaining = (board.width - target.far_edge()) as u64;
    total += target.length as u64 * remaining;

    if total >= INFEASIBLE as u64 {
        INFEASIBLE
    } else {
        total as u32
    }
}

/// Determines the ids of vehicles `v` would need to displace to escape its
/// row perpendicular to the target, preferring whichever direction needs
/// fewer of them. Returns `None` when `v` is boxed in on both sides with
/// no free adjacent cell (a sound deadlock prune).
fn escape_directions(board: &Board, v: &Vehicle) -> Option<Vec<String>> {
    let top = v.y;
    let bottom = v.y + v.length - 1;

    let up_in_bounds = top > 0;
    let up_occupant = if up_in_bounds {
        board.occupant_at(v.x, top - 1)
    } else {
        None
    };
    let up_free = up_in_bounds && up_occupant.is_none();

    let down_in_bounds = bottom + 1 < board.height;
    let down_occupant = if down_in_bounds {
        board.occupant_at(v.x, bottom + 1)
    } else {
        None
    };
    let down_free = down_in_bounds && down_occupant.is_none();

    if up_in_bounds && down_in_bounds && !up_free && !down_free {
        return None;
    }

    let blockers_for = |occ: Option<&Vehicle>, free: bool| -> Vec<String> {
        if free { Vec::new() } else { occ.map(|b| vec![b.id.clone()]).unwrap_or_default() }
    };
    let up_blockers = if up_in_bounds { blockers_for(up_occupant, up_free) } else { Vec::new() };
    let down_blockers = if down_in_bounds { blockers_for(down_occupant, down_free) } else { Vec::new() };

    match (up_in_bounds, down_in_bounds) {
        (true, true) => {
            if up_blockers.len() <= down_blockers.len() {
                Some(up_blockers)
            } else {
                Some(down_blockers)
            }
        }
        (true, false) => Some(up_blockers),
        (false, true) => Some(down_blockers),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::vehicle::Vehicle;

    fn v(id: &str, x: u32, y: u32, len: u32, o: Orientation) -> Vehicle {
        Vehicle::new(id, x, y, len, o)
    }

    #[test]
    fn zero_on_solved_board() {
        let b = Board::new(6, 6, vec![v("R", 4, 2, 2, Orientation::Horizontal)]).unwrap();
        assert_eq!(blocker_heuristic(&b), 0);
    }

    #[test]
    fn matches_the_spec_worked_example() {
        // 6x6, R at (0,2,2,H); B at (3,0,3,V) blocks row 2. Per spec §8
        // scenario 3, h on the start board is 11.
        let b = Board::new(
            6,
            6,
            vec![
                v("R", 0, 2, 2, Orientation::Horizontal),
                v("B", 3, 0, 3, Orientation::Vertical),
            ],
        )
        .unwrap();
        assert_eq!(blocker_heuristic(&b), 11);
    }

    #[test]
    fn no_blockers_is_just_target_traversal_cost() {
        let b = Board::new(6, 6, vec![v("R", 0, 2, 2, Orientation::Horizontal)]).unwrap();
        assert_eq!(blocker_heuristic(&b), 2 * 4);
    }

    #[test]
    fn boxed_in_perpendicular_blocker_is_infeasible() {
        // B is vertical, length 1, sandwiched between A above and C below
        // with no free adjacent row — a genuine deadlock.
        let b = Board::new(
            6,
            3,
            vec![
                v("R", 0, 1, 2, Orientation::Horizontal),
                v("B", 3, 1, 1, Orientation::Vertical),
                v("A", 3, 0, 1, Orientation::Horizontal),
                v("C", 3, 2, 1, Orientation::Horizontal),
            ],
        )
        .unwrap();
        assert_eq!(blocker_heuristic(&b), INFEASIBLE);
    }

    #[test]
    fn finite_when_every_blocker_has_a_free_adjacent_row() {
        let b = Board::new(
            6,
            6,
            vec![
                v("R", 0, 2, 2, Orientation::Horizontal),
                v("B", 3, 0, 3, Orientation::Vertical),
            ],
        )
        .unwrap();
        let h = blocker_heuristic(&b);
        assert!(h < INFEASIBLE);
    }
}
