//! # Board Module
//!
//! The puzzle's immutable grid state: validation, successor generation,
//! move application, goal test and canonical state-key production. This is
//! the component the rest of the crate is built around — every search
//! strategy only ever touches a `Board` through the methods here.

use std::fmt;

use crate::error::BoardError;
use crate::movedef::Move;
use crate::vehicle::{Orientation, Vehicle};

/// An immutable `width x height` grid populated by `vehicles`. The first
/// vehicle in the list is always the target — conventionally id `"R"` —
/// and the exit is always the right edge of the grid at the target's row.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    pub width: u32,
    pub height: u32,
    pub vehicles: Vec<Vehicle>,
}

impl Board {
    /// Builds a board, validating the three invariants from the data
    /// model: positive dimensions, every vehicle in bounds, no overlaps.
    pub fn new(width: u32, height: u32, vehicles: Vec<Vehicle>) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::NonPositiveDimension { width, height });
        }
        let board = Board {
            width,
            height,
            vehicles,
        };
        board.validate()?;
        Ok(board)
    }

    fn validate(&self) -> Result<(), BoardError> {
        let mut occupied: Vec<Vec<Option<&str>>> = vec![vec![None; self.width as usize]; self.height as usize];

        for vehicle in &self.vehicles {
            match vehicle.orientation {
                Orientation::Horizontal => {
                    if vehicle.x + vehicle.length > self.width || vehicle.y >= self.height {
                        return Err(BoardError::OutOfBounds {
                            vehicle_id: vehicle.id.clone(),
                        });
                    }
                }
                Orientation::Vertical => {
                    if vehicle.y + vehicle.length > self.height || vehicle.x >= self.width {
                        return Err(BoardError::OutOfBounds {
                            vehicle_id: vehicle.id.clone(),
                        });
                    }
                }
            }

            for (x, y) in vehicle.cells() {
                let cell = &mut occupied[y as usize][x as usize];
                if cell.is_some() {
                    return Err(BoardError::Overlap {
                        vehicle_id: vehicle.id.clone(),
                        x,
                        y,
                    });
                }
                *cell = Some(vehicle.id.as_str());
            }
        }
        Ok(())
    }

    /// The target vehicle — always the first entry in the vehicle list.
    pub fn target(&self) -> &Vehicle {
        &self.vehicles[0]
    }

    /// Looks up a vehicle by id.
    pub fn vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// The puzzle is solved once the target's far edge has reached or
    /// passed the right edge of the grid.
    pub fn is_solved(&self) -> bool {
        self.target().far_edge() >= self.width
    }

    /// Maps each occupied cell to the index of its occupying vehicle.
    fn occupancy(&self) -> Vec<Vec<Option<usize>>> {
        let mut grid = vec![vec![None; self.width as usize]; self.height as usize];
        for (idx, vehicle) in self.vehicles.iter().enumerate() {
            for (x, y) in vehicle.cells() {
                grid[y as usize][x as usize] = Some(idx);
            }
        }
        grid
    }

    /// The vehicle occupying `(x, y)`, if any.
    pub fn occupant_at(&self, x: u32, y: u32) -> Option<&Vehicle> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.occupancy()[y as usize][x as usize].map(|idx| &self.vehicles[idx])
    }

    /// Enumerates every legal move in the deterministic order described by
    /// the data model: vehicles in list order; for each vehicle, the
    /// forward direction (+x for horizontal, +y for vertical) from
    /// magnitude 1 upward, then the reverse direction from magnitude 1
    /// upward. Scanning stops at the first obstruction or board edge.
    pub fn get_possible_moves(&self) -> Vec<Move> {
        let grid = self.occupancy();
        let mut moves = Vec::new();

        for vehicle in &self.vehicles {
            match vehicle.orientation {
                Orientation::Horizontal => {
                    for i in 1.. {
                        let x = vehicle.x + vehicle.length - 1 + i;
                        if x >= self.width || grid[vehicle.y as usize][x as usize].is_some() {
                            break;
                        }
                        moves.push(Move::new(vehicle.id.clone(), i as i32));
                    }
                    for i in 1.. {
                        if i > vehicle.x {
                            break;
                        }
                        let x = vehicle.x - i;
                        if grid[vehicle.y as usize][x as usize].is_some() {
                            break;
                        }
                        moves.push(Move::new(vehicle.id.clone(), -(i as i32)));
                    }
                }
                Orientation::Vertical => {
                    for i in 1.. {
                        let y = vehicle.y + vehicle.length - 1 + i;
                        if y >= self.height || grid[y as usize][vehicle.x as usize].is_some() {
                            break;
                        }
                        moves.push(Move::new(vehicle.id.clone(), i as i32));
                    }
                    for i in 1.. {
                        if i > vehicle.y {
                            break;
                        }
                        let y = vehicle.y - i;
                        if grid[y as usize][vehicle.x as usize].is_some() {
                            break;
                        }
                        moves.push(Move::new(vehicle.id.clone(), -(i as i32)));
                    }
                }
            }
        }

        moves
    }

    /// Applies a single move, producing a new, re-validated board.
    ///
    /// # Panics behavior for callers
    ///
    /// A move produced by `get_possible_moves` is guaranteed legal; a
    /// `BoardError` here for such a move indicates a search-internal
    /// invariant violation (a programmer error, per the error-handling
    /// design) and callers in this crate treat it as fatal rather than
    /// propagate it further.
    pub fn apply_move(&self, mv: &Move) -> Result<Board, BoardError> {
        let mut vehicles = self.vehicles.clone();
        let mut found = false;
        for vehicle in &mut vehicles {
            if vehicle.id == mv.vehicle_id {
                *vehicle = vehicle.shifted(mv.amount);
                found = true;
                break;
            }
        }
        if !found {
            panic!(
                "search invariant violated: move references unknown vehicle id {:?}",
                mv.vehicle_id
            );
        }
        Board::new(self.width, self.height, vehicles)
    }

    /// Applies a sequence of moves in order, short-circuiting on the first
    /// failure.
    pub fn apply_moves(&self, moves: &[Move]) -> Result<Board, BoardError> {
        let mut board = self.clone();
        for mv in moves {
            board = board.apply_move(mv)?;
        }
        Ok(board)
    }

    /// The canonical textual grid used as the visited-set key: `.` for
    /// empty, a vehicle's id (first byte) for occupied cells, rows joined
    /// by newlines. Two boards sharing the same occupancy share a key
    /// irrespective of vehicle-list order.
    pub fn state_key(&self) -> String {
        let grid = self.occupancy();
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for (row_idx, row) in grid.iter().enumerate() {
            if row_idx > 0 {
                out.push('\n');
            }
            for cell in row {
                match cell {
                    Some(idx) => out.push(
                        self.vehicles[*idx]
                            .id
                            .chars()
                            .next()
                            .unwrap_or('?'),
                    ),
                    None => out.push('.'),
                }
            }
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(id: &str, x: u32, y: u32, len: u32, o: Orientation) -> Vehicle {
        Vehicle::new(id, x, y, len, o)
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        let err = Board::new(0, 3, vec![]).unwrap_err();
        assert!(matches!(err, BoardError::NonPositiveDimension { .. }));
    }

    #[test]
    fn rejects_out_of_bounds_vehicle() {
        let err = Board::new(3, 3, vec![v("R", 2, 0, 2, Orientation::Horizontal)]).unwrap_err();
        assert!(matches!(err, BoardError::OutOfBounds { .. }));
    }

    #[test]
    fn rejects_overlapping_vehicles() {
        let vs = vec![
            v("R", 0, 0, 2, Orientation::Horizontal),
            v("B", 1, 0, 2, Orientation::Vertical),
        ];
        let err = Board::new(3, 3, vs).unwrap_err();
        assert!(matches!(err, BoardError::Overlap { .. }));
    }

    #[test]
    fn is_solved_checks_target_far_edge() {
        let b = Board::new(6, 6, vec![v("R", 4, 2, 2, Orientation::Horizontal)]).unwrap();
        assert!(b.is_solved());
        let b = Board::new(6, 6, vec![v("R", 0, 2, 2, Orientation::Horizontal)]).unwrap();
        assert!(!b.is_solved());
    }

    #[test]
    fn possible_moves_empty_when_fully_boxed_in() {
        // A single vehicle spanning the whole row/column has no room to move.
        let b = Board::new(1, 1, vec![v("R", 0, 0, 1, Orientation::Horizontal)]).unwrap();
        assert!(b.get_possible_moves().is_empty());
    }

    #[test]
    fn possible_moves_ordering_is_forward_then_reverse() {
        let b = Board::new(6, 6, vec![v("R", 2, 2, 2, Orientation::Horizontal)]).unwrap();
        let moves: Vec<i32> = b.get_possible_moves().into_iter().map(|m| m.amount).collect();
        // forward: +1, +2 (to edge at x=5 => width-far_edge = 6-4=2); reverse: -1, -2
        assert_eq!(moves, vec![1, 2, -1, -2]);
    }

    #[test]
    fn apply_move_then_inverse_is_identity() {
        let b = Board::new(6, 6, vec![v("R", 0, 2, 2, Orientation::Horizontal)]).unwrap();
        let moved = b.apply_move(&Move::new("R", 3)).unwrap();
        let back = moved.apply_move(&Move::new("R", -3)).unwrap();
        assert_eq!(back.state_key(), b.state_key());
    }

    #[test]
    fn state_key_ignores_vehicle_list_order() {
        let vs_a = vec![
            v("R", 0, 0, 2, Orientation::Horizontal),
            v("B", 0, 1, 2, Orientation::Horizontal),
        ];
        let vs_b = vec![
            v("B", 0, 1, 2, Orientation::Horizontal),
            v("R", 0, 0, 2, Orientation::Horizontal),
        ];
        let a = Board::new(3, 3, vs_a).unwrap();
        let b = Board::new(3, 3, vs_b).unwrap();
        assert_eq!(a.state_key(), b.state_key());
    }

    #[test]
    fn state_key_differs_on_any_cell_difference() {
        let a = Board::new(3, 3, vec![v("R", 0, 0, 2, Orientation::Horizontal)]).unwrap();
        let b = Board::new(3, 3, vec![v("R", 1, 0, 2, Orientation::Horizontal)]).unwrap();
        assert_ne!(a.state_key(), b.state_key());
    }
}
