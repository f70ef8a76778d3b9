//! # Move Module
//!
//! An atomic slide of one vehicle by a signed, nonzero displacement along
//! its own axis. Named `movedef` rather than `move` to avoid the reserved
//! keyword.

use std::fmt;

/// A candidate or applied move: slide `vehicle_id` by `amount` cells along
/// its own axis (positive = right for horizontal, down for vertical).
///
/// Validity against a specific board is the board's responsibility, not
/// the move's — a `Move` alone only guarantees a nonzero displacement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub vehicle_id: String,
    pub amount: i32,
}

impl Move {
    /// # Panics
    ///
    /// Panics if `amount` is zero. A zero-displacement move is never
    /// produced by the board's successor generator; a caller constructing
    /// one directly has made a programming error (see `error` module docs).
    pub fn new(vehicle_id: impl Into<String>, amount: i32) -> Self {
        assert!(amount != 0, "Move amount must be nonzero");
        Self {
            vehicle_id: vehicle_id.into(),
            amount,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}, {:+})", self.vehicle_id, self.amount)
    }
}
