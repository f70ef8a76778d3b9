//! # Vehicle Module
//!
//! A single rigid piece on the board: an identifier, an origin cell, a
//! length and an orientation. Vehicles are immutable — moving one produces
//! a new `Vehicle` with a shifted origin rather than mutating in place.

use std::fmt;

/// The axis a vehicle slides along.
///
/// `Horizontal` vehicles extend to the right (+x) from their origin;
/// `Vertical` vehicles extend downward (+y).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Parses the map-file convention of `'H'`/`'V'` characters.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'H' | 'h' => Some(Orientation::Horizontal),
            'V' | 'v' => Some(Orientation::Vertical),
            _ => None,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "H"),
            Orientation::Vertical => write!(f, "V"),
        }
    }
}

/// An immutable, axis-aligned vehicle occupying `length` consecutive cells
/// starting at `(x, y)` along its orientation's axis.
///
/// The conventional target vehicle id is `"R"`, and by construction it is
/// always the first entry in a `Board`'s vehicle list (see `board::Board`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Vehicle {
    pub id: String,
    pub x: u32,
    pub y: u32,
    pub length: u32,
    pub orientation: Orientation,
}

impl Vehicle {
    pub fn new(id: impl Into<String>, x: u32, y: u32, length: u32, orientation: Orientation) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            length,
            orientation,
        }
    }

    /// Returns a copy of this vehicle shifted by `amount` cells along its
    /// own axis. Does not validate against any board — that is the board's
    /// job (see `board::Board::apply_move`).
    pub fn shifted(&self, amount: i32) -> Self {
        let mut v = self.clone();
        match self.orientation {
            Orientation::Horizontal => v.x = (v.x as i64 + amount as i64) as u32,
            Orientation::Vertical => v.y = (v.y as i64 + amount as i64) as u32,
        }
        v
    }

    /// The exclusive end coordinate along the vehicle's own axis
    /// (`x + length` for horizontal, `y + length` for vertical).
    pub fn far_edge(&self) -> u32 {
        match self.orientation {
            Orientation::Horizontal => self.x + self.length,
            Orientation::Vertical => self.y + self.length,
        }
    }

    /// Every `(x, y)` cell this vehicle currently occupies.
    pub fn cells(&self) -> Vec<(u32, u32)> {
        (0..self.length)
            .map(|i| match self.orientation {
                Orientation::Horizontal => (self.x + i, self.y),
                Orientation::Vertical => (self.x, self.y + i),
            })
            .collect()
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vehicle({}, x={}, y={}, len={}, orient={})",
            self.id, self.x, self.y, self.length, self.orientation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifted_moves_along_own_axis_only() {
        let h = Vehicle::new("A", 1, 2, 2, Orientation::Horizontal);
        let moved = h.shifted(3);
        assert_eq!(moved.x, 4);
        assert_eq!(moved.y, 2);

        let v = Vehicle::new("B", 1, 2, 2, Orientation::Vertical);
        let moved = v.shifted(-1);
        assert_eq!(moved.x, 1);
        assert_eq!(moved.y, 1);
    }

    #[test]
    fn far_edge_accounts_for_orientation() {
        let h = Vehicle::new("A", 1, 0, 3, Orientation::Horizontal);
        assert_eq!(h.far_edge(), 4);
        let v = Vehicle::new("B", 0, 1, 3, Orientation::Vertical);
        assert_eq!(v.far_edge(), 4);
    }

    #[test]
    fn cells_enumerates_occupied_positions() {
        let h = Vehicle::new("A", 1, 2, 3, Orientation::Horizontal);
        assert_eq!(h.cells(), vec![(1, 2), (2, 2), (3, 2)]);
    }
}
