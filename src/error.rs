//! # Error Module
//!
//! Construction-time error taxonomy. Per the design's error-handling
//! policy, only data/validation problems are represented here; a move that
//! references a vehicle absent from the board, or a successor board that
//! fails to construct, is a programming bug and aborts via `panic!` rather
//! than flowing through these types. "No solution" and "timeout" are not
//! errors at all — they are ordinary `SolveOutcome` values (see
//! `search::SolveOutcome`).

use thiserror::Error;

/// Errors raised while constructing or validating a `Board`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    NonPositiveDimension { width: u32, height: u32 },

    #[error("vehicle {vehicle_id:?} is out of bounds")]
    OutOfBounds { vehicle_id: String },

    #[error("vehicle {vehicle_id:?} collides with another vehicle at ({x}, {y})")]
    Overlap { vehicle_id: String, x: u32, y: u32 },
}

/// Errors raised while parsing a map file (the external loader's concern).
#[derive(Error, Debug)]
pub enum MapFileError {
    #[error("could not read map file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed map header: expected \"width,height\"")]
    MalformedHeader,

    #[error("malformed vehicle line {line:?}: expected \"id,x,y,length,orientation\"")]
    MalformedVehicleLine { line: String },

    #[error(transparent)]
    InvalidBoard(#[from] BoardError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_error_messages_are_descriptive() {
        let e = BoardError::OutOfBounds {
            vehicle_id: "R".into(),
        };
        assert!(e.to_string().contains('R'));
    }
}
