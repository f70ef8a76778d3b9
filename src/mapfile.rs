//! # Map File Module
//!
//! The external loader's format (§6): a small textual description of a
//! starting board. First line is `width,height`; every following line is
//! `id,x,y,length,orientation`. This module's job stops at producing a
//! populated `Board` — it contributes no search/board algorithmic
//! substance, matching spec §1's framing of the loader as an external
//! collaborator. Grounded on `original_source/src/main.rs`'s `parse_map`.

use std::fs;
use std::path::Path;

use crate::board::Board;
use crate::error::MapFileError;
use crate::vehicle::{Orientation, Vehicle};

/// Parses a map file from disk into a validated `Board`.
pub fn load(path: impl AsRef<Path>) -> Result<Board, MapFileError> {
    let contents = fs::read_to_string(path)?;
    parse(&contents)
}

/// Parses map-file text (as would be read from disk) into a validated
/// `Board`. Split out from `load` so tests can exercise parsing without
/// touching the filesystem.
pub fn parse(contents: &str) -> Result<Board, MapFileError> {
    let mut lines = contents.lines().filter(|l| !l.trim().is_empty());

    let header = lines.next().ok_or(MapFileError::MalformedHeader)?;
    let (width, height) = parse_header(header)?;

    let vehicles = lines
        .map(parse_vehicle_line)
        .collect::<Result<Vec<_>, _>>()?;

    Board::new(width, height, vehicles).map_err(MapFileError::from)
}

fn parse_header(line: &str) -> Result<(u32, u32), MapFileError> {
    let mut parts = line.trim().split(',');
    let width = parts.next().and_then(|p| p.trim().parse().ok());
    let height = parts.next().and_then(|p| p.trim().parse().ok());
    match (width, height, parts.next()) {
        (Some(w), Some(h), None) => Ok((w, h)),
        _ => Err(MapFileError::MalformedHeader),
    }
}

fn parse_vehicle_line(line: &str) -> Result<Vehicle, MapFileError> {
    let malformed = || MapFileError::MalformedVehicleLine {
        line: line.to_string(),
    };

    let parts: Vec<&str> = line.trim().split(',').collect();
    let [id, x, y, length, orientation] = parts.as_slice() else {
        return Err(malformed());
    };

    let x: u32 = x.trim().parse().map_err(|_| malformed())?;
    let y: u32 = y.trim().parse().map_err(|_| malformed())?;
    let length: u32 = length.trim().parse().map_err(|_| malformed())?;
    let orientation = Orientation::from_char(
        orientation.trim().chars().next().ok_or_else(malformed)?,
    )
    .ok_or_else(malformed)?;

    Ok(Vehicle::new(id.trim(), x, y, length, orientation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_map() {
        let text = "6,6\nR,0,2,2,H\nB,3,0,3,V\n";
        let board = parse(text).unwrap();
        assert_eq!(board.width, 6);
        assert_eq!(board.height, 6);
        assert_eq!(board.vehicles.len(), 2);
        assert_eq!(board.vehicles[0].id, "R");
    }

    #[test]
    fn rejects_malformed_header() {
        let err = parse("not-a-header\nR,0,2,2,H\n").unwrap_err();
        assert!(matches!(err, MapFileError::MalformedHeader));
    }

    #[test]
    fn rejects_malformed_vehicle_line() {
        let err = parse("6,6\nR,0,2,H\n").unwrap_err();
        assert!(matches!(err, MapFileError::MalformedVehicleLine { .. }));
    }

    #[test]
    fn propagates_board_invariant_violations() {
        let err = parse("6,6\nR,10,0,2,H\n").unwrap_err();
        assert!(matches!(err, MapFileError::InvalidBoard(_)));
    }
}
