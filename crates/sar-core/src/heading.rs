//! Compass directions and the east/north → heading convention.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

const DIAG: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Heading in degrees clockwise from north for an (east, north) vector.
///
/// Zero east component maps to exactly 0 (north or zero vector) or 180
/// (south).  A NaN component yields 0.
pub fn heading_from_components(east: f64, north: f64) -> f64 {
    if east.is_nan() || north.is_nan() {
        return 0.0;
    }
    if east == 0.0 {
        return if north >= 0.0 { 0.0 } else { 180.0 };
    }
    (east.atan2(north).to_degrees() + 360.0) % 360.0
}

/// One of the eight principal compass directions a straight-line model can
/// travel in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Unit (east, north) vector.
    pub fn unit_vector(self) -> (f64, f64) {
        match self {
            Direction::North     => (0.0, 1.0),
            Direction::South     => (0.0, -1.0),
            Direction::East      => (1.0, 0.0),
            Direction::West      => (-1.0, 0.0),
            Direction::NorthEast => (DIAG, DIAG),
            Direction::NorthWest => (-DIAG, DIAG),
            Direction::SouthEast => (DIAG, -DIAG),
            Direction::SouthWest => (-DIAG, -DIAG),
        }
    }

    /// Heading in degrees clockwise from north.
    pub fn heading_deg(self) -> f64 {
        let (east, north) = self.unit_vector();
        heading_from_components(east, north)
    }

    /// Short compass abbreviation (`"N"`, `"NE"`, ...).
    pub fn abbreviation(self) -> &'static str {
        match self {
            Direction::North     => "N",
            Direction::South     => "S",
            Direction::East      => "E",
            Direction::West      => "W",
            Direction::NorthEast => "NE",
            Direction::NorthWest => "NW",
            Direction::SouthEast => "SE",
            Direction::SouthWest => "SW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Accepts full names (`"NORTHEAST"`, `"north_east"`, any case) and
/// abbreviations (`"ne"`).
impl FromStr for Direction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && *c != ' ')
            .collect::<String>()
            .to_ascii_uppercase();
        let dir = match key.as_str() {
            "N" | "NORTH" => Direction::North,
            "S" | "SOUTH" => Direction::South,
            "E" | "EAST" => Direction::East,
            "W" | "WEST" => Direction::West,
            "NE" | "NORTHEAST" => Direction::NorthEast,
            "NW" | "NORTHWEST" => Direction::NorthWest,
            "SE" | "SOUTHEAST" => Direction::SouthEast,
            "SW" | "SOUTHWEST" => Direction::SouthWest,
            _ => return Err(CoreError::UnknownDirection(s.to_string())),
        };
        Ok(dir)
    }
}
