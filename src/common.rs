//! Common types for Battleships: coordinates, directions, shot outcomes and
//! engine errors.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use crate::bitgrid::BitGridError;
use crate::game::Phase;
use crate::player::PlayerType;
use crate::ship::ShipType;
use crate::weapon::WeaponType;

/// A cell on a player grid. `x` is the column, `y` the row, both 0-indexed.
///
/// Ordering is row-major so sets of coordinates iterate row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Move one cell along `direction`. Returns `None` when the step leaves a
    /// `width × height` grid; there is no wrap-around.
    pub fn step(self, direction: Direction, width: usize, height: usize) -> Option<Self> {
        let (dx, dy) = direction.delta();
        self.offset(Offset::new(dx, dy), width, height)
    }

    /// Translate by `offset`, staying inside a `width × height` grid.
    pub fn offset(self, offset: Offset, width: usize, height: usize) -> Option<Self> {
        let x = self.x.checked_add_signed(offset.dx)?;
        let y = self.y.checked_add_signed(offset.dy)?;
        if x < width && y < height {
            Some(Self { x, y })
        } else {
            None
        }
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Signed displacement from a target cell, used by weapon patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    pub dx: isize,
    pub dy: isize,
}

impl Offset {
    pub const ORIGIN: Offset = Offset::new(0, 0);

    pub const fn new(dx: isize, dy: isize) -> Self {
        Self { dx, dy }
    }
}

/// Direction a ship extends from its origin. North grows `y`, East grows `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit step `(dx, dy)` for this direction.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Direction::North),
            "south" | "s" => Ok(Direction::South),
            "east" | "e" => Ok(Direction::East),
            "west" | "w" => Ok(Direction::West),
            _ => Err(ParseError::new("direction", s)),
        }
    }
}

/// What a grid remembers about a cell that has been shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Hit,
    Miss,
}

/// Result of resolving a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotResult {
    /// Nothing occupied the cell.
    Miss,
    /// The ship was hit but still has intact cells.
    Hit(ShipType),
    /// The hit destroyed the last intact cell of the ship.
    Sunk(ShipType),
}

impl ShotResult {
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotResult::Miss)
    }
}

/// One resolved cell of a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct CellOutcome {
    pub coordinate: Coordinate,
    pub result: ShotResult,
}

/// Aggregated outcome of one weapon discharge against a grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotReport {
    pub cells: Vec<CellOutcome>,
}

impl ShotReport {
    /// `true` when at least one resolved cell hit a ship.
    pub fn is_hit(&self) -> bool {
        self.cells.iter().any(|c| c.result.is_hit())
    }

    /// Ship types destroyed by this shot.
    pub fn sunk(&self) -> impl Iterator<Item = ShipType> + '_ {
        self.cells.iter().filter_map(|c| match c.result {
            ShotResult::Sunk(ship) => Some(ship),
            _ => None,
        })
    }

    /// Result for a given cell, if this shot resolved it.
    pub fn result_at(&self, coordinate: Coordinate) -> Option<ShotResult> {
        self.cells
            .iter()
            .find(|c| c.coordinate == coordinate)
            .map(|c| c.result)
    }
}

/// Errors returned by grid and match operations. All of them describe a
/// rejected caller input; the state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("coordinate {0} is outside the grid")]
    OutOfBounds(Coordinate),
    #[error("placement overlaps another ship at {0}")]
    Overlap(Coordinate),
    #[error("{0} has already been placed")]
    AlreadyPlaced(ShipType),
    #[error("cell {0} has already been shot")]
    DuplicateShot(Coordinate),
    #[error("all ships of player {0:?} must be placed before shooting")]
    NotReady(PlayerType),
    #[error("the fleet has no {0}")]
    UnknownShipType(ShipType),
    #[error("the armory has no {0:?}")]
    UnknownWeapon(WeaponType),
    #[error("{0:?} has an empty strike pattern")]
    EmptyPattern(WeaponType),
    #[error("operation not allowed during the {0:?} phase")]
    WrongPhase(Phase),
    #[error("grid dimensions {width}x{height} are invalid")]
    InvalidDimensions { width: usize, height: usize },
    #[error("fleet catalog lists {0} more than once")]
    DuplicateShipType(ShipType),
    #[error("fleet catalog is empty")]
    EmptyFleet,
    #[error("unable to find a free position for {0}")]
    UnableToPlace(ShipType),
    #[error("snapshot is inconsistent: {0}")]
    CorruptSnapshot(String),
}

impl From<BitGridError> for EngineError {
    fn from(err: BitGridError) -> Self {
        match err {
            BitGridError::IndexOutOfBounds { x, y } => {
                EngineError::OutOfBounds(Coordinate::new(x, y))
            }
            BitGridError::ZeroSize { width, height }
            | BitGridError::TooLarge { width, height } => {
                EngineError::InvalidDimensions { width, height }
            }
            BitGridError::WordCount { .. } | BitGridError::PaddingBits => {
                EngineError::CorruptSnapshot(err.to_string())
            }
        }
    }
}

/// Error returned when text does not name a known value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised {kind}: {value:?}")]
pub struct ParseError {
    kind: &'static str,
    value: String,
}

impl ParseError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }

    /// What was being parsed, e.g. `"direction"`.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_does_not_wrap() {
        let c = Coordinate::new(0, 0);
        assert_eq!(c.step(Direction::West, 10, 10), None);
        assert_eq!(c.step(Direction::South, 10, 10), None);
        assert_eq!(c.step(Direction::East, 10, 10), Some(Coordinate::new(1, 0)));
        assert_eq!(
            Coordinate::new(3, 9).step(Direction::North, 10, 10),
            None
        );
    }

    #[test]
    fn direction_parses_short_and_long_names() {
        assert_eq!("North".parse::<Direction>().unwrap(), Direction::North);
        assert_eq!("w".parse::<Direction>().unwrap(), Direction::West);
        assert!("up".parse::<Direction>().is_err());
    }
}
