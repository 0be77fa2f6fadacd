//! Ship definitions and placement geometry.

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeSet;

use crate::common::{Coordinate, Direction, EngineError, ParseError};

/// Type of ship. Each type has a fixed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipType {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl ShipType {
    pub const ALL: [ShipType; 5] = [
        ShipType::Carrier,
        ShipType::Battleship,
        ShipType::Cruiser,
        ShipType::Submarine,
        ShipType::Destroyer,
    ];

    /// Ship's name.
    pub const fn name(self) -> &'static str {
        match self {
            ShipType::Carrier => "Carrier",
            ShipType::Battleship => "Battleship",
            ShipType::Cruiser => "Cruiser",
            ShipType::Submarine => "Submarine",
            ShipType::Destroyer => "Destroyer",
        }
    }

    /// Ship's length.
    pub const fn length(self) -> usize {
        match self {
            ShipType::Carrier => 5,
            ShipType::Battleship => 4,
            ShipType::Cruiser => 3,
            ShipType::Submarine => 3,
            ShipType::Destroyer => 2,
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShipType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ShipType::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseError::new("ship type", s))
    }
}

/// Compute the cells a ship of `length` would occupy when laid from
/// `origin` along `direction` on a `width × height` grid.
///
/// The walk stops at the first cell outside the grid and reports it.
pub fn project(
    length: usize,
    origin: Coordinate,
    direction: Direction,
    width: usize,
    height: usize,
) -> Result<Vec<Coordinate>, EngineError> {
    if origin.x >= width || origin.y >= height {
        return Err(EngineError::OutOfBounds(origin));
    }
    let (dx, dy) = direction.delta();
    let mut cells = Vec::with_capacity(length);
    let mut current = origin;
    cells.push(current);
    for _ in 1..length {
        current = current.step(direction, width, height).ok_or_else(|| {
            // report the first cell off the grid, saturating at zero
            EngineError::OutOfBounds(Coordinate::new(
                current.x.saturating_add_signed(dx),
                current.y.saturating_add_signed(dy),
            ))
        })?;
        cells.push(current);
    }
    Ok(cells)
}

/// A ship in a player's fleet, tracking its placement and damage.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    ship_type: ShipType,
    origin: Option<Coordinate>,
    direction: Option<Direction>,
    cells: Vec<Coordinate>,
    hits: BTreeSet<Coordinate>,
}

impl Ship {
    /// Create an unplaced, undamaged ship.
    pub fn new(ship_type: ShipType) -> Self {
        Ship {
            ship_type,
            origin: None,
            direction: None,
            cells: Vec::new(),
            hits: BTreeSet::new(),
        }
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn length(&self) -> usize {
        self.ship_type.length()
    }

    pub fn placed(&self) -> bool {
        self.origin.is_some()
    }

    /// Origin of the ship, once placed.
    pub fn origin(&self) -> Option<Coordinate> {
        self.origin
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Cells covered by the ship, starting at the origin. Empty until placed.
    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    /// Cells of this ship that have been hit.
    pub fn hits(&self) -> &BTreeSet<Coordinate> {
        &self.hits
    }

    pub fn occupies(&self, c: Coordinate) -> bool {
        self.cells.contains(&c)
    }

    /// A ship is destroyed once every one of its cells has been hit.
    pub fn destroyed(&self) -> bool {
        self.placed() && self.cells.iter().all(|c| self.hits.contains(c))
    }

    /// Record the placement. Cells must come from [`project`] for the same
    /// origin and direction.
    pub(crate) fn set_placement(
        &mut self,
        origin: Coordinate,
        direction: Direction,
        cells: Vec<Coordinate>,
    ) {
        self.origin = Some(origin);
        self.direction = Some(direction);
        self.cells = cells;
    }

    /// Register a hit at `c`. Returns `true` if the ship occupies `c`.
    pub(crate) fn register_hit(&mut self, c: Coordinate) -> bool {
        if self.occupies(c) {
            self.hits.insert(c);
            true
        } else {
            false
        }
    }

    /// Take the ship off the board and forget any damage.
    pub(crate) fn reset(&mut self) {
        self.origin = None;
        self.direction = None;
        self.cells.clear();
        self.hits.clear();
    }
}
