//! A single player's grid: fleet placement, occupancy and incoming shots.

use core::fmt;
use std::collections::HashMap;

use log::{debug, info};
use rand::Rng;

use crate::bitgrid::BitGrid;
use crate::common::{CellOutcome, CellState, Coordinate, Direction, EngineError, ShotReport, ShotResult};
use crate::config::FleetCatalog;
use crate::player::PlayerType;
use crate::ship::{project, Ship, ShipType};
use crate::weapon::Weapon;

/// Handle to a ship inside one grid's fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ShipId(usize);

/// Serializable grid state for saving or resuming a match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GridState {
    pub width: usize,
    pub height: usize,
    pub owner: PlayerType,
    pub ships: Vec<Ship>,
    pub hits: BitGrid,
    pub misses: BitGrid,
}

/// One player's side of the ocean.
#[derive(Clone)]
pub struct PlayerGrid {
    width: usize,
    height: usize,
    owner: PlayerType,
    ships: Vec<Ship>,
    index: HashMap<ShipType, ShipId>,
    occupancy: BitGrid,
    hits: BitGrid,
    misses: BitGrid,
}

impl PlayerGrid {
    /// Create an empty grid holding one unplaced ship per catalog entry.
    pub fn new(
        width: usize,
        height: usize,
        owner: PlayerType,
        fleet: &FleetCatalog,
    ) -> Result<Self, EngineError> {
        let empty = BitGrid::new(width, height)?;
        let ships: Vec<Ship> = fleet.ships().iter().copied().map(Ship::new).collect();
        let index = ships
            .iter()
            .enumerate()
            .map(|(i, s)| (s.ship_type(), ShipId(i)))
            .collect();
        Ok(PlayerGrid {
            width,
            height,
            owner,
            ships,
            index,
            occupancy: empty.clone(),
            hits: empty.clone(),
            misses: empty,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Seat of the player whose fleet this grid holds.
    pub fn owner(&self) -> PlayerType {
        self.owner
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// The fleet's ship of the given type.
    pub fn ship(&self, ship_type: ShipType) -> Result<&Ship, EngineError> {
        let id = self.ship_id(ship_type)?;
        Ok(&self.ships[id.0])
    }

    fn ship_id(&self, ship_type: ShipType) -> Result<ShipId, EngineError> {
        self.index
            .get(&ship_type)
            .copied()
            .ok_or(EngineError::UnknownShipType(ship_type))
    }

    /// Mask of all cells covered by placed ships.
    pub fn occupancy(&self) -> &BitGrid {
        &self.occupancy
    }

    /// Cells shot that hit a ship.
    pub fn hits(&self) -> &BitGrid {
        &self.hits
    }

    /// Cells shot that hit nothing.
    pub fn misses(&self) -> &BitGrid {
        &self.misses
    }

    /// `true` once every ship of the fleet is placed.
    pub fn is_ready(&self) -> bool {
        self.ships.iter().all(|s| s.placed())
    }

    /// Ship types still waiting to be placed.
    pub fn unplaced(&self) -> impl Iterator<Item = ShipType> + '_ {
        self.ships
            .iter()
            .filter(|s| !s.placed())
            .map(|s| s.ship_type())
    }

    /// Returns `true` when all ships are sunk.
    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(|s| s.destroyed())
    }

    /// Number of ships not yet destroyed.
    pub fn ships_remaining(&self) -> usize {
        self.ships.iter().filter(|s| !s.destroyed()).count()
    }

    /// Ship covering `c`, if any.
    pub fn ship_at(&self, c: Coordinate) -> Option<&Ship> {
        if !self.occupancy.contains(c) {
            return None;
        }
        self.ships.iter().find(|s| s.occupies(c))
    }

    /// What the shot record says about `c`.
    pub fn shot_at(&self, c: Coordinate) -> Option<CellState> {
        if self.hits.contains(c) {
            Some(CellState::Hit)
        } else if self.misses.contains(c) {
            Some(CellState::Miss)
        } else {
            None
        }
    }

    pub fn was_shot(&self, c: Coordinate) -> bool {
        self.shot_at(c).is_some()
    }

    /// Validate a placement and return the cells the ship would cover.
    /// Nothing is mutated.
    pub fn check_placement(
        &self,
        ship_type: ShipType,
        origin: Coordinate,
        direction: Direction,
    ) -> Result<Vec<Coordinate>, EngineError> {
        let ship = self.ship(ship_type)?;
        if ship.placed() {
            return Err(EngineError::AlreadyPlaced(ship_type));
        }
        let cells = project(ship.length(), origin, direction, self.width, self.height)?;
        if let Some(&taken) = cells.iter().find(|c| self.occupancy.contains(**c)) {
            return Err(EngineError::Overlap(taken));
        }
        Ok(cells)
    }

    pub fn can_place(&self, ship_type: ShipType, origin: Coordinate, direction: Direction) -> bool {
        self.check_placement(ship_type, origin, direction).is_ok()
    }

    /// Place a ship, failing with the same error `check_placement` reports.
    pub fn place(
        &mut self,
        ship_type: ShipType,
        origin: Coordinate,
        direction: Direction,
    ) -> Result<(), EngineError> {
        let cells = self.check_placement(ship_type, origin, direction)?;
        let id = self.ship_id(ship_type)?;
        for &c in cells.iter() {
            self.occupancy.set(c)?;
        }
        debug!(
            "player {:?} placed {} at {} facing {}",
            self.owner, ship_type, origin, direction
        );
        self.ships[id.0].set_placement(origin, direction, cells);
        Ok(())
    }

    /// Returns a random free `(origin, direction)` for `ship_type`.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        ship_type: ShipType,
    ) -> Result<(Coordinate, Direction), EngineError> {
        if self.ship(ship_type)?.placed() {
            return Err(EngineError::AlreadyPlaced(ship_type));
        }
        let mut candidates = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                for direction in Direction::ALL {
                    let origin = Coordinate::new(x, y);
                    if self.can_place(ship_type, origin, direction) {
                        candidates.push((origin, direction));
                    }
                }
            }
        }
        if candidates.is_empty() {
            return Err(EngineError::UnableToPlace(ship_type));
        }
        Ok(candidates[rng.random_range(0..candidates.len())])
    }

    /// Place every ship that is not on the board yet at a random position.
    pub fn place_fleet_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), EngineError> {
        let pending: Vec<ShipType> = self.unplaced().collect();
        for ship_type in pending {
            let (origin, direction) = self.random_placement(rng, ship_type)?;
            self.place(ship_type, origin, direction)?;
        }
        Ok(())
    }

    /// Resolve a weapon aimed at `target`.
    ///
    /// Every cell of the weapon's pattern that lies on the grid and has not
    /// been shot yet is resolved on its own. The target itself must be on the
    /// grid and unshot, and at least one cell must be fresh.
    pub fn shoot(&mut self, target: Coordinate, weapon: &Weapon) -> Result<ShotReport, EngineError> {
        if target.x >= self.width || target.y >= self.height {
            return Err(EngineError::OutOfBounds(target));
        }
        if weapon.pattern().is_empty() {
            return Err(EngineError::EmptyPattern(weapon.weapon_type()));
        }
        if self.was_shot(target) {
            return Err(EngineError::DuplicateShot(target));
        }
        let fresh: Vec<Coordinate> = weapon
            .pattern()
            .iter()
            .filter_map(|&o| target.offset(o, self.width, self.height))
            .filter(|&c| !self.was_shot(c))
            .collect();
        if fresh.is_empty() {
            return Err(EngineError::DuplicateShot(target));
        }

        let mut report = ShotReport::default();
        for coordinate in fresh {
            let result = self.resolve(coordinate)?;
            report.cells.push(CellOutcome { coordinate, result });
        }
        debug!(
            "{:?} at {} against player {:?}: {:?}",
            weapon.weapon_type(),
            target,
            self.owner,
            report.cells
        );
        Ok(report)
    }

    fn resolve(&mut self, c: Coordinate) -> Result<ShotResult, EngineError> {
        let hit_ship = if self.occupancy.contains(c) {
            self.ships.iter_mut().find(|s| s.occupies(c))
        } else {
            None
        };
        match hit_ship {
            None => {
                self.misses.set(c)?;
                Ok(ShotResult::Miss)
            }
            Some(ship) => {
                ship.register_hit(c);
                let ship_type = ship.ship_type();
                let sunk = ship.destroyed();
                self.hits.set(c)?;
                if sunk {
                    info!("player {:?} lost their {}", self.owner, ship_type);
                    Ok(ShotResult::Sunk(ship_type))
                } else {
                    Ok(ShotResult::Hit(ship_type))
                }
            }
        }
    }

    /// Take every ship off the board and forget all shots.
    pub fn clear_map(&mut self) {
        for ship in self.ships.iter_mut() {
            ship.reset();
        }
        self.occupancy.clear_all();
        self.hits.clear_all();
        self.misses.clear_all();
        info!("player {:?} cleared their grid", self.owner);
    }
}

impl fmt::Debug for PlayerGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "PlayerGrid {{\n  owner: {:?},\n  occupancy: {:?},\n  hits: {:?},\n  misses: {:?},\n  ships: {:?}\n}}",
            self.owner, self.occupancy, self.hits, self.misses, self.ships
        )
    }
}

/// Owner's view: ship initials, `X` for hit cells, `*` for misses.
impl fmt::Display for PlayerGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let c = Coordinate::new(x, y);
                let symbol = match (self.shot_at(c), self.ship_at(c)) {
                    (Some(CellState::Hit), _) => 'X',
                    (Some(CellState::Miss), _) => '*',
                    (None, Some(ship)) => ship.ship_type().name().chars().next().unwrap_or('#'),
                    (None, None) => '~',
                };
                write!(f, "{} ", symbol)?;
            }
            if y > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl From<&PlayerGrid> for GridState {
    fn from(g: &PlayerGrid) -> Self {
        GridState {
            width: g.width,
            height: g.height,
            owner: g.owner,
            ships: g.ships.clone(),
            hits: g.hits.clone(),
            misses: g.misses.clone(),
        }
    }
}

impl TryFrom<GridState> for PlayerGrid {
    type Error = EngineError;

    /// Rebuild the occupancy mask and ship index, checking that ships and
    /// the shot record agree with each other.
    fn try_from(state: GridState) -> Result<Self, Self::Error> {
        let corrupt = |msg: String| EngineError::CorruptSnapshot(msg);
        let (width, height) = (state.width, state.height);
        let mut occupancy = BitGrid::new(width, height)?;
        for (name, grid) in [("hits", &state.hits), ("misses", &state.misses)] {
            if grid.width() != width || grid.height() != height {
                return Err(corrupt(format!("{} record does not match grid size", name)));
            }
        }
        if !state.hits.is_disjoint(&state.misses) {
            return Err(corrupt("a cell is recorded as both hit and miss".into()));
        }

        let mut index = HashMap::new();
        for (i, ship) in state.ships.iter().enumerate() {
            if index.insert(ship.ship_type(), ShipId(i)).is_some() {
                return Err(corrupt(format!("{} appears twice", ship.ship_type())));
            }
            match (ship.origin(), ship.direction()) {
                (Some(origin), Some(direction)) => {
                    let expected = project(ship.length(), origin, direction, width, height)?;
                    if expected != ship.cells() {
                        return Err(corrupt(format!("{} cells do not match its placement", ship.ship_type())));
                    }
                    for &c in ship.cells() {
                        if occupancy.contains(c) {
                            return Err(corrupt(format!("ships overlap at {}", c)));
                        }
                        occupancy.set(c)?;
                    }
                }
                (None, None) if ship.cells().is_empty() && ship.hits().is_empty() => {}
                _ => {
                    return Err(corrupt(format!("{} has a partial placement", ship.ship_type())));
                }
            }
            if let Some(c) = ship
                .hits()
                .iter()
                .find(|&&c| !ship.occupies(c) || !state.hits.contains(c))
            {
                return Err(corrupt(format!(
                    "{} hit at {} does not match the shot record",
                    ship.ship_type(),
                    c
                )));
            }
        }

        for c in state.hits.iter_set_bits() {
            let recorded = state
                .ships
                .iter()
                .any(|s| s.occupies(c) && s.hits().contains(&c));
            if !recorded {
                return Err(corrupt(format!("hit at {} does not belong to a ship", c)));
            }
        }
        if !state.misses.is_disjoint(&occupancy) {
            return Err(corrupt("a miss is recorded on a ship cell".into()));
        }

        Ok(PlayerGrid {
            width,
            height,
            owner: state.owner,
            ships: state.ships,
            index,
            occupancy,
            hits: state.hits,
            misses: state.misses,
        })
    }
}
