use crate::common::EngineError;
use crate::ship::ShipType;
use crate::weapon::Armory;

pub const DEFAULT_MAP_SIZE: usize = 10;
pub const GAME_LEVEL: u32 = 1;
pub const GAME_VERSION: &str = "1.0.0";

pub const STANDARD_FLEET: [ShipType; 5] = [
    ShipType::Carrier,
    ShipType::Battleship,
    ShipType::Cruiser,
    ShipType::Submarine,
    ShipType::Destroyer,
];

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// The ship types every player starts with. Each type appears at most once,
/// so a ship type resolves to exactly one ship in a fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetCatalog {
    ships: Vec<ShipType>,
}

impl FleetCatalog {
    /// Build a catalog, rejecting empty lists and repeated ship types.
    pub fn new(ships: impl IntoIterator<Item = ShipType>) -> Result<Self, EngineError> {
        let mut list: Vec<ShipType> = Vec::new();
        for ship in ships {
            if list.contains(&ship) {
                return Err(EngineError::DuplicateShipType(ship));
            }
            list.push(ship);
        }
        if list.is_empty() {
            return Err(EngineError::EmptyFleet);
        }
        Ok(Self { ships: list })
    }

    /// One of each ship type.
    pub fn standard() -> Self {
        Self {
            ships: STANDARD_FLEET.to_vec(),
        }
    }

    pub fn ships(&self) -> &[ShipType] {
        &self.ships
    }

    /// Number of cells the whole fleet covers.
    pub fn total_cells(&self) -> usize {
        self.ships.iter().map(|s| s.length()).sum()
    }
}

impl Default for FleetCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Settings a match is created with.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub fleet: FleetCatalog,
    pub armory: Armory,
}

impl GameConfig {
    /// Square map of `size` with the standard fleet and armory.
    pub fn square(size: usize) -> Self {
        Self {
            width: size,
            height: size,
            ..Self::default()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_MAP_SIZE,
            height: DEFAULT_MAP_SIZE,
            fleet: FleetCatalog::standard(),
            armory: Armory::standard(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_fleet_matches_cell_total() {
        assert_eq!(FleetCatalog::standard().total_cells(), TOTAL_SHIP_CELLS);
    }

    #[test]
    fn catalog_rejects_repeated_types() {
        let err = FleetCatalog::new([ShipType::Destroyer, ShipType::Destroyer]).unwrap_err();
        assert_eq!(err, EngineError::DuplicateShipType(ShipType::Destroyer));
        assert_eq!(FleetCatalog::new(Vec::new()).unwrap_err(), EngineError::EmptyFleet);
    }
}
