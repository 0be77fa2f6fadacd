use crate::weapon::{Armory, Weapon, WeaponType};

/// Seat of a player in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerType {
    One,
    Two,
}

impl PlayerType {
    pub const BOTH: [PlayerType; 2] = [PlayerType::One, PlayerType::Two];

    /// The other seat.
    pub const fn opponent(self) -> Self {
        match self {
            PlayerType::One => PlayerType::Two,
            PlayerType::Two => PlayerType::One,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            PlayerType::One => 0,
            PlayerType::Two => 1,
        }
    }

    /// Default marker symbol for this seat.
    pub const fn default_key(self) -> char {
        match self {
            PlayerType::One => 'A',
            PlayerType::Two => 'B',
        }
    }
}

/// A player's identity and the weapons they may fire.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    name: String,
    key: char,
    player_type: PlayerType,
    armory: Armory,
}

impl Player {
    /// Player with the seat's default key and the standard armory.
    pub fn new(name: impl Into<String>, player_type: PlayerType) -> Self {
        Self::with_armory(name, player_type, Armory::standard())
    }

    pub fn with_armory(name: impl Into<String>, player_type: PlayerType, armory: Armory) -> Self {
        Self {
            name: name.into(),
            key: player_type.default_key(),
            player_type,
            armory,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> char {
        self.key
    }

    pub fn player_type(&self) -> PlayerType {
        self.player_type
    }

    pub fn armory(&self) -> &Armory {
        &self.armory
    }

    pub fn weapon(&self, weapon_type: WeaponType) -> Option<&Weapon> {
        self.armory.get(weapon_type)
    }
}
