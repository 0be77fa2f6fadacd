//! Weapons and the cells each one strikes.

use crate::common::{EngineError, Offset};

/// Weapon types, numbered with their command codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponType {
    SingleShot = 1,
    DoubleShotVertical = 2,
    DoubleShotHorizontal = 3,
    CornerShot = 4,
    CrossShotDiagonal = 5,
    CrossShotHorizontal = 6,
}

impl WeaponType {
    pub const ALL: [WeaponType; 6] = [
        WeaponType::SingleShot,
        WeaponType::DoubleShotVertical,
        WeaponType::DoubleShotHorizontal,
        WeaponType::CornerShot,
        WeaponType::CrossShotDiagonal,
        WeaponType::CrossShotHorizontal,
    ];

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        WeaponType::ALL.iter().copied().find(|w| w.code() == code)
    }

    /// Cells struck relative to the target.
    pub fn default_pattern(self) -> Vec<Offset> {
        let o = Offset::new;
        match self {
            WeaponType::SingleShot => vec![Offset::ORIGIN],
            WeaponType::DoubleShotVertical => vec![o(0, 1), o(0, -1)],
            WeaponType::DoubleShotHorizontal => vec![o(1, 0), o(-1, 0)],
            WeaponType::CornerShot => vec![o(1, 1), o(1, -1), o(-1, 1), o(-1, -1)],
            WeaponType::CrossShotDiagonal => {
                vec![Offset::ORIGIN, o(1, 1), o(1, -1), o(-1, 1), o(-1, -1)]
            }
            WeaponType::CrossShotHorizontal => {
                vec![Offset::ORIGIN, o(0, 1), o(0, -1), o(1, 0), o(-1, 0)]
            }
        }
    }
}

/// A weapon and the area it resolves against.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    weapon_type: WeaponType,
    pattern: Vec<Offset>,
}

impl Weapon {
    /// Weapon with a custom pattern. Repeated offsets are collapsed, and a
    /// pattern must strike at least one cell.
    pub fn new(
        weapon_type: WeaponType,
        pattern: impl IntoIterator<Item = Offset>,
    ) -> Result<Self, EngineError> {
        let mut unique: Vec<Offset> = Vec::new();
        for offset in pattern {
            if !unique.contains(&offset) {
                unique.push(offset);
            }
        }
        if unique.is_empty() {
            return Err(EngineError::EmptyPattern(weapon_type));
        }
        Ok(Self {
            weapon_type,
            pattern: unique,
        })
    }

    pub fn weapon_type(&self) -> WeaponType {
        self.weapon_type
    }

    pub fn pattern(&self) -> &[Offset] {
        &self.pattern
    }
}

impl From<WeaponType> for Weapon {
    fn from(weapon_type: WeaponType) -> Self {
        Self {
            weapon_type,
            pattern: weapon_type.default_pattern(),
        }
    }
}

/// The weapons a player may fire.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Armory {
    weapons: Vec<Weapon>,
}

impl Armory {
    /// Later weapons of an already present type replace the earlier one.
    pub fn new(weapons: impl IntoIterator<Item = Weapon>) -> Self {
        let mut armory = Self {
            weapons: Vec::new(),
        };
        for weapon in weapons {
            armory.insert(weapon);
        }
        armory
    }

    /// Every weapon type with its default pattern.
    pub fn standard() -> Self {
        Self::new(WeaponType::ALL.iter().copied().map(Weapon::from))
    }

    pub fn single_shot_only() -> Self {
        Self::new([Weapon::from(WeaponType::SingleShot)])
    }

    pub fn insert(&mut self, weapon: Weapon) {
        match self
            .weapons
            .iter_mut()
            .find(|w| w.weapon_type == weapon.weapon_type)
        {
            Some(slot) => *slot = weapon,
            None => self.weapons.push(weapon),
        }
    }

    pub fn get(&self, weapon_type: WeaponType) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.weapon_type == weapon_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Weapon> {
        self.weapons.iter()
    }
}

impl Default for Armory {
    fn default() -> Self {
        Self::standard()
    }
}
