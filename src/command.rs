//! Commands a player's decision logic hands to the engine, with their text
//! forms.
//!
//! Shots are written `"<code>,<x>,<y>"` where code `0` means do nothing and
//! `1..=6` are weapon codes. Placements are written
//! `"<ShipType> <x> <y> <direction>"`, one ship per line.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use crate::common::{Coordinate, Direction, ParseError};
use crate::ship::ShipType;
use crate::weapon::WeaponType;

/// Command code for skipping a turn.
pub const DO_NOTHING_CODE: u8 = 0;

/// One action requested by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    Place {
        ship_type: ShipType,
        coordinate: Coordinate,
        direction: Direction,
    },
    Shoot {
        weapon: WeaponType,
        coordinate: Coordinate,
    },
    DoNothing,
}

impl Command {
    /// Single shot at `(x, y)`.
    pub fn fire_at(x: usize, y: usize) -> Self {
        Command::Shoot {
            weapon: WeaponType::SingleShot,
            coordinate: Coordinate::new(x, y),
        }
    }
}

/// Error returned when a command line cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("invalid number {0:?}")]
    Number(String),
    #[error("unknown command code {0}")]
    UnknownCode(u8),
    #[error(transparent)]
    Value(#[from] ParseError),
}

fn number<T: FromStr>(field: &str) -> Result<T, CommandParseError> {
    field
        .trim()
        .parse()
        .map_err(|_| CommandParseError::Number(field.trim().to_string()))
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        if line.contains(',') {
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != 3 {
                return Err(CommandParseError::FieldCount {
                    expected: 3,
                    found: fields.len(),
                });
            }
            let code: u8 = number(fields[0])?;
            let coordinate = Coordinate::new(number(fields[1])?, number(fields[2])?);
            if code == DO_NOTHING_CODE {
                return Ok(Command::DoNothing);
            }
            let weapon = WeaponType::from_code(code).ok_or(CommandParseError::UnknownCode(code))?;
            Ok(Command::Shoot { weapon, coordinate })
        } else {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 4 {
                return Err(CommandParseError::FieldCount {
                    expected: 4,
                    found: fields.len(),
                });
            }
            Ok(Command::Place {
                ship_type: fields[0].parse()?,
                coordinate: Coordinate::new(number(fields[1])?, number(fields[2])?),
                direction: fields[3].parse()?,
            })
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Place {
                ship_type,
                coordinate,
                direction,
            } => write!(f, "{} {} {} {}", ship_type, coordinate.x, coordinate.y, direction),
            Command::Shoot { weapon, coordinate } => {
                write!(f, "{},{},{}", weapon.code(), coordinate.x, coordinate.y)
            }
            Command::DoNothing => write!(f, "{},0,0", DO_NOTHING_CODE),
        }
    }
}
