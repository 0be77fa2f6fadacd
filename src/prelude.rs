//! Commonly used types and utilities for ease of import.

pub use crate::{
    Command, Coordinate, Decider, Direction, EngineError, Match, Phase, PlayerType,
    RandomDecider, ShipType, ShotResult, WeaponType,
};

#[cfg(feature = "std")]
pub use crate::{init_logging, SharedMatch};
