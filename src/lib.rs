//! Rules engine for two-player Battleships: fleet placement, shot
//! resolution, and the match coordinator binding two grids together.

mod bitgrid;
pub mod command;
mod common;
mod config;
pub mod decision;
mod game;
mod grid;
#[cfg(feature = "std")]
mod handle;
#[cfg(feature = "std")]
mod logging;
mod player;
pub mod prelude;
mod ship;
mod weapon;

pub use bitgrid::{BitGrid, BitGridError};
pub use command::{Command, CommandParseError};
pub use common::*;
pub use config::*;
pub use decision::{Decider, PlayerView, RandomDecider};
pub use game::*;
pub use grid::*;
#[cfg(feature = "std")]
pub use handle::SharedMatch;
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
pub use player::*;
pub use ship::*;
pub use weapon::*;
