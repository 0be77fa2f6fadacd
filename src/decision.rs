use rand::rngs::SmallRng;
use rand::Rng;

use crate::{
    command::Command,
    common::{CellState, Coordinate},
    grid::PlayerGrid,
    player::Player,
    weapon::WeaponType,
};

/// What one player is allowed to see of a match: their own grid in full
/// and only the shot record of the opponent's grid.
#[derive(Clone, Copy)]
pub struct PlayerView<'a> {
    player: &'a Player,
    own: &'a PlayerGrid,
    target: &'a PlayerGrid,
}

impl<'a> PlayerView<'a> {
    pub(crate) fn new(player: &'a Player, own: &'a PlayerGrid, target: &'a PlayerGrid) -> Self {
        Self { player, own, target }
    }

    pub fn player(&self) -> &'a Player {
        self.player
    }

    pub fn own_grid(&self) -> &'a PlayerGrid {
        self.own
    }

    /// Size of the opponent's grid as `(width, height)`.
    pub fn target_size(&self) -> (usize, usize) {
        (self.target.width(), self.target.height())
    }

    /// Result of an earlier shot at `c` on the opponent's grid.
    pub fn target_shot_at(&self, c: Coordinate) -> Option<CellState> {
        self.target.shot_at(c)
    }

    /// Opponent ships still afloat.
    pub fn target_ships_remaining(&self) -> usize {
        self.target.ships_remaining()
    }

    /// Opponent cells not shot yet, row by row.
    pub fn unshot_targets(&self) -> impl Iterator<Item = Coordinate> + 'a {
        let target = self.target;
        (0..target.height()).flat_map(move |y| {
            (0..target.width())
                .map(move |x| Coordinate::new(x, y))
                .filter(move |&c| !target.was_shot(c))
        })
    }
}

/// Interface implemented by anything that chooses a player's next move.
pub trait Decider {
    /// Choose the next command from the player's view of the match.
    fn decide(&mut self, rng: &mut SmallRng, view: &PlayerView<'_>) -> Command;
}

/// Places ships at random free positions, then fires single shots at random
/// cells that have not been shot yet.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomDecider;

impl RandomDecider {
    pub fn new() -> Self {
        Self
    }
}

impl Decider for RandomDecider {
    fn decide(&mut self, rng: &mut SmallRng, view: &PlayerView<'_>) -> Command {
        let own = view.own_grid();
        if let Some(ship_type) = own.unplaced().next() {
            return match own.random_placement(rng, ship_type) {
                Ok((coordinate, direction)) => Command::Place {
                    ship_type,
                    coordinate,
                    direction,
                },
                Err(_) => Command::DoNothing,
            };
        }
        let open: Vec<Coordinate> = view.unshot_targets().collect();
        if open.is_empty() {
            return Command::DoNothing;
        }
        Command::Shoot {
            weapon: WeaponType::SingleShot,
            coordinate: open[rng.random_range(0..open.len())],
        }
    }
}
