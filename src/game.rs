//! The match coordinator: two players, their grids, and the phase they are in.

use log::{debug, info};

use crate::{
    command::Command,
    common::{Coordinate, Direction, EngineError, ShotReport},
    config::{GameConfig, GAME_LEVEL, GAME_VERSION},
    decision::PlayerView,
    grid::{GridState, PlayerGrid},
    player::{Player, PlayerType},
    ship::ShipType,
    weapon::WeaponType,
};

/// Stage of a match. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Placement = 1,
    Shooting = 2,
    Finished = 3,
}

/// Serializable match state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchState {
    pub version: String,
    pub level: u32,
    pub phase: Phase,
    pub current_round: u32,
    pub map_size: usize,
    pub players: [Player; 2],
    pub grids: [GridState; 2],
    pub registered_players: Vec<Player>,
}

/// Binds two players and their grids together.
///
/// Grid `i` holds the fleet of player `i`; a player's shots always land on
/// the other seat's grid.
#[derive(Debug, Clone)]
pub struct Match {
    players: [Player; 2],
    grids: [PlayerGrid; 2],
    phase: Phase,
    current_round: u32,
    map_size: usize,
    registered_players: Vec<Player>,
}

impl Match {
    /// Standard fleet and armory on a `width × height` map.
    pub fn new(
        player_one: impl Into<String>,
        player_two: impl Into<String>,
        width: usize,
        height: usize,
    ) -> Result<Self, EngineError> {
        let config = GameConfig {
            width,
            height,
            ..GameConfig::default()
        };
        Self::with_config(player_one, player_two, &config)
    }

    pub fn with_config(
        player_one: impl Into<String>,
        player_two: impl Into<String>,
        config: &GameConfig,
    ) -> Result<Self, EngineError> {
        let players = [
            Player::with_armory(player_one, PlayerType::One, config.armory.clone()),
            Player::with_armory(player_two, PlayerType::Two, config.armory.clone()),
        ];
        let grids = [
            PlayerGrid::new(config.width, config.height, PlayerType::One, &config.fleet)?,
            PlayerGrid::new(config.width, config.height, PlayerType::Two, &config.fleet)?,
        ];
        Ok(Match {
            players,
            grids,
            phase: Phase::Placement,
            current_round: 1,
            map_size: config.height,
            registered_players: Vec::new(),
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn map_size(&self) -> usize {
        self.map_size
    }

    pub fn player(&self, player: PlayerType) -> &Player {
        &self.players[player.index()]
    }

    pub fn opponent_player(&self, player: PlayerType) -> &Player {
        &self.players[player.opponent().index()]
    }

    /// The grid holding `player`'s own fleet.
    pub fn own_grid(&self, player: PlayerType) -> &PlayerGrid {
        &self.grids[player.index()]
    }

    /// The grid `player` shoots at.
    pub fn opponent_grid(&self, player: PlayerType) -> &PlayerGrid {
        &self.grids[player.opponent().index()]
    }

    /// What `player` may see: their own grid and their shots at the opponent.
    pub fn view(&self, player: PlayerType) -> PlayerView<'_> {
        PlayerView::new(self.player(player), self.own_grid(player), self.opponent_grid(player))
    }

    pub fn registered_players(&self) -> &[Player] {
        &self.registered_players
    }

    /// Add a player to the roster. Has no effect on play.
    pub fn register_player(&mut self, player: Player) {
        self.registered_players.push(player);
    }

    /// Fire `weapon_type` at `target` on the opponent's grid. Returns `true`
    /// when at least one cell hit a ship.
    pub fn shoot(
        &mut self,
        player: PlayerType,
        target: Coordinate,
        weapon_type: WeaponType,
    ) -> Result<bool, EngineError> {
        self.fire(player, target, weapon_type)
            .map(|report| report.is_hit())
    }

    /// Like [`Match::shoot`] but returns every resolved cell.
    pub fn fire(
        &mut self,
        player: PlayerType,
        target: Coordinate,
        weapon_type: WeaponType,
    ) -> Result<ShotReport, EngineError> {
        if self.phase == Phase::Finished {
            return Err(EngineError::WrongPhase(self.phase));
        }
        if !self.grids[player.index()].is_ready() {
            return Err(EngineError::NotReady(player));
        }
        // the opponent may still be placing
        if self.phase != Phase::Shooting {
            return Err(EngineError::WrongPhase(self.phase));
        }
        let weapon = self.players[player.index()]
            .weapon(weapon_type)
            .ok_or(EngineError::UnknownWeapon(weapon_type))?;
        self.grids[player.opponent().index()].shoot(target, weapon)
    }

    /// `true` when a ship sits at `point` on the opponent's grid and it has
    /// been destroyed.
    pub fn was_ship_destroyed(&self, player: PlayerType, point: Coordinate) -> bool {
        self.opponent_grid(player)
            .ship_at(point)
            .is_some_and(|ship| ship.destroyed())
    }

    pub fn place(
        &mut self,
        player: PlayerType,
        ship_type: ShipType,
        coordinate: Coordinate,
        direction: Direction,
    ) -> Result<(), EngineError> {
        self.require_placement()?;
        let grid = &mut self.grids[player.index()];
        if grid.ship(ship_type)?.placed() {
            return Err(EngineError::AlreadyPlaced(ship_type));
        }
        grid.place(ship_type, coordinate, direction)
    }

    pub fn can_place(
        &self,
        player: PlayerType,
        ship_type: ShipType,
        coordinate: Coordinate,
        direction: Direction,
    ) -> bool {
        self.phase == Phase::Placement
            && self.grids[player.index()].can_place(ship_type, coordinate, direction)
    }

    /// Clear `player`'s placements so they can redo them.
    pub fn clean_map_before_place(&mut self, player: PlayerType) -> Result<(), EngineError> {
        self.require_placement()?;
        self.grids[player.index()].clear_map();
        Ok(())
    }

    fn require_placement(&self) -> Result<(), EngineError> {
        if self.phase == Phase::Placement {
            Ok(())
        } else {
            Err(EngineError::WrongPhase(self.phase))
        }
    }

    pub fn both_ready(&self) -> bool {
        self.grids.iter().all(|g| g.is_ready())
    }

    /// Move the match to `phase`. Phases never go back, and shooting starts
    /// only once both fleets are placed.
    pub fn set_phase(&mut self, phase: Phase) -> Result<(), EngineError> {
        if phase < self.phase {
            return Err(EngineError::WrongPhase(self.phase));
        }
        if phase == Phase::Shooting {
            if let Some(pending) = PlayerType::BOTH
                .iter()
                .find(|p| !self.grids[p.index()].is_ready())
            {
                return Err(EngineError::NotReady(*pending));
            }
        }
        if phase != self.phase {
            info!("match phase {:?} -> {:?}", self.phase, phase);
        }
        self.phase = phase;
        Ok(())
    }

    /// Advance the round counter, returning the new round.
    pub fn next_round(&mut self) -> u32 {
        self.current_round = self.current_round.saturating_add(1);
        debug!("round {}", self.current_round);
        self.current_round
    }

    /// The player whose opponent has lost every ship.
    pub fn winner(&self) -> Option<PlayerType> {
        PlayerType::BOTH
            .iter()
            .copied()
            .find(|p| self.opponent_grid(*p).all_sunk())
    }

    /// Carry out a command produced by a player's decision logic. Shots
    /// return their report.
    pub fn apply(
        &mut self,
        player: PlayerType,
        command: &Command,
    ) -> Result<Option<ShotReport>, EngineError> {
        match *command {
            Command::Place {
                ship_type,
                coordinate,
                direction,
            } => self
                .place(player, ship_type, coordinate, direction)
                .map(|()| None),
            Command::Shoot { weapon, coordinate } => {
                self.fire(player, coordinate, weapon).map(Some)
            }
            Command::DoNothing => Ok(None),
        }
    }

    /// Generate a serializable snapshot of the current state.
    pub fn state(&self) -> MatchState {
        MatchState {
            version: GAME_VERSION.to_string(),
            level: GAME_LEVEL,
            phase: self.phase,
            current_round: self.current_round,
            map_size: self.map_size,
            players: self.players.clone(),
            grids: [
                GridState::from(&self.grids[0]),
                GridState::from(&self.grids[1]),
            ],
            registered_players: self.registered_players.clone(),
        }
    }

    /// Encode the current state with bincode.
    #[cfg(feature = "std")]
    pub fn to_bytes(&self) -> anyhow::Result<Vec<u8>> {
        Ok(bincode::serialize(&self.state())?)
    }

    /// Restore a match from bytes produced by [`Match::to_bytes`].
    #[cfg(feature = "std")]
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let state: MatchState = bincode::deserialize(bytes)?;
        Ok(Match::try_from(state)?)
    }
}

impl TryFrom<MatchState> for Match {
    type Error = EngineError;

    fn try_from(state: MatchState) -> Result<Self, Self::Error> {
        let corrupt = |msg: String| EngineError::CorruptSnapshot(msg);
        if state.version != GAME_VERSION {
            return Err(corrupt(format!("unsupported version {}", state.version)));
        }
        if state.level != GAME_LEVEL {
            return Err(corrupt(format!("unsupported level {}", state.level)));
        }
        if state.current_round == 0 {
            return Err(corrupt("rounds start at 1".into()));
        }
        let [g1, g2] = state.grids;
        let grids = [PlayerGrid::try_from(g1)?, PlayerGrid::try_from(g2)?];
        let (width, height) = (grids[0].width(), grids[0].height());
        if grids[1].width() != width || grids[1].height() != height {
            return Err(corrupt("grids differ in size".into()));
        }
        if state.map_size != height {
            return Err(corrupt(format!(
                "map size {} does not match grid height {}",
                state.map_size, height
            )));
        }
        if state.phase > Phase::Placement {
            if let Some(grid) = grids.iter().find(|g| !g.is_ready()) {
                return Err(corrupt(format!(
                    "{:?} phase with player {:?}'s fleet unplaced",
                    state.phase,
                    grid.owner()
                )));
            }
        }
        for player in state.players.iter().chain(&state.registered_players) {
            if let Some(weapon) = player.armory().iter().find(|w| w.pattern().is_empty()) {
                return Err(corrupt(format!(
                    "{:?} of {} strikes no cells",
                    weapon.weapon_type(),
                    player.name()
                )));
            }
        }
        for (seat, (player, grid)) in PlayerType::BOTH
            .iter()
            .zip(state.players.iter().zip(grids.iter()))
        {
            if player.player_type() != *seat || grid.owner() != *seat {
                return Err(corrupt(format!(
                    "seat {:?} holds the wrong player or grid",
                    seat
                )));
            }
        }
        Ok(Match {
            players: state.players,
            grids,
            phase: state.phase,
            current_round: state.current_round,
            map_size: state.map_size,
            registered_players: state.registered_players,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_cannot_move_backwards() {
        let mut game = Match::new("a", "b", 10, 10).unwrap();
        game.set_phase(Phase::Finished).unwrap();
        assert_eq!(
            game.set_phase(Phase::Placement).unwrap_err(),
            EngineError::WrongPhase(Phase::Finished)
        );
    }

    #[test]
    fn shooting_phase_needs_both_fleets() {
        let mut game = Match::new("a", "b", 10, 10).unwrap();
        assert_eq!(
            game.set_phase(Phase::Shooting).unwrap_err(),
            EngineError::NotReady(PlayerType::One)
        );
        assert_eq!(game.phase(), Phase::Placement);
    }
}
