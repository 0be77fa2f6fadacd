#![cfg(feature = "std")]

use std::sync::Arc;

use rand::rngs::SmallRng;
use tokio::sync::{Mutex, MutexGuard};

use crate::{
    command::Command,
    common::{Coordinate, Direction, EngineError, ShotReport},
    decision::Decider,
    game::{Match, MatchState, Phase},
    player::PlayerType,
    ship::ShipType,
    weapon::WeaponType,
};

/// A match behind one exclusive lock. Every call holds the lock for the
/// whole operation, so concurrent callers never interleave inside a
/// check-then-mutate sequence. Separate handles share nothing.
#[derive(Clone)]
pub struct SharedMatch {
    inner: Arc<Mutex<Match>>,
}

impl SharedMatch {
    pub fn new(game: Match) -> Self {
        Self {
            inner: Arc::new(Mutex::new(game)),
        }
    }

    /// Exclusive access for callers that need several operations in a row.
    pub async fn lock(&self) -> MutexGuard<'_, Match> {
        self.inner.lock().await
    }

    pub async fn place(
        &self,
        player: PlayerType,
        ship_type: ShipType,
        coordinate: Coordinate,
        direction: Direction,
    ) -> Result<(), EngineError> {
        self.lock()
            .await
            .place(player, ship_type, coordinate, direction)
    }

    pub async fn shoot(
        &self,
        player: PlayerType,
        target: Coordinate,
        weapon: WeaponType,
    ) -> Result<bool, EngineError> {
        self.lock().await.shoot(player, target, weapon)
    }

    pub async fn fire(
        &self,
        player: PlayerType,
        target: Coordinate,
        weapon: WeaponType,
    ) -> Result<ShotReport, EngineError> {
        self.lock().await.fire(player, target, weapon)
    }

    pub async fn apply(
        &self,
        player: PlayerType,
        command: &Command,
    ) -> Result<Option<ShotReport>, EngineError> {
        self.lock().await.apply(player, command)
    }

    /// Ask `decider` for `player`'s next command and carry it out under a
    /// single lock, so the decision sees the state it is applied to.
    pub async fn play_turn<D: Decider + ?Sized>(
        &self,
        player: PlayerType,
        decider: &mut D,
        rng: &mut SmallRng,
    ) -> Result<(Command, Option<ShotReport>), EngineError> {
        let mut game = self.lock().await;
        let command = decider.decide(rng, &game.view(player));
        let report = game.apply(player, &command)?;
        Ok((command, report))
    }

    pub async fn clean_map_before_place(&self, player: PlayerType) -> Result<(), EngineError> {
        self.lock().await.clean_map_before_place(player)
    }

    pub async fn set_phase(&self, phase: Phase) -> Result<(), EngineError> {
        self.lock().await.set_phase(phase)
    }

    pub async fn phase(&self) -> Phase {
        self.lock().await.phase()
    }

    pub async fn next_round(&self) -> u32 {
        self.lock().await.next_round()
    }

    pub async fn winner(&self) -> Option<PlayerType> {
        self.lock().await.winner()
    }

    pub async fn state(&self) -> MatchState {
        self.lock().await.state()
    }
}
