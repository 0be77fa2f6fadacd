use battleships::{
    Armory, Command, Coordinate, Direction, EngineError, FleetCatalog, GameConfig, Match, Phase,
    Player, PlayerType, ShipType, ShotResult, WeaponType,
};

/// Every ship on its own row, Destroyer at the origin facing east.
const LAYOUT: [(ShipType, Coordinate, Direction); 5] = [
    (ShipType::Destroyer, Coordinate::new(0, 0), Direction::East),
    (ShipType::Carrier, Coordinate::new(0, 2), Direction::East),
    (ShipType::Battleship, Coordinate::new(0, 4), Direction::East),
    (ShipType::Cruiser, Coordinate::new(0, 6), Direction::East),
    (ShipType::Submarine, Coordinate::new(0, 8), Direction::East),
];

fn place_fleet(game: &mut Match, player: PlayerType) {
    for (ship_type, c, d) in LAYOUT {
        game.place(player, ship_type, c, d).unwrap();
    }
}

fn ready_match() -> Match {
    let mut game = Match::new("alice", "bob", 10, 10).unwrap();
    place_fleet(&mut game, PlayerType::One);
    place_fleet(&mut game, PlayerType::Two);
    game.set_phase(Phase::Shooting).unwrap();
    game
}

#[test]
fn test_new_match_defaults() {
    let game = Match::new("alice", "bob", 10, 10).unwrap();
    assert_eq!(game.phase(), Phase::Placement);
    assert_eq!(game.phase() as u8, 1);
    assert_eq!(game.current_round(), 1);
    assert_eq!(game.map_size(), 10);
    assert_eq!(game.player(PlayerType::One).name(), "alice");
    assert_eq!(game.player(PlayerType::One).key(), 'A');
    assert_eq!(game.opponent_player(PlayerType::One).name(), "bob");
    assert_eq!(game.opponent_player(PlayerType::Two).key(), 'A');
    assert_eq!(game.own_grid(PlayerType::Two).owner(), PlayerType::Two);
    assert_eq!(game.opponent_grid(PlayerType::Two).owner(), PlayerType::One);
    assert!(!game.both_ready());
}

#[test]
fn test_destroyer_scenario() {
    let mut game = ready_match();
    let one = PlayerType::One;

    assert!(game.shoot(one, Coordinate::new(1, 0), WeaponType::SingleShot).unwrap());
    assert!(!game.was_ship_destroyed(one, Coordinate::new(1, 0)));

    assert!(game.shoot(one, Coordinate::new(0, 0), WeaponType::SingleShot).unwrap());
    assert!(game.was_ship_destroyed(one, Coordinate::new(0, 0)));
    assert!(game.was_ship_destroyed(one, Coordinate::new(1, 0)));
    // player two's own destroyer is untouched
    assert!(!game.was_ship_destroyed(PlayerType::Two, Coordinate::new(0, 0)));

    assert!(!game.shoot(one, Coordinate::new(5, 5), WeaponType::SingleShot).unwrap());
    assert!(!game.was_ship_destroyed(one, Coordinate::new(5, 5)));

    assert_eq!(
        game.shoot(one, Coordinate::new(5, 5), WeaponType::SingleShot)
            .unwrap_err(),
        EngineError::DuplicateShot(Coordinate::new(5, 5))
    );
}

#[test]
fn test_cruiser_sinks_on_third_hit() {
    let mut game = ready_match();
    let two = PlayerType::Two;
    for x in 0..2 {
        let report = game
            .fire(two, Coordinate::new(x, 6), WeaponType::SingleShot)
            .unwrap();
        assert_eq!(report.cells[0].result, ShotResult::Hit(ShipType::Cruiser));
        assert!(!game.was_ship_destroyed(two, Coordinate::new(x, 6)));
    }
    let report = game
        .fire(two, Coordinate::new(2, 6), WeaponType::SingleShot)
        .unwrap();
    assert_eq!(report.cells[0].result, ShotResult::Sunk(ShipType::Cruiser));
    assert!(game.was_ship_destroyed(two, Coordinate::new(2, 6)));
}

#[test]
fn test_shoot_requires_own_fleet_ready() {
    let mut game = Match::new("alice", "bob", 10, 10).unwrap();
    place_fleet(&mut game, PlayerType::Two);
    for (ship_type, c, d) in &LAYOUT[..4] {
        game.place(PlayerType::One, *ship_type, *c, *d).unwrap();
    }
    assert_eq!(
        game.shoot(PlayerType::One, Coordinate::new(0, 0), WeaponType::SingleShot)
            .unwrap_err(),
        EngineError::NotReady(PlayerType::One)
    );
    assert!(!game.opponent_grid(PlayerType::One).was_shot(Coordinate::new(0, 0)));

    // player two is ready but shooting waits for the Shooting phase
    assert_eq!(
        game.shoot(PlayerType::Two, Coordinate::new(0, 0), WeaponType::SingleShot)
            .unwrap_err(),
        EngineError::WrongPhase(Phase::Placement)
    );
    assert!(!game.opponent_grid(PlayerType::Two).was_shot(Coordinate::new(0, 0)));
}

#[test]
fn test_no_shots_while_opponent_is_placing() {
    let mut game = Match::new("alice", "bob", 10, 10).unwrap();
    place_fleet(&mut game, PlayerType::One);
    assert_eq!(
        game.shoot(PlayerType::One, Coordinate::new(0, 0), WeaponType::SingleShot)
            .unwrap_err(),
        EngineError::WrongPhase(Phase::Placement)
    );

    // the cell stays fresh, so the ship placed on it can still be sunk
    place_fleet(&mut game, PlayerType::Two);
    game.set_phase(Phase::Shooting).unwrap();
    assert!(game.shoot(PlayerType::One, Coordinate::new(0, 0), WeaponType::SingleShot).unwrap());
    assert!(game.shoot(PlayerType::One, Coordinate::new(1, 0), WeaponType::SingleShot).unwrap());
    assert!(game.was_ship_destroyed(PlayerType::One, Coordinate::new(0, 0)));

    let restored = Match::from_bytes(&game.to_bytes().unwrap()).unwrap();
    assert_eq!(restored.state(), game.state());
}

#[test]
fn test_oversized_map_rejected() {
    assert_eq!(
        Match::new("alice", "bob", usize::MAX, 2).unwrap_err(),
        EngineError::InvalidDimensions {
            width: usize::MAX,
            height: 2
        }
    );
    assert!(matches!(
        Match::new("alice", "bob", 0, 10),
        Err(EngineError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_place_errors_through_match() {
    let mut game = Match::new("alice", "bob", 10, 10).unwrap();
    let one = PlayerType::One;
    game.place(one, ShipType::Destroyer, Coordinate::new(0, 0), Direction::East)
        .unwrap();
    assert!(!game.can_place(one, ShipType::Destroyer, Coordinate::new(4, 4), Direction::East));
    assert_eq!(
        game.place(one, ShipType::Destroyer, Coordinate::new(4, 4), Direction::East)
            .unwrap_err(),
        EngineError::AlreadyPlaced(ShipType::Destroyer)
    );
    assert!(!game.can_place(one, ShipType::Cruiser, Coordinate::new(0, 0), Direction::North));
    assert_eq!(
        game.place(one, ShipType::Cruiser, Coordinate::new(0, 0), Direction::North)
            .unwrap_err(),
        EngineError::Overlap(Coordinate::new(0, 0))
    );
    // the other player's grid is independent
    assert!(game.can_place(PlayerType::Two, ShipType::Cruiser, Coordinate::new(0, 0), Direction::North));
}

#[test]
fn test_unknown_ship_type_with_custom_fleet() {
    let config = GameConfig {
        fleet: FleetCatalog::new([ShipType::Destroyer, ShipType::Submarine]).unwrap(),
        ..GameConfig::square(6)
    };
    let mut game = Match::with_config("alice", "bob", &config).unwrap();
    assert_eq!(
        game.place(PlayerType::One, ShipType::Carrier, Coordinate::new(0, 0), Direction::East)
            .unwrap_err(),
        EngineError::UnknownShipType(ShipType::Carrier)
    );
    assert!(!game.can_place(PlayerType::One, ShipType::Carrier, Coordinate::new(0, 0), Direction::East));
}

#[test]
fn test_unknown_weapon() {
    let config = GameConfig {
        armory: Armory::single_shot_only(),
        ..GameConfig::default()
    };
    let mut game = Match::with_config("alice", "bob", &config).unwrap();
    place_fleet(&mut game, PlayerType::One);
    place_fleet(&mut game, PlayerType::Two);
    game.set_phase(Phase::Shooting).unwrap();
    assert_eq!(
        game.shoot(PlayerType::One, Coordinate::new(3, 3), WeaponType::CornerShot)
            .unwrap_err(),
        EngineError::UnknownWeapon(WeaponType::CornerShot)
    );
}

#[test]
fn test_clean_map_only_during_placement() {
    let mut game = Match::new("alice", "bob", 10, 10).unwrap();
    place_fleet(&mut game, PlayerType::One);
    game.clean_map_before_place(PlayerType::One).unwrap();
    assert!(!game.own_grid(PlayerType::One).is_ready());
    assert_eq!(game.own_grid(PlayerType::One).occupancy().count_ones(), 0);
    place_fleet(&mut game, PlayerType::One);
    place_fleet(&mut game, PlayerType::Two);
    game.set_phase(Phase::Shooting).unwrap();

    assert_eq!(
        game.clean_map_before_place(PlayerType::One).unwrap_err(),
        EngineError::WrongPhase(Phase::Shooting)
    );
    assert_eq!(
        game.place(PlayerType::One, ShipType::Destroyer, Coordinate::new(9, 9), Direction::South)
            .unwrap_err(),
        EngineError::WrongPhase(Phase::Shooting)
    );
    assert!(game.own_grid(PlayerType::One).is_ready());
}

#[test]
fn test_no_shots_after_finish() {
    let mut game = ready_match();
    game.set_phase(Phase::Finished).unwrap();
    assert_eq!(
        game.shoot(PlayerType::One, Coordinate::new(0, 0), WeaponType::SingleShot)
            .unwrap_err(),
        EngineError::WrongPhase(Phase::Finished)
    );
}

#[test]
fn test_winner_after_whole_fleet_sunk() {
    let mut game = ready_match();
    assert_eq!(game.winner(), None);
    for (ship_type, origin, _) in LAYOUT {
        for x in 0..ship_type.length() {
            game.shoot(
                PlayerType::Two,
                Coordinate::new(origin.x + x, origin.y),
                WeaponType::SingleShot,
            )
            .unwrap();
        }
    }
    assert!(game.own_grid(PlayerType::One).all_sunk());
    assert_eq!(game.winner(), Some(PlayerType::Two));
}

#[test]
fn test_register_player_is_bookkeeping_only() {
    let mut game = ready_match();
    let before = game.own_grid(PlayerType::One).ships().to_vec();
    game.register_player(Player::new("observer", PlayerType::One));
    assert_eq!(game.registered_players().len(), 1);
    assert_eq!(game.registered_players()[0].name(), "observer");
    assert_eq!(game.own_grid(PlayerType::One).ships(), before.as_slice());
    assert_eq!(game.phase(), Phase::Shooting);
}

#[test]
fn test_apply_commands() {
    let mut game = Match::new("alice", "bob", 10, 10).unwrap();
    for player in PlayerType::BOTH {
        for (ship_type, coordinate, direction) in LAYOUT {
            let command = Command::Place {
                ship_type,
                coordinate,
                direction,
            };
            assert_eq!(game.apply(player, &command).unwrap(), None);
        }
    }
    assert!(game.both_ready());
    assert_eq!(
        game.apply(PlayerType::One, &Command::fire_at(1, 0)).unwrap_err(),
        EngineError::WrongPhase(Phase::Placement)
    );
    game.set_phase(Phase::Shooting).unwrap();
    assert_eq!(game.apply(PlayerType::One, &Command::DoNothing).unwrap(), None);

    let report = game
        .apply(PlayerType::One, &Command::fire_at(1, 0))
        .unwrap()
        .unwrap();
    assert_eq!(report.cells[0].result, ShotResult::Hit(ShipType::Destroyer));

    // cross shot centred at (0, 1): (-1, 1) is off the grid
    let command: Command = "6,0,1".parse().unwrap();
    let report = game.apply(PlayerType::One, &command).unwrap().unwrap();
    assert_eq!(report.cells.len(), 4);
    assert!(report.is_hit());
    assert_eq!(report.sunk().collect::<Vec<_>>(), vec![ShipType::Destroyer]);
}

#[test]
fn test_round_counter() {
    let mut game = ready_match();
    assert_eq!(game.next_round(), 2);
    assert_eq!(game.next_round(), 3);
    assert_eq!(game.current_round(), 3);
}

#[test]
fn test_round_counter_saturates() {
    let mut state = ready_match().state();
    state.current_round = u32::MAX;
    let mut game = Match::try_from(state).unwrap();
    assert_eq!(game.next_round(), u32::MAX);
    assert_eq!(game.current_round(), u32::MAX);
}
