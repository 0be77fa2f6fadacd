use battleships::{project, Coordinate, Direction, EngineError, Ship, ShipType};

#[test]
fn test_project_each_direction() -> Result<(), EngineError> {
    let origin = Coordinate::new(4, 4);
    assert_eq!(
        project(3, origin, Direction::North, 10, 10)?,
        vec![Coordinate::new(4, 4), Coordinate::new(4, 5), Coordinate::new(4, 6)]
    );
    assert_eq!(
        project(3, origin, Direction::South, 10, 10)?,
        vec![Coordinate::new(4, 4), Coordinate::new(4, 3), Coordinate::new(4, 2)]
    );
    assert_eq!(
        project(2, origin, Direction::East, 10, 10)?,
        vec![Coordinate::new(4, 4), Coordinate::new(5, 4)]
    );
    assert_eq!(
        project(2, origin, Direction::West, 10, 10)?,
        vec![Coordinate::new(4, 4), Coordinate::new(3, 4)]
    );
    Ok(())
}

#[test]
fn test_project_never_wraps() {
    assert_eq!(
        project(5, Coordinate::new(0, 7), Direction::North, 10, 10).unwrap_err(),
        EngineError::OutOfBounds(Coordinate::new(0, 10))
    );
    assert!(matches!(
        project(2, Coordinate::new(3, 0), Direction::South, 10, 10),
        Err(EngineError::OutOfBounds(_))
    ));
    // the whole ship fits exactly against the edge
    assert!(project(5, Coordinate::new(5, 0), Direction::East, 10, 10).is_ok());
}

#[test]
fn test_new_ship_is_unplaced() {
    let ship = Ship::new(ShipType::Battleship);
    assert!(!ship.placed());
    assert!(!ship.destroyed());
    assert!(ship.cells().is_empty());
    assert_eq!(ship.length(), 4);
}

#[test]
fn test_ship_type_names() {
    for t in ShipType::ALL {
        assert_eq!(t.to_string().parse::<ShipType>().unwrap(), t);
    }
    assert_eq!("SUBMARINE".parse::<ShipType>().unwrap(), ShipType::Submarine);
    assert_eq!(ShipType::Carrier.length(), 5);
    assert_eq!(ShipType::Destroyer.length(), 2);
}
