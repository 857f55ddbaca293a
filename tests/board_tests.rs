use battleship_engine::{
    can_place, check_placement, placement, resolve_attack, AttackOutcome, Board, CellContent,
    EngineError, Fleet, Orientation, PlacementError, PlayerState, ShipId, ShipType,
    STANDARD_FLEET,
};

const TWO_SHIPS: [ShipType; 2] = [
    ShipType::new("destroyer", 2, 1),
    ShipType::new("cruiser", 3, 1),
];

#[test]
fn test_place_marks_exactly_span() {
    let mut side = PlayerState::new(&TWO_SHIPS);
    let id = side.place("cruiser", (4, 2), Orientation::Vertical).unwrap();
    assert_eq!(id, ShipId(1));

    let ship = side.fleet().ship(id).unwrap();
    assert_eq!(ship.cells(), &[(4, 2), (5, 2), (6, 2)]);
    assert!(ship.is_placed());
    assert_eq!(side.board().ship_map().count_ones(), 3);
    for r in 4..7 {
        assert_eq!(side.board().cell(r, 2).unwrap(), CellContent::Occupied(id));
    }
    assert_eq!(side.board().cell(7, 2).unwrap(), CellContent::Empty);
}

#[test]
fn test_out_of_bounds_and_overlap_are_distinct() {
    let mut side = PlayerState::new(&TWO_SHIPS);
    side.place("destroyer", (0, 0), Orientation::Horizontal).unwrap();

    assert_eq!(
        check_placement(side.board(), (0, 8), 3, Orientation::Horizontal).unwrap_err(),
        PlacementError::OutOfBounds
    );
    assert_eq!(
        check_placement(side.board(), (0, 1), 3, Orientation::Vertical).unwrap_err(),
        PlacementError::Overlap
    );

    let before = side.clone();
    let err = side.place("cruiser", (0, 1), Orientation::Vertical).unwrap_err();
    assert_eq!(err, EngineError::IllegalPlacement(PlacementError::Overlap));
    assert_eq!(side, before, "failed placement must not change anything");
}

#[test]
fn test_place_twice_and_unknown() {
    let mut side = PlayerState::new(&TWO_SHIPS);
    side.place("destroyer", (0, 0), Orientation::Horizontal).unwrap();
    assert_eq!(
        side.place("destroyer", (5, 5), Orientation::Horizontal).unwrap_err(),
        EngineError::ShipAlreadyPlaced
    );
    assert_eq!(
        side.place("carrier", (5, 5), Orientation::Horizontal).unwrap_err(),
        EngineError::UnknownShipType
    );
}

#[test]
fn test_preview_clips_to_board() {
    let board = Board::new();
    let p = placement::preview(&board, (8, 0), 4, Orientation::Vertical);
    assert_eq!(p.cells, vec![(8, 0), (9, 0)]);
    assert!(!p.legal);

    let p = placement::preview(&board, (2, 3), 4, Orientation::Horizontal);
    assert_eq!(p.cells.len(), 4);
    assert!(p.legal);
}

#[test]
fn test_attack_hit_sink_win() {
    let mut side = PlayerState::new(&TWO_SHIPS);
    side.place("destroyer", (0, 0), Orientation::Horizontal).unwrap();
    side.place("cruiser", (2, 0), Orientation::Horizontal).unwrap();

    assert_eq!(
        resolve_attack(&mut side, 0, 0).unwrap(),
        AttackOutcome::Hit { ship: ShipId(0) }
    );
    assert_eq!(
        resolve_attack(&mut side, 0, 1).unwrap(),
        AttackOutcome::HitAndSunk {
            ship: ShipId(0),
            name: "destroyer"
        }
    );
    assert!(side.is_sunk_cell(0, 0));
    assert_eq!(resolve_attack(&mut side, 5, 5).unwrap(), AttackOutcome::Miss);
    resolve_attack(&mut side, 2, 0).unwrap();
    resolve_attack(&mut side, 2, 1).unwrap();
    assert_eq!(
        resolve_attack(&mut side, 2, 2).unwrap(),
        AttackOutcome::HitAndWin {
            ship: ShipId(1),
            name: "cruiser"
        }
    );
    assert!(side.fleet().all_sunk());
}

#[test]
fn test_repeat_attack_changes_nothing() {
    let mut side = PlayerState::new(&TWO_SHIPS);
    side.place("destroyer", (0, 0), Orientation::Horizontal).unwrap();

    resolve_attack(&mut side, 0, 0).unwrap();
    resolve_attack(&mut side, 9, 9).unwrap();
    let before = side.clone();
    assert_eq!(
        resolve_attack(&mut side, 0, 0).unwrap(),
        AttackOutcome::AlreadyAttacked
    );
    assert_eq!(
        resolve_attack(&mut side, 9, 9).unwrap(),
        AttackOutcome::AlreadyAttacked
    );
    assert_eq!(side, before);
    assert_eq!(side.fleet().ship(ShipId(0)).unwrap().hit_count(), 1);
}

#[test]
fn test_attack_off_board() {
    let mut side = PlayerState::new(&TWO_SHIPS);
    assert_eq!(
        resolve_attack(&mut side, 10, 0).unwrap_err(),
        EngineError::InvalidCoordinate { row: 10, col: 0 }
    );
}

#[test]
fn test_fleet_from_catalog_counts() {
    let catalog = [ShipType::new("sub", 3, 2), ShipType::new("pt", 2, 3)];
    let fleet = Fleet::from_catalog(&catalog);
    assert_eq!(fleet.len(), 5);
    assert_eq!(fleet.unplaced_count(), 5);
    assert!(!fleet.all_sunk());
    assert_eq!(fleet.next_unplaced("pt"), Some(ShipId(2)));

    let standard = Fleet::from_catalog(&STANDARD_FLEET);
    let lengths: Vec<_> = standard.ships().iter().map(|s| s.length()).collect();
    assert_eq!(lengths, vec![5, 4, 3, 3, 2]);
}

#[test]
fn test_duplicate_types_tracked_separately() {
    let catalog = [ShipType::new("pt", 2, 2)];
    let mut side = PlayerState::new(&catalog);
    let a = side.place("pt", (0, 0), Orientation::Horizontal).unwrap();
    let b = side.place("pt", (5, 5), Orientation::Horizontal).unwrap();
    assert_ne!(a, b);

    resolve_attack(&mut side, 5, 5).unwrap();
    assert_eq!(
        resolve_attack(&mut side, 5, 6).unwrap(),
        AttackOutcome::HitAndSunk { ship: b, name: "pt" }
    );
    assert_eq!(side.fleet().ship(a).unwrap().hit_count(), 0);
}

#[test]
fn test_can_place_edges() {
    let board = Board::new();
    assert!(can_place(&board, (0, 5), 5, Orientation::Horizontal));
    assert!(!can_place(&board, (0, 6), 5, Orientation::Horizontal));
    assert!(can_place(&board, (5, 9), 5, Orientation::Vertical));
    assert!(!can_place(&board, (6, 9), 5, Orientation::Vertical));
    assert!(!can_place(&board, (usize::MAX, 0), 2, Orientation::Vertical));
}
