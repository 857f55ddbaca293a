use std::collections::HashSet;

use battleship_engine::{
    can_place, random_placement, span, Board, CellContent, Orientation, PlayerState, ShipType,
    BOARD_SIZE, STANDARD_FLEET,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

const N: usize = BOARD_SIZE as usize;

fn orientation() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Horizontal), Just(Orientation::Vertical)]
}

fn fits(origin: (usize, usize), length: usize, o: Orientation) -> bool {
    match o {
        Orientation::Horizontal => origin.0 < N && origin.1 + length <= N,
        Orientation::Vertical => origin.1 < N && origin.0 + length <= N,
    }
}

/// Every placed ship is straight, contiguous, in bounds and owns its cells.
fn assert_fleet_well_formed(side: &PlayerState) {
    let mut seen = HashSet::new();
    for (i, ship) in side.fleet().ships().iter().enumerate() {
        assert!(ship.is_placed(), "{} not placed", ship.name());
        let cells = ship.cells();
        assert_eq!(cells.len(), ship.length());
        let horizontal = cells.iter().all(|&(r, _)| r == cells[0].0);
        let vertical = cells.iter().all(|&(_, c)| c == cells[0].1);
        assert!(horizontal || vertical, "{:?} is not straight", cells);
        for w in cells.windows(2) {
            let step = (w[1].0 - w[0].0) + (w[1].1 - w[0].1);
            assert_eq!(step, 1, "{:?} is not contiguous", cells);
        }
        for &(r, c) in cells {
            assert!(r < N && c < N);
            assert!(seen.insert((r, c)), "({}, {}) used twice", r, c);
            assert_eq!(
                side.board().cell(r, c).unwrap(),
                CellContent::Occupied(battleship_engine::ShipId(i))
            );
        }
    }
    assert_eq!(side.board().ship_map().count_ones(), seen.len());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn can_place_matches_bounds_on_empty_board(
        r in 0..N + 3,
        c in 0..N + 3,
        length in 2usize..=5,
        o in orientation(),
    ) {
        let board = Board::new();
        prop_assert_eq!(can_place(&board, (r, c), length, o), fits((r, c), length, o));
    }

    #[test]
    fn can_place_rejects_any_overlap(
        r1 in 0..N, c1 in 0..N, l1 in 2usize..=5, o1 in orientation(),
        r2 in 0..N, c2 in 0..N, l2 in 2usize..=5, o2 in orientation(),
    ) {
        prop_assume!(fits((r1, c1), l1, o1));
        let catalog = [ShipType::new("first", l1, 1)];
        let mut side = PlayerState::new(&catalog);
        side.place("first", (r1, c1), o1).unwrap();

        let occupied: HashSet<_> = span((r1, c1), l1, o1).flatten().collect();
        let overlaps = span((r2, c2), l2, o2).flatten().any(|cell| occupied.contains(&cell));
        let expected = fits((r2, c2), l2, o2) && !overlaps;
        prop_assert_eq!(can_place(side.board(), (r2, c2), l2, o2), expected);
    }

    #[test]
    fn legal_placement_leaves_other_cells_alone(
        seed in any::<u64>(),
        r in 0..N, c in 0..N, o in orientation(),
    ) {
        let catalog = [ShipType::new("pt", 2, 1), ShipType::new("carrier", 5, 1)];
        let mut side = PlayerState::new(&catalog);
        let mut rng = SmallRng::seed_from_u64(seed);
        let (r0, c0, o0) = random_placement(&mut rng, side.board(), 2, None).unwrap();
        side.place("pt", (r0, c0), o0).unwrap();
        prop_assume!(can_place(side.board(), (r, c), 5, o));

        let before = side.board().clone();
        side.place("carrier", (r, c), o).unwrap();
        let new_cells: HashSet<_> = span((r, c), 5, o).flatten().collect();
        for row in 0..N {
            for col in 0..N {
                if new_cells.contains(&(row, col)) {
                    prop_assert!(side.board().is_occupied(row, col));
                } else {
                    prop_assert_eq!(side.board().cell(row, col), before.cell(row, col));
                }
            }
        }
    }

    #[test]
    fn auto_placement_of_standard_fleet(seed in any::<u64>()) {
        let mut side = PlayerState::new(&STANDARD_FLEET);
        let mut rng = SmallRng::seed_from_u64(seed);
        side.place_remaining(&mut rng, None).unwrap();
        assert_fleet_well_formed(&side);
        prop_assert_eq!(side.board().ship_map().count_ones(), 17);
    }

    #[test]
    fn capped_placement_still_fills_crowded_board(seed in any::<u64>()) {
        // 10 ships of 10 cells cover the whole board; the capped draws fall
        // back to enumeration, which either fills it or reports no legal spot
        let catalog = [ShipType::new("wall", 10, 10)];
        let mut side = PlayerState::new(&catalog);
        let mut rng = SmallRng::seed_from_u64(seed);
        match side.place_remaining(&mut rng, Some(5)) {
            Ok(()) => {
                assert_fleet_well_formed(&side);
                prop_assert_eq!(side.board().ship_map().count_ones(), 100);
            }
            Err(e) => prop_assert_eq!(e, battleship_engine::EngineError::UnableToPlaceShip),
        }
    }
}
