use proptest::prelude::*;

use game::board::{Board, Direction, SIZE, compress_line, merge_line, slide_line};

fn tile() -> impl Strategy<Value = u32> {
    prop_oneof![3 => Just(0u32), 5 => (1u32..=11).prop_map(|exp| 1 << exp)]
}

fn board() -> impl Strategy<Value = Board> {
    prop::array::uniform4(prop::array::uniform4(tile()))
        .prop_map(|rows| Board::from_rows(rows).expect("generated tiles are powers of two"))
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

proptest! {
    #[test]
    fn shift_conserves_sum_and_never_adds_tiles(b in board(), dir in direction()) {
        let (after, _) = b.shifted(dir);
        prop_assert_eq!(after.sum(), b.sum());
        prop_assert!(after.occupied_count() <= b.occupied_count());
    }

    #[test]
    fn reported_no_op_means_identical_board(b in board(), dir in direction()) {
        let (after, moved) = b.shifted(dir);
        prop_assert_eq!(moved, after != b);
    }

    #[test]
    fn merge_free_shift_is_idempotent(b in board(), dir in direction()) {
        let (once, _) = b.shifted(dir);
        if once.occupied_count() == b.occupied_count() {
            prop_assert!(!once.shifted(dir).1);
        }
    }

    #[test]
    fn repeated_shift_settles_within_four_moves(b in board(), dir in direction()) {
        let mut current = b;
        for _ in 0..SIZE {
            current.shift(dir);
        }
        prop_assert!(!current.shifted(dir).1);
    }

    #[test]
    fn values_stay_powers_of_two(b in board(), dir in direction()) {
        let (after, _) = b.shifted(dir);
        for &value in after.rows().iter().flatten() {
            prop_assert!(value == 0 || (value >= 2 && value.is_power_of_two()));
        }
    }

    #[test]
    fn game_over_iff_no_direction_moves(b in board()) {
        // An empty board cannot move either, but it is not a lost game.
        prop_assume!(b.occupied_count() > 0);
        let stuck = Direction::ALL.iter().all(|&dir| !b.shifted(dir).1);
        prop_assert_eq!(b.is_game_over(), stuck);
    }

    #[test]
    fn slide_is_compress_merge_compress(line in prop::array::uniform4(tile())) {
        let slid = slide_line(line);
        prop_assert_eq!(slid, compress_line(merge_line(compress_line(line))));
        // Packed toward index 0.
        let zeros_from = slid.iter().position(|&v| v == 0).unwrap_or(SIZE);
        prop_assert!(slid[zeros_from..].iter().all(|&v| v == 0));
    }
}
