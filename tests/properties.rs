//! Property tests over fill, gravity, and match classification.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tripletile::gravity::{fill_gaps, is_settled, shift_down};
use tripletile::matcher::{MatchDirection, classify};
use tripletile::{Board, GameSettings, Grid, Item, NormalType, Pos};

proptest! {
    #[test]
    fn fill_occupies_every_cell(width in 1usize..12, height in 1usize..12, types in 2usize..=7, seed in any::<u64>()) {
        let settings = GameSettings {
            board_size_x: width,
            board_size_y: height,
            type_count: types,
            ..GameSettings::default()
        };
        let mut board = Board::new(settings, seed);
        board.fill().unwrap();
        prop_assert_eq!(board.remained_board_item(), width * height);
        prop_assert_eq!(board.grid().occupied_count(), width * height);
    }

    #[test]
    fn refill_keeps_column_order(
        cells in prop::collection::vec(prop::option::of(0usize..7), 30),
        seed in any::<u64>(),
    ) {
        let mut grid = Grid::new(5, 6);
        for (i, cell) in cells.iter().enumerate() {
            if let Some(k) = cell {
                grid.assign(Pos::new(i % 5, i / 5), Item::Normal(NormalType::ALL[*k])).unwrap();
            }
        }
        let columns_before: Vec<Vec<Item>> = (0..5)
            .map(|x| (0..6).filter_map(|y| grid.get(Pos::new(x, y))).collect())
            .collect();

        shift_down(&mut grid).unwrap();
        let mut rng = SmallRng::seed_from_u64(seed);
        fill_gaps(&mut grid, &NormalType::ALL, &mut rng).unwrap();

        prop_assert!(is_settled(&grid));
        prop_assert_eq!(grid.occupied_count(), 30);
        for (x, before) in columns_before.iter().enumerate() {
            let bottom: Vec<Item> = (0..before.len()).filter_map(|y| grid.get(Pos::new(x, y))).collect();
            prop_assert_eq!(&bottom, before);
        }
    }

    #[test]
    fn straight_runs_classify_by_axis(fixed in 0usize..8, start in 0usize..4, len in 1usize..8) {
        let column: Vec<Pos> = (start..start + len).map(|y| Pos::new(fixed, y)).collect();
        let row: Vec<Pos> = (start..start + len).map(|x| Pos::new(x, fixed)).collect();
        if len < 3 {
            prop_assert_eq!(classify(&column, 3), None);
            prop_assert_eq!(classify(&row, 3), None);
        } else {
            prop_assert_eq!(classify(&column, 3), Some(MatchDirection::Vertical));
            prop_assert_eq!(classify(&row, 3), Some(MatchDirection::Horizontal));
        }
    }

    #[test]
    fn crosses_longer_than_five_are_all(arm in 3usize..6) {
        let centre = Pos::new(5, 5);
        let mut run = vec![centre];
        for d in 1..=arm {
            run.push(Pos::new(5 + d, 5));
            run.push(Pos::new(5, 5 + d));
        }
        prop_assume!(run.len() > 5);
        prop_assert_eq!(classify(&run, 3), Some(MatchDirection::All));
    }
}

#[test]
fn short_bent_runs_do_not_match() {
    let l_shape = [Pos::new(0, 0), Pos::new(1, 0), Pos::new(2, 0), Pos::new(0, 1), Pos::new(0, 2)];
    assert_eq!(classify(&l_shape, 3), None);
    assert_eq!(classify(&l_shape[..2], 3), None);
}
