//! Potential-match scan: three same-type cells one legal swap away from a match.
//!
//! Used for hints while the board is idle. An empty result means no move exists and
//! the board should be reshuffled. The scan never mutates the grid.

use crate::grid::{Direction, Grid, Pos};

/// Order in which a cell's adjacent pairs are tried.
const PAIR_DIRECTIONS: [Direction; 4] = [
    Direction::Right,
    Direction::Up,
    Direction::Down,
    Direction::Left,
];

/// First potential match in scan order, or an empty list when the board has no move.
pub fn potential_matches(grid: &Grid) -> Vec<Pos> {
    grid.positions()
        .find_map(|pos| potential_match_at(grid, pos))
        .map(|found| found.to_vec())
        .unwrap_or_default()
}

fn potential_match_at(grid: &Grid, cell: Pos) -> Option<[Pos; 3]> {
    // Pair plus gap:
    //   * * * ? *
    //   * & & * ?
    //   * * * ? *
    for dir in PAIR_DIRECTIONS {
        let Some(neighbour) = grid.neighbour(cell, dir) else {
            continue;
        };
        if let Some(found) = pair_with_gap(grid, cell, neighbour, grid.neighbour(neighbour, dir)) {
            return Some(found);
        }
    }

    // Split pair, third member beside the middle cell:
    //   * * ? * *
    //   * & * & *
    //   * * ? * *
    let split = [
        (Direction::Right, [Direction::Up, Direction::Down]),
        (Direction::Up, [Direction::Right, Direction::Left]),
    ];
    for (dir, lateral) in split {
        let Some(middle) = grid.neighbour(cell, dir) else {
            continue;
        };
        let Some(far) = grid.neighbour(middle, dir) else {
            continue;
        };
        if !grid.same_type(far, cell) || grid.same_type(middle, cell) {
            continue;
        }
        let second = lateral
            .into_iter()
            .filter_map(|side| grid.neighbour(middle, side))
            .find(|&p| grid.same_type(p, cell));
        if let Some(second) = second {
            return Some([cell, far, second]);
        }
    }
    None
}

/// `cell` and `neighbour` form a pair; look around the gap beyond them for a third.
fn pair_with_gap(grid: &Grid, cell: Pos, neighbour: Pos, gap: Option<Pos>) -> Option<[Pos; 3]> {
    if !grid.same_type(cell, neighbour) {
        return None;
    }
    let gap = gap?;
    if grid.same_type(gap, neighbour) {
        return None;
    }
    Direction::ALL
        .into_iter()
        .filter_map(|dir| grid.neighbour(gap, dir))
        .find(|&p| p != neighbour && grid.same_type(p, neighbour))
        .map(|third| [cell, neighbour, third])
}
