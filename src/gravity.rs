//! Gravity: compact columns after removals, then refill the gaps.

use crate::error::BoardError;
use crate::grid::{Grid, Pos};
use crate::item::{Item, NormalType};
use rand::Rng;

/// One item moved by [`shift_down`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fall {
    pub from: Pos,
    pub to: Pos,
}

/// Drop every item down by the number of empty cells below it in its column.
///
/// Single bottom-to-top pass per column; relative order within a column is kept.
pub fn shift_down(grid: &mut Grid) -> Result<Vec<Fall>, BoardError> {
    let mut falls = Vec::new();
    for x in 0..grid.width() {
        let mut shifts = 0usize;
        for y in 0..grid.height() {
            let from = Pos::new(x, y);
            if grid.is_empty(from) {
                shifts += 1;
                continue;
            }
            if shifts == 0 {
                continue;
            }
            let to = Pos::new(x, y - shifts);
            let item = grid.free(from)?;
            grid.assign(to, item)?;
            falls.push(Fall { from, to });
        }
    }
    Ok(falls)
}

/// Give every empty cell a uniformly drawn normal item from `types`.
///
/// Columns left to right, each column top to bottom. Returns the placed cells in
/// that order.
pub fn fill_gaps<R: Rng + ?Sized>(
    grid: &mut Grid,
    types: &[NormalType],
    rng: &mut R,
) -> Result<Vec<(Pos, NormalType)>, BoardError> {
    if types.is_empty() {
        return Err(BoardError::EmptyPool);
    }
    let mut placed = Vec::new();
    for x in 0..grid.width() {
        for y in (0..grid.height()).rev() {
            let pos = Pos::new(x, y);
            if !grid.is_empty(pos) {
                continue;
            }
            let t = types[rng.gen_range(0..types.len())];
            grid.assign(pos, Item::Normal(t))?;
            placed.push((pos, t));
        }
    }
    Ok(placed)
}

/// No empty cell sits below an occupied one in any column.
pub fn is_settled(grid: &Grid) -> bool {
    (0..grid.width()).all(|x| {
        let mut seen_gap = false;
        (0..grid.height()).all(|y| {
            let empty = grid.is_empty(Pos::new(x, y));
            let ok = empty || !seen_gap;
            seen_gap |= empty;
            ok
        })
    })
}
