//! Match detection: contiguous same-type runs, their geometry, and bonus conversion.

use crate::error::BoardError;
use crate::grid::{Direction, Grid, Pos};
use crate::item::{BonusKind, Item};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// (positive, negative) walking directions.
    fn directions(self) -> (Direction, Direction) {
        match self {
            Self::Horizontal => (Direction::Right, Direction::Left),
            Self::Vertical => (Direction::Up, Direction::Down),
        }
    }
}

/// Shape of a qualifying match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchDirection {
    Horizontal,
    Vertical,
    All,
}

impl MatchDirection {
    pub fn bonus(self) -> BonusKind {
        match self {
            Self::Horizontal => BonusKind::Horizontal,
            Self::Vertical => BonusKind::Vertical,
            Self::All => BonusKind::All,
        }
    }
}

/// Result of [`convert_to_bonus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusConversion {
    pub pos: Pos,
    pub kind: BonusKind,
    /// Whatever the chosen cell held before; discarded.
    pub replaced: Option<Item>,
}

/// Maximal run of same-type cells through `origin` along `axis`.
///
/// The origin comes first, then cells in the positive direction (right/up), then the
/// negative direction (left/down), each in walking order.
pub fn run_from(grid: &Grid, origin: Pos, axis: Axis) -> Vec<Pos> {
    let mut run = vec![origin];
    let (forward, backward) = axis.directions();
    for dir in [forward, backward] {
        let mut current = origin;
        while let Some(next) = grid.neighbour(current, dir) {
            if !grid.same_type(origin, next) {
                break;
            }
            run.push(next);
            current = next;
        }
    }
    run
}

/// Classify a run. `None` when it is shorter than `match_min` or irregular and not
/// longer than five cells.
pub fn classify(run: &[Pos], match_min: usize) -> Option<MatchDirection> {
    let first = run.first()?;
    if run.len() < match_min {
        return None;
    }
    if run.iter().all(|p| p.x == first.x) {
        return Some(MatchDirection::Vertical);
    }
    if run.iter().all(|p| p.y == first.y) {
        return Some(MatchDirection::Horizontal);
    }
    if run.len() > 5 {
        return Some(MatchDirection::All);
    }
    None
}

/// Drop bonus cells whose orientation differs from the run's own direction.
///
/// Runs without bonus cells come back untouched. A run holding a bonus but with no
/// valid direction keeps nothing.
pub fn filter_for_bonus_compatibility(grid: &Grid, run: &[Pos], match_min: usize) -> Vec<Pos> {
    let has_bonus = run.iter().any(|&p| grid.get(p).is_some_and(|i| i.is_bonus()));
    if !has_bonus {
        return run.to_vec();
    }
    let Some(direction) = classify(run, match_min) else {
        return Vec::new();
    };
    let wanted = direction.bonus();
    run.iter()
        .copied()
        .filter(|&p| match grid.get(p) {
            Some(Item::Normal(_)) | None => true,
            Some(Item::Bonus(kind)) => kind == wanted,
        })
        .collect()
}

/// Turn one cell of `run` into a bonus matching the run's direction.
///
/// The bonus goes to `preferred` when given, otherwise to a random run cell. Returns
/// `Ok(None)` when the run does not classify.
pub fn convert_to_bonus<R: Rng + ?Sized>(
    grid: &mut Grid,
    run: &[Pos],
    preferred: Option<Pos>,
    match_min: usize,
    rng: &mut R,
) -> Result<Option<BonusConversion>, BoardError> {
    let Some(direction) = classify(run, match_min) else {
        return Ok(None);
    };
    let pos = match preferred {
        Some(p) => p,
        None => run[rng.gen_range(0..run.len())],
    };
    let kind = direction.bonus();
    let replaced = grid.take(pos);
    grid.assign(pos, Item::Bonus(kind))?;
    Ok(Some(BonusConversion { pos, kind, replaced }))
}

/// Union of the qualifying horizontal and vertical runs through `pos`.
pub fn matches_at(grid: &Grid, pos: Pos, match_min: usize) -> Vec<Pos> {
    let mut out: Vec<Pos> = Vec::new();
    for axis in [Axis::Horizontal, Axis::Vertical] {
        let run = run_from(grid, pos, axis);
        if run.len() >= match_min {
            for p in run {
                if !out.contains(&p) {
                    out.push(p);
                }
            }
        }
    }
    out
}

/// First qualifying run in scan order (columns left to right, bottom to top,
/// horizontal before vertical).
pub fn find_first_match(grid: &Grid, match_min: usize) -> Option<Vec<Pos>> {
    grid.positions().filter(|&p| !grid.is_empty(p)).find_map(|p| {
        [Axis::Horizontal, Axis::Vertical]
            .into_iter()
            .map(|axis| run_from(grid, p, axis))
            .find(|run| run.len() >= match_min)
    })
}

/// Like [`find_first_match`], but returns the bonus-filtered cells and skips runs the
/// filter would empty. Those runs can never clear, so a cascade must look past them.
pub fn find_first_resolvable(grid: &Grid, match_min: usize) -> Option<Vec<Pos>> {
    grid.positions().filter(|&p| !grid.is_empty(p)).find_map(|p| {
        [Axis::Horizontal, Axis::Vertical]
            .into_iter()
            .map(|axis| run_from(grid, p, axis))
            .filter(|run| run.len() >= match_min)
            .map(|run| filter_for_bonus_compatibility(grid, &run, match_min))
            .find(|cells| !cells.is_empty())
    })
}
