//! Board: the main grid, the collector lane, and swap cascades.
//!
//! Every operation applies its state changes before returning. A cascade is a
//! sequence of settled phases (explode, shift, refill, rescan); hosts that animate
//! can advance it one phase at a time with [`Board::step`], others call
//! [`Board::swap`], which drains it.

use crate::collector::{BottomCollector, Placement, Settlement};
use crate::error::BoardError;
use crate::gravity::{self, Fall};
use crate::grid::{Grid, Pos};
use crate::hint;
use crate::item::{BonusKind, Item, NormalType};
use crate::matcher::{self, BonusConversion};
use crate::pool::TypePool;
use crate::settings::GameSettings;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, info, warn};

/// Explode rounds one cascade may run before it is cut off.
const MAX_CASCADE_ROUNDS: usize = 100;

/// Terminal events raised to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Win,
    Lose,
}

/// Result of sending a cell to the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    /// Empty cell, bonus cell, or full lane; nothing changed.
    Ignored,
    Collected {
        from: Pos,
        placement: Placement,
        settlement: Settlement,
    },
}

impl CollectOutcome {
    /// Win wins over lose when both hold.
    pub fn signal(&self) -> Option<Signal> {
        match self {
            Self::Ignored => None,
            Self::Collected { settlement, .. } if settlement.win => Some(Signal::Win),
            Self::Collected { settlement, .. } if settlement.lose => Some(Signal::Lose),
            Self::Collected { .. } => None,
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}

/// One settled cascade phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeStep {
    /// A match found by the rescan; it explodes next.
    Matched(Vec<Pos>),
    Exploded {
        cells: Vec<Pos>,
        bonus: Option<BonusConversion>,
        /// Collectible tokens left on the grid after the explosion.
        remained: usize,
    },
    Shifted(Vec<Fall>),
    Refilled(Vec<(Pos, NormalType)>),
    Reshuffled,
    /// Stable with at least one move available.
    Settled { hint: Vec<Pos> },
    /// Stable, and reshuffling gave up finding a move.
    NoMoves,
    /// Cut off after too many rounds; matches may remain on the board.
    Exhausted,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub steps: Vec<CascadeStep>,
}

impl CascadeReport {
    /// Cells exploded over the whole cascade.
    pub fn exploded(&self) -> usize {
        self.steps
            .iter()
            .map(|s| match s {
                CascadeStep::Exploded { cells, .. } => cells.len(),
                _ => 0,
            })
            .sum()
    }

    pub fn bonuses(&self) -> Vec<BonusConversion> {
        self.steps
            .iter()
            .filter_map(|s| match s {
                CascadeStep::Exploded { bonus, .. } => *bonus,
                _ => None,
            })
            .collect()
    }

    /// Hint from the final settle, empty when the cascade ended without moves.
    pub fn hint(&self) -> &[Pos] {
        match self.steps.last() {
            Some(CascadeStep::Settled { hint }) => hint,
            _ => &[],
        }
    }

    pub fn is_stuck(&self) -> bool {
        matches!(
            self.steps.last(),
            Some(CascadeStep::NoMoves | CascadeStep::Exhausted)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// No qualifying match; the items were swapped back.
    Reverted,
    Resolved(CascadeReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Explode {
        cells: Vec<Pos>,
        preferred: Option<Pos>,
        convert: bool,
    },
    Detonate(Pos),
    Gravity,
    Refill,
    Rescan,
}

#[derive(Debug, Clone)]
pub struct Board {
    settings: GameSettings,
    grid: Grid,
    collector: BottomCollector,
    /// Normal tokens on the main grid.
    remained_board_item: usize,
    rng: SmallRng,
    pending: Option<Phase>,
    reshuffles: usize,
    /// Matches found by rescans in the current cascade.
    rounds: usize,
}

impl Board {
    /// Empty board sized by `settings`; call [`Board::fill`] to populate it.
    pub fn new(settings: GameSettings, seed: u64) -> Self {
        Self {
            grid: Grid::new(settings.board_size_x, settings.board_size_y),
            collector: BottomCollector::new(settings.bottom_cell_count),
            remained_board_item: 0,
            rng: SmallRng::seed_from_u64(seed),
            pending: None,
            reshuffles: 0,
            rounds: 0,
            settings,
        }
    }

    /// Board with a fixed layout (see [`Grid::from_rows`]). The layout decides the size.
    pub fn from_rows(mut settings: GameSettings, rows: &[&str], seed: u64) -> Result<Self, BoardError> {
        let grid = Grid::from_rows(rows)?;
        settings.board_size_x = grid.width();
        settings.board_size_y = grid.height();
        let mut board = Self::new(settings, seed);
        board.remained_board_item = grid
            .positions()
            .filter(|&p| matches!(grid.get(p), Some(Item::Normal(_))))
            .count();
        board.grid = grid;
        Ok(board)
    }

    /// Populate every cell from a freshly seeded type pool.
    ///
    /// Adjacent duplicates are allowed; a filled board may already hold matches.
    pub fn fill(&mut self) -> Result<(), BoardError> {
        let cells: Vec<Pos> = self.grid.positions().collect();
        let mut pool = TypePool::generate(self.settings.types(), self.settings.cell_count(), &mut self.rng);
        for pos in cells {
            let t = pool.draw(&mut self.rng)?;
            self.grid.assign(pos, Item::Normal(t))?;
            self.remained_board_item += 1;
        }
        info!(
            width = self.grid.width(),
            height = self.grid.height(),
            leftover = pool.total(),
            "board filled"
        );
        Ok(())
    }

    /// Drop every item on the grid and in the lane.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.collector.clear();
        self.remained_board_item = 0;
        self.pending = None;
        self.reshuffles = 0;
        self.rounds = 0;
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn collector(&self) -> &BottomCollector {
        &self.collector
    }

    /// Collectible (normal) tokens left on the grid. Bonuses are not counted, so
    /// this reaches zero, and the last triplet wins, while bonuses may remain.
    pub fn remained_board_item(&self) -> usize {
        self.remained_board_item
    }

    pub fn total_bottom_item(&self) -> usize {
        self.collector.len()
    }

    pub fn bottom_cell_count(&self) -> usize {
        self.collector.capacity()
    }

    pub fn bottom_item_type(&self, index: usize) -> Option<NormalType> {
        self.collector.get(index)
    }

    /// A cascade phase is pending.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn potential_matches(&self) -> Vec<Pos> {
        hint::potential_matches(&self.grid)
    }

    pub fn find_first_match(&self) -> Option<Vec<Pos>> {
        matcher::find_first_match(&self.grid, self.settings.matches_min)
    }

    fn check_pos(&self, pos: Pos) -> Result<(), BoardError> {
        if self.grid.contains(pos) {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds { x: pos.x, y: pos.y })
        }
    }

    // --- SWAP & CASCADE ---

    /// Swap two neighbouring cells and resolve the whole cascade.
    pub fn swap(&mut self, a: Pos, b: Pos) -> Result<SwapOutcome, BoardError> {
        if self.begin_swap(a, b)? {
            Ok(SwapOutcome::Resolved(self.run_cascade()?))
        } else {
            Ok(SwapOutcome::Reverted)
        }
    }

    /// Swap two neighbouring cells and queue the first cascade phase.
    ///
    /// Returns `false` when nothing matched and the swap was undone.
    pub fn begin_swap(&mut self, a: Pos, b: Pos) -> Result<bool, BoardError> {
        if self.is_busy() {
            return Err(BoardError::Busy);
        }
        self.rounds = 0;
        for p in [a, b] {
            self.check_pos(p)?;
            if self.grid.is_empty(p) {
                return Err(BoardError::Empty { x: p.x, y: p.y });
            }
        }
        if !a.is_neighbour(b) {
            return Err(BoardError::NotAdjacent(a.x, a.y, b.x, b.y));
        }
        self.grid.swap(a, b)?;

        if let Some(bonus) = [a, b]
            .into_iter()
            .find(|&p| self.grid.get(p).is_some_and(|i| i.is_bonus()))
        {
            debug!(%bonus, "swap detonates bonus");
            self.pending = Some(Phase::Detonate(bonus));
            return Ok(true);
        }

        let min = self.settings.matches_min;
        let mut matches = matcher::matches_at(&self.grid, a, min);
        for p in matcher::matches_at(&self.grid, b, min) {
            if !matches.contains(&p) {
                matches.push(p);
            }
        }
        let cells = if matches.len() >= min {
            matcher::filter_for_bonus_compatibility(&self.grid, &matches, min)
        } else {
            Vec::new()
        };
        if cells.is_empty() {
            self.grid.swap(a, b)?;
            debug!(%a, %b, "swap reverted");
            return Ok(false);
        }

        let preferred = [b, a].into_iter().find(|p| cells.contains(p));
        debug!(%a, %b, matched = cells.len(), "swap matched");
        self.pending = Some(Phase::Explode {
            convert: cells.len() > min,
            cells,
            preferred,
        });
        Ok(true)
    }

    /// Advance the pending cascade by one settled phase. `None` when idle.
    pub fn step(&mut self) -> Result<Option<CascadeStep>, BoardError> {
        let Some(phase) = self.pending.take() else {
            return Ok(None);
        };
        let step = match phase {
            Phase::Explode {
                cells,
                preferred,
                convert,
            } => {
                let exploded = self.explode(&cells)?;
                let bonus = if convert {
                    matcher::convert_to_bonus(
                        &mut self.grid,
                        &cells,
                        preferred,
                        self.settings.matches_min,
                        &mut self.rng,
                    )?
                } else {
                    None
                };
                if bonus.is_some_and(|b| matches!(b.replaced, Some(Item::Normal(_)))) {
                    self.remained_board_item = self.remained_board_item.saturating_sub(1);
                }
                self.pending = Some(Phase::Gravity);
                CascadeStep::Exploded {
                    cells: exploded,
                    bonus,
                    remained: self.remained_board_item,
                }
            }
            Phase::Detonate(pos) => {
                let exploded = self.explode(&[pos])?;
                self.pending = Some(Phase::Gravity);
                CascadeStep::Exploded {
                    cells: exploded,
                    bonus: None,
                    remained: self.remained_board_item,
                }
            }
            Phase::Gravity => {
                let falls = gravity::shift_down(&mut self.grid)?;
                self.pending = Some(Phase::Refill);
                CascadeStep::Shifted(falls)
            }
            Phase::Refill => {
                let placed = gravity::fill_gaps(&mut self.grid, self.settings.types(), &mut self.rng)?;
                self.remained_board_item += placed.len();
                self.pending = Some(Phase::Rescan);
                CascadeStep::Refilled(placed)
            }
            Phase::Rescan => self.rescan()?,
        };
        debug!(?step, "cascade step");
        Ok(Some(step))
    }

    /// Run pending phases until the board is idle.
    pub fn run_cascade(&mut self) -> Result<CascadeReport, BoardError> {
        let mut report = CascadeReport::default();
        while let Some(step) = self.step()? {
            report.steps.push(step);
        }
        Ok(report)
    }

    fn rescan(&mut self) -> Result<CascadeStep, BoardError> {
        let min = self.settings.matches_min;
        if let Some(cells) = matcher::find_first_resolvable(&self.grid, min) {
            self.rounds += 1;
            if self.rounds > MAX_CASCADE_ROUNDS {
                warn!(rounds = self.rounds, "cascade keeps matching, cutting it off");
                self.rounds = 0;
                self.reshuffles = 0;
                return Ok(CascadeStep::Exhausted);
            }
            self.pending = Some(Phase::Explode {
                cells: cells.clone(),
                preferred: None,
                convert: cells.len() > min,
            });
            return Ok(CascadeStep::Matched(cells));
        }

        let hint = hint::potential_matches(&self.grid);
        self.rounds = 0;
        if !hint.is_empty() {
            self.reshuffles = 0;
            return Ok(CascadeStep::Settled { hint });
        }
        if self.reshuffles < self.settings.max_reshuffles {
            self.reshuffles += 1;
            self.shuffle_items()?;
            self.pending = Some(Phase::Rescan);
            info!(attempt = self.reshuffles, "no moves left, board reshuffled");
            return Ok(CascadeStep::Reshuffled);
        }
        warn!(attempts = self.reshuffles, "no moves after reshuffling, giving up");
        self.reshuffles = 0;
        Ok(CascadeStep::NoMoves)
    }

    /// Remove `cells`; bonuses caught in the blast fire their own lines.
    fn explode(&mut self, cells: &[Pos]) -> Result<Vec<Pos>, BoardError> {
        let mut queue: VecDeque<Pos> = VecDeque::with_capacity(cells.len());
        for &p in cells {
            self.check_pos(p)?;
            queue.push_back(p);
        }
        let mut exploded = Vec::new();
        while let Some(pos) = queue.pop_front() {
            let Some(item) = self.grid.take(pos) else {
                continue;
            };
            exploded.push(pos);
            match item {
                Item::Normal(_) => {
                    self.remained_board_item = self.remained_board_item.saturating_sub(1);
                }
                Item::Bonus(kind) => queue.extend(self.blast_area(pos, kind)),
            }
        }
        Ok(exploded)
    }

    fn blast_area(&self, pos: Pos, kind: BonusKind) -> Vec<Pos> {
        let row = (0..self.grid.width())
            .filter(|&x| x != pos.x)
            .map(|x| Pos::new(x, pos.y));
        let column = (0..self.grid.height())
            .filter(|&y| y != pos.y)
            .map(|y| Pos::new(pos.x, y));
        match kind {
            BonusKind::Horizontal => row.collect(),
            BonusKind::Vertical => column.collect(),
            BonusKind::All => row.chain(column).collect(),
        }
    }

    /// Shuffle the items among the occupied cells, then resolve any matches the new
    /// layout holds.
    pub fn shuffle(&mut self) -> Result<CascadeReport, BoardError> {
        if self.is_busy() {
            return Err(BoardError::Busy);
        }
        self.rounds = 0;
        self.shuffle_items()?;
        self.pending = Some(Phase::Rescan);
        self.run_cascade()
    }

    fn shuffle_items(&mut self) -> Result<(), BoardError> {
        let cells: Vec<Pos> = self.grid.positions().filter(|&p| !self.grid.is_empty(p)).collect();
        let mut items: Vec<Item> = cells.iter().filter_map(|&p| self.grid.take(p)).collect();
        items.shuffle(&mut self.rng);
        for (pos, item) in cells.into_iter().zip(items) {
            self.grid.assign(pos, item)?;
        }
        Ok(())
    }

    // --- COLLECTOR ---

    /// Send a normal token to the collector lane and settle it.
    pub fn remove_to_collector(&mut self, pos: Pos) -> Result<CollectOutcome, BoardError> {
        if self.is_busy() {
            return Err(BoardError::Busy);
        }
        self.check_pos(pos)?;
        let Some(Item::Normal(item)) = self.grid.get(pos) else {
            return Ok(CollectOutcome::Ignored);
        };
        let Some(placement) = self.collector.put(item) else {
            return Ok(CollectOutcome::Ignored);
        };
        self.grid.free(pos)?;
        self.remained_board_item = self.remained_board_item.saturating_sub(1);

        let settlement = self.collector.settle(placement, self.remained_board_item);
        if settlement.win {
            info!("last board token cleared from the collector");
        } else if settlement.lose {
            info!(capacity = self.collector.capacity(), "collector full");
        }
        Ok(CollectOutcome::Collected {
            from: pos,
            placement,
            settlement,
        })
    }

    /// First collectible cell in scan order matching `accept`.
    fn first_normal(&self, accept: impl Fn(NormalType) -> bool) -> Option<Pos> {
        self.grid
            .positions()
            .find(|&p| self.grid.get(p).and_then(|i| i.normal_type()).is_some_and(&accept))
    }

    /// Collect the first collectible cell.
    pub fn put_first_item(&mut self) -> Result<CollectOutcome, BoardError> {
        match self.first_normal(|_| true) {
            Some(pos) => self.remove_to_collector(pos),
            None => Ok(CollectOutcome::Ignored),
        }
    }

    /// Collect the first cell holding `item`.
    pub fn put_identical(&mut self, item: NormalType) -> Result<CollectOutcome, BoardError> {
        match self.first_normal(|t| t == item) {
            Some(pos) => self.remove_to_collector(pos),
            None => Ok(CollectOutcome::Ignored),
        }
    }

    /// Collect the first cell whose kind is not in the lane yet.
    pub fn put_unique(&mut self) -> Result<CollectOutcome, BoardError> {
        match self.first_normal(|t| !self.collector.contains(t)) {
            Some(pos) => self.remove_to_collector(pos),
            None => Ok(CollectOutcome::Ignored),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)?;
        write!(f, "[")?;
        for slot in self.collector.slots() {
            write!(f, "{}", slot.map_or('.', NormalType::letter))?;
        }
        writeln!(f, "] remaining {}", self.remained_board_item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> GameSettings {
        GameSettings {
            bottom_cell_count: 9,
            ..GameSettings::default()
        }
    }

    #[test]
    fn fill_occupies_every_cell() {
        let mut board = Board::new(settings(), 42);
        board.fill().unwrap();
        assert_eq!(board.remained_board_item(), 64);
        assert_eq!(board.grid().occupied_count(), 64);
    }

    #[test]
    fn non_neighbours_cannot_swap() {
        let mut board = Board::from_rows(settings(), &["AB", "CD"], 1).unwrap();
        assert_eq!(
            board.swap(Pos::new(0, 0), Pos::new(1, 1)),
            Err(BoardError::NotAdjacent(0, 0, 1, 1))
        );
        assert_eq!(
            board.swap(Pos::new(0, 0), Pos::new(0, 5)),
            Err(BoardError::OutOfBounds { x: 0, y: 5 })
        );
    }

    #[test]
    fn swap_without_match_reverts() {
        let mut board = Board::from_rows(settings(), &["ABC", "BCA", "CAB"], 1).unwrap();
        let before = board.grid().clone();
        assert_eq!(board.swap(Pos::new(0, 0), Pos::new(1, 0)), Ok(SwapOutcome::Reverted));
        assert_eq!(board.grid(), &before);
        assert!(!board.is_busy());
    }

    #[test]
    fn step_driven_cascade_gates_input() {
        // Dropping the B completes the A row.
        let mut board =
            Board::from_rows(settings(), &["DEFG", "EFGD", "AABG", "FGAE"], 3).unwrap();
        assert_eq!(board.begin_swap(Pos::new(2, 1), Pos::new(2, 0)), Ok(true));
        assert!(board.is_busy());
        assert_eq!(board.remove_to_collector(Pos::new(0, 0)), Err(BoardError::Busy));
        assert_eq!(board.swap(Pos::new(0, 0), Pos::new(1, 0)), Err(BoardError::Busy));

        let first = board.step().unwrap().unwrap();
        match first {
            CascadeStep::Exploded { cells, bonus, .. } => {
                assert_eq!(cells.len(), 3);
                assert_eq!(bonus, None);
            }
            other => panic!("unexpected first step {other:?}"),
        }
        assert!(matches!(board.step().unwrap(), Some(CascadeStep::Shifted(_))));
        assert!(matches!(board.step().unwrap(), Some(CascadeStep::Refilled(_))));
        board.run_cascade().unwrap();
        assert!(!board.is_busy());
        assert_eq!(board.grid().occupied_count(), 16);
    }

    #[test]
    fn swapped_bonus_clears_its_row() {
        let mut board = Board::from_rows(settings(), &["ABCD", "BHDA"], 8).unwrap();
        let SwapOutcome::Resolved(report) = board.swap(Pos::new(1, 0), Pos::new(1, 1)).unwrap()
        else {
            panic!("bonus swap must resolve");
        };
        let CascadeStep::Exploded { cells, .. } = &report.steps[0] else {
            panic!("first step must explode");
        };
        // The bonus moved up to row 1 and took the whole row with it.
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|p| p.y == 1));
        assert_eq!(board.grid().occupied_count(), 8);
    }

    #[test]
    fn all_bonus_chains_through_other_bonuses() {
        let mut board = Board::from_rows(settings(), &["AVB", "C*D", "EFG"], 4).unwrap();
        let exploded = board.explode(&[Pos::new(1, 1)]).unwrap();
        // Row and column of the * bonus, plus the column of the V bonus it hit.
        assert_eq!(exploded.len(), 5);
        assert_eq!(board.remained_board_item(), 7 - 3);
    }

    #[test]
    fn bonus_and_empty_cells_are_not_collectible() {
        let mut board = Board::from_rows(settings(), &["A.H"], 1).unwrap();
        assert_eq!(board.remove_to_collector(Pos::new(1, 0)), Ok(CollectOutcome::Ignored));
        assert_eq!(board.remove_to_collector(Pos::new(2, 0)), Ok(CollectOutcome::Ignored));
        assert!(!board.remove_to_collector(Pos::new(0, 0)).unwrap().is_ignored());
        assert_eq!(board.remained_board_item(), 0);
    }

    #[test]
    fn helpers_pick_expected_cells() {
        let mut board = Board::from_rows(settings(), &["BCA", "ABC"], 1).unwrap();
        board.put_first_item().unwrap();
        assert_eq!(board.bottom_item_type(0), Some(NormalType::One));
        board.put_identical(NormalType::One).unwrap();
        assert_eq!(board.collector().slots()[..2], [Some(NormalType::One); 2]);
        let outcome = board.put_unique().unwrap();
        let CollectOutcome::Collected { placement, .. } = outcome else {
            panic!("a unique kind is on the board");
        };
        assert_ne!(placement.item, NormalType::One);
    }

    #[test]
    fn display_shows_grid_and_lane() {
        let board = Board::from_rows(GameSettings { bottom_cell_count: 3, ..settings() }, &["AB"], 1)
            .unwrap();
        assert_eq!(board.to_string(), "AB\n[...] remaining 2\n");
    }

    fn count(board: &Board, item: Item) -> usize {
        let grid = board.grid();
        grid.positions().filter(|&p| grid.get(p) == Some(item)).count()
    }

    #[test]
    fn no_move_board_reshuffles_up_to_the_cap() {
        let capped = GameSettings { max_reshuffles: 3, ..settings() };
        // Two by two never holds a run of three in any order.
        let mut board = Board::from_rows(capped, &["AB", "BA"], 6).unwrap();
        let report = board.shuffle().unwrap();
        assert_eq!(
            report.steps,
            vec![
                CascadeStep::Reshuffled,
                CascadeStep::Reshuffled,
                CascadeStep::Reshuffled,
                CascadeStep::NoMoves,
            ]
        );
        assert!(report.is_stuck());
        assert!(!board.is_busy());
        assert_eq!(count(&board, Item::Normal(NormalType::One)), 2);
        assert_eq!(count(&board, Item::Normal(NormalType::Two)), 2);
    }

    #[test]
    fn reshuffle_settles_once_a_move_exists() {
        // No move as laid out; no order of these items forms a run of three,
        // and most orders leave a move.
        let mut board = Board::from_rows(settings(), &["AB.", ".BA", "A.A"], 2).unwrap();
        assert!(board.potential_matches().is_empty());
        let report = board.shuffle().unwrap();
        let (last, before) = report.steps.split_last().unwrap();
        assert!(matches!(last, CascadeStep::Settled { .. }));
        assert!(before.iter().all(|s| *s == CascadeStep::Reshuffled));
        let hint = report.hint();
        assert_eq!(hint.len(), 3);
        assert!(hint.iter().all(|&p| board.grid().same_type(p, hint[0])));
        assert_eq!(count(&board, Item::Normal(NormalType::One)), 4);
        assert_eq!(count(&board, Item::Normal(NormalType::Two)), 2);
    }

    #[test]
    fn single_kind_cascade_is_cut_off() {
        let one_kind = GameSettings {
            board_size_x: 3,
            board_size_y: 3,
            type_count: 1,
            ..settings()
        };
        assert!(one_kind.validate().is_err());

        // Unvalidated: every refill lines up again, and the one bonus never blocks
        // both free rows.
        let mut board = Board::new(one_kind, 5);
        board.fill().unwrap();
        let SwapOutcome::Resolved(report) = board.swap(Pos::new(0, 0), Pos::new(1, 0)).unwrap()
        else {
            panic!("an all-A board always matches");
        };
        assert_eq!(report.steps.last(), Some(&CascadeStep::Exhausted));
        assert!(report.is_stuck());
        assert!(!board.is_busy());
        let rounds = report
            .steps
            .iter()
            .filter(|s| matches!(s, CascadeStep::Matched(_)))
            .count();
        assert_eq!(rounds, MAX_CASCADE_ROUNDS);

        // The next cascade gets a fresh budget.
        assert!(matches!(board.swap(Pos::new(0, 1), Pos::new(1, 1)), Ok(SwapOutcome::Resolved(_))));
    }
}
