//! Bottom collector: a fixed lane that receives tapped tokens, keeps same-type tokens
//! next to each other, and explodes them three at a time.

use crate::item::NormalType;
use std::collections::BTreeMap;
use tracing::debug;

/// Where [`BottomCollector::put`] placed a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub item: NormalType,
    pub index: usize,
}

/// Outcome of settling a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settlement {
    /// First slot of the exploded triplet, if one exploded.
    pub cleared_from: Option<usize>,
    /// The board was already empty when the triplet exploded.
    pub win: bool,
    /// Every slot is occupied.
    pub lose: bool,
}

#[derive(Debug, Clone)]
pub struct BottomCollector {
    slots: Vec<Option<NormalType>>,
    total: usize,
    /// Adjacent tokens of each kind currently in the lane (0..=2).
    type_counts: BTreeMap<NormalType, u8>,
}

impl BottomCollector {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            total: 0,
            type_counts: BTreeMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Occupied slots.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn is_full(&self) -> bool {
        self.total >= self.slots.len()
    }

    pub fn slots(&self) -> &[Option<NormalType>] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<NormalType> {
        self.slots.get(index).copied().flatten()
    }

    pub fn contains(&self, t: NormalType) -> bool {
        self.slots[..self.total].contains(&Some(t))
    }

    pub fn type_count(&self, t: NormalType) -> u8 {
        self.type_counts.get(&t).copied().unwrap_or(0)
    }

    /// Insert a token, next to the nearest token of its kind if there is one.
    ///
    /// Returns `None` without changing anything when the lane is full. The placement
    /// must be passed to [`BottomCollector::settle`] before the next `put`.
    pub fn put(&mut self, item: NormalType) -> Option<Placement> {
        if self.is_full() {
            return None;
        }
        let mut index = self.total;
        self.total += 1;

        if self.type_count(item) >= 1 {
            if let Some(i) = (0..self.total - 1).rev().find(|&i| self.slots[i] == Some(item)) {
                index = i + 1;
                if self.slots[index].is_some() {
                    self.shift_right(index);
                }
            }
        }

        self.slots[index] = Some(item);
        debug!(?item, index, total = self.total, "collector put");
        Some(Placement { item, index })
    }

    /// Resolve a placement once it has landed.
    ///
    /// A third adjacent token of a kind explodes with the two before it and the tail
    /// closes the gap. `remained_board_item` decides the win; a full lane afterwards
    /// is a loss.
    pub fn settle(&mut self, placement: Placement, remained_board_item: usize) -> Settlement {
        let Placement { item, index } = placement;
        let mut settlement = Settlement::default();

        let completes = self.type_count(item) == 2
            && index >= 2
            && (index - 2..=index).all(|i| self.slots[i] == Some(item));
        if completes {
            for i in index - 2..=index {
                self.slots[i] = None;
            }
            self.shift_left(index + 1, 3);
            self.type_counts.insert(item, 0);
            self.total -= 3;
            settlement.cleared_from = Some(index - 2);
            settlement.win = remained_board_item == 0;
            debug!(?item, from = index - 2, total = self.total, "collector triplet cleared");
        } else {
            *self.type_counts.entry(item).or_insert(0) += 1;
        }

        settlement.lose = self.total == self.slots.len();
        settlement
    }

    /// Open a gap at `index`; slots up to the previous last occupied one move right.
    fn shift_right(&mut self, index: usize) {
        for i in (index..self.total - 1).rev() {
            self.slots[i + 1] = self.slots[i].take();
        }
    }

    /// Move slots `start..total` left by `by`.
    fn shift_left(&mut self, start: usize, by: usize) {
        for i in start..self.total {
            self.slots[i - by] = self.slots[i].take();
        }
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
        self.total = 0;
        self.type_counts.clear();
    }
}
