//! Weighted bag of token kinds used for the initial fill.
//!
//! Every kind enters the bag in units of three so a freshly filled board can, in
//! principle, be cleared entirely through the collector lane.

use crate::error::BoardError;
use crate::item::NormalType;
use rand::Rng;
use std::collections::BTreeMap;

/// Units added to a kind per seeding step.
const UNITS_PER_GROUP: u32 = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypePool {
    /// Remaining weight per kind; exhausted kinds are removed. Iteration order is stable.
    counts: BTreeMap<NormalType, u32>,
}

impl TypePool {
    /// Seed a pool for a board of `cells` cells over `types`.
    ///
    /// Each kind starts with one group of three. Further groups go to uniformly random
    /// kinds until there are `cells / 3` groups. If that still leaves fewer units than
    /// cells (board size not a multiple of three), groups keep being added until every
    /// cell can be drawn for.
    pub fn generate<R: Rng + ?Sized>(types: &[NormalType], cells: usize, rng: &mut R) -> Self {
        let mut pool = Self::default();
        if types.is_empty() {
            return pool;
        }
        for &t in types {
            pool.counts.insert(t, UNITS_PER_GROUP);
        }

        let target = cells / 3;
        let mut groups = types.len();
        while groups < target {
            pool.add_group(types[rng.gen_range(0..types.len())]);
            groups += 1;
        }
        while pool.total() < cells {
            pool.add_group(types[rng.gen_range(0..types.len())]);
        }
        pool
    }

    fn add_group(&mut self, t: NormalType) {
        *self.counts.entry(t).or_insert(0) += UNITS_PER_GROUP;
    }

    /// Sum of remaining weights.
    pub fn total(&self) -> usize {
        self.counts.values().map(|&c| c as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Remaining weight for `t`.
    pub fn count(&self, t: NormalType) -> u32 {
        self.counts.get(&t).copied().unwrap_or(0)
    }

    /// Draw one kind with probability proportional to its remaining weight.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<NormalType, BoardError> {
        let total = self.total();
        if total == 0 {
            return Err(BoardError::EmptyPool);
        }
        let roll = rng.gen_range(0..total);
        let mut cumulative = 0usize;
        let picked = self
            .counts
            .iter()
            .find(|&(_, &count)| {
                cumulative += count as usize;
                roll < cumulative
            })
            .map(|(&t, _)| t)
            .ok_or(BoardError::EmptyPool)?;

        if let Some(count) = self.counts.get_mut(&picked) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&picked);
            }
        }
        Ok(picked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn seeds_three_of_each_kind() {
        let mut rng = SmallRng::seed_from_u64(1);
        // 9 cells -> target 3 groups, below the 7 seed groups.
        let pool = TypePool::generate(&NormalType::ALL, 9, &mut rng);
        for t in NormalType::ALL {
            assert_eq!(pool.count(t), 3);
        }
        assert_eq!(pool.total(), 21);
    }

    #[test]
    fn covers_board_not_divisible_by_three() {
        let mut rng = SmallRng::seed_from_u64(7);
        let pool = TypePool::generate(&NormalType::ALL, 64, &mut rng);
        assert!(pool.total() >= 64);
        assert_eq!(pool.total() % 3, 0);
        for t in NormalType::ALL {
            assert_eq!(pool.count(t) % 3, 0);
        }
    }

    #[test]
    fn exact_target_when_divisible() {
        let mut rng = SmallRng::seed_from_u64(3);
        let pool = TypePool::generate(&NormalType::ALL, 81, &mut rng);
        assert_eq!(pool.total(), 81);
    }

    #[test]
    fn drawing_exhausts_then_fails() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut pool = TypePool::generate(&[NormalType::Two], 3, &mut rng);
        for _ in 0..3 {
            assert_eq!(pool.draw(&mut rng), Ok(NormalType::Two));
        }
        assert!(pool.is_empty());
        assert_eq!(pool.draw(&mut rng), Err(BoardError::EmptyPool));
    }

    proptest! {
        #[test]
        fn prop_each_draw_removes_exactly_one_unit(seed in any::<u64>(), cells in 1usize..120) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut pool = TypePool::generate(NormalType::first(5), cells, &mut rng);
            let mut total = pool.total();
            while total > 0 {
                let t = pool.draw(&mut rng).unwrap();
                prop_assert!(NormalType::first(5).contains(&t));
                prop_assert_eq!(pool.total(), total - 1);
                total -= 1;
            }
            prop_assert_eq!(pool.draw(&mut rng), Err(BoardError::EmptyPool));
        }
    }
}
