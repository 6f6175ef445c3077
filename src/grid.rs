//! Grid store: the cell matrix and coordinate neighbours. No matching logic.

use crate::error::BoardError;
use crate::item::Item;
use std::fmt;

/// Cell coordinate. `y = 0` is the bottom row; up is `y + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// True if `other` is one orthogonal step away.
    pub fn is_neighbour(self, other: Self) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Clockwise from up.
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }
}

/// Row-major cell matrix. Each cell owns at most one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Option<Item>>,
}

impl Grid {
    /// Allocate an empty `width` x `height` grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Build a grid from text rows, top row first. See [`Item::from_symbol`]; `.` is empty.
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        if width == 0 || height == 0 {
            return Err(BoardError::Layout("layout has no cells".to_string()));
        }
        let mut grid = Self::new(width, height);
        for (row_index, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(BoardError::Layout(format!(
                    "row {row_index} has {} cells, expected {width}",
                    row.chars().count()
                )));
            }
            let y = height - 1 - row_index;
            for (x, c) in row.chars().enumerate() {
                if c == '.' {
                    continue;
                }
                let item = Item::from_symbol(c)
                    .ok_or_else(|| BoardError::Layout(format!("unknown symbol {c:?}")))?;
                grid.assign(Pos::new(x, y), item)?;
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    #[inline]
    fn index(&self, pos: Pos) -> Result<usize, BoardError> {
        if self.contains(pos) {
            Ok(pos.y * self.width + pos.x)
        } else {
            Err(BoardError::OutOfBounds { x: pos.x, y: pos.y })
        }
    }

    /// Item at `pos`; `None` when empty or out of bounds.
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Item> {
        self.index(pos).ok().and_then(|i| self.cells[i])
    }

    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos).is_none()
    }

    /// Place `item` in an empty cell.
    pub fn assign(&mut self, pos: Pos, item: Item) -> Result<(), BoardError> {
        let i = self.index(pos)?;
        if self.cells[i].is_some() {
            return Err(BoardError::Occupied { x: pos.x, y: pos.y });
        }
        self.cells[i] = Some(item);
        Ok(())
    }

    /// Detach and return the item of an occupied cell.
    pub fn free(&mut self, pos: Pos) -> Result<Item, BoardError> {
        let i = self.index(pos)?;
        self.cells[i]
            .take()
            .ok_or(BoardError::Empty { x: pos.x, y: pos.y })
    }

    /// Drop whatever the cell holds, returning it.
    pub fn take(&mut self, pos: Pos) -> Option<Item> {
        let i = self.index(pos).ok()?;
        self.cells[i].take()
    }

    /// Swap the contents of two cells.
    pub fn swap(&mut self, a: Pos, b: Pos) -> Result<(), BoardError> {
        let (ia, ib) = (self.index(a)?, self.index(b)?);
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// Neighbour of `pos` in `dir`, if it lies on the grid.
    pub fn neighbour(&self, pos: Pos, dir: Direction) -> Option<Pos> {
        let next = match dir {
            Direction::Up => Pos::new(pos.x, pos.y + 1),
            Direction::Right => Pos::new(pos.x + 1, pos.y),
            Direction::Down => Pos::new(pos.x, pos.y.checked_sub(1)?),
            Direction::Left => Pos::new(pos.x.checked_sub(1)?, pos.y),
        };
        self.contains(next).then_some(next)
    }

    /// Both cells occupied and holding same-type items.
    pub fn same_type(&self, a: Pos, b: Pos) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(ia), Some(ib)) => ia.is_same_type(&ib),
            _ => false,
        }
    }

    /// All coordinates, column by column from the left, bottom to top in each column.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| Pos::new(x, y)))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let c = self.get(Pos::new(x, y)).map_or('.', |i| i.symbol());
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::NormalType;

    #[test]
    fn neighbours_respect_bounds() {
        let grid = Grid::new(3, 2);
        let corner = Pos::new(0, 0);
        assert_eq!(grid.neighbour(corner, Direction::Down), None);
        assert_eq!(grid.neighbour(corner, Direction::Left), None);
        assert_eq!(grid.neighbour(corner, Direction::Up), Some(Pos::new(0, 1)));
        assert_eq!(grid.neighbour(corner, Direction::Right), Some(Pos::new(1, 0)));
        assert_eq!(grid.neighbour(Pos::new(2, 1), Direction::Right), None);
        assert_eq!(grid.neighbour(Pos::new(2, 1), Direction::Up), None);
    }

    #[test]
    fn neighbour_links_are_mutual() {
        let grid = Grid::new(4, 4);
        for pos in grid.positions() {
            for dir in Direction::ALL {
                if let Some(n) = grid.neighbour(pos, dir) {
                    assert_eq!(grid.neighbour(n, dir.opposite()), Some(pos));
                }
            }
        }
    }

    #[test]
    fn assign_occupied_and_free_empty_fail() {
        let mut grid = Grid::new(2, 2);
        let p = Pos::new(1, 1);
        let item = Item::Normal(NormalType::One);
        grid.assign(p, item).unwrap();
        assert_eq!(grid.assign(p, item), Err(BoardError::Occupied { x: 1, y: 1 }));
        assert_eq!(grid.free(p), Ok(item));
        assert_eq!(grid.free(p), Err(BoardError::Empty { x: 1, y: 1 }));
        assert!(grid.is_empty(p));
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let mut grid = Grid::new(2, 2);
        let item = Item::Normal(NormalType::One);
        assert_eq!(
            grid.assign(Pos::new(2, 0), item),
            Err(BoardError::OutOfBounds { x: 2, y: 0 })
        );
        assert_eq!(grid.get(Pos::new(5, 5)), None);
    }

    #[test]
    fn rows_are_read_top_first() {
        let grid = Grid::from_rows(&["AB", "C."]).unwrap();
        assert_eq!(grid.get(Pos::new(0, 1)), Some(Item::Normal(NormalType::One)));
        assert_eq!(grid.get(Pos::new(1, 1)), Some(Item::Normal(NormalType::Two)));
        assert_eq!(grid.get(Pos::new(0, 0)), Some(Item::Normal(NormalType::Three)));
        assert!(grid.is_empty(Pos::new(1, 0)));
        assert_eq!(grid.to_string(), "AB\nC.\n");
    }

    #[test]
    fn ragged_layout_is_rejected() {
        assert!(matches!(Grid::from_rows(&["AB", "C"]), Err(BoardError::Layout(_))));
        assert!(matches!(Grid::from_rows(&["AZ"]), Err(BoardError::Layout(_))));
    }
}
