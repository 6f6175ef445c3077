//! Tokens held by board cells: normal kinds and line-clearing bonuses.

use std::fmt;

/// Normal token kinds. `GameSettings::type_count` restricts play to the first N.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NormalType {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
}

impl NormalType {
    pub const ALL: [Self; 7] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
    ];

    /// The first `count` kinds (clamped to 1..=7).
    pub fn first(count: usize) -> &'static [Self] {
        &Self::ALL[..count.clamp(1, Self::ALL.len())]
    }

    /// Layout letter: `A` for `One` through `G` for `Seven`.
    pub fn letter(self) -> char {
        match self {
            Self::One => 'A',
            Self::Two => 'B',
            Self::Three => 'C',
            Self::Four => 'D',
            Self::Five => 'E',
            Self::Six => 'F',
            Self::Seven => 'G',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.letter() == c)
    }
}

/// Bonus kinds; each clears a row, a column, or both when it explodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BonusKind {
    Horizontal,
    Vertical,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Item {
    Normal(NormalType),
    Bonus(BonusKind),
}

impl Item {
    /// Normals match on equal kind, bonuses on equal bonus kind; never across variants.
    pub fn is_same_type(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Normal(a), Self::Normal(b)) => a == b,
            (Self::Bonus(a), Self::Bonus(b)) => a == b,
            _ => false,
        }
    }

    pub fn normal_type(&self) -> Option<NormalType> {
        match self {
            Self::Normal(t) => Some(*t),
            Self::Bonus(_) => None,
        }
    }

    pub fn is_bonus(&self) -> bool {
        matches!(self, Self::Bonus(_))
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Normal(t) => t.letter(),
            Self::Bonus(BonusKind::Horizontal) => 'H',
            Self::Bonus(BonusKind::Vertical) => 'V',
            Self::Bonus(BonusKind::All) => '*',
        }
    }

    /// Inverse of [`Item::symbol`].
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'H' => Some(Self::Bonus(BonusKind::Horizontal)),
            'V' => Some(Self::Bonus(BonusKind::Vertical)),
            '*' => Some(Self::Bonus(BonusKind::All)),
            _ => NormalType::from_letter(c).map(Self::Normal),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
