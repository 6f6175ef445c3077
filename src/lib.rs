//! Tripletile: a match-3 board whose tokens can also be tapped down into a
//! small collector lane that clears them three of a kind at a time.
//!
//! [`Game`] wraps a [`Board`] with play status and auto-play. The board owns the
//! grid, the collector and one seeded RNG, so a seed plus an action sequence
//! replays a session exactly.

pub mod board;
pub mod collector;
pub mod error;
pub mod game;
pub mod grid;
pub mod gravity;
pub mod hint;
pub mod item;
pub mod matcher;
pub mod pool;
pub mod settings;

pub use board::{Board, CascadeReport, CascadeStep, CollectOutcome, Signal, SwapOutcome};
pub use collector::BottomCollector;
pub use error::BoardError;
pub use game::{AutoMode, Game, GameStatus};
pub use grid::{Direction, Grid, Pos};
pub use item::{BonusKind, Item, NormalType};
pub use settings::{GameSettings, SettingsError};
