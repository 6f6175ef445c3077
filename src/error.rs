//! Board errors: precondition violations and refused host input.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("types pool is empty")]
    EmptyPool,
    #[error("cell ({x}, {y}) is already occupied")]
    Occupied { x: usize, y: usize },
    #[error("cell ({x}, {y}) is empty")]
    Empty { x: usize, y: usize },
    #[error("cell ({x}, {y}) is outside the board")]
    OutOfBounds { x: usize, y: usize },
    #[error("cells ({0}, {1}) and ({2}, {3}) are not neighbours")]
    NotAdjacent(usize, usize, usize, usize),
    #[error("board is busy resolving a cascade")]
    Busy,
    #[error("game is not in progress")]
    NotPlaying,
    #[error("invalid layout: {0}")]
    Layout(String),
}
