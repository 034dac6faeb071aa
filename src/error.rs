use crate::Position;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board dimensions {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("Too many mines ({mines}) for board size {rows}x{cols}")]
    TooManyMines { rows: usize, cols: usize, mines: usize },
    #[error("Cannot place {mines} mines in {available} candidate cells")]
    NotEnoughCandidates { mines: usize, available: usize },
    #[error("Position {0} is out of bounds")]
    OutOfBounds(Position),
}

impl GameError {
    /// True for errors raised while building a board, as opposed to
    /// errors raised by a command against an existing one.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, GameError::OutOfBounds(_))
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
