//! Read-only projections of engine state for renderers.

use crate::{Cell, Phase};

/// What a renderer may know about one cell. Mine identity stays hidden
/// until the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub revealed: bool,
    pub flagged: bool,
    /// `None` while hidden, and for mines
    pub adjacent_mines: Option<u8>,
    /// `None` while the game is still being played
    pub has_mine: Option<bool>,
}

impl CellView {
    pub(crate) fn new(cell: &Cell, phase: Phase) -> Self {
        Self {
            revealed: cell.is_revealed(),
            flagged: cell.is_flagged(),
            adjacent_mines: cell.adjacent_mines().filter(|_| cell.is_revealed()),
            has_mine: phase.is_finished().then(|| cell.has_mine()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionView {
    pub phase: Phase,
    pub remaining_flags: usize,
    pub rows: usize,
    pub cols: usize,
    pub mine_count: usize,
}
