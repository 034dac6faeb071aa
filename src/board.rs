use crate::{GameConfig, GameError, Position, Result};
use itertools::Itertools;
use ndarray::Array2;
use rand::{seq::index::sample, Rng};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use tracing::{debug, trace};

type Index = (usize, usize);

/// A single grid cell. Only the board mutates cells; everything else
/// sees them through shared references.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    has_mine: bool,
    // None on mine cells and before adjacency has been computed
    adjacent_mines: Option<u8>,
    revealed: bool,
    flagged: bool,
}

impl Cell {
    pub fn has_mine(&self) -> bool {
        self.has_mine
    }

    /// Number of mines among the neighbours, `None` for mine cells.
    pub fn adjacent_mines(&self) -> Option<u8> {
        self.adjacent_mines
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn is_flagged(&self) -> bool {
        self.flagged
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The cell was already revealed or is flagged; nothing changed
    Unchanged,
    /// A safe cell was revealed. A count of zero means a flood fill ran
    RevealedNumber(u8),
    HitMine,
}

#[derive(Debug, Clone)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: usize,
    revealed_count: usize,
    flagged_count: usize,
}

impl Board {
    /// Builds a board with randomly placed mines and computed adjacency.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::new_with_rng(config, &mut rand::thread_rng())
    }

    pub fn new_with_rng<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self> {
        let mut board = Self::blank(config)?;
        board.place_mines_with_rng(&HashSet::new(), rng)?;
        board.compute_adjacency();
        Ok(board)
    }

    /// Builds a board with mines at exactly the given positions.
    /// Duplicate positions count once.
    pub fn with_mines(rows: usize, cols: usize, mines: &[Position]) -> Result<Self> {
        let unique: HashSet<Position> = mines.iter().copied().collect();
        let mut board = Self::blank(GameConfig::new(rows, cols, unique.len()))?;
        for pos in unique {
            let index = board.checked_index(pos)?;
            board.cells[index].has_mine = true;
        }
        board.compute_adjacency();
        Ok(board)
    }

    fn blank(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            cells: Array2::default((config.rows, config.cols)),
            mine_count: config.mines,
            revealed_count: 0,
            flagged_count: 0,
        })
    }

    pub fn place_mines(&mut self, excluded: &HashSet<Position>) -> Result<()> {
        self.place_mines_with_rng(excluded, &mut rand::thread_rng())
    }

    /// Clears the grid and places `mine_count` mines on distinct cells
    /// outside `excluded`. Adjacency counts are reset and must be
    /// recomputed with [`Board::compute_adjacency`].
    pub fn place_mines_with_rng<R: Rng + ?Sized>(
        &mut self,
        excluded: &HashSet<Position>,
        rng: &mut R,
    ) -> Result<()> {
        let (rows, cols) = self.cells.dim();
        if self.mine_count >= self.cells.len() {
            return Err(GameError::TooManyMines {
                rows,
                cols,
                mines: self.mine_count,
            });
        }

        let candidates: Vec<Index> = self
            .cells
            .indexed_iter()
            .map(|(index, _)| index)
            .filter(|&index| !excluded.contains(&position_of(index)))
            .collect();
        if candidates.len() < self.mine_count {
            return Err(GameError::NotEnoughCandidates {
                mines: self.mine_count,
                available: candidates.len(),
            });
        }

        self.cells.fill(Cell::default());
        self.revealed_count = 0;
        self.flagged_count = 0;
        for i in sample(rng, candidates.len(), self.mine_count).iter() {
            self.cells[candidates[i]].has_mine = true;
        }

        debug_assert_eq!(
            self.cells.iter().filter(|cell| cell.has_mine).count(),
            self.mine_count
        );
        debug!(rows, cols, mines = self.mine_count, excluded = excluded.len(), "placed mines");
        Ok(())
    }

    pub fn compute_adjacency(&mut self) {
        let counts: Vec<Option<u8>> = self
            .cells
            .indexed_iter()
            .map(|(index, cell)| (!cell.has_mine).then(|| self.count_adjacent_mines(index)))
            .collect();
        for (cell, count) in self.cells.iter_mut().zip(counts) {
            cell.adjacent_mines = count;
        }
    }

    /// Reveals a cell, flood filling outward from zero-count cells.
    /// Flagged cells are never revealed, directly or by the flood fill,
    /// but the fill carries on through flagged zero cells.
    pub fn reveal(&mut self, pos: Position) -> Result<RevealOutcome> {
        let index = self.checked_index(pos)?;
        let cell = &mut self.cells[index];
        if cell.revealed || cell.flagged {
            return Ok(RevealOutcome::Unchanged);
        }

        cell.revealed = true;
        let has_mine = cell.has_mine;
        self.revealed_count += 1;
        if has_mine {
            debug!(%pos, "revealed a mine");
            return Ok(RevealOutcome::HitMine);
        }

        let count = self.adjacent_at(index);
        if count == 0 {
            let cascaded = self.flood_fill(index);
            trace!(%pos, cascaded, "flood fill");
        }
        Ok(RevealOutcome::RevealedNumber(count))
    }

    // Flagged zero cells stay hidden but still pass the fill on to their
    // neighbours, so a flag never cuts a region in two.
    fn flood_fill(&mut self, start: Index) -> usize {
        let mut cascaded = 0;
        let mut visited = Array2::from_elem(self.cells.dim(), false);
        visited[start] = true;
        let mut worklist = VecDeque::from([start]);

        while let Some(current) = worklist.pop_front() {
            let neighbors: Vec<Index> = self.neighbor_indices(current).collect();
            for neighbor in neighbors {
                if std::mem::replace(&mut visited[neighbor], true) {
                    continue;
                }
                let cell = &mut self.cells[neighbor];
                if cell.has_mine || cell.revealed {
                    continue;
                }
                if !cell.flagged {
                    cell.revealed = true;
                    cascaded += 1;
                }
                if self.adjacent_at(neighbor) == 0 {
                    worklist.push_back(neighbor);
                }
            }
        }

        self.revealed_count += cascaded;
        cascaded
    }

    /// Sets or clears a flag. Returns true iff the flag state changed;
    /// revealed cells never change.
    pub fn set_flag(&mut self, pos: Position, value: bool) -> Result<bool> {
        let index = self.checked_index(pos)?;
        let cell = &mut self.cells[index];
        if cell.revealed || cell.flagged == value {
            return Ok(false);
        }

        cell.flagged = value;
        if value {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        trace!(%pos, flagged = value, "flag changed");
        Ok(true)
    }

    /// Win predicate: every mine carries a flag. Vacuously true without mines.
    pub fn all_mines_flagged(&self) -> bool {
        self.cells
            .iter()
            .filter(|cell| cell.has_mine)
            .all(|cell| cell.flagged)
    }

    /// True once any mine has been revealed.
    pub fn has_revealed_mine(&self) -> bool {
        self.cells.iter().any(|cell| cell.has_mine && cell.revealed)
    }

    pub fn reveal_all(&mut self) {
        self.cells.iter_mut().for_each(|cell| cell.revealed = true);
        self.revealed_count = self.cells.len();
    }

    pub fn is_within_bounds(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    pub fn cell(&self, pos: Position) -> Result<&Cell> {
        let index = self.checked_index(pos)?;
        Ok(&self.cells[index])
    }

    /// Every coordinate in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (rows, cols) = self.cells.dim();
        (0..rows).cartesian_product(0..cols).map(position_of)
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dim()
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged_count
    }

    /// The solved grid as text, for debugging.
    pub fn solution(&self) -> Solution<'_> {
        Solution { board: self }
    }

    fn index(&self, pos: Position) -> Option<Index> {
        let (rows, cols) = self.cells.dim();
        let row = usize::try_from(pos.row).ok().filter(|&row| row < rows)?;
        let col = usize::try_from(pos.col).ok().filter(|&col| col < cols)?;
        Some((row, col))
    }

    fn checked_index(&self, pos: Position) -> Result<Index> {
        self.index(pos).ok_or(GameError::OutOfBounds(pos))
    }

    fn neighbor_indices(&self, index: Index) -> impl Iterator<Item = Index> + '_ {
        position_of(index)
            .neighbors()
            .filter_map(move |pos| self.index(pos))
    }

    fn count_adjacent_mines(&self, index: Index) -> u8 {
        self.neighbor_indices(index)
            .filter(|&neighbor| self.cells[neighbor].has_mine)
            .count() as u8
    }

    fn adjacent_at(&self, index: Index) -> u8 {
        self.cells[index]
            .adjacent_mines
            .unwrap_or_else(|| self.count_adjacent_mines(index))
    }
}

fn position_of((row, col): Index) -> Position {
    Position::new(row as i32, col as i32)
}

/// Text dump of a board's solution: counts joined by `-`, mines as `*`.
pub struct Solution<'a> {
    board: &'a Board,
}

impl fmt::Display for Solution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.board.cells.rows() {
            let line = row
                .iter()
                .map(|cell| match cell.adjacent_mines {
                    _ if cell.has_mine => "*".to_string(),
                    Some(count) => count.to_string(),
                    None => "?".to_string(),
                })
                .join("-");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
