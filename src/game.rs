use crate::{
    Board, CellView, GameConfig, GameError, Position, Result, RevealOutcome, SessionView,
};
use rand::Rng;
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Won,
    Lost,
}

impl Phase {
    pub fn is_finished(self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Reveal,
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagOutcome {
    Placed,
    Removed,
    /// Revealed cell, empty flag budget, or finished game
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Reveal(RevealOutcome),
    Flag(FlagOutcome),
}

/// One game in progress: a board plus its phase.
///
/// The win rule is "every mine is flagged". Revealing safe cells is
/// never required, and a board without mines is won from the start.
/// The flag budget is the mine count minus the flags on the board.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    config: GameConfig,
    phase: Phase,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::new_with_rng(config, &mut rand::thread_rng())
    }

    pub fn new_with_rng<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self> {
        let board = Board::new_with_rng(config, rng)?;
        Ok(Self::from_parts(board, config))
    }

    /// Starts a session on a prepared board, e.g. one with a fixed layout.
    /// Flags already on the board count against the budget, and a board
    /// with a revealed mine starts out lost.
    pub fn from_board(board: Board) -> Self {
        let (rows, cols) = board.dimensions();
        let config = GameConfig::new(rows, cols, board.mine_count());
        Self::from_parts(board, config)
    }

    fn from_parts(board: Board, config: GameConfig) -> Self {
        info!(
            rows = config.rows,
            cols = config.cols,
            mines = config.mines,
            "new game"
        );
        trace!("solution:\n{}", board.solution());

        let mut session = Self {
            board,
            config,
            phase: Phase::Playing,
        };
        if session.board.has_revealed_mine() {
            session.lose();
        }
        session.check_win_condition();
        session
    }

    /// Replaces the current game. The new board is fully built before
    /// anything is swapped, so on error the current game is kept as is.
    pub fn new_game(&mut self, config: GameConfig) -> Result<()> {
        self.new_game_with_rng(config, &mut rand::thread_rng())
    }

    pub fn new_game_with_rng<R: Rng + ?Sized>(
        &mut self,
        config: GameConfig,
        rng: &mut R,
    ) -> Result<()> {
        *self = Self::new_with_rng(config, rng)?;
        Ok(())
    }

    /// New game with the current parameters.
    pub fn restart(&mut self) -> Result<()> {
        self.new_game(self.config)
    }

    pub fn perform_action(&mut self, pos: Position, action: Action) -> Result<ActionOutcome> {
        match action {
            Action::Reveal => self.reveal_at(pos).map(ActionOutcome::Reveal),
            Action::Flag => self.flag_at(pos).map(ActionOutcome::Flag),
        }
    }

    pub fn reveal_at(&mut self, pos: Position) -> Result<RevealOutcome> {
        if !self.board.is_within_bounds(pos) {
            return Err(GameError::OutOfBounds(pos));
        }
        if self.phase != Phase::Playing {
            return Ok(RevealOutcome::Unchanged);
        }

        let outcome = self.board.reveal(pos)?;
        debug!(%pos, ?outcome, "reveal");
        if outcome == RevealOutcome::HitMine {
            self.lose();
        }
        self.check_win_condition();
        Ok(outcome)
    }

    /// Toggles the flag on a hidden cell, spending or refunding budget.
    pub fn flag_at(&mut self, pos: Position) -> Result<FlagOutcome> {
        let cell = *self.board.cell(pos)?;
        if self.phase != Phase::Playing || cell.is_revealed() {
            return Ok(FlagOutcome::Rejected);
        }

        let outcome = if cell.is_flagged() {
            self.board.set_flag(pos, false)?;
            FlagOutcome::Removed
        } else if self.remaining_flags() == 0 {
            FlagOutcome::Rejected
        } else {
            self.board.set_flag(pos, true)?;
            FlagOutcome::Placed
        };
        debug!(%pos, ?outcome, remaining = self.remaining_flags(), "flag");

        self.check_win_condition();
        Ok(outcome)
    }

    /// Gives up the current game, disclosing the board. Returns false if
    /// the game had already ended.
    pub fn forfeit(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        info!("game forfeited");
        self.lose();
        true
    }

    fn lose(&mut self) {
        self.phase = Phase::Lost;
        self.board.reveal_all();
        info!("game lost");
    }

    fn check_win_condition(&mut self) {
        if self.phase == Phase::Playing && self.board.all_mines_flagged() {
            self.phase = Phase::Won;
            info!("game won");
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_flags(&self) -> usize {
        self.config.mines.saturating_sub(self.board.flagged_count())
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    // Exposes mine positions; renderers go through the views.
    #[cfg(test)]
    pub(crate) fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_view(&self, pos: Position) -> Result<CellView> {
        Ok(CellView::new(self.board.cell(pos)?, self.phase))
    }

    /// Views of every cell in row-major order.
    pub fn cell_views(&self) -> impl Iterator<Item = (Position, CellView)> + '_ {
        self.board
            .positions()
            .filter_map(move |pos| self.cell_view(pos).ok().map(|view| (pos, view)))
    }

    pub fn session_view(&self) -> SessionView {
        let (rows, cols) = self.board.dimensions();
        SessionView {
            phase: self.phase,
            remaining_flags: self.remaining_flags(),
            rows,
            cols,
            mine_count: self.config.mines,
        }
    }
}
