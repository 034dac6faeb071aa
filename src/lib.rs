pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod position;
pub mod view;

pub use board::{Board, Cell, RevealOutcome, Solution};
pub use config::GameConfig;
pub use error::{GameError, Result};
pub use game::{Action, ActionOutcome, FlagOutcome, GameSession, Phase};
pub use position::Position;
pub use view::{CellView, SessionView};
