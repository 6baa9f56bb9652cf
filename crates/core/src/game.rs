use crate::{
    Board, GameConfig, LevelConfig, MoveHistory, OutcomeChoice, Phase, RngState, Symbol,
    ToolCounters, Tray, TrayError,
};
use thiserror::Error;

mod click;
mod setup;
mod tools;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("no card with id {0}")]
    UnknownCard(u32),
    #[error("no parked card at index {0}")]
    UnknownParkedCard(usize),
    #[error("level already ended in {0:?}")]
    LevelOver(Phase),
    #[error("no level in progress")]
    NoActiveLevel,
    #[error("no outcome waiting to be resolved")]
    NoPendingOutcome,
    #[error("choice not offered: {0:?}")]
    ChoiceNotOffered(OutcomeChoice),
    #[error("tray error: {0}")]
    Tray(#[from] TrayError),
}

/// What a click attempt did. Rejections are expected play, not errors: the
/// card was occluded or no tray slot was free, and nothing mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Collected,
    Rejected,
}

/// One level attempt: the board, the tray, tool counters, the undo history
/// and the parked-card holding area, driven synchronously by player input.
#[derive(Debug)]
pub struct Game {
    pub config: GameConfig,
    pub level: LevelConfig,
    pub board: Board,
    pub tray: Tray,
    pub history: MoveHistory,
    pub tools: ToolCounters,
    pub removed: Vec<Symbol>,
    pub rng: RngState,
    pub score: u32,
    pub phase: Phase,
}
