use crate::{OutcomeChoice, PromptKind, Symbol, ToolKind};
use serde::{Deserialize, Serialize};

/// Cosmetic cue for the presentation layer. Never read back by the engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FeedbackKind {
    Click,
    MatchSuccess,
    MoveFailure,
    LevelLost,
    LevelWon,
    AllLevelsWon,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    LevelStarted {
        level: u32,
        cards: usize,
        variety: u32,
        tray: usize,
    },
    CardCollected {
        id: u32,
        symbol: Symbol,
        slot: usize,
    },
    ClickRejected { id: u32 },
    MatchCleared {
        symbol: Symbol,
        slots: Vec<usize>,
        score: u32,
    },
    BoardShuffled,
    MoveUndone {
        id: u32,
        symbol: Symbol,
        slot: usize,
    },
    CardsParked { symbols: Vec<Symbol> },
    RemovedReturned { symbol: Symbol, slot: usize },
    ReturnRejected,
    ToolUsed { tool: ToolKind, remaining: u8 },
    ToolRejected { tool: ToolKind },
    LevelWon { level: u32, score: u32 },
    LevelLost { level: u32, score: u32 },
    AllLevelsWon { score: u32 },
    OutcomePrompt {
        kind: PromptKind,
        choices: Vec<OutcomeChoice>,
    },
    Feedback(FeedbackKind),
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
