use crate::ToolRule;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Shuffle,
    Undo,
    Clear,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [ToolKind::Shuffle, ToolKind::Undo, ToolKind::Clear];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Shuffle => "shuffle",
            ToolKind::Undo => "undo",
            ToolKind::Clear => "clear",
        }
    }
}

/// Remaining uses per tool for the current level attempt. Counters only
/// move downward; a level (re)start builds fresh counters from the rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCounters {
    shuffle: u8,
    undo: u8,
    clear: u8,
}

impl ToolCounters {
    pub fn from_rule(rule: &ToolRule) -> Self {
        Self {
            shuffle: rule.shuffle_uses,
            undo: rule.undo_uses,
            clear: rule.clear_uses,
        }
    }

    pub fn remaining(&self, kind: ToolKind) -> u8 {
        match kind {
            ToolKind::Shuffle => self.shuffle,
            ToolKind::Undo => self.undo,
            ToolKind::Clear => self.clear,
        }
    }

    pub fn is_available(&self, kind: ToolKind) -> bool {
        self.remaining(kind) > 0
    }

    pub fn charge(&mut self, kind: ToolKind) {
        let counter = match kind {
            ToolKind::Shuffle => &mut self.shuffle,
            ToolKind::Undo => &mut self.undo,
            ToolKind::Clear => &mut self.clear,
        };
        *counter = counter.saturating_sub(1);
    }
}
