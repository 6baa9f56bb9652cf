use crate::{Card, Layout, Symbol};
use serde::{Deserialize, Serialize};

/// What undo needs to put a collected card back: its face and where it sat.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CardSnapshot {
    pub symbol: Symbol,
    pub layout: Layout,
}

impl From<&Card> for CardSnapshot {
    fn from(card: &Card) -> Self {
        Self {
            symbol: card.symbol,
            layout: card.layout,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MoveRecord {
    pub snapshot: CardSnapshot,
    pub slot: usize,
}

/// Board-to-tray transfers, newest last. Records are destroyed once popped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveHistory {
    records: Vec<MoveRecord>,
}

impl MoveHistory {
    pub fn push(&mut self, record: MoveRecord) {
        self.records.push(record);
    }

    pub fn pop(&mut self) -> Option<MoveRecord> {
        self.records.pop()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
