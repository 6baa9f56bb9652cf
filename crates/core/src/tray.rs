use crate::Symbol;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrayError {
    #[error("slot {0} out of range")]
    SlotOutOfRange(usize),
    #[error("slot {0} already occupied")]
    SlotOccupied(usize),
}

/// Fixed-capacity ordered slot row where collected cards wait for a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tray {
    slots: Vec<Option<Symbol>>,
}

impl Tray {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Option<Symbol>] {
        &self.slots
    }

    pub fn first_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    pub fn place(&mut self, slot: usize, symbol: Symbol) -> Result<(), TrayError> {
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(TrayError::SlotOutOfRange(slot))?;
        if entry.is_some() {
            return Err(TrayError::SlotOccupied(slot));
        }
        *entry = Some(symbol);
        Ok(())
    }

    /// Empty a slot, returning its occupant. Out-of-range or already-empty
    /// slots yield `None`.
    pub fn clear_slot(&mut self, slot: usize) -> Option<Symbol> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// Left-pack occupied slots, preserving their relative order.
    pub fn compact(&mut self) {
        let occupied: Vec<Symbol> = self.slots.iter().filter_map(|slot| *slot).collect();
        for slot in &mut self.slots {
            *slot = None;
        }
        for (slot, symbol) in self.slots.iter_mut().zip(occupied) {
            *slot = Some(symbol);
        }
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Occupied slots in order, with their indices.
    pub fn occupants(&self) -> impl Iterator<Item = (usize, Symbol)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|symbol| (index, symbol)))
    }
}
