use super::*;
use crate::{resolve_matches, Event, EventBus, FeedbackKind, ToolKind};

impl Game {
    /// Run a tool action. Returns whether anything happened; the counter is
    /// only charged for a non-no-op action, and a depleted tool is rejected
    /// without touching its counter.
    pub fn use_tool(&mut self, kind: ToolKind, events: &mut EventBus) -> Result<bool, GameError> {
        self.ensure_playing()?;
        if !self.tools.is_available(kind) {
            events.push(Event::ToolRejected { tool: kind });
            events.push(Event::Feedback(FeedbackKind::MoveFailure));
            return Ok(false);
        }
        let acted = match kind {
            ToolKind::Shuffle => {
                self.board.shuffle_layout(&mut self.rng);
                events.push(Event::BoardShuffled);
                true
            }
            ToolKind::Undo => self.undo_last_move(events),
            ToolKind::Clear => self.park_tray_cards(events),
        };
        if acted {
            self.tools.charge(kind);
            events.push(Event::ToolUsed {
                tool: kind,
                remaining: self.tools.remaining(kind),
            });
        }
        Ok(acted)
    }

    fn undo_last_move(&mut self, events: &mut EventBus) -> bool {
        let Some(record) = self.history.pop() else {
            events.push(Event::Feedback(FeedbackKind::MoveFailure));
            return false;
        };
        self.tray.clear_slot(record.slot);
        let id = self.board.restore(&record.snapshot);
        self.tray.compact();
        events.push(Event::MoveUndone {
            id,
            symbol: record.snapshot.symbol,
            slot: record.slot,
        });
        true
    }

    /// Move the first occupied tray slots into the holding area, then
    /// compact. The parked symbols stay returnable for the rest of the
    /// attempt.
    fn park_tray_cards(&mut self, events: &mut EventBus) -> bool {
        let take = self.config.tray.clear_tool_take;
        let mut parked = Vec::new();
        for slot in 0..self.tray.capacity() {
            if parked.len() == take {
                break;
            }
            if let Some(symbol) = self.tray.clear_slot(slot) {
                parked.push(symbol);
            }
        }
        if parked.is_empty() {
            events.push(Event::Feedback(FeedbackKind::MoveFailure));
            return false;
        }
        self.tray.compact();
        self.removed.extend(parked.iter().copied());
        events.push(Event::CardsParked { symbols: parked });
        true
    }

    /// Return a parked card to the first empty tray slot and re-run the
    /// match engine. A full tray rejects the return; the card stays parked.
    /// No terminal check runs here: a return cannot empty the board, and
    /// filling the tray this way leaves the attempt recoverable.
    pub fn return_removed(
        &mut self,
        index: usize,
        events: &mut EventBus,
    ) -> Result<bool, GameError> {
        self.ensure_playing()?;
        if index >= self.removed.len() {
            return Err(GameError::UnknownParkedCard(index));
        }
        let Some(slot) = self.tray.first_empty_slot() else {
            events.push(Event::ReturnRejected);
            events.push(Event::Feedback(FeedbackKind::MoveFailure));
            return Ok(false);
        };
        let symbol = self.removed.remove(index);
        self.tray.place(slot, symbol)?;
        events.push(Event::RemovedReturned { symbol, slot });
        events.push(Event::Feedback(FeedbackKind::Click));
        self.score += resolve_matches(&mut self.tray, &self.config.matching, events);
        Ok(true)
    }
}
