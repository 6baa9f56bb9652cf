use super::*;
use crate::{resolve_matches, Event, EventBus, FeedbackKind, MoveRecord, Point};

impl Game {
    /// Click a card directly (the input event targeted it). The occlusion
    /// probe is the card's center.
    pub fn click_card(
        &mut self,
        id: u32,
        events: &mut EventBus,
    ) -> Result<ClickOutcome, GameError> {
        self.ensure_playing()?;
        let card = self.board.card(id).ok_or(GameError::UnknownCard(id))?;
        let probe = card.center(self.board.rule());
        self.collect(id, probe, events)
    }

    /// Click a point on the board. Resolves to the topmost card containing
    /// the point; empty space is a no-op.
    pub fn click_at(
        &mut self,
        point: Point,
        events: &mut EventBus,
    ) -> Result<Option<ClickOutcome>, GameError> {
        self.ensure_playing()?;
        match self.board.resolve_click_at(point) {
            Some(id) => self.collect(id, point, events).map(Some),
            None => Ok(None),
        }
    }

    fn collect(
        &mut self,
        id: u32,
        point: Point,
        events: &mut EventBus,
    ) -> Result<ClickOutcome, GameError> {
        if self.board.covered_at(id, point) {
            events.push(Event::ClickRejected { id });
            return Ok(ClickOutcome::Rejected);
        }
        let Some(slot) = self.tray.first_empty_slot() else {
            events.push(Event::ClickRejected { id });
            return Ok(ClickOutcome::Rejected);
        };
        let card = self.board.remove(id).ok_or(GameError::UnknownCard(id))?;
        self.history.push(MoveRecord {
            snapshot: (&card).into(),
            slot,
        });
        self.tray.place(slot, card.symbol)?;
        events.push(Event::CardCollected {
            id,
            symbol: card.symbol,
            slot,
        });
        events.push(Event::Feedback(FeedbackKind::Click));
        self.score += resolve_matches(&mut self.tray, &self.config.matching, events);
        self.check_outcome(events);
        Ok(ClickOutcome::Collected)
    }

    /// Terminal check after a placement+match cycle. An empty board wins
    /// before tray fullness is considered, so clearing the last card into
    /// the last slot is still a win.
    pub(super) fn check_outcome(&mut self, events: &mut EventBus) {
        if self.board.is_empty() {
            self.phase = Phase::Won;
            events.push(Event::LevelWon {
                level: self.level.level,
                score: self.score,
            });
            events.push(Event::Feedback(FeedbackKind::LevelWon));
        } else if self.tray.is_full() {
            self.phase = Phase::Lost;
            events.push(Event::LevelLost {
                level: self.level.level,
                score: self.score,
            });
            events.push(Event::Feedback(FeedbackKind::LevelLost));
        }
    }
}
