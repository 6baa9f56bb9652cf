use crate::{
    ClickOutcome, Event, EventBus, FeedbackKind, Game, GameConfig, GameError, Phase, Point,
    SymbolCatalog, ToolKind,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PromptKind {
    LevelComplete,
    AllLevelsComplete,
    LevelFailed,
}

/// The only ways to resume after a terminal outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OutcomeChoice {
    NextLevel,
    RetryLevel,
    RestartAll,
    ReturnToMenu,
}

impl PromptKind {
    pub fn choices(self) -> &'static [OutcomeChoice] {
        match self {
            PromptKind::LevelComplete => &[OutcomeChoice::NextLevel, OutcomeChoice::ReturnToMenu],
            PromptKind::AllLevelsComplete => {
                &[OutcomeChoice::RestartAll, OutcomeChoice::ReturnToMenu]
            }
            PromptKind::LevelFailed => &[OutcomeChoice::RetryLevel, OutcomeChoice::ReturnToMenu],
        }
    }
}

/// Level progression around individual [`Game`] attempts: starts levels,
/// watches for terminal phases, raises the outcome prompt and applies the
/// player's choice. One session seed makes the whole run reproducible;
/// every attempt mixes the level and attempt counter into its own seed so a
/// retry deals a fresh layout.
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    catalog: SymbolCatalog,
    seed: u64,
    level: u32,
    attempt: u32,
    game: Option<Game>,
    pending: Option<PromptKind>,
}

impl Session {
    pub fn new(config: GameConfig, catalog: SymbolCatalog, seed: u64) -> Self {
        Self {
            config,
            catalog,
            seed,
            level: 1,
            attempt: 0,
            game: None,
            pending: None,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn max_level(&self) -> u32 {
        self.config.max_level()
    }

    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn game_mut(&mut self) -> Option<&mut Game> {
        self.game.as_mut()
    }

    pub fn pending_prompt(&self) -> Option<PromptKind> {
        self.pending
    }

    pub fn start_level(&mut self, events: &mut EventBus) {
        self.pending = None;
        self.attempt = self.attempt.saturating_add(1);
        let seed = mix_seed(self.seed, self.level, self.attempt);
        self.game = Some(Game::new(
            self.config.clone(),
            &self.catalog,
            self.level,
            seed,
            events,
        ));
    }

    pub fn return_to_menu(&mut self) {
        self.game = None;
        self.pending = None;
    }

    pub fn click_card(
        &mut self,
        id: u32,
        events: &mut EventBus,
    ) -> Result<ClickOutcome, GameError> {
        let outcome = self.active_game()?.click_card(id, events)?;
        self.check_terminal(events);
        Ok(outcome)
    }

    pub fn click_at(
        &mut self,
        point: Point,
        events: &mut EventBus,
    ) -> Result<Option<ClickOutcome>, GameError> {
        let outcome = self.active_game()?.click_at(point, events)?;
        self.check_terminal(events);
        Ok(outcome)
    }

    pub fn use_tool(&mut self, kind: ToolKind, events: &mut EventBus) -> Result<bool, GameError> {
        self.active_game()?.use_tool(kind, events)
    }

    pub fn return_removed(
        &mut self,
        index: usize,
        events: &mut EventBus,
    ) -> Result<bool, GameError> {
        self.active_game()?.return_removed(index, events)
    }

    /// Apply one of the choices offered by the pending outcome prompt.
    pub fn choose(
        &mut self,
        choice: OutcomeChoice,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        let kind = self.pending.ok_or(GameError::NoPendingOutcome)?;
        if !kind.choices().contains(&choice) {
            return Err(GameError::ChoiceNotOffered(choice));
        }
        self.pending = None;
        match choice {
            OutcomeChoice::NextLevel => {
                self.level = self.level.saturating_add(1).min(self.max_level());
                self.attempt = 0;
                self.start_level(events);
            }
            OutcomeChoice::RetryLevel => {
                self.start_level(events);
            }
            OutcomeChoice::RestartAll => {
                self.level = 1;
                self.attempt = 0;
                self.start_level(events);
            }
            OutcomeChoice::ReturnToMenu => self.return_to_menu(),
        }
        Ok(())
    }

    fn active_game(&mut self) -> Result<&mut Game, GameError> {
        self.game.as_mut().ok_or(GameError::NoActiveLevel)
    }

    fn check_terminal(&mut self, events: &mut EventBus) {
        if self.pending.is_some() {
            return;
        }
        let Some(game) = &self.game else {
            return;
        };
        let kind = match game.phase {
            Phase::Playing => return,
            Phase::Won if self.level >= self.max_level() => {
                events.push(Event::AllLevelsWon { score: game.score });
                events.push(Event::Feedback(FeedbackKind::AllLevelsWon));
                PromptKind::AllLevelsComplete
            }
            Phase::Won => PromptKind::LevelComplete,
            Phase::Lost => PromptKind::LevelFailed,
        };
        self.pending = Some(kind);
        events.push(Event::OutcomePrompt {
            kind,
            choices: kind.choices().to_vec(),
        });
    }
}

fn mix_seed(seed: u64, level: u32, attempt: u32) -> u64 {
    let mut value = seed ^ ((u64::from(level) << 32) | u64::from(attempt));
    value ^= value >> 33;
    value = value.wrapping_mul(0xff51afd7ed558ccd);
    value ^= value >> 33;
    value = value.wrapping_mul(0xc4ceb9fe1a85ec53);
    value ^ (value >> 33)
}
