use super::*;
use crate::{build_pool, Event, EventBus, SymbolCatalog};

impl Game {
    pub fn new(
        config: GameConfig,
        catalog: &SymbolCatalog,
        level: u32,
        seed: u64,
        events: &mut EventBus,
    ) -> Self {
        let level_config = config.level_config(level, catalog.len());
        let mut rng = RngState::from_seed(seed);
        let pool = build_pool(&level_config, &config.matching, catalog, &mut rng);
        let mut board = Board::new(config.board.clone());
        board.populate(&pool, &mut rng);
        let tray = Tray::new(level_config.tray_size);
        let tools = ToolCounters::from_rule(&config.tools);
        events.push(Event::LevelStarted {
            level,
            cards: pool.len(),
            variety: level_config.symbol_variety,
            tray: level_config.tray_size,
        });
        Self {
            config,
            level: level_config,
            board,
            tray,
            history: MoveHistory::default(),
            tools,
            removed: Vec::new(),
            rng,
            score: 0,
            phase: Phase::Playing,
        }
    }

    pub fn cards_remaining(&self) -> usize {
        self.board.len()
    }

    pub(super) fn ensure_playing(&self) -> Result<(), GameError> {
        if self.phase == Phase::Playing {
            Ok(())
        } else {
            Err(GameError::LevelOver(self.phase))
        }
    }
}
