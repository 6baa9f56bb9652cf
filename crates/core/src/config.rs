use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardRule {
    pub width: f32,
    pub height: f32,
    pub card_width: f32,
    pub card_height: f32,
    /// Maximum rotation jitter in degrees, applied symmetrically.
    pub rotation_jitter: f32,
    /// Stack orders are drawn from `[0, stack_levels)`.
    pub stack_levels: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionRule {
    pub base_cards: u32,
    pub cards_per_level: u32,
    pub base_variety: u32,
    /// Levels per extra symbol kind.
    pub variety_step: u32,
    pub max_level: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRule {
    pub group_size: usize,
    pub match_score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrayRule {
    pub capacity: usize,
    /// Slots emptied by one use of the clear tool.
    pub clear_tool_take: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolRule {
    pub shuffle_uses: u8,
    pub undo_uses: u8,
    pub clear_uses: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub board: BoardRule,
    pub progression: ProgressionRule,
    pub matching: MatchRule,
    pub tray: TrayRule,
    pub tools: ToolRule,
}

/// Derived per-level parameters. Pure function of the level number and the
/// catalog size, never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LevelConfig {
    pub level: u32,
    pub card_count: u32,
    pub tray_size: usize,
    pub symbol_variety: u32,
}

impl GameConfig {
    pub fn standard() -> Self {
        Self {
            board: BoardRule {
                width: 600.0,
                height: 400.0,
                card_width: 70.0,
                card_height: 90.0,
                rotation_jitter: 10.0,
                stack_levels: 1000,
            },
            progression: ProgressionRule {
                base_cards: 15,
                cards_per_level: 15,
                base_variety: 4,
                variety_step: 2,
                max_level: 20,
            },
            matching: MatchRule {
                group_size: 3,
                match_score: 10,
            },
            tray: TrayRule {
                capacity: 7,
                clear_tool_take: 3,
            },
            tools: ToolRule {
                shuffle_uses: 1,
                undo_uses: 1,
                clear_uses: 1,
            },
        }
    }

    pub fn level_config(&self, level: u32, catalog_len: usize) -> LevelConfig {
        let progression = &self.progression;
        let card_count = progression
            .base_cards
            .saturating_add(level.saturating_sub(1).saturating_mul(progression.cards_per_level));
        let step = progression.variety_step.max(1);
        let variety = progression
            .base_variety
            .saturating_add(level / step)
            .min(catalog_len as u32);
        LevelConfig {
            level,
            card_count,
            tray_size: self.tray.capacity,
            symbol_variety: variety,
        }
    }

    pub fn max_level(&self) -> u32 {
        self.progression.max_level
    }
}
