use crate::BoardRule;
use serde::{Deserialize, Serialize};

/// Opaque tile face. The value is an index into the session's [`SymbolCatalog`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Symbol(pub u8);

/// Names the faces available to the pool generator. Frontends use the names
/// for display; the engine only ever compares `Symbol` values.
#[derive(Debug, Clone)]
pub struct SymbolCatalog {
    names: Vec<String>,
}

impl SymbolCatalog {
    pub fn new(mut names: Vec<String>) -> Self {
        // Symbol ids are u8.
        names.truncate(usize::from(u8::MAX) + 1);
        Self { names }
    }

    pub fn standard() -> Self {
        Self::new(
            [
                "sheep", "fox", "bear", "rabbit", "panda", "tiger", "koala", "deer", "owl",
                "hedgehog",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, symbol: Symbol) -> Option<&str> {
        self.names.get(usize::from(symbol.0)).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Placement metadata for one board card. Stack order decides occlusion;
/// rotation is carried for frontends and never affects hit testing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Layout {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub stack: u16,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Card {
    pub id: u32,
    pub symbol: Symbol,
    pub layout: Layout,
}

impl Card {
    pub fn contains(&self, point: Point, rule: &BoardRule) -> bool {
        point.x >= self.layout.x
            && point.x <= self.layout.x + rule.card_width
            && point.y >= self.layout.y
            && point.y <= self.layout.y + rule.card_height
    }

    pub fn center(&self, rule: &BoardRule) -> Point {
        Point {
            x: self.layout.x + rule.card_width / 2.0,
            y: self.layout.y + rule.card_height / 2.0,
        }
    }
}
