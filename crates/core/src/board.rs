use crate::{BoardRule, Card, CardSnapshot, Layout, Point, RngState, Symbol};

/// The playing surface: every not-yet-collected card with its placement
/// metadata. Cards are owned here exclusively while visible.
#[derive(Debug, Clone)]
pub struct Board {
    rule: BoardRule,
    cards: Vec<Card>,
    next_card_id: u32,
}

impl Board {
    pub fn new(rule: BoardRule) -> Self {
        Self {
            rule,
            cards: Vec::new(),
            next_card_id: 1,
        }
    }

    pub fn rule(&self) -> &BoardRule {
        &self.rule
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: u32) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn populate(&mut self, pool: &[Symbol], rng: &mut RngState) {
        self.cards.reserve(pool.len());
        for &symbol in pool {
            self.place(symbol, rng);
        }
    }

    /// Drop a card at a uniformly random spot fully inside the play area.
    pub fn place(&mut self, symbol: Symbol, rng: &mut RngState) -> u32 {
        let layout = self.random_layout(rng);
        let id = self.alloc_card_id();
        self.cards.push(Card { id, symbol, layout });
        id
    }

    /// Re-create a previously collected card at its recorded layout. The
    /// card gets a fresh id; ids are never reused within a level.
    pub fn restore(&mut self, snapshot: &CardSnapshot) -> u32 {
        let id = self.alloc_card_id();
        self.cards.push(Card {
            id,
            symbol: snapshot.symbol,
            layout: snapshot.layout,
        });
        id
    }

    pub fn remove(&mut self, id: u32) -> Option<Card> {
        let index = self.cards.iter().position(|card| card.id == id)?;
        Some(self.cards.remove(index))
    }

    /// Topmost card whose bounds contain the point.
    pub fn resolve_click_at(&self, point: Point) -> Option<u32> {
        self.cards
            .iter()
            .filter(|card| card.contains(point, &self.rule))
            .max_by_key(|card| card.layout.stack)
            .map(|card| card.id)
    }

    /// Occlusion predicate: true when some other card covering the same
    /// point has a strictly higher stack order. A higher card elsewhere on
    /// the board does not cover this one.
    pub fn covered_at(&self, id: u32, point: Point) -> bool {
        let Some(card) = self.card(id) else {
            return false;
        };
        self.cards.iter().any(|other| {
            other.id != id
                && other.layout.stack > card.layout.stack
                && other.contains(point, &self.rule)
        })
    }

    /// Permute the existing layouts among the live cards. Symbols stay on
    /// their cards; only the visual arrangement moves.
    pub fn shuffle_layout(&mut self, rng: &mut RngState) {
        let mut layouts: Vec<Layout> = self.cards.iter().map(|card| card.layout).collect();
        rng.shuffle(&mut layouts);
        for (card, layout) in self.cards.iter_mut().zip(layouts) {
            card.layout = layout;
        }
    }

    fn random_layout(&mut self, rng: &mut RngState) -> Layout {
        let max_x = (self.rule.width - self.rule.card_width).max(0.0);
        let max_y = (self.rule.height - self.rule.card_height).max(0.0);
        Layout {
            x: rng.range_f32(0.0, max_x),
            y: rng.range_f32(0.0, max_y),
            rotation: rng.range_f32(-self.rule.rotation_jitter, self.rule.rotation_jitter),
            stack: rng.range_u16(self.rule.stack_levels),
        }
    }

    fn alloc_card_id(&mut self) -> u32 {
        let id = self.next_card_id;
        self.next_card_id = self.next_card_id.saturating_add(1);
        id
    }
}
