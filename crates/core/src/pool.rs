use crate::{LevelConfig, MatchRule, RngState, Symbol, SymbolCatalog};

/// Build the shuffled card pool for one level: complete groups of
/// `group_size` identical symbols, cycling through the first
/// `symbol_variety` catalog entries. A `card_count` that is not a multiple
/// of the group size loses the remainder; partial groups never enter the
/// pool.
pub fn build_pool(
    config: &LevelConfig,
    rule: &MatchRule,
    catalog: &SymbolCatalog,
    rng: &mut RngState,
) -> Vec<Symbol> {
    let group_size = rule.group_size;
    let variety = (config.symbol_variety as usize).min(catalog.len());
    if group_size == 0 || variety == 0 {
        return Vec::new();
    }
    let groups = config.card_count as usize / group_size;
    let mut pool = Vec::with_capacity(groups * group_size);
    for group in 0..groups {
        let symbol = Symbol((group % variety) as u8);
        for _ in 0..group_size {
            pool.push(symbol);
        }
    }
    rng.shuffle(&mut pool);
    pool
}
