use std::collections::HashMap;
use trimatch_core::{build_pool, GameConfig, RngState, Symbol, SymbolCatalog};

macro_rules! level_case {
    ($name:ident, $level:expr) => {
        #[test]
        fn $name() {
            let level: u32 = $level;
            let config = GameConfig::standard();
            let catalog = SymbolCatalog::standard();
            let level_config = config.level_config(level, catalog.len());

            assert_eq!(level_config.card_count, 15 + (level - 1) * 15);
            assert_eq!(level_config.tray_size, 7);
            let expected_variety = (4 + level / 2).min(catalog.len() as u32);
            assert_eq!(level_config.symbol_variety, expected_variety);

            let mut rng = RngState::from_seed(0xA11CE ^ u64::from(level));
            let pool = build_pool(&level_config, &config.matching, &catalog, &mut rng);

            assert_eq!(pool.len(), level_config.card_count as usize);
            assert_eq!(pool.len() % 3, 0);

            let mut counts: HashMap<Symbol, u32> = HashMap::new();
            for symbol in &pool {
                *counts.entry(*symbol).or_insert(0) += 1;
            }
            for (symbol, count) in &counts {
                assert_eq!(
                    count % 3,
                    0,
                    "symbol {:?} occurs {} times in level {}",
                    symbol,
                    count,
                    level
                );
                assert!(u32::from(symbol.0) < level_config.symbol_variety);
            }

            let groups = pool.len() / 3;
            let expected_distinct = groups.min(level_config.symbol_variety as usize);
            assert_eq!(counts.len(), expected_distinct);
        }
    };
}

level_case!(level_1_pool, 1);
level_case!(level_2_pool, 2);
level_case!(level_3_pool, 3);
level_case!(level_4_pool, 4);
level_case!(level_5_pool, 5);
level_case!(level_6_pool, 6);
level_case!(level_7_pool, 7);
level_case!(level_8_pool, 8);
level_case!(level_9_pool, 9);
level_case!(level_10_pool, 10);
level_case!(level_11_pool, 11);
level_case!(level_12_pool, 12);
level_case!(level_13_pool, 13);
level_case!(level_14_pool, 14);
level_case!(level_15_pool, 15);
level_case!(level_16_pool, 16);
level_case!(level_17_pool, 17);
level_case!(level_18_pool, 18);
level_case!(level_19_pool, 19);
level_case!(level_20_pool, 20);

#[test]
fn partial_group_is_dropped() {
    let config = GameConfig::standard();
    let catalog = SymbolCatalog::standard();
    let mut level_config = config.level_config(1, catalog.len());
    level_config.card_count = 16;
    let mut rng = RngState::from_seed(7);
    let pool = build_pool(&level_config, &config.matching, &catalog, &mut rng);
    assert_eq!(pool.len(), 15);
}

#[test]
fn empty_catalog_yields_empty_pool() {
    let config = GameConfig::standard();
    let catalog = SymbolCatalog::new(Vec::new());
    let level_config = config.level_config(1, catalog.len());
    let mut rng = RngState::from_seed(7);
    let pool = build_pool(&level_config, &config.matching, &catalog, &mut rng);
    assert!(pool.is_empty());
}

#[test]
fn variety_is_clamped_to_catalog() {
    let config = GameConfig::standard();
    let catalog = SymbolCatalog::standard();
    let level_config = config.level_config(20, catalog.len());
    assert_eq!(level_config.symbol_variety, catalog.len() as u32);
}
