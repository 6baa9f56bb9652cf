use trimatch_core::{
    Event, EventBus, GameConfig, GameError, OutcomeChoice, Phase, PromptKind, Session, Symbol,
    SymbolCatalog, ToolKind,
};

/// Tiny levels with a single symbol kind, so any attempt is winnable by
/// clicking every card.
fn quick_config(max_level: u32) -> GameConfig {
    let mut config = GameConfig::standard();
    config.progression.base_cards = 3;
    config.progression.cards_per_level = 3;
    config.progression.base_variety = 1;
    config.progression.variety_step = u32::MAX;
    config.progression.max_level = max_level;
    config
}

fn quick_session(max_level: u32, seed: u64) -> Session {
    Session::new(quick_config(max_level), SymbolCatalog::standard(), seed)
}

fn topmost_card_id(session: &Session) -> u32 {
    session
        .game()
        .expect("level in progress")
        .board
        .cards()
        .iter()
        .max_by_key(|card| card.layout.stack)
        .map(|card| card.id)
        .expect("board is empty")
}

fn win_current_level(session: &mut Session, events: &mut EventBus) {
    while session.game().map(|game| game.phase) == Some(Phase::Playing) {
        let id = topmost_card_id(session);
        session.click_card(id, events).unwrap();
    }
    assert_eq!(session.game().map(|game| game.phase), Some(Phase::Won));
}

#[test]
fn winning_prompts_for_the_next_level() {
    let mut session = quick_session(20, 42);
    let mut events = EventBus::default();
    session.start_level(&mut events);
    win_current_level(&mut session, &mut events);

    assert_eq!(session.pending_prompt(), Some(PromptKind::LevelComplete));
    let drained: Vec<Event> = events.drain().collect();
    assert!(drained.iter().any(|event| matches!(
        event,
        Event::OutcomePrompt {
            kind: PromptKind::LevelComplete,
            ..
        }
    )));

    session.choose(OutcomeChoice::NextLevel, &mut events).unwrap();
    assert_eq!(session.level(), 2);
    let drained: Vec<Event> = events.drain().collect();
    assert!(drained
        .iter()
        .any(|event| matches!(event, Event::LevelStarted { level: 2, cards: 6, .. })));
}

#[test]
fn final_level_win_offers_restart() {
    let mut session = quick_session(1, 42);
    let mut events = EventBus::default();
    session.start_level(&mut events);
    win_current_level(&mut session, &mut events);

    assert_eq!(
        session.pending_prompt(),
        Some(PromptKind::AllLevelsComplete)
    );
    let drained: Vec<Event> = events.drain().collect();
    assert!(drained
        .iter()
        .any(|event| matches!(event, Event::AllLevelsWon { .. })));

    session.choose(OutcomeChoice::RestartAll, &mut events).unwrap();
    assert_eq!(session.level(), 1);
    assert!(session.game().is_some());
}

#[test]
fn level_count_is_clamped_at_the_top() {
    let mut session = quick_session(2, 7);
    let mut events = EventBus::default();
    session.start_level(&mut events);
    win_current_level(&mut session, &mut events);
    session.choose(OutcomeChoice::NextLevel, &mut events).unwrap();
    assert_eq!(session.level(), 2);
    win_current_level(&mut session, &mut events);
    assert_eq!(
        session.pending_prompt(),
        Some(PromptKind::AllLevelsComplete)
    );
}

#[test]
fn losing_offers_retry_and_retry_resets_the_attempt() {
    let mut session = quick_session(20, 42);
    let mut events = EventBus::default();
    session.start_level(&mut events);

    {
        let game = session.game_mut().unwrap();
        for slot in 0..6 {
            game.tray.place(slot, Symbol((slot + 1) as u8)).unwrap();
        }
        game.tools.charge(ToolKind::Shuffle);
        game.score = 0;
    }
    let id = topmost_card_id(&session);
    session.click_card(id, &mut events).unwrap();
    assert_eq!(session.game().unwrap().phase, Phase::Lost);
    assert_eq!(session.pending_prompt(), Some(PromptKind::LevelFailed));

    session.choose(OutcomeChoice::RetryLevel, &mut events).unwrap();
    let game = session.game().unwrap();
    assert_eq!(game.phase, Phase::Playing);
    assert_eq!(game.score, 0);
    assert_eq!(game.board.len(), 3);
    assert!(game.tray.is_empty());
    assert_eq!(game.tools.remaining(ToolKind::Shuffle), 1);
    assert_eq!(game.tools.remaining(ToolKind::Undo), 1);
    assert_eq!(game.tools.remaining(ToolKind::Clear), 1);
}

#[test]
fn retry_deals_a_fresh_layout() {
    let mut session = quick_session(20, 1234);
    let mut events = EventBus::default();
    session.start_level(&mut events);
    let first: Vec<_> = session
        .game()
        .unwrap()
        .board
        .cards()
        .iter()
        .map(|card| card.layout)
        .collect();

    session.start_level(&mut events);
    let second: Vec<_> = session
        .game()
        .unwrap()
        .board
        .cards()
        .iter()
        .map(|card| card.layout)
        .collect();
    assert_ne!(first, second);
}

#[test]
fn same_seed_reproduces_the_same_deal() {
    let mut events = EventBus::default();
    let mut left = quick_session(20, 99);
    let mut right = quick_session(20, 99);
    left.start_level(&mut events);
    right.start_level(&mut events);
    assert_eq!(
        left.game().unwrap().board.cards(),
        right.game().unwrap().board.cards()
    );
}

#[test]
fn choices_outside_the_prompt_are_rejected() {
    let mut session = quick_session(20, 42);
    let mut events = EventBus::default();

    assert!(matches!(
        session.choose(OutcomeChoice::NextLevel, &mut events),
        Err(GameError::NoPendingOutcome)
    ));

    session.start_level(&mut events);
    win_current_level(&mut session, &mut events);
    assert!(matches!(
        session.choose(OutcomeChoice::RetryLevel, &mut events),
        Err(GameError::ChoiceNotOffered(OutcomeChoice::RetryLevel))
    ));

    session.choose(OutcomeChoice::ReturnToMenu, &mut events).unwrap();
    assert!(session.game().is_none());
    assert_eq!(session.pending_prompt(), None);
}

#[test]
fn actions_require_an_active_level() {
    let mut session = quick_session(20, 42);
    let mut events = EventBus::default();
    assert!(matches!(
        session.click_card(1, &mut events),
        Err(GameError::NoActiveLevel)
    ));
    assert!(matches!(
        session.use_tool(ToolKind::Shuffle, &mut events),
        Err(GameError::NoActiveLevel)
    ));
}

#[test]
fn menu_is_reachable_mid_level() {
    let mut session = quick_session(20, 42);
    let mut events = EventBus::default();
    session.start_level(&mut events);
    session.return_to_menu();
    assert!(session.game().is_none());

    session.start_level(&mut events);
    assert_eq!(session.level(), 1);
    assert!(session.game().is_some());
}
