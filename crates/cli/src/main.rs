use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use trimatch_core::{
    Event, EventBus, GameConfig, OutcomeChoice, Phase, Point, Session, Symbol, SymbolCatalog,
    ToolKind,
};

const SAVE_SCHEMA_VERSION: u32 = 1;
const DEFAULT_SESSION_SEED: u64 = 0x5EED;

fn default_session_seed() -> u64 {
    DEFAULT_SESSION_SEED
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SavedAction {
    action: String,
    #[serde(default)]
    args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SavedSession {
    version: u32,
    #[serde(default = "default_session_seed")]
    seed: u64,
    actions: Vec<SavedAction>,
}

#[derive(Debug, Default)]
struct CliOptions {
    seed: Option<u64>,
    load: Option<PathBuf>,
}

struct App {
    session: Session,
    events: EventBus,
    actions: Vec<SavedAction>,
    quit: bool,
}

impl App {
    fn new(seed: u64) -> Self {
        Self {
            session: Session::new(GameConfig::standard(), SymbolCatalog::standard(), seed),
            events: EventBus::default(),
            actions: Vec::new(),
            quit: false,
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_options(&args);

    let mut app = if let Some(path) = options.load.as_ref() {
        match load_session_file(path) {
            Ok(saved) => restore_app(saved),
            Err(err) => {
                eprintln!("load failed: {err}");
                std::process::exit(1);
            }
        }
    } else {
        App::new(options.seed.unwrap_or(DEFAULT_SESSION_SEED))
    };

    println!(
        "trimatch: collect three of a kind (seed {:#x})",
        app.session.seed()
    );
    println!("type 'help' for commands, 'start' to begin level {}", app.session.level());

    let interactive = stdin_is_tty();
    let mut line = String::new();
    while !app.quit {
        if interactive {
            print!("> ");
            let _ = io::stdout().flush();
        }
        line.clear();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        handle_line(&mut app, &line);
    }
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    options.seed = parse_seed(value);
                    idx += 1;
                }
            }
            "--load" => {
                if let Some(value) = args.get(idx + 1) {
                    options.load = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    options
}

fn parse_seed(value: &str) -> Option<u64> {
    if let Some(hex) = value.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()
    } else {
        value.parse().ok()
    }
}

fn handle_line(app: &mut App, line: &str) {
    let words: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    let Some((command, args)) = words.split_first() else {
        return;
    };
    match command.as_str() {
        "help" | "?" => print_help(),
        "exit" | "quit" | "q" => app.quit = true,
        "seed" => println!("session seed: {:#x}", app.session.seed()),
        "board" => print_board(app),
        "tray" => print_tray(app),
        "status" => print_status(app),
        "save" => {
            let Some(path) = arg_path_or_default(args.first()) else {
                println!("no save path (pass one or set TRIMATCH_SAVE)");
                return;
            };
            match save_session(app, &path) {
                Ok(()) => println!("saved to {}", path.display()),
                Err(err) => println!("save failed: {err}"),
            }
        }
        "load" => {
            let Some(path) = arg_path_or_default(args.first()) else {
                println!("no save path (pass one or set TRIMATCH_SAVE)");
                return;
            };
            match load_session_file(&path) {
                Ok(saved) => {
                    *app = restore_app(saved);
                    println!(
                        "session restored: level {}, {} recorded actions",
                        app.session.level(),
                        app.actions.len()
                    );
                }
                Err(err) => println!("load failed: {err}"),
            }
        }
        action => match apply_action(app, action, args) {
            Ok(()) => {
                app.actions.push(SavedAction {
                    action: action.to_string(),
                    args: args.to_vec(),
                });
                print_events(app);
            }
            Err(err) => {
                let _: Vec<Event> = app.events.drain().collect();
                println!("{err}");
            }
        },
    }
}

/// Mutating commands, shared between the REPL and save-file replay.
fn apply_action(app: &mut App, action: &str, args: &[String]) -> Result<(), String> {
    match action {
        "start" => {
            app.session.start_level(&mut app.events);
            Ok(())
        }
        "click" => {
            let id = parse_arg::<u32>(args, 0, "card id")?;
            app.session
                .click_card(id, &mut app.events)
                .map(|_| ())
                .map_err(|err| err.to_string())
        }
        "at" => {
            let x = parse_arg::<f32>(args, 0, "x coordinate")?;
            let y = parse_arg::<f32>(args, 1, "y coordinate")?;
            app.session
                .click_at(Point { x, y }, &mut app.events)
                .map(|_| ())
                .map_err(|err| err.to_string())
        }
        "shuffle" => use_tool(app, ToolKind::Shuffle),
        "undo" => use_tool(app, ToolKind::Undo),
        "clear" => use_tool(app, ToolKind::Clear),
        "return" => {
            let index = parse_arg::<usize>(args, 0, "parked card index")?;
            app.session
                .return_removed(index, &mut app.events)
                .map(|_| ())
                .map_err(|err| err.to_string())
        }
        "next" => choose(app, OutcomeChoice::NextLevel),
        "retry" => choose(app, OutcomeChoice::RetryLevel),
        "restart" => choose(app, OutcomeChoice::RestartAll),
        "menu" => {
            if app.session.pending_prompt().is_some() {
                choose(app, OutcomeChoice::ReturnToMenu)
            } else {
                app.session.return_to_menu();
                Ok(())
            }
        }
        other => Err(format!("unknown command: {other} (try 'help')")),
    }
}

fn use_tool(app: &mut App, kind: ToolKind) -> Result<(), String> {
    app.session
        .use_tool(kind, &mut app.events)
        .map(|_| ())
        .map_err(|err| err.to_string())
}

fn choose(app: &mut App, choice: OutcomeChoice) -> Result<(), String> {
    app.session
        .choose(choice, &mut app.events)
        .map_err(|err| err.to_string())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize, what: &str) -> Result<T, String> {
    let raw = args.get(index).ok_or_else(|| format!("missing {what}"))?;
    raw.parse().map_err(|_| format!("invalid {what}: {raw}"))
}

fn print_events(app: &mut App) {
    let drained: Vec<Event> = app.events.drain().collect();
    for event in drained {
        if let Some(text) = describe(&app.session, &event) {
            println!("{text}");
        }
    }
}

fn describe(session: &Session, event: &Event) -> Option<String> {
    let text = match event {
        Event::LevelStarted {
            level,
            cards,
            variety,
            tray,
        } => format!("level {level}: {cards} cards, {variety} symbol kinds, {tray} tray slots"),
        Event::CardCollected { id, symbol, slot } => {
            format!("collected #{id} {} -> slot {slot}", symbol_name(session, *symbol))
        }
        Event::ClickRejected { id } => format!("click on #{id} blocked"),
        Event::MatchCleared { symbol, score, .. } => {
            format!("match: three {} cleared (+{score})", symbol_name(session, *symbol))
        }
        Event::BoardShuffled => "board layout shuffled".to_string(),
        Event::MoveUndone { symbol, slot, .. } => format!(
            "undo: {} moved from slot {slot} back to the board",
            symbol_name(session, *symbol)
        ),
        Event::CardsParked { symbols } => {
            let names: Vec<&str> = symbols
                .iter()
                .map(|symbol| symbol_name(session, *symbol))
                .collect();
            format!("parked: {}", names.join(", "))
        }
        Event::RemovedReturned { symbol, slot } => {
            format!("returned {} -> slot {slot}", symbol_name(session, *symbol))
        }
        Event::ReturnRejected => "tray is full; the card stays parked".to_string(),
        Event::ToolUsed { tool, remaining } => {
            format!("{} used ({remaining} left)", tool.name())
        }
        Event::ToolRejected { tool } => format!("{} exhausted", tool.name()),
        Event::LevelWon { level, score } => format!("level {level} cleared! score {score}"),
        Event::LevelLost { level, score } => {
            format!("tray full, level {level} failed (score {score})")
        }
        Event::AllLevelsWon { score } => format!("all levels cleared! final score {score}"),
        Event::OutcomePrompt { choices, .. } => {
            let names: Vec<&str> = choices.iter().map(|choice| choice_command(*choice)).collect();
            format!("choose: {}", names.join(" | "))
        }
        Event::Feedback(_) => return None,
    };
    Some(text)
}

fn choice_command(choice: OutcomeChoice) -> &'static str {
    match choice {
        OutcomeChoice::NextLevel => "next",
        OutcomeChoice::RetryLevel => "retry",
        OutcomeChoice::RestartAll => "restart",
        OutcomeChoice::ReturnToMenu => "menu",
    }
}

fn symbol_name(session: &Session, symbol: Symbol) -> &str {
    session.catalog().name(symbol).unwrap_or("?")
}

fn print_board(app: &App) {
    let Some(game) = app.session.game() else {
        println!("no level in progress (try 'start')");
        return;
    };
    let mut cards: Vec<_> = game.board.cards().to_vec();
    cards.sort_by(|a, b| b.layout.stack.cmp(&a.layout.stack));
    println!("{} cards on the board (topmost first):", cards.len());
    for card in cards {
        println!(
            "  #{:<4} {:<9} at ({:6.1}, {:6.1}) rot {:5.1} stack {}",
            card.id,
            symbol_name(&app.session, card.symbol),
            card.layout.x,
            card.layout.y,
            card.layout.rotation,
            card.layout.stack
        );
    }
}

fn print_tray(app: &App) {
    let Some(game) = app.session.game() else {
        println!("no level in progress (try 'start')");
        return;
    };
    let row: Vec<String> = game
        .tray
        .slots()
        .iter()
        .map(|slot| match slot {
            Some(symbol) => format!("[{}]", symbol_name(&app.session, *symbol)),
            None => "[ - ]".to_string(),
        })
        .collect();
    println!("tray: {}", row.concat());
    if game.removed.is_empty() {
        println!("parked: (none)");
    } else {
        let parked: Vec<String> = game
            .removed
            .iter()
            .enumerate()
            .map(|(index, symbol)| format!("{index}:{}", symbol_name(&app.session, *symbol)))
            .collect();
        println!("parked: {}", parked.join("  "));
    }
}

fn print_status(app: &App) {
    let session = &app.session;
    println!("level {} of {}", session.level(), session.max_level());
    let Some(game) = session.game() else {
        println!("in menu; 'start' begins the level");
        return;
    };
    let phase = match game.phase {
        Phase::Playing => "playing",
        Phase::Won => "won",
        Phase::Lost => "lost",
    };
    println!(
        "phase {phase}, score {}, {} cards left, tray {}/{}",
        game.score,
        game.board.len(),
        game.tray.occupied(),
        game.tray.capacity()
    );
    let tools: Vec<String> = ToolKind::ALL
        .iter()
        .map(|kind| format!("{} {}", kind.name(), game.tools.remaining(*kind)))
        .collect();
    println!("tools: {} | parked {}", tools.join(", "), game.removed.len());
    if let Some(prompt) = session.pending_prompt() {
        let names: Vec<&str> = prompt
            .choices()
            .iter()
            .map(|choice| choice_command(*choice))
            .collect();
        println!("waiting for a choice: {}", names.join(" | "));
    }
}

fn print_help() {
    println!("commands:");
    println!("  start              begin (or re-enter) the current level");
    println!("  board / tray       show the board or the tray and parked cards");
    println!("  status             level, score, tools, pending choices");
    println!("  click <id>         collect the card with that id");
    println!("  at <x> <y>         click a point on the board");
    println!("  shuffle|undo|clear use a tool (one of each per level)");
    println!("  return <n>         put parked card n back into the tray");
    println!("  next|retry|restart|menu   answer an outcome prompt");
    println!("  save/load [path]   write or replay the action log as JSON");
    println!("  seed               show the session seed");
    println!("  exit               leave");
}

fn arg_path_or_default(arg: Option<&String>) -> Option<PathBuf> {
    if let Some(path) = arg {
        return Some(PathBuf::from(path));
    }
    default_save_path()
}

fn default_save_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("TRIMATCH_SAVE") {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".trimatch_session.json"))
}

fn save_session(app: &App, path: &Path) -> Result<(), String> {
    let payload = SavedSession {
        version: SAVE_SCHEMA_VERSION,
        seed: app.session.seed(),
        actions: app.actions.clone(),
    };
    let body = serde_json::to_string_pretty(&payload).map_err(|err| err.to_string())?;
    fs::write(path, body).map_err(|err| err.to_string())
}

fn load_session_file(path: &Path) -> Result<SavedSession, String> {
    let body = fs::read_to_string(path).map_err(|err| err.to_string())?;
    let payload: SavedSession = serde_json::from_str(&body).map_err(|err| err.to_string())?;
    if payload.version != SAVE_SCHEMA_VERSION {
        return Err(format!(
            "unsupported save version {} (expected {})",
            payload.version, SAVE_SCHEMA_VERSION
        ));
    }
    Ok(payload)
}

/// Rebuild a session by replaying the recorded actions against a fresh
/// engine with the saved seed. Actions that no longer apply are skipped.
fn restore_app(saved: SavedSession) -> App {
    let mut app = App::new(saved.seed);
    for action in saved.actions {
        let result = apply_action(&mut app, &action.action, &action.args);
        let _: Vec<Event> = app.events.drain().collect();
        match result {
            Ok(()) => app.actions.push(action),
            Err(err) => eprintln!("replay: skipped '{}': {err}", action.action),
        }
    }
    app
}

#[cfg(unix)]
fn stdin_is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) == 1 }
}

#[cfg(not(unix))]
fn stdin_is_tty() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_file() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "trimatch_cli_test_{}_{}.json",
            std::process::id(),
            nanos
        ))
    }

    fn topmost_card_id(app: &App) -> u32 {
        app.session
            .game()
            .expect("level in progress")
            .board
            .cards()
            .iter()
            .max_by_key(|card| card.layout.stack)
            .map(|card| card.id)
            .expect("board is empty")
    }

    #[test]
    fn save_load_roundtrip() {
        let file = unique_temp_file();
        let mut app = App::new(42);
        apply_action(&mut app, "start", &[]).expect("start");
        app.actions.push(SavedAction {
            action: "start".to_string(),
            args: Vec::new(),
        });
        save_session(&app, &file).expect("save");

        let loaded = load_session_file(&file).expect("load");
        assert_eq!(loaded.version, SAVE_SCHEMA_VERSION);
        assert_eq!(loaded.seed, 42);
        assert_eq!(loaded.actions.len(), 1);
        assert_eq!(loaded.actions[0].action, "start");
        let _ = fs::remove_file(file);
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let file = unique_temp_file();
        let body = r#"{"version":99,"seed":1,"actions":[]}"#;
        fs::write(&file, body).expect("write");
        let err = load_session_file(&file).expect_err("must reject");
        assert!(err.contains("unsupported save version"));
        let _ = fs::remove_file(file);
    }

    #[test]
    fn replay_reproduces_the_session() {
        let mut app = App::new(0xFEED);
        for (action, args) in [("start", vec![]), ("shuffle", vec![])] {
            let args: Vec<String> = args;
            apply_action(&mut app, action, &args).expect(action);
            app.actions.push(SavedAction {
                action: action.to_string(),
                args,
            });
        }
        let id = topmost_card_id(&app);
        let args = vec![id.to_string()];
        apply_action(&mut app, "click", &args).expect("click");
        app.actions.push(SavedAction {
            action: "click".to_string(),
            args,
        });
        let _: Vec<Event> = app.events.drain().collect();

        let saved = SavedSession {
            version: SAVE_SCHEMA_VERSION,
            seed: app.session.seed(),
            actions: app.actions.clone(),
        };
        let restored = restore_app(saved);

        let original = app.session.game().expect("game");
        let replayed = restored.session.game().expect("game");
        assert_eq!(original.board.cards(), replayed.board.cards());
        assert_eq!(original.tray.slots(), replayed.tray.slots());
        assert_eq!(original.score, replayed.score);
    }

    #[test]
    fn seeds_parse_in_decimal_and_hex() {
        assert_eq!(parse_seed("42"), Some(42));
        assert_eq!(parse_seed("0x2a"), Some(42));
        assert_eq!(parse_seed("nope"), None);
    }

    #[test]
    fn options_pick_up_seed_and_load_path() {
        let args: Vec<String> = ["--seed", "7", "--load", "run.json"]
            .into_iter()
            .map(str::to_string)
            .collect();
        let options = parse_options(&args);
        assert_eq!(options.seed, Some(7));
        assert_eq!(options.load, Some(PathBuf::from("run.json")));
    }
}
