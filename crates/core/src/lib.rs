//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod board;
pub mod cards;
pub mod config;
pub mod events;
pub mod game;
pub mod history;
pub mod matcher;
pub mod pool;
pub mod rng;
pub mod session;
pub mod state;
pub mod tools;
pub mod tray;

pub use board::*;
pub use cards::*;
pub use config::*;
pub use events::*;
pub use game::*;
pub use history::*;
pub use matcher::*;
pub use pool::*;
pub use rng::*;
pub use session::*;
pub use state::*;
pub use tools::*;
pub use tray::*;
