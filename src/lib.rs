// Pig Library - Core Module Organization
//
// Rules engine for the dice game Pig: players, the shared die, turn
// resolution, the automated policy and the optional one-minute time limit.

// Rules and game state
pub mod config;
pub mod die;
pub mod errors;
pub mod game;
pub mod player;
pub mod players;
pub mod timed;

// Peripheral I/O
pub mod console;

// Re-export common types for convenient access
pub use crate::config::GameConfig;
pub use crate::console::{Console, GameEvent, TerminalConsole, TurnAction};
pub use crate::die::{Die, Roller};
pub use crate::errors::{PigError, PigResult};
pub use crate::game::{Game, GameResult, TurnSource, TurnStatus, WinReason};
pub use crate::player::{Player, PlayerFactory, PlayerKind};
pub use crate::players::{BotStrategy, HoldAtThreshold};
pub use crate::timed::{Deadline, TimedGame};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
