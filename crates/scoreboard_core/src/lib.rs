//! Scoreboard core
//!
//! This crate provides the two halves of the interactive scoreboard:
//! - The ranking engine: the player registry, its uniqueness and clamping
//!   rules, and the derived standings order
//! - The command interpreter: the line tokenizer and the command grammar
//!   that drives the engine
//!
//! Persistence formats for the registry and the history log live in
//! [`persist`]. The binary crate supplies the prompt loop, startup flags,
//! and table layout.

pub mod command;
pub mod error;
pub mod persist;
pub mod ranking;
pub mod types;

pub use command::{apply, parse, tokenize, Command, Reply, HELP};
pub use error::ScoreboardError;
pub use ranking::{HistoryEvent, Player, Scoreboard};
pub use types::*;
