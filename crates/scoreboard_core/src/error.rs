use std::error::Error;
use std::fmt;
use std::fmt::Display;

use crate::types::{HARD_MAX_PLAYERS, MAX_NAME_LEN};

/// This enum contains all error conditions the scoreboard can report.
/// Every fallible public operation returns a [`Result<_, ScoreboardError>`].
///
/// All of these are recoverable: the interactive loop reports one line and
/// keeps running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreboardError {
    /// No player with the given name exists.
    NotFound {
        /// The name that was looked up.
        name: String,
    },
    /// A rank outside `[1, player count]` was used.
    InvalidRank {
        /// The rank that was requested.
        rank: u64,
        /// Current number of players.
        size: usize,
    },
    /// The registry already holds `max_players` players.
    AtCapacity {
        /// The limit that was hit.
        limit: u32,
    },
    /// A requested player name exceeds the length limit. Checked before
    /// disambiguation; a stored name may grow slightly past the limit
    /// through its suffix.
    NameTooLong {
        /// The offending name.
        name: String,
    },
    /// A new name passed to rename was empty or too long.
    InvalidName,
    /// A token expected to be a signed integer was not one.
    InvalidNumberFormat {
        /// The offending token.
        token: String,
    },
    /// A limit value outside `[0, HARD_MAX_PLAYERS]`.
    OutOfRange {
        /// The value that was requested.
        value: i64,
    },
    /// The input line did not match any command path.
    UnknownCommand {
        /// The line as the tokenizer saw it.
        line: String,
    },
    /// A save or load operation failed at the stream or format level.
    Persistence {
        /// A description of what failed.
        context: String,
    },
}

impl Display for ScoreboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreboardError::NotFound { name } => {
                write!(f, "player \"{}\" does not exist", name)
            }
            ScoreboardError::InvalidRank { rank, size } => {
                write!(
                    f,
                    "incorrect player rank {} (scoreboard holds {} players)",
                    rank, size
                )
            }
            ScoreboardError::AtCapacity { limit } => {
                write!(f, "cannot create another player, at the limit of {}", limit)
            }
            ScoreboardError::NameTooLong { name } => {
                write!(
                    f,
                    "player name \"{}\" too long, maximum {} characters",
                    name, MAX_NAME_LEN
                )
            }
            ScoreboardError::InvalidName => {
                write!(
                    f,
                    "incorrect new name, must be 1 to {} characters",
                    MAX_NAME_LEN
                )
            }
            ScoreboardError::InvalidNumberFormat { token } => {
                write!(f, "wrong format of number \"{}\"", token)
            }
            ScoreboardError::OutOfRange { value } => {
                write!(
                    f,
                    "incorrect limit {}, expected 0 to {}",
                    value, HARD_MAX_PLAYERS
                )
            }
            ScoreboardError::UnknownCommand { line } => {
                write!(f, "no known command \"{}\"", line)
            }
            ScoreboardError::Persistence { context } => {
                write!(f, "{}", context)
            }
        }
    }
}

impl Error for ScoreboardError {}
