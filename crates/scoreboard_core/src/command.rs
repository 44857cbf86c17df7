//! Line tokenizer and command grammar.
//!
//! Each input line is handled independently: tokenize on ASCII whitespace,
//! match the tokens against the grammar below (token count is validated
//! strictly; any other shape is an unknown command), then apply the parsed
//! command to a [`Scoreboard`].
//!
//! ```text
//! print | scoreboard | show | score      show the standings
//! score add <name> [<number>]            add a new player
//! score reset (all | <player>)           reset score(s) to zero
//! player add [<name>] [<score>]          add a new player
//! player remove (all | <player>)         remove player(s)
//! player rename <player> <new_name>      rename a player
//! win <player>                           add one point
//! loss <player>                          subtract one point
//! set show <N>                           cap how many players are shown
//! set plimit <N>                         cap how many players can exist
//! save players <path> | save history <path>
//! load players <path> | load history <path>
//! help                                   command summary
//! exit                                   quit
//! ```
//!
//! `<player>` is a selector: a digits-only token is a 1-based rank into
//! the current standings, anything else is a literal name.

use std::fs::File;
use std::io::BufReader;

use crate::error::ScoreboardError;
use crate::persist;
use crate::ranking::Scoreboard;
use crate::types::Selector;

/// Command summary printed by `help`.
pub const HELP: &str = "\
Commands:
  print | scoreboard | show | score    show the scoreboard
  score add <name> [<number>]          add a new player with an optional score
  score reset (all | <player>)         reset score(s) to zero
  player add [<name>] [<score>]        add a new player
  player remove (all | <player>)       remove player(s)
  player rename <player> <new_name>    rename a player
  win <player>                         add one point
  loss <player>                        subtract one point
  set show <N>                         cap how many players are shown
  set plimit <N>                       cap how many players can exist
  save players <path>                  write the players to a file
  save history <path>                  write the history log to a file
  load players <path>                  replace the players from a file
  load history <path>                  replace the history log from a file
  help                                 this summary
  exit                                 quit

<player> is a name or a 1-based rank; a digits-only token is always a rank.";

/// One fully parsed command, one variant per grammar path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Print,
    AddPlayer {
        name: Option<String>,
        score: Option<i64>,
    },
    RemovePlayer {
        selector: Selector,
    },
    RemoveAll,
    RenamePlayer {
        selector: Selector,
        new_name: String,
    },
    AdjustScore {
        selector: Selector,
        delta: i64,
    },
    ResetScore {
        selector: Selector,
    },
    ResetAllScores,
    SetShowMax {
        limit: i64,
    },
    SetMaxPlayers {
        limit: i64,
    },
    SavePlayers {
        path: String,
    },
    SaveHistory {
        path: String,
    },
    LoadPlayers {
        path: String,
    },
    LoadHistory {
        path: String,
    },
    Help,
    Exit,
}

/// What the driver should do with a successfully applied command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing to report.
    None,
    /// One or more status lines for the output stream.
    Message(String),
    /// Render the current standings.
    Board,
    /// Terminate the interactive loop.
    Exit,
}

/// Split a line on ASCII whitespace, collapsing runs and dropping empty
/// fragments. An all-whitespace line yields no tokens.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_ascii_whitespace().collect()
}

/// Match tokens against the grammar.
pub fn parse(tokens: &[&str]) -> Result<Command, ScoreboardError> {
    let unknown = || ScoreboardError::UnknownCommand {
        line: tokens.join(" "),
    };

    let command = match tokens {
        ["print"] | ["scoreboard"] | ["show"] | ["score"] => Command::Print,

        // "score add" proposes a new player; a digits-only token is kept
        // as the literal requested name, not a rank.
        ["score", "add", name] => Command::AddPlayer {
            name: Some((*name).to_string()),
            score: None,
        },
        ["score", "add", name, number] => Command::AddPlayer {
            name: Some((*name).to_string()),
            score: Some(parse_integer(number)?),
        },
        ["score", "reset", "all"] => Command::ResetAllScores,
        ["score", "reset", selector] => Command::ResetScore {
            selector: Selector::parse(selector),
        },

        ["player", "add"] => Command::AddPlayer {
            name: None,
            score: None,
        },
        ["player", "add", name] => Command::AddPlayer {
            name: Some((*name).to_string()),
            score: None,
        },
        ["player", "add", name, score] => Command::AddPlayer {
            name: Some((*name).to_string()),
            score: Some(parse_integer(score)?),
        },
        ["player", "remove", "all"] => Command::RemoveAll,
        ["player", "remove", selector] => Command::RemovePlayer {
            selector: Selector::parse(selector),
        },
        ["player", "rename", selector, new_name] => Command::RenamePlayer {
            selector: Selector::parse(selector),
            new_name: (*new_name).to_string(),
        },

        ["win", selector] => Command::AdjustScore {
            selector: Selector::parse(selector),
            delta: 1,
        },
        ["loss", selector] => Command::AdjustScore {
            selector: Selector::parse(selector),
            delta: -1,
        },

        ["set", "show", limit] => Command::SetShowMax {
            limit: parse_integer(limit)?,
        },
        ["set", "plimit", limit] => Command::SetMaxPlayers {
            limit: parse_integer(limit)?,
        },

        ["save", "players", path] => Command::SavePlayers {
            path: (*path).to_string(),
        },
        ["save", "history", path] => Command::SaveHistory {
            path: (*path).to_string(),
        },
        ["load", "players", path] => Command::LoadPlayers {
            path: (*path).to_string(),
        },
        ["load", "history", path] => Command::LoadHistory {
            path: (*path).to_string(),
        },

        ["help"] => Command::Help,
        ["exit"] => Command::Exit,

        _ => return Err(unknown()),
    };

    Ok(command)
}

/// Apply a parsed command to the scoreboard.
pub fn apply(command: Command, scoreboard: &mut Scoreboard) -> Result<Reply, ScoreboardError> {
    match command {
        Command::Print => Ok(Reply::Board),

        Command::AddPlayer { name, score } => {
            scoreboard.add_player(name.as_deref(), score.unwrap_or(0))?;
            Ok(Reply::None)
        }
        Command::RemovePlayer { selector } => {
            scoreboard.remove_player(&selector)?;
            Ok(Reply::None)
        }
        Command::RemoveAll => {
            scoreboard.remove_all();
            Ok(Reply::None)
        }
        Command::RenamePlayer { selector, new_name } => {
            scoreboard.rename_player(&selector, &new_name)?;
            Ok(Reply::None)
        }
        Command::AdjustScore { selector, delta } => {
            scoreboard.adjust_score(&selector, delta)?;
            Ok(Reply::None)
        }
        Command::ResetScore { selector } => {
            scoreboard.reset_score(&selector)?;
            Ok(Reply::None)
        }
        Command::ResetAllScores => {
            scoreboard.reset_all_scores();
            Ok(Reply::None)
        }

        Command::SetShowMax { limit } => {
            scoreboard.set_show_max(limit)?;
            Ok(Reply::Message(format!("Player show limit set to: {}", limit)))
        }
        Command::SetMaxPlayers { limit } => {
            let evicted = scoreboard.set_max_players(limit)?;
            let mut message = String::new();
            if evicted > 0 {
                message.push_str(&format!(
                    "Removed {} lowest-ranked players over the new limit\n",
                    evicted
                ));
            }
            message.push_str(&format!("Player limit set to: {}", limit));
            Ok(Reply::Message(message))
        }

        Command::SavePlayers { path } => {
            let file = create_file(&path)?;
            persist::save_players(scoreboard, file)
                .map_err(|context| ScoreboardError::Persistence { context })?;
            Ok(Reply::Message(format!(
                "Saved {} players to {}",
                scoreboard.len(),
                path
            )))
        }
        Command::SaveHistory { path } => {
            let file = create_file(&path)?;
            persist::save_history(scoreboard, file)
                .map_err(|context| ScoreboardError::Persistence { context })?;
            Ok(Reply::Message(format!(
                "Saved {} history events to {}",
                scoreboard.history().len(),
                path
            )))
        }
        Command::LoadPlayers { path } => {
            let file = open_file(&path)?;
            let loaded = persist::load_players(scoreboard, BufReader::new(file))
                .map_err(|context| ScoreboardError::Persistence { context })?;
            Ok(Reply::Message(format!(
                "Loaded {} players from {}",
                loaded, path
            )))
        }
        Command::LoadHistory { path } => {
            let file = open_file(&path)?;
            let loaded = persist::load_history(scoreboard, BufReader::new(file))
                .map_err(|context| ScoreboardError::Persistence { context })?;
            Ok(Reply::Message(format!(
                "Loaded {} history events from {}",
                loaded, path
            )))
        }

        Command::Help => Ok(Reply::Message(HELP.to_string())),
        Command::Exit => Ok(Reply::Exit),
    }
}

fn create_file(path: &str) -> Result<File, ScoreboardError> {
    File::create(path).map_err(|e| ScoreboardError::Persistence {
        context: format!("failed to create {}: {}", path, e),
    })
}

fn open_file(path: &str) -> Result<File, ScoreboardError> {
    File::open(path).map_err(|e| ScoreboardError::Persistence {
        context: format!("failed to open {}: {}", path, e),
    })
}

/// Signed-integer tokens: `[+-]?[0-9]+`. Values past the i64 range keep
/// their sign and saturate; the score clamp bounds them anyway.
fn parse_integer(token: &str) -> Result<i64, ScoreboardError> {
    let digits = match token.as_bytes().first() {
        Some(b'+') | Some(b'-') => &token[1..],
        _ => token,
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ScoreboardError::InvalidNumberFormat {
            token: token.to_string(),
        });
    }
    Ok(token.parse::<i64>().unwrap_or(if token.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod command_tests;
