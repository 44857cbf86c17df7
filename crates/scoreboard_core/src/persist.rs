//! On-disk formats for the player registry and the history log.
//!
//! Players are stored as one pretty-printed JSON document; the history log
//! is JSON lines, one event per line. Both sides work over byte streams so
//! callers decide where the data lives.

use std::io::{BufRead, Read, Write};

use serde::{Deserialize, Serialize};

use crate::ranking::{HistoryEvent, Player, Scoreboard};

/// The players file: limits plus every player record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaveDoc {
    max_players: u32,
    show_max: Option<u32>,
    players: Vec<Player>,
}

/// Write the registry and limits as a JSON document. Players are written
/// in standings order.
pub fn save_players<W: Write>(scoreboard: &Scoreboard, mut writer: W) -> Result<(), String> {
    let doc = SaveDoc {
        max_players: scoreboard.max_players(),
        show_max: scoreboard.show_max(),
        players: scoreboard
            .standings()
            .map(|(_, name, score)| Player {
                name: name.to_string(),
                score,
            })
            .collect(),
    };

    let json =
        serde_json::to_string_pretty(&doc).map_err(|e| format!("failed to serialize: {}", e))?;
    writer
        .write_all(json.as_bytes())
        .and_then(|_| writer.write_all(b"\n"))
        .map_err(|e| format!("failed to write: {}", e))
}

/// Replace the registry from a JSON document written by [`save_players`].
/// The document is validated before anything is replaced; a malformed file
/// leaves the scoreboard untouched. Returns the number of players loaded.
pub fn load_players<R: Read>(scoreboard: &mut Scoreboard, mut reader: R) -> Result<usize, String> {
    let mut contents = String::new();
    reader
        .read_to_string(&mut contents)
        .map_err(|e| format!("failed to read: {}", e))?;
    let doc: SaveDoc =
        serde_json::from_str(&contents).map_err(|e| format!("failed to parse: {}", e))?;

    scoreboard
        .restore(
            doc.max_players as i64,
            doc.show_max.map(|cap| cap as i64),
            doc.players,
        )
        .map_err(|e| format!("invalid players file: {}", e))
}

/// Write the history log as JSON lines.
pub fn save_history<W: Write>(scoreboard: &Scoreboard, mut writer: W) -> Result<(), String> {
    for event in scoreboard.history() {
        let line =
            serde_json::to_string(event).map_err(|e| format!("failed to serialize: {}", e))?;
        writer
            .write_all(line.as_bytes())
            .and_then(|_| writer.write_all(b"\n"))
            .map_err(|e| format!("failed to write: {}", e))?;
    }
    Ok(())
}

/// Replace the in-memory history log from a JSON-lines stream written by
/// [`save_history`]. Blank lines are skipped; the log is only replaced
/// once the whole stream has parsed. Returns the number of events loaded.
pub fn load_history<R: BufRead>(scoreboard: &mut Scoreboard, reader: R) -> Result<usize, String> {
    let mut events: Vec<HistoryEvent> = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("failed to read: {}", e))?;
        if line.trim().is_empty() {
            continue;
        }
        let event = serde_json::from_str(&line)
            .map_err(|e| format!("failed to parse history line {}: {}", number + 1, e))?;
        events.push(event);
    }

    let loaded = events.len();
    scoreboard.replace_history(events);
    Ok(loaded)
}

#[cfg(test)]
#[path = "persist_tests.rs"]
mod persist_tests;
