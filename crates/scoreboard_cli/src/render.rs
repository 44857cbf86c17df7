//! Plain-text standings table.

use scoreboard_core::Scoreboard;

// Name column fits the widest stored name (hard cap 40).
const TABLE_WIDTH: usize = 58;

/// Format the standings as a table, capped to the show limit when one is
/// set.
///
/// ```text
/// RANK   PLAYER NAME                                  SCORE
/// ----------------------------------------------------------
/// 1.     Dudefish                                        22
/// 2.     Kentril                                        -20
/// ```
pub fn render(scoreboard: &Scoreboard) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<6} {:<42} {:>8}\n",
        "RANK", "PLAYER NAME", "SCORE"
    ));
    out.push_str(&"-".repeat(TABLE_WIDTH));
    out.push('\n');

    let cap = scoreboard
        .show_max()
        .map(|cap| cap as usize)
        .unwrap_or(usize::MAX);
    for (rank, name, score) in scoreboard.standings().take(cap) {
        out.push_str(&format!(
            "{:<6} {:<42} {:>8}\n",
            format!("{}.", rank),
            name,
            score
        ));
    }
    out
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
