//! Shared constants and the selector type.

/// Highest score a player can hold. Adjustments saturate here.
pub const MAX_SCORE: i32 = 9999;

/// Lowest score a player can hold.
pub const MIN_SCORE: i32 = -9999;

/// Maximum length of a requested player name, in characters.
pub const MAX_NAME_LEN: usize = 32;

/// True cap on stored names: a maximum-length name plus the widest
/// possible disambiguation suffix still fits under this.
pub const NAME_HARD_CAP: usize = 40;

/// Player limit a fresh scoreboard starts with.
pub const DEFAULT_MAX_PLAYERS: u32 = 255;

/// Hard ceiling for the player limit and the show limit.
pub const HARD_MAX_PLAYERS: u32 = 65_535;

/// A command argument addressing a player: either a 1-based rank into the
/// current standings or a literal name.
///
/// A token made entirely of ASCII digits is always read as a rank, so a
/// player whose stored name is fully numeric can only be addressed by
/// rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// 1-based position in the current standings.
    Rank(u64),
    /// Literal player name.
    Name(String),
}

impl Selector {
    /// Classify a token as a rank or a name.
    pub fn parse(token: &str) -> Selector {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            // Digit strings too long for u64 become a rank no scoreboard
            // can hold, which resolves to an invalid-rank error later.
            Selector::Rank(token.parse::<u64>().unwrap_or(u64::MAX))
        } else {
            Selector::Name(token.to_string())
        }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
