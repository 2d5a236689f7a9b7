//! Opponent generation

use super::Character;
use rand::Rng;

/// Generate a bot within one level of `player_level`
///
/// The level is drawn uniformly from `[max(1, L - 1), L + 1]`.
pub fn generate_opponent(player_level: u32, rng: &mut impl Rng) -> Character {
    let low = player_level.saturating_sub(1).max(1);
    let high = player_level.saturating_add(1).max(low);
    let level = rng.gen_range(low..=high);
    tracing::debug!(player_level, bot_level = level, "generated opponent");
    Character::bot(level)
}
