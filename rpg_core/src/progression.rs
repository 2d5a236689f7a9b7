//! Experience awards and level-up transitions

use crate::character::Character;
use crate::config::ProgressionConstants;
use serde::{Deserialize, Serialize};

/// What an award did to the winner
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelReport {
    /// Experience granted by this award
    pub experience: f64,
    /// Level-up thresholds crossed (bots cross thresholds without growing)
    pub levels_gained: u32,
}

/// Experience a win over `loser` is worth to `winner`
///
/// `base_award * loser.level / winner.level`
pub fn experience_for(winner: &Character, loser: &Character, constants: &ProgressionConstants) -> f64 {
    debug_assert!(winner.level() >= 1, "winner level must be at least 1");
    constants.base_award * f64::from(loser.level()) / f64::from(winner.level().max(1))
}

/// Split an experience total into whole thresholds and the remainder
///
/// A threshold that is not a positive finite number yields no levels.
fn split_levels(experience: f64, threshold: f64) -> (u32, f64) {
    if !(threshold.is_finite() && threshold > 0.0) || experience < threshold {
        return (0, experience);
    }
    let remainder = experience % threshold;
    // `as` saturates at u32::MAX
    let levels = ((experience - remainder) / threshold).round() as u32;
    (levels, remainder)
}

/// Grant experience to the winner and level it up once per threshold crossed
///
/// The loser is not touched.
pub fn award_experience(
    winner: &mut Character,
    loser: &Character,
    constants: &ProgressionConstants,
) -> LevelReport {
    let experience = experience_for(winner, loser, constants);
    winner.experience += experience;

    if !(constants.level_threshold.is_finite() && constants.level_threshold > 0.0) {
        tracing::warn!(threshold = constants.level_threshold, "level threshold is not positive, skipping level-ups");
    }
    let (levels_gained, remainder) = split_levels(winner.experience, constants.level_threshold);
    winner.experience = remainder;
    winner.level_up_by(levels_gained);
    debug_assert!(winner.validate().is_ok());

    tracing::info!(
        winner = %winner.name(),
        loser = %loser.name(),
        experience,
        levels_gained,
        "experience awarded"
    );
    LevelReport { experience, levels_gained }
}
