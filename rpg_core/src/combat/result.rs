//! Fight records - per-strike log and final outcome

use serde::{Deserialize, Serialize};

/// State of the combat state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatState {
    Ongoing,
    /// The first combatant (who always strikes first) won
    Char1Wins,
    Char2Wins,
    /// Both down before a turn, or the turn cap was reached
    Draw,
}

impl CombatState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, CombatState::Ongoing)
    }
}

/// One attack within a turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strike {
    pub attacker: String,
    pub defender: String,
    /// Attack value before mitigation
    pub roll: f64,
    pub critical: bool,
    /// Damage actually dealt after defense
    pub damage: u32,
    /// Defender's effective health after the hit
    pub defender_health: u32,
}

impl Strike {
    /// Get a summary string
    pub fn summary(&self) -> String {
        let crit = if self.critical { " (critical)" } else { "" };
        format!(
            "{} hits {} with {:.1}{} for {} damage, {} health left",
            self.attacker, self.defender, self.roll, crit, self.damage, self.defender_health
        )
    }

    pub fn is_killing_blow(&self) -> bool {
        self.defender_health == 0
    }
}

/// All strikes of one turn: one or two entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// 1-based turn number
    pub turn: u32,
    pub strikes: Vec<Strike>,
}

impl TurnRecord {
    pub fn damage_dealt_by(&self, attacker: &str) -> u32 {
        self.strikes
            .iter()
            .filter(|s| s.attacker == attacker)
            .map(|s| s.damage)
            .sum()
    }
}

/// Result of a whole fight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FightOutcome {
    /// Terminal state
    pub state: CombatState,
    /// Winner's name, `None` on a draw
    pub winner: Option<String>,
    /// Loser's name, `None` on a draw
    pub loser: Option<String>,
    /// Completed turns
    pub turns: u32,
    pub log: Vec<TurnRecord>,
    /// Experience granted to the winner (0 unless awarded)
    pub experience_awarded: f64,
    pub levels_gained: u32,
}

impl FightOutcome {
    pub fn is_draw(&self) -> bool {
        self.state == CombatState::Draw
    }

    /// Iterate every strike in order
    pub fn strikes(&self) -> impl Iterator<Item = &Strike> {
        self.log.iter().flat_map(|turn| turn.strikes.iter())
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        match (&self.winner, &self.loser) {
            (Some(winner), Some(loser)) => {
                let mut text = format!("{winner} defeated {loser} in {} turns", self.turns);
                if self.experience_awarded > 0.0 {
                    text.push_str(&format!(", earning {:.1} experience", self.experience_awarded));
                }
                if self.levels_gained > 0 {
                    text.push_str(&format!(" and {} level(s)", self.levels_gained));
                }
                text
            }
            _ => format!("Draw after {} turns", self.turns),
        }
    }
}
