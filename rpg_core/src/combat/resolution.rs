//! Turn loop - Alternate strikes until one side drops

use super::result::{CombatState, FightOutcome, Strike, TurnRecord};
use crate::character::Character;
use crate::config::{CombatConstants, GameConstants};
use crate::progression::award_experience;
use rand::Rng;

/// Combat state machine between two characters
///
/// The first combatant always strikes first in every turn. The stepper
/// holds no reference to the combatants, so callers may inspect them
/// between turns.
#[derive(Debug, Clone)]
pub struct Combat {
    state: CombatState,
    turns: u32,
    max_turns: u32,
    log: Vec<TurnRecord>,
}

impl Combat {
    pub fn new(constants: &CombatConstants) -> Self {
        Combat {
            state: CombatState::Ongoing,
            turns: 0,
            max_turns: constants.max_turns.max(1),
            log: Vec::new(),
        }
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    /// Completed turns so far
    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn log(&self) -> &[TurnRecord] {
        &self.log
    }

    /// Play one turn and return the resulting state
    ///
    /// Once terminal, further calls change nothing.
    pub fn step(
        &mut self,
        first: &mut Character,
        second: &mut Character,
        rng: &mut impl Rng,
    ) -> CombatState {
        if self.state.is_terminal() {
            return self.state;
        }

        // A combatant already down ends the fight without a strike
        match (first.is_alive(), second.is_alive()) {
            (true, true) => {}
            (true, false) => return self.finish(CombatState::Char1Wins),
            (false, true) => return self.finish(CombatState::Char2Wins),
            (false, false) => return self.finish(CombatState::Draw),
        }

        self.turns += 1;
        let mut record = TurnRecord {
            turn: self.turns,
            strikes: Vec::with_capacity(2),
        };

        record.strikes.push(strike(first, second, rng));
        if !second.is_alive() {
            self.log.push(record);
            return self.finish(CombatState::Char1Wins);
        }

        record.strikes.push(strike(second, first, rng));
        self.log.push(record);
        if !first.is_alive() {
            return self.finish(CombatState::Char2Wins);
        }

        if self.turns >= self.max_turns {
            tracing::warn!(turns = self.turns, "turn cap reached, fight drawn");
            return self.finish(CombatState::Draw);
        }

        self.state
    }

    fn finish(&mut self, state: CombatState) -> CombatState {
        self.state = state;
        state
    }

    /// Convert a finished fight into an outcome record
    fn into_outcome(self, first: &Character, second: &Character) -> FightOutcome {
        let (winner, loser) = match self.state {
            CombatState::Char1Wins => (Some(first), Some(second)),
            CombatState::Char2Wins => (Some(second), Some(first)),
            CombatState::Draw | CombatState::Ongoing => (None, None),
        };
        FightOutcome {
            state: self.state,
            winner: winner.map(|c| c.name().to_string()),
            loser: loser.map(|c| c.name().to_string()),
            turns: self.turns,
            log: self.log,
            experience_awarded: 0.0,
            levels_gained: 0,
        }
    }
}

/// One attack: roll, mitigate, record
fn strike(attacker: &Character, defender: &mut Character, rng: &mut impl Rng) -> Strike {
    let roll = attacker.roll_attack(rng);
    let damage = defender.apply_damage(roll.value);
    let strike = Strike {
        attacker: attacker.name().to_string(),
        defender: defender.name().to_string(),
        roll: roll.value,
        critical: roll.critical,
        damage,
        defender_health: defender.effective_health(),
    };
    tracing::debug!("{}", strike.summary());
    strike
}

/// Run a fight to its terminal state without awarding experience
pub fn resolve(
    first: &mut Character,
    second: &mut Character,
    constants: &CombatConstants,
    rng: &mut impl Rng,
) -> FightOutcome {
    tracing::info!(first = %first.name(), second = %second.name(), "fight started");
    let mut combat = Combat::new(constants);
    while !combat.step(first, second, rng).is_terminal() {}
    let outcome = combat.into_outcome(first, second);
    tracing::info!(state = ?outcome.state, turns = outcome.turns, "fight resolved");
    outcome
}

/// Run a fight and award experience to the winner
pub fn fight(
    first: &mut Character,
    second: &mut Character,
    constants: &GameConstants,
    rng: &mut impl Rng,
) -> FightOutcome {
    let mut outcome = resolve(first, second, &constants.combat, rng);
    let report = match outcome.state {
        CombatState::Char1Wins => Some(award_experience(first, second, &constants.progression)),
        CombatState::Char2Wins => Some(award_experience(second, first, &constants.progression)),
        CombatState::Draw | CombatState::Ongoing => None,
    };
    if let Some(report) = report {
        outcome.experience_awarded = report.experience;
        outcome.levels_gained = report.levels_gained;
    }
    outcome
}
