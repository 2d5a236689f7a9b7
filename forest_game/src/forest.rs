//! Forest - Command loop around the hero's fights

use crate::loot;
use anyhow::{Context, Result};
use rand_chacha::ChaCha8Rng;
use rpg_core::combat::fight;
use rpg_core::config::GameConstants;
use rpg_core::session::{self, Roster};
use rpg_core::{generate_opponent, Character};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

/// A line of player input
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Fight,
    Status,
    Inventory,
    Equip(String),
    Unequip(String),
    Rest,
    Save,
    Stop,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (word, rest) = s.split_once(' ').unwrap_or((s, ""));
        let rest = rest.trim();
        match (word.to_ascii_lowercase().as_str(), rest.is_empty()) {
            ("fight", true) => Ok(Command::Fight),
            ("status", true) => Ok(Command::Status),
            ("inventory", true) => Ok(Command::Inventory),
            ("equip", false) => Ok(Command::Equip(rest.to_string())),
            ("unequip", false) => Ok(Command::Unequip(rest.to_string())),
            ("rest", true) => Ok(Command::Rest),
            ("save", true) => Ok(Command::Save),
            ("stop", true) | ("quit", true) => Ok(Command::Stop),
            _ => Err(format!("Invalid command: {s}")),
        }
    }
}

const PROMPT: &str =
    "Enter 'fight', 'status', 'inventory', 'equip <item>', 'unequip <item>', 'rest', 'save' or 'stop': ";

/// Game session: the roster's first character is the hero
pub struct Forest {
    roster: Roster,
    constants: GameConstants,
    rng: ChaCha8Rng,
    save_path: PathBuf,
}

impl Forest {
    pub fn new(roster: Roster, constants: GameConstants, rng: ChaCha8Rng, save_path: PathBuf) -> Self {
        Forest {
            roster,
            constants,
            rng,
            save_path,
        }
    }

    fn hero(&self) -> Result<&Character> {
        self.roster.get(0).context("roster has no hero")
    }

    fn hero_mut(&mut self) -> Result<&mut Character> {
        self.roster.get_mut(0).context("roster has no hero")
    }

    /// Read commands until `stop`, end of input or the hero's death
    pub fn adventure(&mut self, input: impl BufRead, mut out: impl Write) -> Result<()> {
        writeln!(out, "{} enters the forest.", self.hero()?.name())?;
        write!(out, "{PROMPT}")?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                write!(out, "{PROMPT}")?;
                out.flush()?;
                continue;
            }
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(message) => {
                    writeln!(out, "{message}. Try again.")?;
                    write!(out, "{PROMPT}")?;
                    out.flush()?;
                    continue;
                }
            };

            match command {
                Command::Stop => break,
                Command::Fight => {
                    if !self.encounter(&mut out)? {
                        writeln!(out, "You are dead.")?;
                        return Ok(());
                    }
                }
                Command::Status => writeln!(out, "{}", self.hero()?)?,
                Command::Inventory => {
                    let hero = self.hero()?;
                    for (slot, item) in hero.equipment().iter() {
                        writeln!(out, "  {slot}: {item}")?;
                    }
                    writeln!(out, "Carrying: {}", hero.inventory())?;
                }
                Command::Equip(name) => {
                    if self.hero_mut()?.equip_from_inventory(&name) {
                        writeln!(out, "Equipped {name}.")?;
                    } else {
                        writeln!(out, "You are not carrying {name}.")?;
                    }
                }
                Command::Unequip(name) => {
                    let hero = self.hero_mut()?;
                    let worn = hero
                        .equipment()
                        .iter()
                        .map(|(_, item)| item)
                        .find(|item| item.name() == name)
                        .cloned();
                    let removed = worn.map_or(false, |item| hero.unequip(&item));
                    if removed {
                        writeln!(out, "Unequipped {name}.")?;
                    } else {
                        writeln!(out, "You are not wearing {name}.")?;
                    }
                }
                Command::Rest => {
                    self.hero_mut()?.restore_health();
                    writeln!(out, "You rest and recover.")?;
                }
                Command::Save => {
                    session::save_to_path(&self.roster, &self.save_path)
                        .with_context(|| format!("saving roster to {}", self.save_path.display()))?;
                    writeln!(out, "Saved to {}.", self.save_path.display())?;
                }
            }
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }
        Ok(())
    }

    /// Fight one bot; returns whether the hero survived
    fn encounter(&mut self, out: &mut impl Write) -> Result<bool> {
        let level = self.hero()?.level();
        let crit = &self.constants.crit;
        let mut bot = generate_opponent(level, &mut self.rng).with_crit(crit.chance, crit.multiplier);

        let hero = self
            .roster
            .get_mut(0)
            .context("roster has no hero")?;
        writeln!(out, "Fight between {} and {} has begun.", hero.name(), bot.name())?;
        let outcome = fight(hero, &mut bot, &self.constants, &mut self.rng);
        for strike in outcome.strikes() {
            writeln!(out, "{}", strike.summary())?;
        }
        writeln!(out, "{}", outcome.summary())?;

        if !hero.is_alive() {
            return Ok(false);
        }
        if outcome.winner.as_deref() == Some(hero.name()) {
            if let Some(item) = loot::roll_drop(&mut self.rng) {
                writeln!(out, "You found item: {item}")?;
                hero.inventory_mut().add(item);
            }
        }
        Ok(true)
    }
}
