//! Glue between the main menu and the combat engine.

use serde::Serialize;
use tracing::debug;

use crate::combat::{resolve_combat, CombatEvent, Monster, Outcome, PlayerAction};
use crate::content::MONSTERS;
use crate::error::CombatError;
use crate::witcher::Witcher;
use crate::Dice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hunt {
    pub monster_key: &'static str,
    pub conjunction: bool,
}

/// Pick a random monster, then roll whether a conjunction empowers it.
pub fn pick_hunt(dice: &mut Dice, conjunction_chance: i32) -> Hunt {
    let idx = dice.roll(0, MONSTERS.len() as i32 - 1) as usize;
    let conjunction = dice.d100() > 100 - conjunction_chance;
    let hunt = Hunt { monster_key: MONSTERS[idx].key, conjunction };
    debug!(?hunt, "hunt picked");
    hunt
}

/// Pick a hunt and fight it. A defeated witcher is left at 0 hp for the caller to respawn.
pub fn go_hunting(
    witcher: &mut Witcher,
    dice: &mut Dice,
    conjunction_chance: i32,
    choose: impl FnMut(&Witcher, &Monster) -> Option<PlayerAction>,
    log: impl FnMut(CombatEvent),
) -> Result<(Hunt, Outcome), CombatError> {
    let hunt = pick_hunt(dice, conjunction_chance);
    let outcome = resolve_combat(witcher, hunt.monster_key, hunt.conjunction, dice, choose, log)?;
    Ok((hunt, outcome))
}
