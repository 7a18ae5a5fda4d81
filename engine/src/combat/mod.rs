//! One encounter, fought to completion.
//!
//! Each round is a player action followed (usually) by one enemy action. Player choices come
//! from a caller-supplied closure so the same loop serves the terminal UI, simulations and
//! tests; everything that happens is reported as a [`CombatEvent`] through `log`.

pub mod actions;

use serde::Serialize;
use tracing::{debug, info};

use crate::content::{find_monster, Archetype, MonsterTemplate};
use crate::error::CombatError;
use crate::witcher::{ExpGain, Witcher};
use crate::Dice;

use self::actions::{enemy_turn, player_turn, PlayerTurn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sign {
    Aard,
    Igni,
    Quen,
    Axii,
    Yrden,
}

impl Sign {
    pub const ALL: [Sign; 5] = [Sign::Aard, Sign::Igni, Sign::Quen, Sign::Axii, Sign::Yrden];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayerAction {
    FastAttack,
    StrongAttack,
    Sign(Sign),
    /// Inventory slot (0-based); `None` when the item menu was backed out of.
    UseItem(Option<usize>),
    Defend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Victory,
    Defeat,
    /// The player stopped supplying actions mid-fight.
    Abandoned,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    Encounter { monster: String, hp: i32 },
    FastAttack { dmg: i32 },
    StrongAttack { dmg: i32 },
    StrongAttackMissed,
    Aard { dmg: i32 },
    Igni { dmg: i32 },
    ArmorMelted { min_dmg: i32, max_dmg: i32 },
    QuenRaised { shield: i32 },
    AxiiStunned,
    AxiiFailed,
    YrdenSet,
    ItemUsed { item: String, hp: i32 },
    InventoryEmpty,
    ItemUnusable { item: String },
    Defending,
    EnemyAttack { monster: String, dmg: i32 },
    EnemyDefends { monster: String },
    EnemyHeals { monster: String, amount: i32 },
    EnemySpecial { monster: String, dmg: i32 },
    Victory { exp: ExpGain, gold: i32, loot: String },
    Defeat,
    Abandoned,
}

/// A monster instance scaled for the current witcher.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Monster {
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub min_dmg: i32,
    pub max_dmg: i32,
    pub loot: &'static str,
    pub exp: i32,
    pub ai: Archetype,
}

impl Monster {
    /// Apply difficulty, NG+ and level scaling to a template.
    pub fn spawn(template: &MonsterTemplate, witcher: &Witcher) -> Self {
        let diff = witcher.difficulty.settings();
        let ng = witcher.ng_plus;
        let ng_mult = 1.0 + ng as f64 * 0.5;

        let max_hp =
            (template.hp as f64 * diff.enemy_hp_mult * ng_mult) as i32 + witcher.level * 10;
        let min_dmg = (template.min_dmg as f64 * diff.enemy_dmg_mult) as i32 + ng * 2;
        let max_dmg = (template.max_dmg as f64 * diff.enemy_dmg_mult) as i32 + ng * 5;

        let name = if ng > 0 {
            format!("[NG+{}] {}", ng, template.name)
        } else {
            template.name.to_string()
        };

        Self {
            name,
            hp: max_hp,
            max_hp,
            min_dmg,
            max_dmg,
            loot: template.loot,
            exp: template.exp,
            ai: template.ai,
        }
    }

    pub fn hp_percent(&self) -> f64 {
        self.hp as f64 / self.max_hp as f64 * 100.0
    }
}

/// Fight `monster_key` until one side drops. Victory pays out experience, gold and loot.
pub fn resolve_combat(
    witcher: &mut Witcher,
    monster_key: &str,
    conjunction_active: bool,
    dice: &mut Dice,
    mut choose: impl FnMut(&Witcher, &Monster) -> Option<PlayerAction>,
    mut log: impl FnMut(CombatEvent),
) -> Result<Outcome, CombatError> {
    let template = find_monster(monster_key, conjunction_active)
        .ok_or_else(|| CombatError::UnknownMonster(monster_key.to_string()))?;
    let mut monster = Monster::spawn(&template, witcher);
    let gold_mult = witcher.difficulty.settings().gold_mult;

    info!(monster = %monster.name, hp = monster.max_hp, conjunction_active, "encounter begins");
    log(CombatEvent::Encounter { monster: monster.name.clone(), hp: monster.hp });

    let mut round = 0u32;
    while witcher.hp > 0 && monster.hp > 0 {
        let Some(action) = choose(witcher, &monster) else {
            info!(monster = %monster.name, "encounter abandoned");
            log(CombatEvent::Abandoned);
            return Ok(Outcome::Abandoned);
        };

        let (dmg, defending) = match player_turn(action, witcher, &mut monster, dice, &mut log) {
            PlayerTurn::Resolved { dmg, defending } => (dmg, defending),
            PlayerTurn::EnemyStunned | PlayerTurn::Retry => continue,
        };
        round += 1;

        if dmg > 0 {
            monster.hp -= dmg;
        }
        debug!(round, ?action, dmg, monster_hp = monster.hp, "player turn");

        if monster.hp <= 0 {
            // A shield raised this round must not carry into the next encounter.
            witcher.temp_buff = 0;
            let exp = witcher.gain_exp(monster.exp);
            let gold = (10.0 * gold_mult) as i32;
            witcher.gold += gold;
            witcher.inventory.push(monster.loot.to_string());
            info!(monster = %monster.name, rounds = round, exp = exp.gained, "victory");
            log(CombatEvent::Victory { exp, gold, loot: monster.loot.to_string() });
            return Ok(Outcome::Victory);
        }

        enemy_turn(&mut monster, witcher, defending, dice, &mut log);
        debug!(round, hp = witcher.hp, "enemy turn");

        // Quen's shield outlives the round it was raised in.
        if action != PlayerAction::Sign(Sign::Quen) {
            witcher.temp_buff = 0;
        }
    }

    witcher.temp_buff = 0;
    info!(monster = %monster.name, rounds = round, "defeat");
    log(CombatEvent::Defeat);
    Ok(Outcome::Defeat)
}
