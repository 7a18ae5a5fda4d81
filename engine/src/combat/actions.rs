use tracing::debug;

use crate::ai::{decide_action, EnemyAction};
use crate::combat::{CombatEvent, Monster, PlayerAction, Sign};
use crate::content::is_consumable;
use crate::skills::SkillId;
use crate::witcher::Witcher;
use crate::{scale, Dice};

pub const QUEN_SHIELD: i32 = 5;
pub const CONSUMABLE_HEAL: i32 = 30;
pub const TOLERANCE_HEAL: i32 = 15;
pub const ENEMY_HEAL: i32 = 20;

pub(crate) enum PlayerTurn {
    /// The action resolved; the enemy answers unless `dmg` finished it.
    Resolved { dmg: i32, defending: bool },
    /// Axii landed and the enemy loses this round.
    EnemyStunned,
    /// Nothing was spent; prompt again.
    Retry,
}

pub(crate) fn player_turn(
    action: PlayerAction,
    witcher: &mut Witcher,
    monster: &mut Monster,
    dice: &mut Dice,
    mut log: impl FnMut(CombatEvent),
) -> PlayerTurn {
    let resolved = |dmg| PlayerTurn::Resolved { dmg, defending: false };
    match action {
        PlayerAction::FastAttack => {
            let dmg = fast_attack(witcher, dice);
            log(CombatEvent::FastAttack { dmg });
            resolved(dmg)
        }
        PlayerAction::StrongAttack => match strong_attack(witcher, dice) {
            Some(dmg) => {
                log(CombatEvent::StrongAttack { dmg });
                resolved(dmg)
            }
            None => {
                log(CombatEvent::StrongAttackMissed);
                resolved(0)
            }
        },
        PlayerAction::Sign(sign) => cast_sign(sign, witcher, monster, dice, log),
        PlayerAction::UseItem(slot) => use_item(slot, witcher, log),
        PlayerAction::Defend => {
            log(CombatEvent::Defending);
            PlayerTurn::Resolved { dmg: 0, defending: true }
        }
    }
}

pub fn fast_attack(witcher: &Witcher, dice: &mut Dice) -> i32 {
    let dmg = witcher.base_dmg + witcher.temp_buff + dice.roll(1, 4);
    if witcher.has_learned(SkillId::MuscleMemory) {
        scale(dmg, 6, 5)
    } else {
        dmg
    }
}

/// `None` when the swing misses (a 1-3 on a d10).
pub fn strong_attack(witcher: &Witcher, dice: &mut Dice) -> Option<i32> {
    if dice.roll(1, 10) <= 3 {
        return None;
    }
    let dmg = scale(witcher.base_dmg + witcher.temp_buff, 3, 2) + dice.roll(1, 8);
    if witcher.has_learned(SkillId::StrengthTraining) {
        Some(scale(dmg, 6, 5))
    } else {
        Some(dmg)
    }
}

fn cast_sign(
    sign: Sign,
    witcher: &mut Witcher,
    monster: &mut Monster,
    dice: &mut Dice,
    mut log: impl FnMut(CombatEvent),
) -> PlayerTurn {
    let dmg = match sign {
        Sign::Aard => {
            let mut dmg = 10 * witcher.sign_power;
            if witcher.has_learned(SkillId::FarReachingAard) {
                dmg = scale(dmg, 3, 2);
            }
            log(CombatEvent::Aard { dmg });
            dmg
        }
        Sign::Igni => {
            let dmg = 15 * witcher.sign_power;
            log(CombatEvent::Igni { dmg });
            if witcher.has_learned(SkillId::MeltArmor) {
                monster.min_dmg = (monster.min_dmg - 3).max(1);
                monster.max_dmg = (monster.max_dmg - 5).max(2);
                log(CombatEvent::ArmorMelted {
                    min_dmg: monster.min_dmg,
                    max_dmg: monster.max_dmg,
                });
            }
            dmg
        }
        Sign::Quen => {
            witcher.temp_buff = QUEN_SHIELD;
            log(CombatEvent::QuenRaised { shield: QUEN_SHIELD });
            0
        }
        Sign::Axii => {
            // The draw is taken even when Delusion guarantees the stun.
            let roll = dice.d100();
            if roll > 50 || witcher.has_learned(SkillId::Delusion) {
                log(CombatEvent::AxiiStunned);
                return PlayerTurn::EnemyStunned;
            }
            log(CombatEvent::AxiiFailed);
            0
        }
        Sign::Yrden => {
            log(CombatEvent::YrdenSet);
            0
        }
    };
    PlayerTurn::Resolved { dmg, defending: false }
}

fn use_item(
    slot: Option<usize>,
    witcher: &mut Witcher,
    mut log: impl FnMut(CombatEvent),
) -> PlayerTurn {
    if witcher.inventory.is_empty() {
        log(CombatEvent::InventoryEmpty);
        return PlayerTurn::Retry;
    }
    let Some(idx) = slot.filter(|&i| i < witcher.inventory.len()) else {
        return PlayerTurn::Retry;
    };
    if !is_consumable(&witcher.inventory[idx]) {
        log(CombatEvent::ItemUnusable { item: witcher.inventory[idx].clone() });
        return PlayerTurn::Retry;
    }

    let item = witcher.inventory.remove(idx);
    witcher.heal(CONSUMABLE_HEAL);
    if witcher.has_learned(SkillId::HeightenedTolerance) {
        witcher.heal(TOLERANCE_HEAL);
    }
    debug!(%item, hp = witcher.hp, "consumable used");
    log(CombatEvent::ItemUsed { item, hp: witcher.hp });
    PlayerTurn::Resolved { dmg: 0, defending: false }
}

pub(crate) fn enemy_turn(
    monster: &mut Monster,
    witcher: &mut Witcher,
    player_defending: bool,
    dice: &mut Dice,
    mut log: impl FnMut(CombatEvent),
) {
    let action = decide_action(monster.ai, monster.hp_percent(), dice);
    debug!(monster = %monster.name, ?action, hp = monster.hp, "enemy decides");
    let name = monster.name.clone();
    match action {
        EnemyAction::Attack => {
            let mut dmg = dice.roll(monster.min_dmg, monster.max_dmg);
            if player_defending {
                dmg = (dmg / 2).max(1);
            }
            dmg = (dmg - witcher.defense - witcher.temp_buff).max(0);
            witcher.take_damage(dmg);
            log(CombatEvent::EnemyAttack { monster: name, dmg });
        }
        EnemyAction::Defend => log(CombatEvent::EnemyDefends { monster: name }),
        EnemyAction::Heal => {
            // No cap: a healing monster can climb past its starting hp.
            monster.hp += ENEMY_HEAL;
            log(CombatEvent::EnemyHeals { monster: name, amount: ENEMY_HEAL });
        }
        EnemyAction::Special => {
            // Goes straight through defense and Quen.
            let dmg = dice.roll(monster.min_dmg + 5, monster.max_dmg + 10);
            witcher.take_damage(dmg);
            log(CombatEvent::EnemySpecial { monster: name, dmg });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{find_monster, Difficulty, School};

    #[test]
    fn cornered_fiend_heals_instead_of_attacking() {
        let mut witcher = Witcher::new("Geralt", School::Wolf, Difficulty::StoryAndSwords);
        let mut fiend = Monster::spawn(&find_monster("fiend", false).unwrap(), &witcher);
        fiend.hp = 10;
        let mut events = Vec::new();
        let mut dice = Dice::from_scripted(vec![99]);
        enemy_turn(&mut fiend, &mut witcher, false, &mut dice, |e| events.push(e));
        assert_eq!(fiend.hp, 30);
        assert_eq!(witcher.hp, 110);
        assert!(matches!(events[0], CombatEvent::EnemyHeals { amount: 20, .. }));
    }

    #[test]
    fn monster_heal_can_pass_its_max() {
        let mut witcher = Witcher::new("Geralt", School::Wolf, Difficulty::StoryAndSwords);
        let mut fiend = Monster::spawn(&find_monster("fiend", false).unwrap(), &witcher);
        fiend.max_hp = 20;
        fiend.hp = 4;
        let mut dice = Dice::from_scripted(vec![99]);
        enemy_turn(&mut fiend, &mut witcher, false, &mut dice, |_| {});
        assert_eq!(fiend.hp, 24);
        assert!(fiend.hp > fiend.max_hp);
    }

    #[test]
    fn melt_armor_bottoms_out() {
        let mut witcher = Witcher::new("Geralt", School::Wolf, Difficulty::StoryAndSwords);
        witcher.skills_learned.insert(SkillId::MeltArmor, true);
        let mut bear = Monster::spawn(&find_monster("bear", false).unwrap(), &witcher);
        let mut dice = Dice::from_scripted(vec![1]);

        let mut ranges = Vec::new();
        for _ in 0..5 {
            cast_sign(Sign::Igni, &mut witcher, &mut bear, &mut dice, |_| {});
            ranges.push((bear.min_dmg, bear.max_dmg));
        }
        assert_eq!(ranges, vec![(9, 17), (6, 12), (3, 7), (1, 2), (1, 2)]);
    }
}
