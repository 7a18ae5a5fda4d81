use serde::Serialize;

use crate::content::Archetype;
use crate::Dice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnemyAction {
    Attack,
    Defend,
    Heal,
    Special,
}

/// Pick the enemy's move for this round. Only Smart (above 25%) and Balanced consume a draw.
pub fn decide_action(archetype: Archetype, hp_percent: f64, dice: &mut Dice) -> EnemyAction {
    match archetype {
        Archetype::Aggressive => EnemyAction::Attack,
        Archetype::Tank => {
            if hp_percent < 30.0 {
                EnemyAction::Defend
            } else {
                EnemyAction::Attack
            }
        }
        Archetype::Smart => {
            if hp_percent < 25.0 {
                EnemyAction::Heal
            } else if dice.d100() > 50 {
                EnemyAction::Attack
            } else {
                EnemyAction::Special
            }
        }
        Archetype::Balanced => {
            if dice.d100() > 30 {
                EnemyAction::Attack
            } else {
                EnemyAction::Defend
            }
        }
    }
}
