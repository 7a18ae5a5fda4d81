use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;

use crate::content::{Difficulty, School, CONSUMABLES};
use crate::skills::SkillId;

pub const EXP_PER_LEVEL: i32 = 100;
pub const STARTING_GOLD: i32 = 100;

/// The player character. One instance per session, mutated in place by combat and the skill tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Witcher {
    pub name: String,
    pub school: School,
    pub difficulty: Difficulty,

    pub level: i32,
    pub exp: i32,
    pub skill_points: i32,
    pub ng_plus: i32,

    pub gold: i32,
    pub inventory: Vec<String>,

    pub max_hp: i32,
    pub hp: i32,
    pub base_dmg: i32,
    pub defense: i32,
    pub sign_power: i32,
    /// Not used by combat math; kept so saves stay compatible.
    pub crit_chance: i32,

    pub skills_learned: IndexMap<SkillId, bool>,
    pub equipped_sword: String,
    pub equipped_armor: String,
    /// Quen mitigation, cleared at the end of most combat rounds.
    pub temp_buff: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpGain {
    pub gained: i32,
    pub leveled_up: bool,
}

impl Witcher {
    /// Fresh start: base stats, starting kit, then the one-time school bonus.
    pub fn new(name: impl Into<String>, school: School, difficulty: Difficulty) -> Self {
        let mut witcher = Self::blank(name.into(), school, difficulty);
        witcher.inventory = CONSUMABLES.iter().map(|s| s.to_string()).collect();
        witcher.apply_school_bonus();
        witcher
    }

    /// Base stats with no inventory and no school bonus. Persistence fills in the rest.
    pub(crate) fn blank(name: String, school: School, difficulty: Difficulty) -> Self {
        Self {
            name,
            school,
            difficulty,
            level: 1,
            exp: 0,
            skill_points: 0,
            ng_plus: 0,
            gold: STARTING_GOLD,
            inventory: Vec::new(),
            max_hp: 100,
            hp: 100,
            base_dmg: 10,
            defense: 0,
            sign_power: 1,
            crit_chance: 5,
            skills_learned: SkillId::ALL.into_iter().map(|s| (s, false)).collect(),
            equipped_sword: "Witcher Silver Sword".to_string(),
            equipped_armor: "Leather Jacket".to_string(),
            temp_buff: 0,
        }
    }

    /// New Game+: a fresh witcher of the same identity carrying level, points, skills and
    /// gold forward, with the NG+ round's stat scaling on top.
    pub fn new_game_plus(previous: &Witcher) -> Self {
        let mut next = Self::new(previous.name.clone(), previous.school, previous.difficulty);
        next.level = previous.level;
        next.skill_points = previous.skill_points;
        next.skills_learned = previous.skills_learned.clone();
        next.ng_plus = previous.ng_plus + 1;
        next.gold = previous.gold;
        next.max_hp += next.ng_plus * 20;
        next.base_dmg += next.ng_plus * 5;
        next.hp = next.max_hp;
        info!(name = %next.name, round = next.ng_plus, "starting new game+");
        next
    }

    fn apply_school_bonus(&mut self) {
        match self.school {
            School::Wolf => {
                self.max_hp = 110;
                self.base_dmg = 12;
            }
            School::Griffin => {
                self.sign_power = 3;
            }
            School::Bear => {
                self.max_hp = 160;
                self.defense = 5;
                self.base_dmg = 14;
            }
            School::Cat => {
                self.base_dmg = 15;
                self.crit_chance = 15;
            }
        }
        self.hp = self.max_hp;
    }

    pub fn has_learned(&self, skill: SkillId) -> bool {
        self.skills_learned.get(&skill).copied().unwrap_or(false)
    }

    /// Award experience scaled by difficulty. At most one level is gained per call.
    pub fn gain_exp(&mut self, amount: i32) -> ExpGain {
        let mult = self.difficulty.settings().exp_mult;
        let gained = (amount as f64 * mult) as i32;
        self.exp += gained;
        let leveled_up = self.exp >= EXP_PER_LEVEL;
        if leveled_up {
            self.level_up();
        }
        ExpGain { gained, leveled_up }
    }

    pub fn level_up(&mut self) {
        self.level += 1;
        self.exp = 0;
        self.skill_points += 1;
        self.max_hp += 15;
        self.base_dmg += 2;
        self.hp = self.max_hp;
        info!(name = %self.name, level = self.level, "level up");
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Meditation: full heal.
    pub fn meditate(&mut self) {
        self.hp = self.max_hp;
    }

    /// Restore after a defeat.
    pub fn respawn(&mut self) {
        self.hp = self.max_hp;
        self.temp_buff = 0;
    }

    pub fn take_damage(&mut self, dmg: i32) {
        self.hp = (self.hp - dmg.max(0)).max(0);
    }

    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn school_bonuses() {
        let wolf = Witcher::new("Geralt", School::Wolf, Difficulty::StoryAndSwords);
        assert_eq!((wolf.max_hp, wolf.hp, wolf.base_dmg), (110, 110, 12));

        let griffin = Witcher::new("Coen", School::Griffin, Difficulty::StoryAndSwords);
        assert_eq!((griffin.max_hp, griffin.sign_power, griffin.base_dmg), (100, 3, 10));

        let bear = Witcher::new("Gerd", School::Bear, Difficulty::StoryAndSwords);
        assert_eq!((bear.max_hp, bear.defense, bear.base_dmg), (160, 5, 14));

        let cat = Witcher::new("Gaetan", School::Cat, Difficulty::StoryAndSwords);
        assert_eq!((cat.base_dmg, cat.crit_chance, cat.max_hp), (15, 15, 100));
    }

    #[test]
    fn fresh_witcher_has_every_skill_unlearned() {
        let w = Witcher::new("Geralt", School::Wolf, Difficulty::JustTheStory);
        assert_eq!(w.skills_learned.len(), SkillId::ALL.len());
        assert!(w.skills_learned.values().all(|learned| !learned));
        assert_eq!(w.inventory, vec!["Bread", "Dwarven Spirit"]);
        assert_eq!(w.gold, 100);
    }

    #[test]
    fn damage_and_heal_stay_in_bounds() {
        let mut w = Witcher::new("Geralt", School::Wolf, Difficulty::StoryAndSwords);
        w.take_damage(500);
        assert_eq!(w.hp, 0);
        assert!(!w.is_alive());
        w.heal(30);
        assert_eq!(w.hp, 30);
        w.heal(500);
        assert_eq!(w.hp, w.max_hp);
    }
}
