//! Fixed game data: difficulty multipliers, witcher schools and the monster bestiary.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

pub const CONJUNCTION_PREFIX: &str = "Chaos ";

/// Items that restore health when used in combat.
pub const CONSUMABLES: [&str; 2] = ["Bread", "Dwarven Spirit"];

pub fn is_consumable(item: &str) -> bool {
    CONSUMABLES.contains(&item)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultySettings {
    pub enemy_hp_mult: f64,
    pub enemy_dmg_mult: f64,
    pub exp_mult: f64,
    pub gold_mult: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    JustTheStory,
    #[default]
    StoryAndSwords,
    BloodAndBrokenBones,
    DeathMarch,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::JustTheStory,
        Difficulty::StoryAndSwords,
        Difficulty::BloodAndBrokenBones,
        Difficulty::DeathMarch,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::JustTheStory => "Just the Story",
            Difficulty::StoryAndSwords => "Story and Swords",
            Difficulty::BloodAndBrokenBones => "Blood and Broken Bones",
            Difficulty::DeathMarch => "Death March!",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.label() == label)
    }

    pub fn settings(self) -> DifficultySettings {
        let (enemy_hp_mult, enemy_dmg_mult, exp_mult, gold_mult) = match self {
            Difficulty::JustTheStory => (0.8, 0.7, 1.2, 1.0),
            Difficulty::StoryAndSwords => (1.0, 1.0, 1.0, 1.0),
            Difficulty::BloodAndBrokenBones => (1.2, 1.3, 0.8, 1.2),
            Difficulty::DeathMarch => (1.5, 1.6, 0.6, 1.5),
        };
        DifficultySettings { enemy_hp_mult, enemy_dmg_mult, exp_mult, gold_mult }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum School {
    #[default]
    Wolf,
    Griffin,
    Bear,
    Cat,
}

impl School {
    pub const ALL: [School; 4] = [School::Wolf, School::Griffin, School::Bear, School::Cat];

    pub fn label(self) -> &'static str {
        match self {
            School::Wolf => "Wolf",
            School::Griffin => "Griffin",
            School::Bear => "Bear",
            School::Cat => "Cat",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

/// Enemy behaviour category consulted by [`crate::ai::decide_action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Archetype {
    Aggressive,
    Tank,
    Smart,
    Balanced,
}

impl Archetype {
    /// Unrecognised behaviour labels fall back to plain aggression.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Tank" => Archetype::Tank,
            "Smart" => Archetype::Smart,
            "Balanced" => Archetype::Balanced,
            _ => Archetype::Aggressive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonsterTemplate {
    pub key: &'static str,
    pub name: Cow<'static, str>,
    pub hp: i32,
    pub min_dmg: i32,
    pub max_dmg: i32,
    pub kind: &'static str,
    pub weakness: &'static str,
    pub loot: &'static str,
    pub exp: i32,
    pub ai: Archetype,
}

#[allow(clippy::too_many_arguments)]
const fn monster(
    key: &'static str,
    name: &'static str,
    hp: i32,
    (min_dmg, max_dmg): (i32, i32),
    kind: &'static str,
    weakness: &'static str,
    loot: &'static str,
    exp: i32,
    ai: Archetype,
) -> MonsterTemplate {
    MonsterTemplate {
        key,
        name: Cow::Borrowed(name),
        hp,
        min_dmg,
        max_dmg,
        kind,
        weakness,
        loot,
        exp,
        ai,
    }
}

#[rustfmt::skip]
pub static MONSTERS: [MonsterTemplate; 5] = [
    monster("bandit", "Bandit", 60, (8, 15), "Human", "Axii", "Oren Pouch", 40, Archetype::Balanced),
    monster("bear", "Grizzly Bear", 120, (12, 22), "Beast", "Quen", "Bear Fat", 70, Archetype::Tank),
    monster("drowner", "Drowner", 40, (5, 10), "Necrophage", "Igni", "Drowner Brain", 25, Archetype::Aggressive),
    monster("fiend", "Fiend", 250, (20, 35), "Relict", "Samum", "Fiend Eye", 150, Archetype::Smart),
    monster("ghoul", "Ghoul", 50, (6, 12), "Necrophage", "Silver", "Ghoul Blood", 30, Archetype::Aggressive),
];

pub fn monster_keys() -> impl Iterator<Item = &'static str> {
    MONSTERS.iter().map(|m| m.key)
}

/// Template for `key`, reskinned by [`conjunction`] when the event is active.
pub fn find_monster(key: &str, conjunction_active: bool) -> Option<MonsterTemplate> {
    let template = MONSTERS.iter().find(|m| m.key == key)?;
    if conjunction_active {
        Some(empowered(template))
    } else {
        Some(template.clone())
    }
}

/// A transformed copy of `monsters` with the conjunction applied; the input is untouched.
pub fn conjunction(monsters: &[MonsterTemplate]) -> Vec<MonsterTemplate> {
    monsters.iter().map(empowered).collect()
}

fn empowered(template: &MonsterTemplate) -> MonsterTemplate {
    MonsterTemplate {
        name: Cow::Owned(format!("{}{}", CONJUNCTION_PREFIX, template.name)),
        hp: (template.hp as f64 * 1.5) as i32,
        ..template.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_label(d.label()), Some(d));
        }
        for s in School::ALL {
            assert_eq!(School::from_label(s.label()), Some(s));
        }
        assert_eq!(Difficulty::from_label("Nightmare"), None);
    }

    #[test]
    fn conjunction_leaves_base_table_alone() {
        let chaos = conjunction(&MONSTERS);
        let drowner = chaos.iter().find(|m| m.key == "drowner").unwrap();
        assert_eq!(drowner.name, "Chaos Drowner");
        assert_eq!(drowner.hp, 60);
        assert_eq!(MONSTERS[2].name, "Drowner");
        assert_eq!(MONSTERS[2].hp, 40);
    }

    #[test]
    fn conjunction_truncates_hp() {
        let ghoul = find_monster("ghoul", true).unwrap();
        assert_eq!(ghoul.hp, 75);
        let bear = find_monster("bear", true).unwrap();
        assert_eq!(bear.hp, 180);
    }

    #[test]
    fn unknown_archetype_label_is_aggressive() {
        assert_eq!(Archetype::from_label("Berserk"), Archetype::Aggressive);
        assert_eq!(Archetype::from_label("Smart"), Archetype::Smart);
    }
}
