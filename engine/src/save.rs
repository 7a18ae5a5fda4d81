//! Flat `key=value` save format.
//!
//! One pair per line. The inventory is `|`-joined in acquisition order and learned skills are
//! written as `name:0|1` pairs joined by `;`. Loading always restores hp to max hp, and the
//! flat base damage bonus of every learned combat skill is granted again on each load (the
//! saved `base_dmg` already includes it).

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::ops::RangeInclusive;
use std::path::Path;

use tracing::{info, warn};

use crate::content::{Difficulty, School};
use crate::error::SaveError;
use crate::skills::SkillId;
use crate::witcher::Witcher;

pub const SAVE_KEYS: [&str; 18] = [
    "name",
    "school",
    "difficulty",
    "level",
    "exp",
    "skill_points",
    "gold",
    "max_hp",
    "base_dmg",
    "defense",
    "sign_power",
    "crit_chance",
    "equipped_sword",
    "equipped_armor",
    "temp_buff",
    "ng_plus",
    "inventory",
    "skills_learned",
];

/// Upper bound for any saved stat; keeps combat arithmetic far from `i32` overflow.
pub const STAT_CAP: i32 = 1_000_000;

pub fn serialize(witcher: &Witcher) -> String {
    let skills = witcher
        .skills_learned
        .iter()
        .map(|(id, learned)| format!("{}:{}", id.name(), if *learned { 1 } else { 0 }))
        .collect::<Vec<_>>()
        .join(";");

    let values = [
        witcher.name.clone(),
        witcher.school.label().to_string(),
        witcher.difficulty.label().to_string(),
        witcher.level.to_string(),
        witcher.exp.to_string(),
        witcher.skill_points.to_string(),
        witcher.gold.to_string(),
        witcher.max_hp.to_string(),
        witcher.base_dmg.to_string(),
        witcher.defense.to_string(),
        witcher.sign_power.to_string(),
        witcher.crit_chance.to_string(),
        witcher.equipped_sword.clone(),
        witcher.equipped_armor.clone(),
        witcher.temp_buff.to_string(),
        witcher.ng_plus.to_string(),
        witcher.inventory.join("|"),
        skills,
    ];

    SAVE_KEYS
        .iter()
        .zip(values)
        .map(|(key, value)| format!("{}={}\n", key, value))
        .collect()
}

struct Fields<'a>(HashMap<&'a str, &'a str>);

impl<'a> Fields<'a> {
    fn parse(text: &'a str) -> Self {
        Self(text.lines().filter_map(|line| line.split_once('=')).collect())
    }

    fn text(&self, key: &'static str) -> Result<&'a str, SaveError> {
        self.0.get(key).copied().ok_or(SaveError::MissingKey(key))
    }

    fn number(&self, key: &'static str) -> Result<i32, SaveError> {
        let value = self.text(key)?;
        value.trim().parse().map_err(|_| SaveError::InvalidNumber {
            key,
            value: value.to_string(),
        })
    }

    fn bounded(&self, key: &'static str, range: RangeInclusive<i32>) -> Result<i32, SaveError> {
        let value = self.number(key)?;
        if range.contains(&value) {
            Ok(value)
        } else {
            Err(SaveError::OutOfRange { key, value })
        }
    }
}

pub fn deserialize(text: &str) -> Result<Witcher, SaveError> {
    let fields = Fields::parse(text);

    let school = fields.text("school")?;
    let school = School::from_label(school).ok_or_else(|| SaveError::UnknownLabel {
        key: "school",
        value: school.to_string(),
    })?;
    let difficulty = fields.text("difficulty")?;
    let difficulty = Difficulty::from_label(difficulty).ok_or_else(|| SaveError::UnknownLabel {
        key: "difficulty",
        value: difficulty.to_string(),
    })?;

    let mut witcher = Witcher::blank(fields.text("name")?.to_string(), school, difficulty);
    witcher.level = fields.bounded("level", 1..=STAT_CAP)?;
    witcher.exp = fields.bounded("exp", 0..=STAT_CAP)?;
    witcher.skill_points = fields.bounded("skill_points", 0..=STAT_CAP)?;
    witcher.gold = fields.bounded("gold", 0..=STAT_CAP)?;
    witcher.max_hp = fields.bounded("max_hp", 1..=STAT_CAP)?;
    witcher.base_dmg = fields.bounded("base_dmg", 0..=STAT_CAP)?;
    witcher.defense = fields.bounded("defense", 0..=STAT_CAP)?;
    witcher.sign_power = fields.bounded("sign_power", 0..=STAT_CAP)?;
    witcher.crit_chance = fields.bounded("crit_chance", 0..=100)?;
    witcher.equipped_sword = fields.text("equipped_sword")?.to_string();
    witcher.equipped_armor = fields.text("equipped_armor")?.to_string();
    witcher.temp_buff = fields.bounded("temp_buff", 0..=STAT_CAP)?;
    witcher.ng_plus = fields.bounded("ng_plus", 0..=STAT_CAP)?;
    witcher.hp = witcher.max_hp;

    witcher.inventory = fields
        .text("inventory")?
        .split('|')
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();

    // Skills missing from the save stay at their `false` default from `blank`.
    for pair in fields.text("skills_learned")?.split(';') {
        let Some((name, flag)) = pair.split_once(':') else {
            continue;
        };
        let Some(id) = SkillId::from_name(name) else {
            warn!(skill = name, "ignoring unknown skill in save data");
            continue;
        };
        let learned = flag == "1";
        witcher.skills_learned.insert(id, learned);
        if learned {
            witcher.base_dmg += id.base_dmg_bonus();
        }
    }

    Ok(witcher)
}

pub fn save_to_path(path: &Path, witcher: &Witcher) -> Result<(), SaveError> {
    fs::write(path, serialize(witcher))?;
    info!(path = %path.display(), name = %witcher.name, "game saved");
    Ok(())
}

/// `Ok(None)` when there is no save to continue from (missing file or no key lines).
pub fn load_from_path(path: &Path) -> Result<Option<Witcher>, SaveError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    if !text.lines().any(|line| line.contains('=')) {
        return Ok(None);
    }
    let witcher = deserialize(&text)?;
    info!(path = %path.display(), name = %witcher.name, level = witcher.level, "game loaded");
    Ok(Some(witcher))
}
