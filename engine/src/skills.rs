//! Skill table and the controller that spends skill points.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::witcher::Witcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    Combat,
    Signs,
    Alchemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillId {
    MuscleMemory,
    StrengthTraining,
    FarReachingAard,
    MeltArmor,
    Delusion,
    HeightenedTolerance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    pub description: &'static str,
    pub cost: i32,
    pub category: SkillCategory,
}

impl SkillId {
    /// Skill tree order, as listed in menus and written to saves.
    pub const ALL: [SkillId; 6] = [
        SkillId::MuscleMemory,
        SkillId::StrengthTraining,
        SkillId::FarReachingAard,
        SkillId::MeltArmor,
        SkillId::Delusion,
        SkillId::HeightenedTolerance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SkillId::MuscleMemory => "Muscle Memory",
            SkillId::StrengthTraining => "Strength Training",
            SkillId::FarReachingAard => "Far-Reaching Aard",
            SkillId::MeltArmor => "Melt Armor",
            SkillId::Delusion => "Delusion",
            SkillId::HeightenedTolerance => "Heightened Tolerance",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    pub fn info(self) -> Skill {
        use SkillCategory::*;
        let (description, category) = match self {
            SkillId::MuscleMemory => ("Increase light attack damage +20%", Combat),
            SkillId::StrengthTraining => ("Increase strong attack damage +20%", Combat),
            SkillId::FarReachingAard => ("Aard deals more damage", Signs),
            SkillId::MeltArmor => ("Igni reduces enemy defense", Signs),
            SkillId::Delusion => ("Axii has higher chance to stun enemy", Signs),
            SkillId::HeightenedTolerance => ("Potions heal more", Alchemy),
        };
        Skill { description, cost: 1, category }
    }

    /// Flat base damage granted when the skill is learned (and again on every load).
    pub fn base_dmg_bonus(self) -> i32 {
        match self {
            SkillId::MuscleMemory => 3,
            SkillId::StrengthTraining => 5,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LearnOutcome {
    Learned,
    AlreadyLearned,
    InsufficientPoints,
    UnknownSkill,
}

/// Learn a skill by its display name.
pub fn learn_skill(witcher: &mut Witcher, name: &str) -> LearnOutcome {
    match SkillId::from_name(name) {
        Some(id) => learn(witcher, id),
        None => LearnOutcome::UnknownSkill,
    }
}

pub fn learn(witcher: &mut Witcher, id: SkillId) -> LearnOutcome {
    if witcher.has_learned(id) {
        return LearnOutcome::AlreadyLearned;
    }
    let cost = id.info().cost;
    if witcher.skill_points < cost {
        return LearnOutcome::InsufficientPoints;
    }
    witcher.skill_points -= cost;
    witcher.skills_learned.insert(id, true);
    // Stacks with the +20% multiplier applied in combat.
    witcher.base_dmg += id.base_dmg_bonus();
    info!(skill = id.name(), points_left = witcher.skill_points, "skill learned");
    LearnOutcome::Learned
}
