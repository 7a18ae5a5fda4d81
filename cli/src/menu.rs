//! Menu input parsing. Bad input is never an error: parsers return `None` (or a default) and
//! the caller re-shows the menu.

use witcher_engine::{Difficulty, School, Sign};

pub const DEFAULT_NAME: &str = "Geralt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartChoice {
    Continue,
    NewGame,
}

impl StartChoice {
    /// Anything but "1" starts a new game.
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => StartChoice::Continue,
            _ => StartChoice::NewGame,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Hunt,
    SkillTree,
    Meditate,
    Save,
    Quit,
    Merchant,
}

impl MainChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MainChoice::Hunt),
            "2" => Some(MainChoice::SkillTree),
            "3" => Some(MainChoice::Meditate),
            "4" => Some(MainChoice::Save),
            "5" => Some(MainChoice::Quit),
            "6" => Some(MainChoice::Merchant),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatChoice {
    FastAttack,
    StrongAttack,
    Sign,
    Item,
    Defend,
}

impl CombatChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(CombatChoice::FastAttack),
            "2" => Some(CombatChoice::StrongAttack),
            "3" => Some(CombatChoice::Sign),
            "4" => Some(CombatChoice::Item),
            "5" => Some(CombatChoice::Defend),
            _ => None,
        }
    }
}

pub fn parse_sign(input: &str) -> Option<Sign> {
    parse_index(input, Sign::ALL.len()).map(|i| Sign::ALL[i])
}

pub fn parse_name(input: &str) -> String {
    let name = input.trim();
    if name.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        name.to_string()
    }
}

pub fn parse_school(input: &str) -> School {
    parse_index(input, School::ALL.len())
        .map(|i| School::ALL[i])
        .unwrap_or_default()
}

pub fn parse_difficulty(input: &str) -> Difficulty {
    parse_index(input, Difficulty::ALL.len())
        .map(|i| Difficulty::ALL[i])
        .unwrap_or_default()
}

/// 1-based menu number to a 0-based index below `len`.
pub fn parse_index(input: &str, len: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}
