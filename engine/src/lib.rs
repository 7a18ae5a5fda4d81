use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod ai;
pub mod combat;
pub mod config;
pub mod content;
pub mod error;
pub mod save;
pub mod session;
pub mod shop;
pub mod skills;
pub mod witcher;

pub use combat::{CombatEvent, Outcome, PlayerAction, Sign, resolve_combat};
pub use content::{Archetype, Difficulty, DifficultySettings, MonsterTemplate, School};
pub use error::{CombatError, SaveError};
pub use skills::{LearnOutcome, SkillId, learn_skill};
pub use witcher::{ExpGain, Witcher};

enum Source {
    Seeded(ChaCha8Rng),
    Scripted(VecDeque<i32>),
}

/// Uniform integer draws for every randomized outcome in the game.
pub struct Dice {
    source: Source,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { source: Source::Seeded(ChaCha8Rng::seed_from_u64(seed)) }
    }

    pub fn from_entropy() -> Self {
        Self { source: Source::Seeded(ChaCha8Rng::from_entropy()) }
    }

    /// Replays `draws` in order (cycling), clamping each into the requested range.
    pub fn from_scripted(draws: Vec<i32>) -> Self {
        Self { source: Source::Scripted(draws.into()) }
    }

    /// Uniform draw in `[min, max]`. Degenerate ranges return `min`.
    pub fn roll(&mut self, min: i32, max: i32) -> i32 {
        match &mut self.source {
            Source::Seeded(rng) => {
                if max <= min {
                    return min;
                }
                rng.gen_range(min..=max)
            }
            Source::Scripted(queue) => {
                let Some(next) = queue.pop_front() else {
                    return min;
                };
                queue.push_back(next);
                if max <= min { min } else { next.clamp(min, max) }
            }
        }
    }

    /// Percentile draw, 1..=100.
    pub fn d100(&mut self) -> i32 {
        self.roll(1, 100)
    }
}

/// Floor of `value * num / den` for the non-negative damage figures used in combat.
pub(crate) fn scale(value: i32, num: i32, den: i32) -> i32 {
    (value * num).div_euclid(den)
}
