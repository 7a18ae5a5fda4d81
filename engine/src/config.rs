use std::{fs, path::Path, path::PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "witcher.yaml";
pub const DEFAULT_SAVE_FILE: &str = "witcher_save.txt";
pub const DEFAULT_CONJUNCTION_CHANCE: i32 = 10;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct GameConfig {
    pub save_path: PathBuf,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Percent chance that a hunt happens under a conjunction.
    pub conjunction_chance: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from(DEFAULT_SAVE_FILE),
            seed: None,
            conjunction_chance: DEFAULT_CONJUNCTION_CHANCE,
        }
    }
}

impl GameConfig {
    /// Read a YAML config; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("invalid config: {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: GameConfig = serde_yaml::from_str(text)?;
        if !(0..=100).contains(&cfg.conjunction_chance) {
            bail!("conjunction_chance must be within 0..=100, got {}", cfg.conjunction_chance);
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg = GameConfig::from_yaml("seed: 42\n").unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.save_path, PathBuf::from(DEFAULT_SAVE_FILE));
        assert_eq!(cfg.conjunction_chance, 10);
    }

    #[test]
    fn rejects_out_of_range_chance() {
        assert!(GameConfig::from_yaml("conjunction_chance: 150\n").is_err());
    }

    #[test]
    fn missing_file_is_default() {
        let cfg = GameConfig::load(Path::new("definitely/not/here.yaml")).unwrap();
        assert_eq!(cfg, GameConfig::default());
    }
}
