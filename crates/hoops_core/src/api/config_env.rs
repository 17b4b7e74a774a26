//! Configuration overrides: rules, roster catalog and per-tier profiles
//! loaded from a JSON file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::{env, fs};
use tracing::debug;

use crate::engine::{DifficultyProfile, SimConfig};
use crate::error::{CoreError, Result};
use crate::models::{Difficulty, RosterCatalog};

pub const CONFIG_PATH_ENV: &str = "HOOPS_CONFIG_PATH";

/// Every key is optional; missing keys fall back to the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    pub rules: Option<SimConfig>,
    pub roster: Option<RosterCatalog>,
    pub profiles: BTreeMap<Difficulty, DifficultyProfile>,
}

impl ConfigOverrides {
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: Self = serde_json::from_str(json)?;
        overrides.validate()?;
        Ok(overrides)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loaded config overrides");
        Self::from_json(&content).map_err(|e| match e {
            CoreError::DeserializationError(msg) => {
                CoreError::DeserializationError(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Reads the file named by `HOOPS_CONFIG_PATH`, if set and non-empty.
    pub fn from_env() -> Result<Option<Self>> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(None);
        };
        let path = path.trim();
        if path.is_empty() {
            return Ok(None);
        }
        Self::from_file(path).map(Some)
    }

    /// `from_env`, or the defaults when the variable is unset.
    pub fn from_env_or_default() -> Result<Self> {
        Ok(Self::from_env()?.unwrap_or_default())
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(rules) = &self.rules {
            rules.validate()?;
        }
        if let Some(roster) = &self.roster {
            roster.validate()?;
        }
        for (difficulty, profile) in &self.profiles {
            profile.validate().map_err(|e| {
                CoreError::InvalidConfig(format!("{difficulty} profile: {e}"))
            })?;
        }
        Ok(())
    }

    pub fn rules(&self) -> SimConfig {
        self.rules.clone().unwrap_or_default()
    }

    pub fn catalog(&self) -> RosterCatalog {
        self.roster.clone().unwrap_or_default()
    }

    pub fn profile(&self, difficulty: Difficulty) -> DifficultyProfile {
        self.profiles
            .get(&difficulty)
            .cloned()
            .unwrap_or_else(|| DifficultyProfile::for_difficulty(difficulty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_defaults() {
        let overrides = ConfigOverrides::from_json("{}").unwrap();
        assert_eq!(overrides, ConfigOverrides::default());
        assert_eq!(overrides.rules(), SimConfig::default());
        assert_eq!(overrides.profile(Difficulty::Hard), DifficultyProfile::hard());
        assert_eq!(overrides.catalog(), RosterCatalog::default());
    }

    #[test]
    fn test_partial_rules_and_profile() {
        let mut medium = DifficultyProfile::medium();
        medium.target_events = 80;
        let json = serde_json::json!({
            "rules": { "foul_limit": 6 },
            "profiles": { "medium": medium },
        })
        .to_string();

        let overrides = ConfigOverrides::from_json(&json).unwrap();
        let rules = overrides.rules();
        assert_eq!(rules.foul_limit, 6);
        assert_eq!(rules.team_foul_limit, 5);
        assert_eq!(overrides.profile(Difficulty::Medium).target_events, 80);
        assert_eq!(overrides.profile(Difficulty::Basic), DifficultyProfile::basic());
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let mut basic = DifficultyProfile::basic();
        basic.substitution_chance = 1.5;
        let json = serde_json::json!({ "profiles": { "basic": basic } }).to_string();
        let err = ConfigOverrides::from_json(&json).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)), "{err}");
        assert!(err.to_string().contains("basic"));
    }

    #[test]
    fn test_invalid_roster_rejected() {
        let json = r#"{ "roster": { "teams": [] } }"#;
        assert!(matches!(
            ConfigOverrides::from_json(json),
            Err(CoreError::InvalidRoster(_))
        ));
    }

    #[test]
    fn test_from_file_reports_path_on_bad_json() {
        let dir = env::temp_dir().join(format!("hoops_cfg_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let err = ConfigOverrides::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
        fs::remove_dir_all(&dir).ok();
    }
}
