//! Configuration file support for fitplan.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fitplan/config.toml`.

use crate::{Error, Profile, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub user: UserConfig,

    #[serde(default)]
    pub defaults: ProfileDefaults,

    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub history: HistoryConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Owner identity used for plans and tracks
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_user_id")]
    pub id: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            id: default_user_id(),
        }
    }
}

/// Profile values used when a request leaves them out
///
/// These are raw values and go through the same normalization as request
/// input, so a misspelled level here still yields a valid plan.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct ProfileDefaults {
    pub level: Option<String>,
    pub goal: Option<String>,
    pub days_per_week: Option<i64>,
}

/// Plan generator configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct GeneratorConfig {
    /// Fixed RNG seed for reproducible plans
    pub seed: Option<u64>,
}

/// Track history configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_window_days")]
    pub window_days: i64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|| PathBuf::from("."))
    });
    base.join("fitplan")
}

fn default_user_id() -> String {
    "local".into()
}

fn default_window_days() -> i64 {
    7
}

impl ProfileDefaults {
    /// Fill the fields `profile` leaves empty
    pub fn apply(&self, profile: Profile) -> Profile {
        Profile {
            level: profile.level.or_else(|| self.level.clone()),
            goal: profile.goal.or_else(|| self.goal.clone()),
            days_per_week: profile.days_per_week.or(self.days_per_week),
        }
    }
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        base.join("fitplan").join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.user.id.trim().is_empty() {
            return Err(Error::Config("user.id must not be empty".into()));
        }
        if self.history.window_days <= 0 {
            return Err(Error::Config(format!(
                "history.window_days must be positive, got {}",
                self.history.window_days
            )));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.user.id, "local");
        assert_eq!(config.history.window_days, 7);
        assert!(config.generator.seed.is_none());
        assert!(config.data.data_dir.ends_with("fitplan"));
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.user.id = "alice".into();
        config.defaults.goal = Some("endurance".into());
        config.generator.seed = Some(42);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.user.id, "alice");
        assert_eq!(loaded.defaults.goal.as_deref(), Some("endurance"));
        assert_eq!(loaded.generator.seed, Some(42));
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[defaults]
level = "intermediaire"
days_per_week = 5
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.defaults.level.as_deref(), Some("intermediaire"));
        assert_eq!(config.defaults.days_per_week, Some(5));
        assert_eq!(config.user.id, "local"); // default
        assert_eq!(config.history.window_days, 7); // default
    }

    #[test]
    fn test_invalid_window_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[history]\nwindow_days = 0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let defaults = ProfileDefaults {
            level: Some("avance".into()),
            goal: Some("endurance".into()),
            days_per_week: Some(5),
        };

        let profile = defaults.apply(Profile::new(None, Some("general"), None));
        assert_eq!(profile.level.as_deref(), Some("avance"));
        assert_eq!(profile.goal.as_deref(), Some("general"));
        assert_eq!(profile.days_per_week, Some(5));
    }
}
