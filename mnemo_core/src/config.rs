//! Configuration file support for mnemo.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/mnemo/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub scheduler: SchedulerConfig,

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

/// Review scheduling parameters
///
/// Intervals are expressed in days and may be fractional once the
/// success-rate multipliers are applied.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Base interval after a correct answer on an easy card
    #[serde(default = "default_easy_interval_days")]
    pub easy_interval_days: f64,

    /// Base interval after a correct answer on a medium card
    #[serde(default = "default_medium_interval_days")]
    pub medium_interval_days: f64,

    /// Base interval after a correct answer on a hard card
    #[serde(default = "default_hard_interval_days")]
    pub hard_interval_days: f64,

    /// Interval after a wrong answer, regardless of difficulty
    #[serde(default = "default_relearn_interval_days")]
    pub relearn_interval_days: f64,

    /// Success rate (exclusive) above which intervals are stretched
    #[serde(default = "default_boost_threshold")]
    pub boost_threshold: f64,

    #[serde(default = "default_boost_factor")]
    pub boost_factor: f64,

    /// Success rate (exclusive) below which intervals are shortened
    #[serde(default = "default_slump_threshold")]
    pub slump_threshold: f64,

    #[serde(default = "default_slump_factor")]
    pub slump_factor: f64,

    /// Success rate (inclusive) a card must hold to count as mastered
    #[serde(default = "default_mastery_rate")]
    pub mastery_rate: f64,

    /// Reviews (inclusive) a card must accumulate to count as mastered
    #[serde(default = "default_mastery_reviews")]
    pub mastery_reviews: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            easy_interval_days: default_easy_interval_days(),
            medium_interval_days: default_medium_interval_days(),
            hard_interval_days: default_hard_interval_days(),
            relearn_interval_days: default_relearn_interval_days(),
            boost_threshold: default_boost_threshold(),
            boost_factor: default_boost_factor(),
            slump_threshold: default_slump_threshold(),
            slump_factor: default_slump_factor(),
            mastery_rate: default_mastery_rate(),
            mastery_reviews: default_mastery_reviews(),
        }
    }
}

/// Daily performance log parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Most recent calendar days retained; oldest entries drop first
    #[serde(default = "default_max_days")]
    pub max_days: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_days: default_max_days(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("mnemo")
}

fn default_easy_interval_days() -> f64 {
    7.0
}

fn default_medium_interval_days() -> f64 {
    4.0
}

fn default_hard_interval_days() -> f64 {
    2.0
}

fn default_relearn_interval_days() -> f64 {
    1.0
}

fn default_boost_threshold() -> f64 {
    90.0
}

fn default_boost_factor() -> f64 {
    1.5
}

fn default_slump_threshold() -> f64 {
    70.0
}

fn default_slump_factor() -> f64 {
    0.8
}

fn default_mastery_rate() -> f64 {
    90.0
}

fn default_mastery_reviews() -> u32 {
    5
}

fn default_max_days() -> usize {
    30
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
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("mnemo").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Check that the tuning parameters make sense
    pub fn validate(&self) -> Result<()> {
        let s = &self.scheduler;
        for (name, days) in [
            ("easy_interval_days", s.easy_interval_days),
            ("medium_interval_days", s.medium_interval_days),
            ("hard_interval_days", s.hard_interval_days),
            ("relearn_interval_days", s.relearn_interval_days),
        ] {
            if !days.is_finite() || days <= 0.0 {
                return Err(Error::Config(format!("{} must be positive, got {}", name, days)));
            }
        }
        for (name, rate) in [
            ("boost_threshold", s.boost_threshold),
            ("slump_threshold", s.slump_threshold),
            ("mastery_rate", s.mastery_rate),
        ] {
            if !(0.0..=100.0).contains(&rate) {
                return Err(Error::Config(format!("{} must be within 0-100, got {}", name, rate)));
            }
        }
        if s.boost_factor <= 0.0 || s.slump_factor <= 0.0 {
            return Err(Error::Config("interval factors must be positive".into()));
        }
        if self.history.max_days == 0 {
            return Err(Error::Config("history.max_days must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scheduler.easy_interval_days, 7.0);
        assert_eq!(config.scheduler.medium_interval_days, 4.0);
        assert_eq!(config.scheduler.hard_interval_days, 2.0);
        assert_eq!(config.history.max_days, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(
            config.scheduler.boost_threshold,
            parsed.scheduler.boost_threshold
        );
        assert_eq!(config.history.max_days, parsed.history.max_days);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[scheduler]
medium_interval_days = 3.0
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.scheduler.medium_interval_days, 3.0);
        assert_eq!(config.scheduler.easy_interval_days, 7.0); // default
        assert_eq!(config.history.max_days, 30); // default
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.scheduler.easy_interval_days = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.scheduler.mastery_rate = 150.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.history.max_days = 0;
        assert!(config.validate().is_err());
    }
}
