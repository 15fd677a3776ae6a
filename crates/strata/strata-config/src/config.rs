use serde::Deserialize;
use std::path::Path;
use strata_buffer::{OverflowPolicy, Priority};

/// Settings for the `strata` operator binary.
///
/// ```toml
/// log_level = "debug"
/// overflow = "reject"
/// start_priority = "high"
/// clear_screen = false
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StrataConfig {
    #[serde(default = "defaults::log_level")]
    pub log_level: String,
    /// What a full buffer does when only the inserting level can make room.
    #[serde(default)]
    pub overflow: OverflowPolicy,
    /// Priority selected when the menu starts.
    #[serde(default)]
    pub start_priority: Priority,
    /// Clear the terminal before each redraw.
    #[serde(default = "defaults::clear_screen")]
    pub clear_screen: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
}

mod defaults {
    pub fn log_level() -> String {
        "info".into()
    }

    pub fn clear_screen() -> bool {
        true
    }
}

impl Default for StrataConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level(),
            overflow: OverflowPolicy::default(),
            start_priority: Priority::default(),
            clear_screen: defaults::clear_screen(),
        }
    }
}

impl StrataConfig {
    pub fn load(path: impl AsRef<Path> + ToString) -> Result<Self, ConfigError> {
        let toml_to_str = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&toml_to_str)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path> + ToString) -> Result<Self, ConfigError> {
        if !path.as_ref().exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = StrataConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, StrataConfig::default());
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.overflow, OverflowPolicy::Overwrite);
        assert_eq!(cfg.start_priority, Priority::Low);
        assert!(cfg.clear_screen);
    }

    #[test]
    fn parses_every_field() {
        let cfg = StrataConfig::from_toml_str(
            r#"
            log_level = "strata_buffer=trace"
            overflow = "reject"
            start_priority = "high"
            clear_screen = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.log_level, "strata_buffer=trace");
        assert_eq!(cfg.overflow, OverflowPolicy::Reject);
        assert_eq!(cfg.start_priority, Priority::High);
        assert!(!cfg.clear_screen);
    }

    #[test]
    fn rejects_unknown_policy_and_fields() {
        assert!(matches!(
            StrataConfig::from_toml_str(r#"overflow = "drop""#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            StrataConfig::from_toml_str("capacity = 8"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_falls_back_only_when_asked() {
        let path = format!("/tmp/strata_missing_{}.toml", std::process::id());
        assert!(matches!(StrataConfig::load(path.as_str()), Err(ConfigError::Read { .. })));
        assert_eq!(StrataConfig::load_or_default(path.as_str()).unwrap(), StrataConfig::default());
    }

    #[test]
    fn loads_from_disk() {
        let path = std::env::temp_dir().join(format!("strata_cfg_{}.toml", std::process::id()));
        std::fs::write(&path, "start_priority = \"mid\"\n").unwrap();
        let cfg = StrataConfig::load(path.display().to_string()).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(cfg.start_priority, Priority::Mid);
    }
}
