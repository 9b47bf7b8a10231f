//! Configuration file loading and management
//!
//! This module handles loading and parsing the toolkit configuration from
//! `$XDG_CONFIG_HOME/argus/config.toml`. If the configuration file doesn't
//! exist, a default configuration is created with documented comments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main toolkit configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Toolkit-wide configuration
    pub toolkit: ToolkitConfig,
}

/// Toolkit-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolkitConfig {
    /// Log level (trace, debug, info, warn, error)
    /// Default: "info"
    pub log_level: String,

    /// Directory scanned for units
    /// If None, uses XDG_DATA_HOME/argus/units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units_dir: Option<PathBuf>,

    /// Unit ids run automatically at startup, in this order
    #[serde(default)]
    pub essential_units: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            toolkit: ToolkitConfig::default(),
        }
    }
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            units_dir: None,
            essential_units: vec!["report".to_string()],
        }
    }
}

impl Config {
    /// Load configuration from the specified path
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// The parsed configuration or an error if loading/parsing fails
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default XDG config location
    ///
    /// If the configuration file doesn't exist, creates a default
    /// configuration file with documented comments.
    pub fn load_default() -> Result<Self> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_file(&config_path)?;
        }

        Self::load(&config_path)
    }

    /// Get the default configuration file path
    ///
    /// Returns `$XDG_CONFIG_HOME/argus/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "raibid-labs", "argus")
            .context("Failed to determine project directories")?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Create a default configuration file with documented comments
    fn create_default_file(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let default_config = Self::default_config_content();
        fs::write(path, default_config)
            .with_context(|| format!("Failed to write default config file: {}", path.display()))?;

        tracing::info!("Created default configuration file at: {}", path.display());
        Ok(())
    }

    /// Generate the default configuration file content with comments
    fn default_config_content() -> String {
        r#"# Argus Toolkit Configuration
# This file configures the argus toolkit behavior.

[toolkit]
# Log level: trace, debug, info, warn, error
# Default: "info"
log_level = "info"

# Directory scanned for units
# If not specified, defaults to $XDG_DATA_HOME/argus/units
# units_dir = "/path/to/units"

# Unit ids run automatically at startup, before the menu appears.
# Units are run in exactly this order; ids missing from the registry
# are skipped with a warning.
essential_units = ["report"]
"#
        .to_string()
    }

    /// Validate the configuration
    ///
    /// Ensures all configuration values are valid and within acceptable
    /// ranges.
    pub fn validate(&self) -> Result<()> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.toolkit.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log_level: {}. Must be one of: {}",
                self.toolkit.log_level,
                valid_log_levels.join(", ")
            );
        }

        for id in &self.toolkit.essential_units {
            if id.trim().is_empty() {
                anyhow::bail!("essential_units entries must not be empty");
            }
        }

        Ok(())
    }

    /// Get the units directory
    ///
    /// Returns the configured directory or the default XDG data directory
    /// path
    pub fn units_dir(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.toolkit.units_dir {
            return Ok(path.clone());
        }

        let dirs = directories::ProjectDirs::from("", "raibid-labs", "argus")
            .context("Failed to determine project directories")?;

        Ok(dirs.data_dir().join("units"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.toolkit.log_level, "info");
        assert!(config.toolkit.units_dir.is_none());
        assert_eq!(config.toolkit.essential_units, vec!["report".to_string()]);
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[toolkit]
log_level = "debug"
units_dir = "/opt/argus/units"
essential_units = ["report", "dummy"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.toolkit.log_level, "debug");
        assert_eq!(
            config.toolkit.units_dir,
            Some(PathBuf::from("/opt/argus/units"))
        );
        assert_eq!(config.toolkit.essential_units.len(), 2);
    }

    #[test]
    fn test_load_minimal_config() {
        let config_content = r#"
[toolkit]
log_level = "info"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.toolkit.log_level, "info");
        assert!(config.toolkit.essential_units.is_empty());
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.toolkit.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_essential_id() {
        let mut config = Config::default();
        config.toolkit.essential_units = vec!["".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_units_dir_default() {
        let config = Config::default();
        let units_dir = config.units_dir().unwrap();
        assert!(units_dir.to_string_lossy().contains("argus"));
        assert!(units_dir.to_string_lossy().ends_with("units"));
    }

    #[test]
    fn test_units_dir_custom() {
        let mut config = Config::default();
        let custom = PathBuf::from("/custom/units");
        config.toolkit.units_dir = Some(custom.clone());
        assert_eq!(config.units_dir().unwrap(), custom);
    }

    #[test]
    fn test_full_config_roundtrip() {
        let mut config = Config::default();
        config.toolkit.log_level = "debug".to_string();
        config.toolkit.essential_units = vec!["report".to_string(), "dummy".to_string()];

        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_default_file_content_parses() {
        let config: Config = toml::from_str(&Config::default_config_content()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.toolkit.essential_units, vec!["report".to_string()]);
    }
}
