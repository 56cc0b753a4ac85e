// User settings
// Loaded from ~/.config/fitdiff/settings.toml

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

/// Format tags used when a command line leaves a side's format unspecified.
/// Values are checked by the engine, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DefaultSettings {
    pub subject_format: Option<String>,
    pub reference_format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Emit the JSON report instead of text tables
    pub json: bool,
    /// Include the full reconciliation table in text output
    pub table: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Filter directive level for the fitdiff crates (error, warn, info, debug, trace)
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: "info".into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub defaults: DefaultSettings,
    pub output: OutputSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fitdiff");
        config_dir.join("settings.toml")
    }

    /// Load settings from the default location. A missing file means defaults.
    pub fn load() -> Result<Self, SettingsError> {
        let path = Self::config_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load settings from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(&contents).map_err(|message| SettingsError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn from_toml(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    /// Get the config file path for display
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.log.level, "info");
        assert!(!settings.output.json);
    }

    #[test]
    fn partial_sections() {
        let settings = Settings::from_toml(
            "[defaults]\nreference_format = \"eft\"\n\n[output]\ntable = true\n",
        )
        .unwrap();
        assert_eq!(settings.defaults.subject_format, None);
        assert_eq!(settings.defaults.reference_format.as_deref(), Some("eft"));
        assert!(settings.output.table);
        assert!(!settings.output.json);
        assert_eq!(settings.log.level, "info");
    }

    #[test]
    fn wrong_type_rejected() {
        assert!(Settings::from_toml("[output]\njson = \"yes\"\n").is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[log]\nlevel = \"debug\"\n").unwrap();
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.log.level, "debug");
    }

    #[test]
    fn load_from_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }

    #[test]
    fn load_from_invalid_toml_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[output\n").unwrap();
        let err = Settings::load_from(&path).unwrap_err();
        assert!(err.to_string().starts_with("invalid settings in"), "{err}");
    }

    #[test]
    fn config_path_under_fitdiff_dir() {
        let path = Settings::config_path();
        assert!(path.ends_with("fitdiff/settings.toml"));
    }
}
