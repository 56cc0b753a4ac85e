use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ReconError, Result};
use crate::model::ReconInput;
use crate::parse::InputFormat;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// A reconciliation job: which file is the subject, which is the reference,
/// and the layout each one is written in.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub subject: SourceConfig,
    pub reference: SourceConfig,
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Path to the inventory file, relative to the job file's directory.
    pub file: String,
    /// Format tag (`contents`, `multibuy`, `eft`). Checked by `validate`.
    pub format: String,
}

impl SourceConfig {
    pub fn input_format(&self) -> Result<InputFormat> {
        self.format.parse()
    }

    pub fn path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.file)
    }

    fn read(&self, base_dir: &Path) -> Result<String> {
        let path = self.path(base_dir);
        std::fs::read_to_string(&path)
            .map_err(|e| ReconError::Io(format!("cannot read {}: {e}", path.display())))
    }
}

impl ReconConfig {
    /// Parse and validate a TOML job description.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a job file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .map_err(|e| ReconError::Io(format!("cannot read config {}: {e}", path.display())))?;
        Self::from_toml(&toml_str)
    }

    pub fn validate(&self) -> Result<()> {
        for (side, source) in [("subject", &self.subject), ("reference", &self.reference)] {
            if source.file.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!("{side}: file must not be empty")));
            }
            source.input_format()?;
        }
        Ok(())
    }

    /// Load both inventory files, resolving paths against `base_dir`.
    pub fn load_input(&self, base_dir: &Path) -> Result<ReconInput> {
        Ok(ReconInput {
            subject: self.subject.read(base_dir)?,
            reference: self.reference.read(base_dir)?,
        })
    }
}
