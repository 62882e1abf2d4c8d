//! Configuration management

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::{AppError, AppResult};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// File operation settings
    pub operations: OperationsConfig,
    /// Version-control integration settings
    pub vcs: VcsConfig,
}

/// Settings for the mutation operations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationsConfig {
    /// Suffix inserted before the extension in default duplicate names
    pub duplicate_suffix: String,
}

impl Default for OperationsConfig {
    fn default() -> Self {
        Self {
            duplicate_suffix: "-copy".to_string(),
        }
    }
}

/// Settings for version-control-aware renames
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VcsConfig {
    /// Route renames through the repository first so history follows the
    /// file; disabling always uses the plain filesystem rename
    pub history_preserving_rename: bool,
}

impl Default for VcsConfig {
    fn default() -> Self {
        Self {
            history_preserving_rename: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults for a
    /// missing file. A malformed file is an error rather than a silent
    /// reset.
    pub fn load_from(path: &Path) -> AppResult<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        toml_edit::de::from_str(&content)
            .map_err(|e| AppError::Config(format!("could not parse {}: {e}", path.display())))
    }

    /// Save configuration, preserving comments and formatting in an
    /// existing file.
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = if path.exists() {
            match fs::read_to_string(path) {
                Ok(existing) => self.update_toml_preserving_comments(&existing)?,
                Err(_) => self.to_toml()?,
            }
        } else {
            self.to_toml()?
        };

        fs::write(path, &content)?;
        Ok(())
    }

    fn to_toml(&self) -> AppResult<String> {
        toml_edit::ser::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("could not serialize config: {e}")))
    }

    fn update_toml_preserving_comments(&self, existing: &str) -> AppResult<String> {
        use toml_edit::{DocumentMut, value};

        let mut doc: DocumentMut = existing
            .parse()
            .map_err(|e| AppError::Config(format!("could not parse existing config: {e}")))?;

        if !doc.contains_table("operations") {
            doc["operations"] = toml_edit::table();
        }
        doc["operations"]["duplicate_suffix"] = value(self.operations.duplicate_suffix.as_str());

        if !doc.contains_table("vcs") {
            doc["vcs"] = toml_edit::table();
        }
        doc["vcs"]["history_preserving_rename"] = value(self.vcs.history_preserving_rename);

        Ok(doc.to_string())
    }
}
