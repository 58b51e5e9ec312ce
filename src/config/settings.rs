use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

/// Project-level configuration, loaded from `.avault.toml`.
///
/// Every field has a default so avault works without any config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// File holding the vault password (first line is used).
    #[serde(default)]
    pub vault_password_file: Option<PathBuf>,

    /// Label written into the header by `encrypt` and `encrypt-string`
    /// when none is passed on the command line.
    #[serde(default)]
    pub encrypt_label: Option<String>,
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".avault.toml";

    /// Load settings from `<project_dir>/.avault.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    /// A relative `vault_password_file` is resolved against `project_dir`.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let mut settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if let Some(path) = settings.vault_password_file.as_mut() {
            if path.is_relative() {
                *path = project_dir.join(&*path);
            }
        }

        Ok(settings)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
