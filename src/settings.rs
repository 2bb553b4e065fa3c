//! User-level program settings, read from `settings.toml` in the config directory.
use crate::get_h2siting_config_dir;
use crate::input::read_toml;
use crate::log::DEFAULT_LOG_LEVEL;
use anyhow::{Context, Result};
use documented::DocumentedFields;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Location of the settings file, which may not exist yet
pub fn get_settings_file_path() -> PathBuf {
    get_h2siting_config_dir().join(SETTINGS_FILE_NAME)
}

/// Program settings from config file
#[derive(Debug, DocumentedFields, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// The default program log level
    pub log_level: String,
    /// Whether to overwrite output files by default
    pub overwrite: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            overwrite: false,
        }
    }
}

impl Settings {
    /// Load settings from the user's config directory, or use the defaults if there is no file
    pub fn load() -> Result<Settings> {
        Self::load_from_path(&get_settings_file_path())
    }

    fn load_from_path(file_path: &Path) -> Result<Settings> {
        if file_path.is_file() {
            read_toml(file_path)
        } else {
            Ok(Settings::default())
        }
    }

    /// A settings file with every option commented out and described.
    ///
    /// Uncommenting an option gives its default value.
    pub fn default_file_contents() -> Result<String> {
        let defaults = toml::to_string(&Settings::default())
            .context("Could not convert settings to TOML")?;

        let mut sections = vec![
            "# Settings for h2siting.\n# Uncomment a setting to change its value.\n".to_string(),
        ];
        for entry in defaults.lines().filter(|line| line.contains('=')) {
            let field = entry.split('=').next().unwrap_or_default().trim();
            let docs = Settings::get_field_docs(field)
                .ok()
                .with_context(|| format!("Missing doc comment for field {field}"))?;
            let described: String = docs
                .lines()
                .map(|doc| format!("# # {}\n", doc.trim()))
                .collect();
            sections.push(format!("{described}# {}\n", entry.trim()));
        }

        Ok(sections.join("\n"))
    }
}
