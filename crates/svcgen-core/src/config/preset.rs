//! YAML preset files
//!
//! A preset stores a set of choices so a service layout can be regenerated
//! without going through the wizard:
//!
//! ```yaml
//! project_name: billing
//! framework: echo
//! database: postgres
//! task_runner: makefile
//! config_format: yaml
//! html: true
//! ```

use super::{Config, ConfigFormat, Database, HttpFramework, TaskRunner};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk representation of a [`Config`]
///
/// Every field is optional so a preset can describe only part of a layout;
/// command-line flags fill in or override the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Preset {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub framework: Option<HttpFramework>,
    #[serde(default)]
    pub database: Option<Database>,
    #[serde(default)]
    pub task_runner: Option<TaskRunner>,
    #[serde(default)]
    pub config_format: Option<ConfigFormat>,
    #[serde(default)]
    pub websocket: Option<bool>,
    #[serde(default)]
    pub bot: Option<bool>,
    #[serde(default)]
    pub html: Option<bool>,
}

impl Preset {
    /// Parse a preset from YAML text
    pub fn from_yaml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|source| ConfigError::ParsePreset {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse a preset file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadPreset {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content, path)
    }

    /// Overlay `other` on top of this preset (values in `other` win)
    pub fn merge(&mut self, other: Preset) {
        if other.project_name.is_some() {
            self.project_name = other.project_name;
        }
        self.framework = other.framework.or(self.framework);
        self.database = other.database.or(self.database);
        self.task_runner = other.task_runner.or(self.task_runner);
        self.config_format = other.config_format.or(self.config_format);
        self.websocket = other.websocket.or(self.websocket);
        self.bot = other.bot.or(self.bot);
        self.html = other.html.or(self.html);
    }

    /// Resolve into a [`Config`], using defaults for anything unset
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let mut config = Config::new(self.project_name.unwrap_or_default())?;
        config.framework = self.framework.unwrap_or_default();
        config.database = self.database.unwrap_or_default();
        config.task_runner = self.task_runner.unwrap_or_default();
        config.config_format = self.config_format.unwrap_or_default();
        config.websocket = self.websocket.unwrap_or(false);
        config.bot = self.bot.unwrap_or(false);
        config.html = self.html.unwrap_or(false);
        Ok(config)
    }
}

impl From<&Config> for Preset {
    fn from(config: &Config) -> Self {
        Self {
            project_name: Some(config.project_name.clone()),
            framework: Some(config.framework),
            database: Some(config.database),
            task_runner: Some(config.task_runner),
            config_format: Some(config.config_format),
            websocket: Some(config.websocket),
            bot: Some(config.bot),
            html: Some(config.html),
        }
    }
}
