use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lang::DEFAULT_LOCALE;

/// Highest light level a block can report.
pub const MAX_LIGHT_LEVEL: u8 = 15;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub language: String,
    pub check_permission: bool,
    pub permission_node: String,
    pub display_in_actionbar: bool,
    pub spawn_light_threshold: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: DEFAULT_LOCALE.to_string(),
            check_permission: true,
            permission_node: "lightleveldisplay:use".to_string(),
            display_in_actionbar: true,
            spawn_light_threshold: 7,
        }
    }
}

impl Config {
    /// Highest light level at which monsters may spawn, clamped to 0..=15.
    pub fn spawn_threshold(&self) -> u8 {
        self.spawn_light_threshold.clamp(0, i64::from(MAX_LIGHT_LEVEL)) as u8
    }
}

const CONFIG_FILE_NAME: &str = "config.yml";

fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE_NAME)
}

fn yaml_escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\"', "\\\"")
        .replace('\n', "\\n")
}

fn default_config_yaml() -> String {
    let d = Config::default();
    format!(
        "# Language file to use from the lang/ folder (en, cs, de, ...)\n\
language: \"{language}\"\n\
\n\
# Permission\n\
check_permission: {check_permission}\n\
permission_node: \"{permission_node}\"\n\
\n\
# Display\n\
# true shows the message above the hotbar, false sends it to chat\n\
display_in_actionbar: {display_in_actionbar}\n\
# Monsters can spawn at this light level or below (0-15)\n\
spawn_light_threshold: {spawn_light_threshold}\n",
        language = yaml_escape(&d.language),
        check_permission = d.check_permission,
        permission_node = yaml_escape(&d.permission_node),
        display_in_actionbar = d.display_in_actionbar,
        spawn_light_threshold = d.spawn_light_threshold,
    )
}

pub fn load_or_create(data_dir: &Path) -> Result<Config, ConfigError> {
    if !data_dir.exists() {
        fs::create_dir_all(data_dir).map_err(|source| ConfigError::Io {
            path: data_dir.to_path_buf(),
            source,
        })?;
    }

    let path = config_path(data_dir);
    if !path.exists() {
        fs::write(&path, default_config_yaml()).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
    }

    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str::<Config>(&content).map_err(|source| ConfigError::Parse { path, source })
}
