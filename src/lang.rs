use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const DEFAULT_LOCALE: &str = "en";
const LANG_DIR_NAME: &str = "lang";

/// Locale files shipped inside the plugin binary.
const BUNDLED: &[(&str, &str)] = &[
    ("en", include_str!("../lang/en.yml")),
    ("cs", include_str!("../lang/cs.yml")),
    ("de", include_str!("../lang/de.yml")),
];

#[derive(Debug, Error)]
pub enum LangError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid language file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKey {
    NotAPlayer,
    NoPermission,
    DisplayEnabled,
    DisplayDisabled,
    MonsterCanSpawn,
    MonsterCannotSpawn,
    ConfigReloaded,
    ReloadFailed,
}

impl MessageKey {
    pub const ALL: [Self; 8] = [
        Self::NotAPlayer,
        Self::NoPermission,
        Self::DisplayEnabled,
        Self::DisplayDisabled,
        Self::MonsterCanSpawn,
        Self::MonsterCannotSpawn,
        Self::ConfigReloaded,
        Self::ReloadFailed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotAPlayer => "not-a-player",
            Self::NoPermission => "no-permission",
            Self::DisplayEnabled => "display-enabled",
            Self::DisplayDisabled => "display-disabled",
            Self::MonsterCanSpawn => "monster-can-spawn",
            Self::MonsterCannotSpawn => "monster-cannot-spawn",
            Self::ConfigReloaded => "config-reloaded",
            Self::ReloadFailed => "reload-failed",
        }
    }

    /// English template used when a bundle lacks this key.
    pub fn fallback(self) -> &'static str {
        match self {
            Self::NotAPlayer => "&cThis command can only be used by players.",
            Self::NoPermission => "&cYou don't have permission to use this command.",
            Self::DisplayEnabled => "&aLight level display has been enabled.",
            Self::DisplayDisabled => "&cLight level display has been disabled.",
            Self::MonsterCanSpawn => "&cMonsters can spawn at this light level of %s.",
            Self::MonsterCannotSpawn => "&aMonsters cannot spawn at this light level of %s.",
            Self::ConfigReloaded => "&aLightLevelDisplay configuration reloaded.",
            Self::ReloadFailed => "&cReload failed: {ERROR}",
        }
    }
}

/// Message templates for one locale, complete for every [`MessageKey`].
#[derive(Clone, Debug)]
pub struct Messages {
    locale: String,
    templates: HashMap<MessageKey, String>,
}

impl Messages {
    pub fn english() -> Self {
        Self::from_map(DEFAULT_LOCALE, &HashMap::new())
    }

    pub fn from_map(locale: &str, entries: &HashMap<String, String>) -> Self {
        let templates = MessageKey::ALL
            .into_iter()
            .map(|key| {
                let template = entries
                    .get(key.as_str())
                    .cloned()
                    .unwrap_or_else(|| key.fallback().to_string());
                (key, template)
            })
            .collect();
        Self {
            locale: locale.to_string(),
            templates,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn get(&self, key: MessageKey) -> &str {
        self.templates
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.fallback())
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::english()
    }
}

pub fn lang_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(LANG_DIR_NAME)
}

fn locale_path(data_dir: &Path, locale: &str) -> PathBuf {
    lang_dir(data_dir).join(format!("{locale}.yml"))
}

fn is_valid_locale(locale: &str) -> bool {
    !locale.is_empty()
        && locale
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Writes every bundled locale file that is not yet on disk.
pub fn materialize_bundled(data_dir: &Path) -> Result<(), LangError> {
    let dir = lang_dir(data_dir);
    fs::create_dir_all(&dir).map_err(|source| LangError::Io {
        path: dir.clone(),
        source,
    })?;

    for (locale, content) in BUNDLED {
        let path = locale_path(data_dir, locale);
        if path.exists() {
            continue;
        }
        fs::write(&path, content).map_err(|source| LangError::Io { path, source })?;
    }
    Ok(())
}

/// Loads the bundle for `locale`, falling back to English when it has no file.
pub fn load(data_dir: &Path, locale: &str) -> Result<Messages, LangError> {
    if !is_valid_locale(locale) {
        log::warn!("Invalid language code {locale:?}, using {DEFAULT_LOCALE}");
        return Ok(Messages::english());
    }

    let path = locale_path(data_dir, locale);
    if !path.exists() {
        log::warn!(
            "Language file {} not found, using {DEFAULT_LOCALE}",
            path.display()
        );
        return Ok(Messages::english());
    }

    let content = fs::read_to_string(&path).map_err(|source| LangError::Io {
        path: path.clone(),
        source,
    })?;
    let entries = parse_entries(&content).map_err(|source| LangError::Parse { path, source })?;
    Ok(Messages::from_map(locale, &entries))
}

fn parse_entries(content: &str) -> Result<HashMap<String, String>, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(HashMap::new());
    }
    let entries: Option<HashMap<String, String>> = serde_yaml::from_str(content)?;
    Ok(entries.unwrap_or_default())
}
