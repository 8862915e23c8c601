use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use crate::config::{self, Config, ConfigError};
use crate::lang::{self, LangError, Messages};
use crate::toggle::DisplayToggles;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Lang(#[from] LangError),
}

/// State shared by the command and event handlers for the plugin's lifetime.
pub struct PluginState {
    pub config: Arc<RwLock<Config>>,
    pub messages: Arc<RwLock<Messages>>,
    pub toggles: Arc<RwLock<DisplayToggles>>,
    pub data_dir: PathBuf,
}

impl PluginState {
    /// Creates the data folder files on first run and loads them.
    pub fn load(data_dir: PathBuf) -> Result<Self, LoadError> {
        let (config, messages) = load_files(&data_dir)?;
        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            messages: Arc::new(RwLock::new(messages)),
            toggles: Arc::new(RwLock::new(DisplayToggles::new())),
            data_dir,
        })
    }

    /// Re-reads config and language files. On error the old values stay.
    ///
    /// Returns the new permission node when it differs from the previous one,
    /// so the caller can register it with the host.
    pub fn reload(&self) -> Result<Option<String>, LoadError> {
        let (config, messages) = load_files(&self.data_dir)?;
        let changed_node = {
            let mut current = write(&self.config);
            let changed = (current.permission_node != config.permission_node)
                .then(|| config.permission_node.clone());
            *current = config;
            changed
        };
        *write(&self.messages) = messages;
        Ok(changed_node)
    }
}

fn load_files(data_dir: &Path) -> Result<(Config, Messages), LoadError> {
    let config = config::load_or_create(data_dir)?;
    lang::materialize_bundled(data_dir)?;
    let messages = lang::load(data_dir, &config.language)?;
    log::info!(
        "Loaded LightLevelDisplay config (language: {}, threshold: {})",
        messages.locale(),
        config.spawn_threshold()
    );
    Ok((config, messages))
}

pub fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::lang::MessageKey;

    #[test]
    fn first_load_creates_files() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("plugin");

        let state = PluginState::load(data_dir.clone()).unwrap();

        assert!(data_dir.join("config.yml").exists());
        assert!(data_dir.join("lang").join("en.yml").exists());
        assert_eq!(read(&state.messages).locale(), "en");
        assert!(read(&state.toggles).is_empty());
    }

    #[test]
    fn reload_picks_up_new_language() {
        let dir = tempfile::tempdir().unwrap();
        let state = PluginState::load(dir.path().to_path_buf()).unwrap();
        write(&state.toggles).toggle(uuid::Uuid::from_u128(9));

        fs::write(dir.path().join("config.yml"), "language: de\n").unwrap();
        assert_eq!(state.reload().unwrap(), None);

        assert_eq!(read(&state.config).language, "de");
        assert_eq!(read(&state.messages).locale(), "de");
        assert!(
            read(&state.messages)
                .get(MessageKey::ConfigReloaded)
                .contains("neu geladen")
        );
        assert!(read(&state.toggles).is_enabled(uuid::Uuid::from_u128(9)));
    }

    #[test]
    fn reload_reports_changed_permission_node() {
        let dir = tempfile::tempdir().unwrap();
        let state = PluginState::load(dir.path().to_path_buf()).unwrap();

        fs::write(
            dir.path().join("config.yml"),
            "permission_node: \"myserver:lightlevel\"\n",
        )
        .unwrap();
        assert_eq!(
            state.reload().unwrap(),
            Some("myserver:lightlevel".to_string())
        );
        assert_eq!(read(&state.config).permission_node, "myserver:lightlevel");

        assert_eq!(state.reload().unwrap(), None);
    }

    #[test]
    fn failed_reload_keeps_previous_values() {
        let dir = tempfile::tempdir().unwrap();
        let state = PluginState::load(dir.path().to_path_buf()).unwrap();

        fs::write(dir.path().join("config.yml"), "display_in_actionbar: [oops]\n").unwrap();
        assert!(matches!(state.reload(), Err(LoadError::Config(_))));

        assert!(read(&state.config).display_in_actionbar);
    }
}
