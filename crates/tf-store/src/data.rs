//! The on-disk data directory: configuration plus one document per save.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::SessionConfig;
use crate::error::{StoreError, StoreResult};
use crate::store::DocumentStore;

/// Document name of the session configuration.
pub const CONFIG_DOCUMENT: &str = "config";

/// Sub-directory holding save documents.
pub const SAVES_DIR: &str = "saves";

/// Everything Taleforge keeps on disk.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
    settings: DocumentStore,
    saves: DocumentStore,
}

impl DataDir {
    /// Open the data directory, creating it on first run.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        let settings = DocumentStore::open(&root)?;
        let saves = DocumentStore::open(root.join(SAVES_DIR))?;
        Ok(Self {
            root,
            settings,
            saves,
        })
    }

    /// The directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store holding the configuration document.
    pub fn settings(&self) -> &DocumentStore {
        &self.settings
    }

    /// Store holding save documents.
    pub fn saves(&self) -> &DocumentStore {
        &self.saves
    }

    /// Load the configuration, writing defaults on first run.
    ///
    /// A configuration that exists but cannot be decoded is an error.
    pub fn load_config(&self) -> StoreResult<SessionConfig> {
        if let Some(config) = self.settings.read::<SessionConfig>(CONFIG_DOCUMENT)? {
            return Ok(config);
        }
        let config = SessionConfig::default();
        self.store_config(&config)?;
        tracing::info!(root = %self.root.display(), "created default configuration");
        Ok(config)
    }

    /// Persist the configuration.
    pub fn store_config(&self, config: &SessionConfig) -> StoreResult<()> {
        upsert(&self.settings, CONFIG_DOCUMENT, config)
    }

    /// Read a save document.
    pub fn read_save<T: DeserializeOwned>(&self, name: &str) -> StoreResult<Option<T>> {
        self.saves.read(name)
    }

    /// Create a save document; fails if the name is taken.
    pub fn create_save<T: Serialize>(&self, name: &str, record: &T) -> StoreResult<()> {
        self.saves.add(name, record)
    }

    /// Overwrite a save document, creating it if it went missing.
    pub fn store_save<T: Serialize>(&self, name: &str, record: &T) -> StoreResult<()> {
        upsert(&self.saves, name, record)
    }

    /// Delete a save document.
    pub fn delete_save(&self, name: &str) -> StoreResult<()> {
        self.saves.delete(name)
    }

    /// Delete every save and the configuration.
    pub fn wipe(&self) -> StoreResult<()> {
        for name in self.saves.names()? {
            self.saves.delete(&name)?;
        }
        match self.settings.delete(CONFIG_DOCUMENT) {
            Ok(()) | Err(StoreError::NotFound(_)) => Ok(()),
            Err(err) => Err(err),
        }
    }
}

fn upsert<T: Serialize>(store: &DocumentStore, name: &str, record: &T) -> StoreResult<()> {
    match store.write(name, record) {
        Err(StoreError::NotFound(_)) => store.add(name, record),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TextSpeed;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn first_run_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let data = DataDir::open(dir.path().join("data")).unwrap();

        let config = data.load_config().unwrap();
        assert_eq!(config, SessionConfig::default());
        assert!(data.settings().locate(CONFIG_DOCUMENT).is_some());
        assert!(data.root().join(SAVES_DIR).is_dir());
    }

    #[test]
    fn config_roundtrip() {
        let dir = TempDir::new().unwrap();
        let data = DataDir::open(dir.path()).unwrap();

        let mut config = SessionConfig::default()
            .with_text_speed(TextSpeed::Quick)
            .with_music_volume(2);
        config.record_save("alice", "Player alice is... doing things...");
        data.store_config(&config).unwrap();

        let reopened = DataDir::open(dir.path()).unwrap();
        assert_eq!(reopened.load_config().unwrap(), config);
    }

    #[test]
    fn corrupt_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.json"), "not json").unwrap();
        let data = DataDir::open(dir.path()).unwrap();
        assert!(matches!(
            data.load_config(),
            Err(StoreError::Malformed { .. })
        ));
    }

    #[test]
    fn saves_lifecycle() {
        let dir = TempDir::new().unwrap();
        let data = DataDir::open(dir.path()).unwrap();

        data.create_save("bob", &vec![1, 2, 3]).unwrap();
        assert!(matches!(
            data.create_save("bob", &vec![4]),
            Err(StoreError::Duplicate(_))
        ));
        data.store_save("bob", &vec![9]).unwrap();
        assert_eq!(data.read_save::<Vec<i32>>("bob").unwrap(), Some(vec![9]));

        data.store_save("carol", &vec![1]).unwrap();
        data.delete_save("bob").unwrap();
        assert_eq!(data.saves().names().unwrap(), vec!["carol"]);
    }

    #[test]
    fn wipe_removes_everything() {
        let dir = TempDir::new().unwrap();
        let data = DataDir::open(dir.path()).unwrap();
        data.load_config().unwrap();
        data.create_save("bob", &"x").unwrap();
        data.create_save("eve", &"y").unwrap();

        data.wipe().unwrap();
        assert!(data.saves().names().unwrap().is_empty());
        assert!(data.settings().locate(CONFIG_DOCUMENT).is_none());
        data.wipe().unwrap();
    }
}
