//! The state lent to command handlers.

use tf_store::{DataDir, SessionConfig, StoreResult};
use tf_world::{Adventure, AdventureContext};

/// Configuration, data directory and the running adventure.
#[derive(Debug)]
pub struct SessionState {
    /// Persisted settings and save bookkeeping.
    pub config: SessionConfig,
    /// Where everything is stored.
    pub data: DataDir,
    /// The adventure being played, if any.
    pub adventure: Option<Adventure>,
}

impl SessionState {
    /// Build state from an opened data directory and its configuration.
    pub fn new(data: DataDir, config: SessionConfig) -> Self {
        Self {
            config,
            data,
            adventure: None,
        }
    }

    /// Load (or create) the configuration kept in `data`.
    pub fn load(data: DataDir) -> StoreResult<Self> {
        let config = data.load_config()?;
        Ok(Self::new(data, config))
    }

    /// Write the configuration to disk.
    pub fn persist_config(&self) -> StoreResult<()> {
        self.data.store_config(&self.config)
    }
}

impl AdventureContext for SessionState {
    fn adventure_mut(&mut self) -> Option<&mut Adventure> {
        self.adventure.as_mut()
    }
}
