//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tracing::debug;
use upenergy_auth::AuthSession;
use upenergy_cache::{cache_key, FileStore};
use upenergy_commerce::cart::CartStore;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Path the configuration was read from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Profile namespacing the stored keys.
    pub profile: Option<String>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, profile: Option<String>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => (CliConfig::load(path)?, Some(PathBuf::from(path))),
            None => match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            profile,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// The storage directory.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    /// Open the file-backed store, creating its directory.
    pub fn open_store(&self) -> Result<FileStore> {
        let dir = self.storage_dir();
        debug!(dir = %dir.display(), "opening storage");
        FileStore::open(&dir)
            .with_context(|| format!("Failed to open storage directory: {}", dir.display()))
    }

    /// Key of the cart snapshot, namespaced by profile.
    pub fn cart_key(&self) -> String {
        self.namespaced(&self.config.storage.cart_key)
    }

    /// Key of the user record, namespaced by profile.
    pub fn user_key(&self) -> String {
        self.namespaced(&self.config.storage.user_key)
    }

    fn namespaced(&self, key: &str) -> String {
        match &self.profile {
            Some(profile) => cache_key!(key, profile),
            None => key.to_string(),
        }
    }

    /// Open the cart.
    pub fn open_cart(&self) -> Result<CartStore<FileStore>> {
        Ok(CartStore::open_with_key(self.open_store()?, self.cart_key()))
    }

    /// Open the login session.
    pub fn open_session(&self) -> Result<AuthSession<FileStore>> {
        Ok(AuthSession::restore_with_key(
            self.open_store()?,
            self.user_key(),
        ))
    }
}
