//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use levelup_cache::FileStore;
use levelup_storefront::Storefront;
use tracing::debug;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["levelup.toml", ".levelup.toml", "levelup.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Store file override from the command line.
    store_override: Option<String>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, store: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self {
            config,
            output,
            cwd,
            store_override: store.map(str::to_string),
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Path of the store file.
    pub fn store_path(&self) -> PathBuf {
        let path = self
            .store_override
            .as_deref()
            .unwrap_or(&self.config.storage.path);
        self.resolve_path(path)
    }

    /// Open the store file without migrating it.
    pub fn open_store(&self) -> Result<FileStore> {
        let path = self.store_path();
        debug!(path = %path.display(), "Opening store");
        FileStore::open(&path).with_context(|| format!("Failed to open store: {}", path.display()))
    }

    /// Open the storefront, migrating older stores.
    pub fn open_shop(&self) -> Result<Storefront<FileStore>> {
        let shop = Storefront::open(self.open_store()?, self.config.rules.clone())
            .context("Failed to migrate store")?;
        Ok(shop)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}
