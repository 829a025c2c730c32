//! CLI configuration.

use anyhow::{Context, Result};
use levelup_storefront::StoreRules;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the store lives.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Business rules.
    #[serde(default)]
    pub rules: StoreRules,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store file, relative to the working directory unless absolute.
    #[serde(default = "default_store_path")]
    pub path: String,
}

fn default_store_path() -> String {
    ".levelup/store.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Generate a default levelup.toml config file.
pub fn generate_default_config() -> String {
    r#"# Level-Up Gamer storefront configuration

[storage]
path = ".levelup/store.json"

[rules]
minimum_age = 18
affiliate_discount_percent = 20
affiliate_domains = ["duoc.cl", "duocuc.cl"]
community_rate_percent = 2
"#
    .to_string()
}
