//! CLI configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use upenergy_auth::USER_STORAGE_KEY;
use upenergy_commerce::cart::CART_STORAGE_KEY;

/// File names searched for, in order, from the working directory upwards.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["upenergy.toml", ".upenergy.toml", "upenergy.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Where state is kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging.
    #[serde(default)]
    pub log: LogConfig,
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
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding one file per stored key. Relative paths resolve
    /// against the working directory.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,

    /// Key of the cart snapshot.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,

    /// Key of the logged-in user record.
    #[serde(default = "default_user_key")]
    pub user_key: String,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".upenergy")
}

fn default_cart_key() -> String {
    CART_STORAGE_KEY.to_string()
}

fn default_user_key() -> String {
    USER_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            cart_key: default_cart_key(),
            user_key: default_user_key(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// `tracing` filter directive; `UPENERGY_LOG` overrides it.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_log_filter(),
        }
    }
}

/// Generate a default upenergy.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# UpEnergy marketplace client configuration

[storage]
dir = ".upenergy"
cart_key = "{cart_key}"
user_key = "{user_key}"

[log]
# compact or json
format = "compact"
filter = "warn"
"#,
        cart_key = CART_STORAGE_KEY,
        user_key = USER_STORAGE_KEY,
    )
}
