//! Configuration loading.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub rotten_tomatoes: RottenTomatoesConfig,
}

/// Settings for the Rotten Tomatoes catalog client.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RottenTomatoesConfig {
    /// API key sent as a query parameter on every request.
    #[serde(default)]
    pub api_key: String,

    /// Base URL override, mainly for tests and proxies.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for RottenTomatoesConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    crate::rotten::DEFAULT_BASE_URL.to_string()
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./config.toml",
        "./freshcritic.toml",
        "~/.config/freshcritic/config.toml",
        "/etc/freshcritic/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}
