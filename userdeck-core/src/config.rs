//! Configuration management
//!
//! Settings live in `settings.json` inside the userdeck directory:
//! ```json
//! { "baseAddress": "http://localhost:5000" }
//! ```
//! Unknown keys are preserved when saving.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::result::{Error, Result};

/// Backend address used when neither the file nor the environment sets one
pub const DEFAULT_BASE_ADDRESS: &str = "http://localhost:5000";

/// Environment variable overriding the configured base address
pub const BASE_URL_ENV: &str = "USERDECK_BASE_URL";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_address: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Userdeck configuration, injected into the HTTP services at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root URL that every request path is joined onto
    pub base_address: Url,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_address: Url::parse(DEFAULT_BASE_ADDRESS).expect("default base address is valid"),
        }
    }
}

impl Config {
    /// Build a config from an explicit base address
    pub fn new(base_address: &str) -> Result<Self> {
        Ok(Self {
            base_address: parse_base_address(base_address)?,
        })
    }

    /// Load config from the userdeck directory
    ///
    /// Precedence: `USERDECK_BASE_URL`, then `settings.json`, then
    /// [`DEFAULT_BASE_ADDRESS`]. A missing file, or one that is not valid
    /// JSON, falls back to the default. An I/O error reading an existing
    /// file or an invalid URL is an error.
    ///
    /// A malformed file is not repaired here, but [`Config::save`] replaces
    /// it wholesale.
    pub fn load(userdeck_dir: &Path) -> Result<Self> {
        let raw = read_settings(userdeck_dir)?;

        let address = match std::env::var(BASE_URL_ENV).ok().filter(|v| !v.trim().is_empty()) {
            Some(from_env) => from_env,
            None => raw
                .base_address
                .unwrap_or_else(|| DEFAULT_BASE_ADDRESS.to_string()),
        };

        Self::new(&address)
    }

    /// Save config to the userdeck directory, keeping keys we don't manage
    ///
    /// Keys can only be kept when the existing file parses; a malformed file
    /// is overwritten with just the base address.
    pub fn save(&self, userdeck_dir: &Path) -> Result<()> {
        let mut settings = read_settings(userdeck_dir)?;
        settings.base_address = Some(self.base_address.to_string());

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(userdeck_dir.join("settings.json"), content)?;
        Ok(())
    }
}

fn read_settings(userdeck_dir: &Path) -> Result<SettingsFile> {
    let settings_path = userdeck_dir.join("settings.json");
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}

fn parse_base_address(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("Invalid base address '{}': {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::Config(format!(
            "Base address must use http or https, got '{}'",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(Error::Config(format!("Base address has no host: {}", raw)));
    }
    Ok(url)
}
