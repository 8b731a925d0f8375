use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::client::DEMO_KEY;
use crate::error::{Error, Result};

const ENV_KEY: &str = "NASA_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API key for the `api.nasa.gov` endpoints. Leave unset to fall
    /// back to the `NASA_API_KEY` environment variable, then `DEMO_KEY`.
    pub api_key: Option<String>,

    /// Base host for the keyed endpoints.
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            host: "https://api.nasa.gov".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, or the defaults when no
    /// file exists yet.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the default config file path.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "could not determine config directory",
            ))
        })?;

        Ok(config_dir.join("nasapy").join("config.toml"))
    }

    /// Resolve the API key: environment variable first, then the config
    /// file, then the shared demo key.
    pub fn resolve_key(&self) -> String {
        env::var(ENV_KEY)
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| self.api_key.clone())
            .unwrap_or_else(|| DEMO_KEY.to_string())
    }
}
