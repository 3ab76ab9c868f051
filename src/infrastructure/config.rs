//! Configuration management

use crate::domain::DEFAULT_BASE_URL;
use crate::error::{DonsError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up in the current directory
pub const CONFIG_FILE_NAME: &str = "dons.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub database: PathBuf,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: format!("dons/{}", env!("CARGO_PKG_VERSION")),
            database: PathBuf::from("dons.db"),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Resolve the config: explicit path, then $DONS_CONFIG, then ./dons.toml, then defaults.
    /// Environment overrides are applied last.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var_os("DONS_CONFIG").map(PathBuf::from);

        let mut config = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::load_from_file(&path)?,
            None => {
                let local = Path::new(CONFIG_FILE_NAME);
                if local.exists() {
                    Self::load_from_file(local)?
                } else {
                    Config::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file; missing keys take their defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DonsError::Config(format!("Config file not found: {}", path.display()))
            } else {
                DonsError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| DonsError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Apply `DONS_BASE_URL` and `DONS_DATABASE` style overrides
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DONS_BASE_URL").filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(db) = lookup("DONS_DATABASE").filter(|v| !v.is_empty()) {
            self.database = PathBuf::from(db);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(DonsError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(DonsError::Config("base_url must not be empty".to_string()));
        }
        Ok(())
    }

    /// Upper bound for a single page fetch
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
