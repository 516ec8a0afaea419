//! Server configuration

use crate::layout::GridConfig;
use crate::schedule::RemovePolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming the JSON config file.
pub const CONFIG_ENV_VAR: &str = "TIMETABLE_CONFIG";

/// Top-level configuration for `timetable-server`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub address: String,
    pub port: u16,
    /// Catalog export to serve; the server starts with an empty catalog if unset
    pub catalog_path: Option<PathBuf>,
    pub grid: GridConfig,
    pub suggestions: SuggestionConfig,
    pub remove_policy: RemovePolicy,
}

/// Limits for the greedy suggestion filler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    pub max_suggestions: usize,
    pub target_credits: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 5001,
            catalog_path: None,
            grid: GridConfig::default(),
            suggestions: SuggestionConfig::default(),
            remove_policy: RemovePolicy::default(),
        }
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            max_suggestions: 5,
            target_credits: 18.0,
        }
    }
}

impl AppConfig {
    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .grid
            .validate()
            .with_context(|| format!("Invalid grid section in {}", path.display()))?;
        Ok(config)
    }

    /// Loads the file named by `TIMETABLE_CONFIG`, or the defaults if unset.
    pub fn from_env() -> Result<Self> {
        match env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let path = PathBuf::from(path);
                info!("Loading config from {}", path.display());
                Self::load_from_file(&path)
            }
            None => {
                info!("{} not set, using default config", CONFIG_ENV_VAR);
                Ok(Self::default())
            }
        }
    }

    /// Address string suitable for binding a listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"port": 8080, "grid": {"end_hour": 18}}"#).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.address, "127.0.0.1");
        assert_eq!(config.grid.start_hour, 9);
        assert_eq!(config.grid.end_hour, 18);
        assert_eq!(config.suggestions.max_suggestions, 5);
        assert_eq!(config.remove_policy, RemovePolicy::Strict);
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_remove_policy_names() {
        let config: AppConfig = serde_json::from_str(r#"{"remove_policy": "lenient"}"#).unwrap();
        assert_eq!(config.remove_policy, RemovePolicy::Lenient);
    }

    #[test]
    fn test_load_invalid_grid() {
        let path = env::temp_dir().join(format!("timetable-config-{}.json", std::process::id()));
        fs::write(&path, r#"{"grid": {"start_hour": 20, "end_hour": 10}}"#).unwrap();
        let result = AppConfig::load_from_file(&path);
        let _ = fs::remove_file(&path);
        assert!(result.is_err());
    }
}
