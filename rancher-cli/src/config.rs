//! CLI configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: Option<String>,
    pub default_output: String,
    pub token: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub insecure: bool,
    pub include_system_metadata: bool,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: None,
            default_output: "table".to_string(),
            token: None,
            access_key: None,
            secret_key: None,
            insecure: false,
            include_system_metadata: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(config_path, contents)?;

        Ok(())
    }

    /// Request timeout; a hand-edited `timeout_secs = 0` falls back to the default
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }

    /// Update one key, given in kebab-case or the file's snake_case
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let optional = || (!value.is_empty()).then(|| value.to_string());

        match key.replace('_', "-").as_str() {
            "server" => self.server = optional(),
            "default-output" => self.default_output = value.to_string(),
            "token" => self.token = optional(),
            "access-key" => self.access_key = optional(),
            "secret-key" => self.secret_key = optional(),
            "insecure" => self.insecure = parse_bool(value)?,
            "include-system-metadata" => self.include_system_metadata = parse_bool(value)?,
            "timeout-secs" => {
                let secs: u64 = value
                    .parse()
                    .with_context(|| format!("'{}' is not a number of seconds", value))?;
                if secs == 0 {
                    anyhow::bail!("timeout-secs must be at least 1");
                }
                self.timeout_secs = secs;
            }
            _ => anyhow::bail!(
                "Unknown config key '{}'. Valid keys: {}",
                key,
                Self::KEYS.join(", ")
            ),
        }

        Ok(())
    }

    pub const KEYS: [&'static str; 8] = [
        "server",
        "default-output",
        "token",
        "access-key",
        "secret-key",
        "insecure",
        "include-system-metadata",
        "timeout-secs",
    ];

    /// `$RANCHER_QUERY_CONFIG`, or `~/.config/rancher-query/config.toml`
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("RANCHER_QUERY_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let home = std::env::var("HOME").context("HOME is not set")?;
        Ok(PathBuf::from(home).join(".config/rancher-query/config.toml"))
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => anyhow::bail!("'{}' is not a boolean", value),
    }
}
