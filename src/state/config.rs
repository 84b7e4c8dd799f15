//! Application configuration with persistence.
//!
//! # Configuration File Location
//!
//! - Linux: `~/.config/lazyvote/config.json`
//! - macOS: `~/Library/Application Support/lazyvote/config.json`
//! - Windows: `%APPDATA%/lazyvote/config.json`
//!
//! Command line flags override the file for one session without writing it.

use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::theme::ThemeVariant;

// ============================================================================
// Constants
// ============================================================================

/// Application name used for configuration directory.
pub const APP_NAME: &str = "lazyvote";

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

/// Default JSON-RPC endpoint of a local development node.
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:7545";

/// Default location of the compiled voting contract artifact.
pub const DEFAULT_CONTRACT_PATH: &str = "build/contracts/Voting.json";

/// Default bootstrap deadline.
pub const DEFAULT_SETUP_TIMEOUT_SECS: u64 = 60;

/// Longest accepted bootstrap deadline (one day).
pub const MAX_SETUP_TIMEOUT_SECS: u64 = 86_400;

/// Default interval between node sync checks.
pub const DEFAULT_SYNC_POLL_SECS: u64 = 2;

// ============================================================================
// AppConfig
// ============================================================================

/// Application configuration structure for persistence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON-RPC endpoint of the node.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Path of the contract definition artifact.
    #[serde(default = "default_contract_path")]
    pub contract_path: PathBuf,
    /// Color scheme.
    #[serde(default)]
    pub theme: ThemeVariant,
    /// Deadline for one bootstrap attempt, in seconds.
    #[serde(default = "default_setup_timeout_secs")]
    pub setup_timeout_secs: u64,
    /// Seconds between `eth_syncing` checks while the node syncs.
    #[serde(default = "default_sync_poll_secs")]
    pub sync_poll_secs: u64,
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

fn default_contract_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONTRACT_PATH)
}

fn default_setup_timeout_secs() -> u64 {
    DEFAULT_SETUP_TIMEOUT_SECS
}

fn default_sync_poll_secs() -> u64 {
    DEFAULT_SYNC_POLL_SECS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            contract_path: default_contract_path(),
            theme: ThemeVariant::default(),
            setup_timeout_secs: DEFAULT_SETUP_TIMEOUT_SECS,
            sync_poll_secs: DEFAULT_SYNC_POLL_SECS,
        }
    }
}

/// Per-session overrides, usually from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub rpc_url: Option<String>,
    pub contract_path: Option<PathBuf>,
    pub theme: Option<ThemeVariant>,
    pub setup_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Returns the path to the configuration file, creating its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined
    /// or created.
    pub fn config_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir().ok_or_else(|| {
            color_eyre::eyre::eyre!(
                "Could not determine config directory. Expected XDG_CONFIG_HOME or ~/.config on Linux, ~/Library/Application Support on macOS, %APPDATA% on Windows"
            )
        })?;
        path.push(APP_NAME);
        fs::create_dir_all(&path)?;
        path.push(CONFIG_FILE);
        Ok(path)
    }

    /// Loads the configuration from disk, falling back to defaults.
    #[must_use]
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "config load failed, using defaults");
                Self::default()
            }
        }
    }

    /// Attempts to load the configuration from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined, the file cannot be
    /// read, or the JSON content cannot be parsed.
    pub fn try_load() -> Result<Self> {
        let path = Self::config_path()?;
        let content = fs::read_to_string(&path)?;
        Self::from_json(&content)
    }

    /// Parses configuration JSON, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Saves the configuration to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined, the configuration
    /// cannot be serialized, or the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Writes `theme` to the config file, keeping the file's other values.
    ///
    /// Session overrides are not persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn persist_theme(theme: ThemeVariant) -> Result<()> {
        let mut stored = Self::try_load().unwrap_or_default();
        stored.theme = theme;
        stored.save()
    }

    /// Returns a copy with `overrides` applied.
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(rpc_url) = overrides.rpc_url {
            self.rpc_url = rpc_url;
        }
        if let Some(path) = overrides.contract_path {
            self.contract_path = path;
        }
        if let Some(theme) = overrides.theme {
            self.theme = theme;
        }
        if let Some(secs) = overrides.setup_timeout_secs {
            self.setup_timeout_secs = secs;
        }
        self
    }

    /// Bootstrap deadline as a `Duration`, clamped to one second..one day.
    #[must_use]
    pub fn setup_timeout(&self) -> Duration {
        Duration::from_secs(self.setup_timeout_secs.clamp(1, MAX_SETUP_TIMEOUT_SECS))
    }

    /// Node sync check interval (at least one second).
    #[must_use]
    pub fn sync_poll(&self) -> Duration {
        Duration::from_secs(self.sync_poll_secs.max(1))
    }
}

// ============================================================================
// Tests
// ============================================================================
