//! Configuration Management
//!
//! Handles persistent configuration storage for tswapi.

use crate::resource::ResourceType;
use crate::swapi::endpoint::{default_endpoints, Endpoint};
use crate::swapi::http::DEFAULT_TIMEOUT;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Endpoint chain, in priority order (defaults to the built-in chain)
    #[serde(default)]
    pub endpoints: Option<Vec<Endpoint>>,
    /// Per-request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Last listed resource type
    #[serde(default)]
    pub last_resource: Option<ResourceType>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tswapi").join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`; missing or unreadable files yield defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid config {:?}: {}", path, e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Failed to read config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;

        Ok(())
    }

    /// Get effective endpoint chain (config > built-in)
    pub fn effective_endpoints(&self) -> Vec<Endpoint> {
        self.endpoints.clone().unwrap_or_else(default_endpoints)
    }

    pub fn effective_timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Get effective resource type (CLI > config > people)
    pub fn effective_resource(&self, cli: Option<ResourceType>) -> ResourceType {
        cli.or(self.last_resource).unwrap_or(ResourceType::People)
    }

    /// Set last resource and save
    pub fn set_last_resource(&mut self, resource_type: ResourceType) -> Result<()> {
        self.last_resource = Some(resource_type);
        self.save()
    }
}
