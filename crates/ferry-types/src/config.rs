//! TOML configuration for the routing core.
//!
//! Every tuning knob the algorithms consume — virtual-node count, cache
//! freshness window, topology fetch timeout — is supplied here rather than
//! hardcoded at the call sites. Unset fields fall back to defaults through
//! the effective-value accessors.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// Errors loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level routing configuration, parsed from TOML.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Hash ring tuning.
    pub ring: RingSection,
    /// Router cache tuning.
    pub cache: CacheSection,
    /// Topology backend tuning.
    pub topology: TopologySection,
}

/// `[ring]` section.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RingSection {
    /// Virtual nodes per destination. More vnodes smooth the distribution
    /// at the cost of ring size. Defaults to 500.
    pub virtual_nodes: Option<u16>,
}

/// `[cache]` section.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSection {
    /// How long a built router is served before the next use triggers a
    /// rebuild from topology. Defaults to 300 seconds.
    pub ttl_secs: Option<u64>,
}

/// `[topology]` section.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct TopologySection {
    /// Upper bound on a single topology fetch during a cache rebuild.
    /// Defaults to 5000 ms.
    pub load_timeout_ms: Option<u64>,
}

impl RouterConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Parse config from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Effective virtual-node count per destination.
    pub fn virtual_nodes(&self) -> u16 {
        self.ring.virtual_nodes.unwrap_or(500)
    }

    /// Effective router cache freshness window.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs.unwrap_or(300))
    }

    /// Effective topology fetch timeout.
    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.topology.load_timeout_ms.unwrap_or(5_000))
    }
}
