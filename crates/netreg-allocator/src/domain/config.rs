//! # Allocator Configuration
//!
//! Configuration with validation. The policy ranges arrive as CIDR strings
//! (from the environment or an embedding application) and are parsed into a
//! [`PolicyRegistry`] exactly once, at startup.

use crate::domain::address_space::AddressSpace;
use crate::domain::policy::PolicyRegistry;
use serde::{Deserialize, Serialize};

/// Environment variable holding comma-separated policy CIDRs.
pub const ENV_POLICY_RANGES: &str = "NETREG_POLICY_RANGES";

/// Environment variable capping how many host addresses detail views realize.
pub const ENV_MAX_VIEW_HOSTS: &str = "NETREG_MAX_VIEW_HOSTS";

/// Main allocator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Allowed top-level ranges, in first-fit search order.
    pub policy_cidrs: Vec<String>,
    /// Detail views realize at most this many host addresses from the lazy
    /// host iterator. A /8 reservation would otherwise render sixteen million
    /// strings.
    pub max_view_hosts: usize,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            policy_cidrs: vec![
                "10.0.0.0/8".to_string(),
                "172.16.0.0/12".to_string(),
                "192.168.0.0/16".to_string(),
            ],
            max_view_hosts: 256,
        }
    }
}

impl AllocatorConfig {
    /// Load configuration from the environment, falling back to defaults for
    /// unset variables.
    ///
    /// ## Errors
    ///
    /// `InvalidValue` if a variable is set but unparseable. A present-but-bad
    /// value is a deployment mistake and must not silently fall back.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(ENV_POLICY_RANGES) {
            config.policy_cidrs = raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Ok(raw) = std::env::var(ENV_MAX_VIEW_HOSTS) {
            config.max_view_hosts = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: ENV_MAX_VIEW_HOSTS,
                value: raw.clone(),
            })?;
        }

        Ok(config)
    }

    /// Parse and validate the configured ranges into a registry.
    pub fn registry(&self) -> Result<PolicyRegistry, ConfigError> {
        let mut ranges = Vec::with_capacity(self.policy_cidrs.len());
        for cidr in &self.policy_cidrs {
            let (address, prefixlen) = parse_cidr(cidr)?;
            let space = AddressSpace::from_cidr(address, Some(prefixlen)).map_err(|_| {
                ConfigError::InvalidRange {
                    input: cidr.clone(),
                }
            })?;
            ranges.push(space);
        }
        PolicyRegistry::new(ranges)
    }
}

fn parse_cidr(cidr: &str) -> Result<(&str, u8), ConfigError> {
    let (address, prefix) = cidr.split_once('/').ok_or_else(|| ConfigError::InvalidRange {
        input: cidr.to_string(),
    })?;
    let prefixlen = prefix.parse().map_err(|_| ConfigError::InvalidRange {
        input: cidr.to_string(),
    })?;
    Ok((address, prefixlen))
}

/// Configuration errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// The policy range list is empty.
    #[error("policy registry needs at least one range")]
    EmptyPolicy,

    /// A policy entry is not a valid CIDR.
    #[error("invalid policy range: {input}")]
    InvalidRange { input: String },

    /// Two policy ranges share addresses.
    #[error("policy ranges overlap: {first} and {second}")]
    OverlappingRanges { first: String, second: String },

    /// An environment variable is set to an unparseable value.
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds_rfc1918_registry() {
        let config = AllocatorConfig::default();
        let registry = config.registry().unwrap();
        assert_eq!(
            registry.allowed_cidrs(),
            ["10.0.0.0/8", "172.16.0.0/12", "192.168.0.0/16"]
        );
        assert_eq!(config.max_view_hosts, 256);
    }

    #[test]
    fn test_custom_ranges_preserve_order() {
        let config = AllocatorConfig {
            policy_cidrs: vec!["192.168.0.0/16".to_string(), "10.0.0.0/8".to_string()],
            ..AllocatorConfig::default()
        };
        let registry = config.registry().unwrap();
        assert_eq!(registry.allowed_cidrs(), ["192.168.0.0/16", "10.0.0.0/8"]);
    }

    #[test]
    fn test_bad_range_is_rejected() {
        for bad in ["10.0.0.0", "10.0.0.0/40", "bogus/8", ""] {
            let config = AllocatorConfig {
                policy_cidrs: vec![bad.to_string()],
                ..AllocatorConfig::default()
            };
            assert!(config.registry().is_err(), "should reject {bad:?}");
        }
    }
}
