//! Compile-time registry of property lookup service configurations.
//!
//! Each lookup provider is defined in a TOML file under `services/`.
//! The registry embeds these at compile time and exposes them via
//! [`all_services`] and [`enabled_services`]. Secrets are never stored in
//! the TOML files; each provider names the environment variable that
//! holds its API key.

use serde::Deserialize;

use crate::LookupError;
use crate::datafiniti::DatafinitiClient;
use crate::lookup::PropertyLookup;

/// A property lookup service configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupService {
    /// Unique identifier (e.g., `"datafiniti"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether this service may be used.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Preference order; lower values are preferred.
    pub priority: u32,
    /// Provider-specific configuration.
    pub provider: ProviderConfig,
}

/// Provider-specific configuration, tagged by `type` in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Datafiniti property search API.
    Datafiniti {
        /// API base URL (e.g., `"https://api.datafiniti.co/v4"`).
        base_url: String,
        /// Environment variable holding the bearer token.
        api_key_env: String,
        /// Per-request timeout in seconds.
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

const fn default_true() -> bool {
    true
}

const fn default_timeout_secs() -> u64 {
    30
}

impl LookupService {
    /// Returns the provider's base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        match &self.provider {
            ProviderConfig::Datafiniti { base_url, .. } => base_url,
        }
    }

    /// Builds a client for this service, reading its API key from the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Config`] if the API key variable is unset or
    /// empty, or [`LookupError::Http`] if the HTTP client cannot be built.
    pub fn connect(&self) -> Result<Box<dyn PropertyLookup>, LookupError> {
        match &self.provider {
            ProviderConfig::Datafiniti {
                base_url,
                api_key_env,
                timeout_secs,
            } => {
                let api_key = std::env::var(api_key_env)
                    .ok()
                    .filter(|k| !k.trim().is_empty())
                    .ok_or_else(|| LookupError::Config {
                        message: format!("{api_key_env} is not set for service '{}'", self.id),
                    })?;
                let client = DatafinitiClient::new(base_url, &api_key, *timeout_secs)?;
                Ok(Box::new(client))
            }
        }
    }
}

// ── Compile-time embedded TOML files ────────────────────────────────

const SERVICE_TOMLS: &[(&str, &str)] =
    &[("datafiniti", include_str!("../services/datafiniti.toml"))];

#[cfg(test)]
const EXPECTED_SERVICE_COUNT: usize = 1;

/// Returns all lookup service configurations (enabled and disabled).
///
/// # Panics
///
/// Panics if any TOML config is malformed (the configs are embedded, so
/// this is caught by the registry tests).
#[must_use]
pub fn all_services() -> Vec<LookupService> {
    SERVICE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse lookup service '{name}': {e}"))
        })
        .collect()
}

/// Returns only enabled services, sorted by priority (ascending).
#[must_use]
pub fn enabled_services() -> Vec<LookupService> {
    let mut services: Vec<LookupService> =
        all_services().into_iter().filter(|s| s.enabled).collect();
    services.sort_by_key(|s| s.priority);
    services
}

/// Connects to the highest-priority enabled service.
///
/// # Errors
///
/// Returns [`LookupError::Config`] if no service is enabled or the chosen
/// service cannot be configured.
pub fn default_lookup() -> Result<Box<dyn PropertyLookup>, LookupError> {
    let service = enabled_services()
        .into_iter()
        .next()
        .ok_or_else(|| LookupError::Config {
            message: "no property lookup service is enabled".to_string(),
        })?;
    log::debug!("Using property lookup service '{}'", service.id);
    service.connect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn loads_all_services() {
        assert_eq!(all_services().len(), EXPECTED_SERVICE_COUNT);
    }

    #[test]
    fn service_ids_are_unique() {
        let services = all_services();
        let mut seen = BTreeSet::new();
        for svc in &services {
            assert!(seen.insert(&svc.id), "Duplicate service ID: {}", svc.id);
        }
    }

    #[test]
    fn all_services_have_required_fields() {
        for svc in &all_services() {
            assert!(!svc.id.is_empty(), "Service has empty id");
            assert!(!svc.name.is_empty(), "Service {} has empty name", svc.id);
            assert!(
                !svc.base_url().is_empty(),
                "Service {} has empty base_url",
                svc.id
            );
        }
    }

    #[test]
    fn enabled_services_sorted_by_priority() {
        let services = enabled_services();
        for window in services.windows(2) {
            assert!(window[0].priority <= window[1].priority);
        }
    }

    #[test]
    fn missing_api_key_is_config_error() {
        let service = LookupService {
            id: "test".to_string(),
            name: "Test".to_string(),
            enabled: true,
            priority: 1,
            provider: ProviderConfig::Datafiniti {
                base_url: "http://localhost:1".to_string(),
                api_key_env: "HOME_ENERGY_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
                timeout_secs: 1,
            },
        };
        assert!(matches!(service.connect(), Err(LookupError::Config { .. })));
    }
}
