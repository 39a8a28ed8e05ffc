//! Configuration Management
//!
//! Handles persistent configuration for ibmread. The API key is never
//! stored here; it comes from the environment.

use crate::ibm::client::{ClientSettings, DEFAULT_REGION};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the default region
pub const REGION_ENV_VAR: &str = "IC_REGION";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Default region
    #[serde(default)]
    pub region: Option<String>,
    /// IAM endpoint override
    #[serde(default)]
    pub iam_endpoint: Option<String>,
    /// VPC endpoint override
    #[serde(default)]
    pub vpc_endpoint: Option<String>,
    /// Power endpoint override
    #[serde(default)]
    pub power_endpoint: Option<String>,
    /// VPC API version date
    #[serde(default)]
    pub vpc_api_version: Option<String>,
    /// Account owning the Power workspaces
    #[serde(default)]
    pub power_account_id: Option<String>,
    /// Zone of the Power workspace, e.g. `dal12`
    #[serde(default)]
    pub power_zone: Option<String>,
    /// HTTP timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ibmread").join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`, falling back to defaults
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
            },
        }
    }

    /// Get effective region (CLI > config > IC_REGION > us-south)
    pub fn effective_region(&self, cli_region: Option<&str>) -> String {
        cli_region
            .map(|s| s.to_string())
            .or_else(|| self.region.clone())
            .or_else(|| std::env::var(REGION_ENV_VAR).ok())
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
    }

    /// Client settings for `region` with this config's overrides applied
    pub fn client_settings(&self, region: &str) -> ClientSettings {
        let mut settings = ClientSettings::for_region(region);

        if let Some(endpoint) = &self.iam_endpoint {
            settings.iam_endpoint = endpoint.clone();
        }
        if let Some(endpoint) = &self.vpc_endpoint {
            settings.vpc_endpoint = endpoint.clone();
        }
        if let Some(endpoint) = &self.power_endpoint {
            settings.power_endpoint = endpoint.clone();
        }
        if let Some(version) = &self.vpc_api_version {
            settings.vpc_api_version = version.clone();
        }
        settings.power_account_id = self.power_account_id.clone();
        settings.power_zone = self.power_zone.clone();
        if let Some(secs) = self.timeout_secs {
            settings.timeout = Duration::from_secs(secs);
        }

        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_region_wins() {
        let config = Config {
            region: Some("eu-de".to_string()),
            ..Default::default()
        };
        assert_eq!(config.effective_region(Some("jp-tok")), "jp-tok");
        assert_eq!(config.effective_region(None), "eu-de");
    }

    #[test]
    fn test_client_settings_overrides() {
        let config = Config {
            vpc_endpoint: Some("http://localhost:9000".to_string()),
            timeout_secs: Some(5),
            ..Default::default()
        };
        let settings = config.client_settings("us-east");

        assert_eq!(settings.vpc_endpoint, "http://localhost:9000");
        assert_eq!(settings.power_endpoint, "https://us-east.power-iaas.cloud.ibm.com");
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert!(settings.power_account_id.is_none());
    }

    #[test]
    fn test_client_settings_carry_power_workspace() {
        let config: Config =
            serde_json::from_str(r#"{"power_account_id": "acct-1", "power_zone": "dal12"}"#)
                .unwrap();
        let settings = config.client_settings("us-south");

        assert_eq!(settings.power_account_id.as_deref(), Some("acct-1"));
        assert_eq!(settings.power_zone.as_deref(), Some("dal12"));
    }

    #[test]
    fn test_load_from_missing_file_is_default() {
        let path = std::env::temp_dir().join("ibmread-missing-config.json");
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_load_from_parses_partial_file() {
        let path = std::env::temp_dir().join(format!(
            "ibmread-config-{}.json",
            uuid::Uuid::new_v4()
        ));
        std::fs::write(&path, r#"{"region": "br-sao"}"#).unwrap();

        let config = Config::load_from(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.region.as_deref(), Some("br-sao"));
        assert!(config.vpc_endpoint.is_none());
    }
}
