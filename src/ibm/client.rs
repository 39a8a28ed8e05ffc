//! IBM Cloud Client
//!
//! Main client for the IBM Cloud APIs, combining IAM authentication and
//! HTTP functionality with per-service URL builders.

use super::auth::{IamCredentials, DEFAULT_IAM_ENDPOINT};
use super::http::{ApiResponse, IbmHttpClient};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Region used when nothing else is configured
pub const DEFAULT_REGION: &str = "us-south";

/// VPC API version date sent with every VPC request
pub const DEFAULT_VPC_API_VERSION: &str = "2024-04-30";

/// Default HTTP timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Header carrying the Power workspace CRN on every Power API call
pub const POWER_CRN_HEADER: &str = "CRN";

/// Endpoints and options an [`IbmClient`] is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub region: String,
    pub iam_endpoint: String,
    pub vpc_endpoint: String,
    pub power_endpoint: String,
    pub vpc_api_version: String,
    /// Account owning the Power workspace
    pub power_account_id: Option<String>,
    /// Zone of the Power workspace, e.g. `dal12`
    pub power_zone: Option<String>,
    pub timeout: Duration,
}

impl ClientSettings {
    /// Public endpoints for a region
    pub fn for_region(region: &str) -> Self {
        Self {
            region: region.to_string(),
            iam_endpoint: DEFAULT_IAM_ENDPOINT.to_string(),
            vpc_endpoint: format!("https://{}.iaas.cloud.ibm.com", region),
            power_endpoint: format!("https://{}.power-iaas.cloud.ibm.com", region),
            vpc_api_version: DEFAULT_VPC_API_VERSION.to_string(),
            power_account_id: None,
            power_zone: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Main IBM Cloud client
#[derive(Clone)]
pub struct IbmClient {
    pub credentials: IamCredentials,
    pub http: IbmHttpClient,
    pub settings: ClientSettings,
}

impl IbmClient {
    /// Create a new client authenticating with `api_key`
    pub fn new(settings: ClientSettings, api_key: &str) -> Result<Self> {
        let http = IbmHttpClient::new(settings.timeout)?;
        let credentials = IamCredentials::new(api_key, &settings.iam_endpoint, http.clone())
            .context("Failed to initialize IAM credentials")?;

        Ok(Self {
            credentials,
            http,
            settings,
        })
    }

    /// Make an authenticated GET request and decode the response
    pub async fn get<T: DeserializeOwned>(&self, url: &Url) -> Result<ApiResponse<T>> {
        let token = self.credentials.get_token().await?;
        self.http.get(url, &token).await
    }

    // =========================================================================
    // VPC API helpers
    // =========================================================================

    /// Build VPC API URL (`version` and `generation` query parameters included)
    pub fn vpc_url(&self, path: &str) -> Result<Url> {
        let mut url = join_url(&self.settings.vpc_endpoint, &format!("v1/{}", path))?;
        url.query_pairs_mut()
            .append_pair("version", &self.settings.vpc_api_version)
            .append_pair("generation", "2");
        Ok(url)
    }

    // =========================================================================
    // Power Virtual Server API helpers
    // =========================================================================

    /// Build Power API URL
    pub fn power_url(&self, path: &str) -> Result<Url> {
        join_url(&self.settings.power_endpoint, &format!("pcloud/v1/{}", path))
    }

    /// Build Power API URL scoped to a cloud instance
    pub fn power_cloud_instance_url(&self, cloud_instance_id: &str, resource: &str) -> Result<Url> {
        self.power_url(&format!(
            "cloud-instances/{}/{}",
            urlencoding::encode(cloud_instance_id),
            resource
        ))
    }

    /// CRN of the Power workspace `cloud_instance_id`
    pub fn power_crn(&self, cloud_instance_id: &str) -> Result<String> {
        let account_id = self
            .settings
            .power_account_id
            .as_deref()
            .context("Power requests need an account id (power_account_id)")?;
        let zone = self
            .settings
            .power_zone
            .as_deref()
            .context("Power requests need a workspace zone (power_zone)")?;

        Ok(format!(
            "crn:v1:bluemix:public:power-iaas:{}:a/{}:{}::",
            zone, account_id, cloud_instance_id
        ))
    }

    /// Make an authenticated Power API GET scoped to a cloud instance
    pub async fn power_get<T: DeserializeOwned>(
        &self,
        cloud_instance_id: &str,
        url: &Url,
    ) -> Result<ApiResponse<T>> {
        let crn = self.power_crn(cloud_instance_id)?;
        let token = self.credentials.get_token().await?;
        self.http
            .get_with_headers(url, &token, &[(POWER_CRN_HEADER, crn.as_str())])
            .await
    }
}

fn join_url(endpoint: &str, path: &str) -> Result<Url> {
    let raw = format!("{}/{}", endpoint.trim_end_matches('/'), path);
    Url::parse(&raw).with_context(|| format!("Invalid API URL: {}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> IbmClient {
        IbmClient::new(ClientSettings::for_region("eu-de"), "test-key").unwrap()
    }

    fn power_client() -> IbmClient {
        let mut settings = ClientSettings::for_region("eu-de");
        settings.power_account_id = Some("acct-1".to_string());
        settings.power_zone = Some("eu-de-1".to_string());
        IbmClient::new(settings, "test-key").unwrap()
    }

    #[test]
    fn test_settings_for_region() {
        let settings = ClientSettings::for_region("eu-de");
        assert_eq!(settings.vpc_endpoint, "https://eu-de.iaas.cloud.ibm.com");
        assert_eq!(settings.power_endpoint, "https://eu-de.power-iaas.cloud.ibm.com");
        assert_eq!(settings.iam_endpoint, DEFAULT_IAM_ENDPOINT);
    }

    #[test]
    fn test_vpc_url_adds_version_and_generation() {
        let url = client().vpc_url("virtual_network_interfaces/0717-abc").unwrap();
        assert_eq!(url.path(), "/v1/virtual_network_interfaces/0717-abc");
        assert_eq!(
            url.query(),
            Some(format!("version={}&generation=2", DEFAULT_VPC_API_VERSION).as_str())
        );
    }

    #[test]
    fn test_power_cloud_instance_url() {
        let url = client()
            .power_cloud_instance_url("guid-1", "pvm-instances/vm-1/snapshots")
            .unwrap();
        assert_eq!(url.host_str(), Some("eu-de.power-iaas.cloud.ibm.com"));
        assert_eq!(url.path(), "/pcloud/v1/cloud-instances/guid-1/pvm-instances/vm-1/snapshots");
    }

    #[test]
    fn test_power_crn_from_account_and_zone() {
        assert_eq!(
            power_client().power_crn("guid-1").unwrap(),
            "crn:v1:bluemix:public:power-iaas:eu-de-1:a/acct-1:guid-1::"
        );
    }

    #[test]
    fn test_power_crn_requires_account_and_zone() {
        let err = client().power_crn("guid-1").unwrap_err();
        assert!(format!("{:#}", err).contains("power_account_id"));

        let mut settings = ClientSettings::for_region("eu-de");
        settings.power_account_id = Some("acct-1".to_string());
        let client = IbmClient::new(settings, "k").unwrap();
        let err = client.power_crn("guid-1").unwrap_err();
        assert!(format!("{:#}", err).contains("power_zone"));
    }

    #[test]
    fn test_endpoint_trailing_slash_is_ignored() {
        let mut settings = ClientSettings::for_region("us-south");
        settings.power_endpoint = "http://localhost:8080/".to_string();
        let client = IbmClient::new(settings, "k").unwrap();
        assert_eq!(
            client.power_url("x").unwrap().as_str(),
            "http://localhost:8080/pcloud/v1/x"
        );
    }
}
