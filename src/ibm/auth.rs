//! IBM Cloud IAM Authentication
//!
//! Exchanges an API key for a bearer token at the IAM token endpoint and
//! caches it until shortly before it expires.

use super::http::IbmHttpClient;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use url::Url;

/// Public IAM endpoint
pub const DEFAULT_IAM_ENDPOINT: &str = "https://iam.cloud.ibm.com";

/// Environment variables holding the API key, in lookup order
pub const API_KEY_ENV_VARS: &[&str] = &["IC_API_KEY", "IBMCLOUD_API_KEY"];

const API_KEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Refresh tokens this much before they actually expire
const TOKEN_EXPIRY_BUFFER: Duration = Duration::from_secs(60);

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    /// When this token expires (with buffer applied)
    expires_at: Instant,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// IAM credentials holder with token caching
#[derive(Clone)]
pub struct IamCredentials {
    api_key: String,
    token_url: Url,
    http: IbmHttpClient,
    token_cache: Arc<RwLock<Option<CachedToken>>>,
}

impl IamCredentials {
    pub fn new(api_key: &str, iam_endpoint: &str, http: IbmHttpClient) -> Result<Self> {
        let token_url = Url::parse(iam_endpoint)
            .and_then(|base| base.join("/identity/token"))
            .with_context(|| format!("Invalid IAM endpoint: {}", iam_endpoint))?;

        Ok(Self {
            api_key: api_key.to_string(),
            token_url,
            http,
            token_cache: Arc::new(RwLock::new(None)),
        })
    }

    /// Get an access token for API calls
    pub async fn get_token(&self) -> Result<String> {
        {
            let cache = self.token_cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid() {
                    return Ok(cached.token.clone());
                }
                tracing::debug!("Cached IAM token expired, fetching new token");
            }
        }

        let response = self
            .http
            .post_form::<TokenResponse>(
                &self.token_url,
                &[("grant_type", API_KEY_GRANT_TYPE), ("apikey", self.api_key.as_str())],
            )
            .await
            .context("Failed to get IAM access token")?;

        let TokenResponse {
            access_token,
            expires_in,
        } = response.result;

        let ttl = Duration::from_secs(expires_in).saturating_sub(TOKEN_EXPIRY_BUFFER);

        {
            let mut cache = self.token_cache.write().await;
            *cache = Some(CachedToken {
                token: access_token.clone(),
                expires_at: Instant::now() + ttl,
            });
        }

        tracing::debug!("New IAM token cached, expires in ~{} minutes", ttl.as_secs() / 60);

        Ok(access_token)
    }
}

/// Read the API key from the environment
pub fn api_key_from_env() -> Option<String> {
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|key| !key.trim().is_empty())
}
