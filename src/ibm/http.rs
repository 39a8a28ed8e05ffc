//! HTTP utilities for IBM Cloud REST API calls

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Header IBM Cloud services use to correlate a request
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Sanitize response body for logging.
/// Truncates long responses and strips control characters.
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// Transport details of one API call, for diagnostics only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportMeta {
    pub status: u16,
    pub request_id: Option<String>,
}

impl TransportMeta {
    fn from_response(response: &Response) -> Self {
        Self {
            status: response.status().as_u16(),
            request_id: response
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string()),
        }
    }
}

/// A decoded API model together with its transport details
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub result: T,
    pub meta: TransportMeta,
}

/// HTTP client wrapper for IBM Cloud API calls
#[derive(Clone)]
pub struct IbmHttpClient {
    client: Client,
}

impl IbmHttpClient {
    /// Create a new HTTP client
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ibmread/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Make a GET request and decode the JSON body
    pub async fn get<T: DeserializeOwned>(&self, url: &Url, token: &str) -> Result<ApiResponse<T>> {
        self.get_with_headers(url, token, &[]).await
    }

    /// Make a GET request with extra headers and decode the JSON body
    pub async fn get_with_headers<T: DeserializeOwned>(
        &self,
        url: &Url,
        token: &str,
        headers: &[(&str, &str)],
    ) -> Result<ApiResponse<T>> {
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url.clone()).bearer_auth(token);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.context("Failed to send request")?;

        decode(response).await
    }

    /// Make a form-encoded POST request and decode the JSON body
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        url: &Url,
        form: &[(&str, &str)],
    ) -> Result<ApiResponse<T>> {
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .form(form)
            .send()
            .await
            .context("Failed to send request")?;

        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<ApiResponse<T>> {
    let meta = TransportMeta::from_response(&response);
    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    if !(200..300).contains(&meta.status) {
        // Only the sanitized/truncated body is logged
        tracing::error!(
            "API error: {} (request id: {}) - {}",
            meta.status,
            meta.request_id.as_deref().unwrap_or("-"),
            sanitize_for_log(&body)
        );
        return Err(anyhow::anyhow!("API request failed: {}", meta.status));
    }

    let result = serde_json::from_str(&body).context("Failed to parse response JSON")?;
    Ok(ApiResponse { result, meta })
}

/// Format an IBM Cloud API error for display.
/// Raw API error bodies are never shown; well-known statuses get a hint.
pub fn format_ibm_error(error: &anyhow::Error) -> String {
    let error_str = format!("{:#}", error);

    if error_str.contains("API request failed: 403") {
        return "Permission denied. Check your IAM access policies.".to_string();
    }
    if error_str.contains("API request failed: 401") {
        return "Authentication failed. Check IC_API_KEY.".to_string();
    }
    if error_str.contains("API request failed: 404") {
        return "Resource not found.".to_string();
    }
    if error_str.contains("API request failed: 429") {
        return "Rate limit exceeded. Please try again later.".to_string();
    }
    if error_str.contains("API request failed: 400") {
        return "Invalid request. Check your parameters.".to_string();
    }
    if error_str.contains("API request failed: 500")
        || error_str.contains("API request failed: 503")
    {
        return "IBM Cloud service temporarily unavailable. Please try again.".to_string();
    }

    let sanitized = error_str
        .chars()
        .filter(|c| !c.is_control())
        .take(200)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"x".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(sanitized.ends_with("[truncated, 500 bytes total]"));
    }

    #[test]
    fn test_sanitize_respects_char_boundaries() {
        let body = "é".repeat(150);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("[truncated, 300 bytes total]"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("a\nb\tc"), "abc");
    }

    #[test]
    fn test_format_ibm_error_known_statuses() {
        let err = anyhow::anyhow!("API request failed: 404");
        assert_eq!(format_ibm_error(&err), "Resource not found.");

        let err = anyhow::anyhow!("API request failed: 401").context("Failed to get IAM token");
        assert_eq!(
            format_ibm_error(&err),
            "Authentication failed. Check IC_API_KEY."
        );
    }

    #[test]
    fn test_format_ibm_error_passes_other_messages() {
        let err = anyhow::anyhow!("required field `id` missing from VirtualNetworkInterface");
        assert_eq!(
            format_ibm_error(&err),
            "required field `id` missing from VirtualNetworkInterface"
        );
    }
}
