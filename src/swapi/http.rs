//! HTTP utilities for SWAPI calls

use super::error::FetchError;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Maximum length of response body to log
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Truncate a response body for logging and drop control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut cut = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// Thin wrapper over a shared reqwest client
#[derive(Clone)]
pub struct SwapiHttpClient {
    client: Client,
}

impl SwapiHttpClient {
    /// Create a new HTTP client
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("tswapi/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// GET a URL and parse the body as JSON
    pub async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(FetchError::Status {
                status,
                body: sanitize_for_log(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
