//! Upstream Endpoints
//!
//! Candidate bases the fetcher tries in order, with their request-building
//! and response-unwrapping rules.

use super::error::FetchError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Primary SWAPI mirror (served with permissive CORS headers)
pub const PRIMARY_BASE: &str = "https://swapi.py4e.com/api";

/// Original SWAPI host
pub const SECONDARY_BASE: &str = "https://swapi.dev/api";

/// AllOrigins relay
pub const RELAY_BASE: &str = "https://api.allorigins.win/get";

/// Bases that may appear as prefixes of URLs stored inside records
pub const KNOWN_BASES: &[&str] = &[SECONDARY_BASE, PRIMARY_BASE];

/// One upstream source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Endpoint {
    /// Base that serves the API directly
    Direct { base: String },
    /// Relay that fetches `target + path` on our behalf and wraps the body
    Relay { relay: String, target: String },
}

impl Endpoint {
    pub fn direct(base: &str) -> Self {
        Endpoint::Direct {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn relay(relay: &str, target: &str) -> Self {
        Endpoint::Relay {
            relay: relay.to_string(),
            target: target.trim_end_matches('/').to_string(),
        }
    }

    /// Short label used in logs and provenance tags
    pub fn label(&self) -> &str {
        match self {
            Endpoint::Direct { base } => base,
            Endpoint::Relay { relay, .. } => relay,
        }
    }

    pub fn is_relay(&self) -> bool {
        matches!(self, Endpoint::Relay { .. })
    }

    /// Build the full request URL for a logical path
    pub fn request_url(&self, logical_path: &str) -> String {
        match self {
            Endpoint::Direct { base } => format!("{}{}", base, logical_path),
            Endpoint::Relay { relay, target } => {
                let target_url = format!("{}{}", target, logical_path);
                format!("{}?url={}", relay, urlencoding::encode(&target_url))
            }
        }
    }

    /// Extract the real payload from a parsed response body.
    ///
    /// Direct bases return the body as-is. The relay nests the upstream body
    /// as a JSON-encoded string under `contents`.
    pub fn unwrap_body(&self, body: Value) -> Result<Value, FetchError> {
        match self {
            Endpoint::Direct { .. } => Ok(body),
            Endpoint::Relay { .. } => {
                let Some(contents) = body.get("contents").and_then(|v| v.as_str()) else {
                    return Err(FetchError::Envelope(
                        "missing string field `contents`".to_string(),
                    ));
                };
                serde_json::from_str(contents).map_err(FetchError::Body)
            }
        }
    }
}

/// Default candidate order: primary mirror, relay to the original host, original host
pub fn default_endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::direct(PRIMARY_BASE),
        Endpoint::relay(RELAY_BASE, SECONDARY_BASE),
        Endpoint::direct(SECONDARY_BASE),
    ]
}
