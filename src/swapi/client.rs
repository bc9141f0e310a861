//! SWAPI Client
//!
//! Resolves logical paths against an ordered list of upstream endpoints.
//! Candidates are tried one at a time and the first success wins; if all of
//! them fail the client answers with a canned payload instead of an error.

use super::cache::ResponseCache;
use super::endpoint::{default_endpoints, Endpoint};
use super::error::FetchError;
use super::http::{SwapiHttpClient, DEFAULT_TIMEOUT};
use super::links::{extract_id_from_url, to_logical_path_with};
use super::mock::mock_payload;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Where a payload came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// Served by the endpoint with this label
    Live(String),
    /// Served from the response cache
    Cached,
    /// Every endpoint failed; canned data
    Mock,
}

/// A payload tagged with its provenance
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub data: T,
    pub provenance: Provenance,
}

impl<T> Fetched<T> {
    pub fn is_mock(&self) -> bool {
        self.provenance == Provenance::Mock
    }
}

/// Main SWAPI client
#[derive(Clone)]
pub struct SwapiClient {
    http: SwapiHttpClient,
    endpoints: Arc<Vec<Endpoint>>,
    /// Index into `endpoints` of the most recent success
    last_success: Arc<Mutex<Option<usize>>>,
    cache: Arc<ResponseCache>,
}

impl SwapiClient {
    /// Create a client with the default endpoint chain
    pub fn new() -> Result<Self, FetchError> {
        Self::with_endpoints(default_endpoints(), DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom endpoint chain.
    ///
    /// An empty chain is valid and makes every call resolve to canned data.
    pub fn with_endpoints(endpoints: Vec<Endpoint>, timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            http: SwapiHttpClient::new(timeout)?,
            endpoints: Arc::new(endpoints),
            last_success: Arc::new(Mutex::new(None)),
            cache: Arc::new(ResponseCache::default()),
        })
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Endpoint that most recently served a request
    pub fn last_successful(&self) -> Option<&Endpoint> {
        let index = *self
            .last_success
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        index.and_then(|i| self.endpoints.get(i))
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Turn a record URL into a logical path.
    ///
    /// Besides the well-known SWAPI bases, the bases of this client's direct
    /// endpoints and relay targets are stripped too.
    pub fn logical_path(&self, url: &str) -> String {
        let bases: Vec<&str> = self
            .endpoints
            .iter()
            .map(|endpoint| match endpoint {
                Endpoint::Direct { base } => base.as_str(),
                Endpoint::Relay { target, .. } => target.as_str(),
            })
            .collect();
        to_logical_path_with(url, &bases)
    }

    /// Fetch a logical path as `T`. Never fails.
    pub async fn fetch_resource<T>(&self, logical_path: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        self.fetch_with_provenance(logical_path).await.data
    }

    /// Fetch a logical path as `T`, reporting which source produced it
    pub async fn fetch_with_provenance<T>(&self, logical_path: &str) -> Fetched<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.run_chain::<T>(logical_path).await {
            Some((data, _, label)) => Fetched {
                data,
                provenance: Provenance::Live(label),
            },
            None => Fetched {
                data: substitute(logical_path),
                provenance: Provenance::Mock,
            },
        }
    }

    /// Like [`fetch_with_provenance`](Self::fetch_with_provenance), but served
    /// from the cache while the entry is younger than `ttl`.
    ///
    /// Only live payloads are stored, so a mock answer is retried next time.
    pub async fn fetch_cached<T>(&self, logical_path: &str, ttl: Duration) -> Fetched<T>
    where
        T: DeserializeOwned + Default,
    {
        if let Some(value) = self.cache.get(logical_path, ttl) {
            match T::deserialize(&value) {
                Ok(data) => {
                    tracing::debug!("cache hit: {}", logical_path);
                    return Fetched {
                        data,
                        provenance: Provenance::Cached,
                    };
                }
                Err(e) => tracing::debug!("cached {} does not fit: {}", logical_path, e),
            }
        }

        match self.run_chain::<T>(logical_path).await {
            Some((data, raw, label)) => {
                self.cache.insert(logical_path, raw);
                Fetched {
                    data,
                    provenance: Provenance::Live(label),
                }
            }
            None => Fetched {
                data: substitute(logical_path),
                provenance: Provenance::Mock,
            },
        }
    }

    /// Try every endpoint in order; first payload that decodes as `T` wins
    async fn run_chain<T: DeserializeOwned>(&self, logical_path: &str) -> Option<(T, Value, String)> {
        let total = self.endpoints.len();

        for (index, endpoint) in self.endpoints.iter().enumerate() {
            tracing::info!(
                "Trying endpoint {}/{}: {}",
                index + 1,
                total,
                endpoint.label()
            );

            let decoded = self
                .attempt(endpoint, logical_path)
                .await
                .and_then(|raw| Ok((T::deserialize(&raw)?, raw)));

            match decoded {
                Ok((data, raw)) => {
                    tracing::info!("Fetched {} from {}", logical_path, endpoint.label());
                    *self
                        .last_success
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner) = Some(index);
                    return Some((data, raw, endpoint.label().to_string()));
                }
                Err(e) => {
                    tracing::warn!("Endpoint {} failed for {}: {}", endpoint.label(), logical_path, e);
                }
            }
        }

        tracing::error!("All API endpoints failed for {}, falling back to mock data", logical_path);
        None
    }

    /// One request against one endpoint
    async fn attempt(&self, endpoint: &Endpoint, logical_path: &str) -> Result<Value, FetchError> {
        let url = endpoint.request_url(logical_path);
        let body = self.http.get_json(&url).await?;
        endpoint.unwrap_body(body)
    }
}

/// Canned payload shaped as `T`.
///
/// The canned collection is used when it fits. Otherwise (a single record was
/// requested) the canned record whose id matches the path is used, and
/// `T::default()` when there is none.
fn substitute<T>(logical_path: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let payload = mock_payload(logical_path);

    if let Ok(data) = T::deserialize(&payload) {
        return data;
    }

    let path = logical_path.split('?').next().unwrap_or_default();
    let id = extract_id_from_url(path);

    let record = payload["results"].as_array().and_then(|results| {
        results.iter().find(|record| {
            !id.is_empty()
                && record["url"]
                    .as_str()
                    .is_some_and(|url| extract_id_from_url(url) == id)
        })
    });

    if let Some(data) = record.and_then(|r| T::deserialize(r).ok()) {
        return data;
    }

    tracing::warn!("No canned data fits {}, returning an empty value", logical_path);
    T::default()
}
