//! Resource Fetcher
//!
//! List, detail, related-record and global-search operations built on the
//! SWAPI client. All of them resolve to data; outages surface only through
//! the provenance tag.

use super::types::{Page, ResourceType};
use crate::swapi::cache::{DETAIL_TTL, LIST_TTL, RELATED_TTL};
use crate::swapi::client::{Fetched, SwapiClient};
use crate::swapi::links::extract_id_from_url;
use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Upper bound on pages walked by [`fetch_all`]
pub const MAX_PAGES: u32 = 100;

/// Logical path of one list page, with an optional search term
pub fn list_path(resource_type: ResourceType, page: u32, search: Option<&str>) -> String {
    let mut path = format!("/{}/?page={}", resource_type, page);

    if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
        path.push_str("&search=");
        path.push_str(&urlencoding::encode(term));
    }

    path
}

/// Logical path of a single record
pub fn detail_path(resource_type: ResourceType, id: &str) -> String {
    format!("/{}/{}/", resource_type, id)
}

/// Fetch one page of a resource list
pub async fn fetch_page<T>(
    client: &SwapiClient,
    resource_type: ResourceType,
    page: u32,
    search: Option<&str>,
) -> Fetched<Page<T>>
where
    T: DeserializeOwned,
{
    let path = list_path(resource_type, page, search);
    client.fetch_cached(&path, LIST_TTL).await
}

/// Fetch a single record by id.
///
/// Returns `None` without touching the network when `id` is empty.
pub async fn fetch_one<T>(client: &SwapiClient, resource_type: ResourceType, id: &str) -> Option<Fetched<T>>
where
    T: DeserializeOwned + Default,
{
    if id.trim().is_empty() {
        return None;
    }

    let path = detail_path(resource_type, id.trim());
    Some(client.fetch_cached(&path, DETAIL_TTL).await)
}

/// Follow a relationship URL stored in a record.
///
/// The URL is rewritten to a logical path first so any endpoint can serve it.
/// URLs without a trailing id are not addressable and yield `None`.
pub async fn fetch_related<T>(client: &SwapiClient, url: &str) -> Option<Fetched<T>>
where
    T: DeserializeOwned + Default,
{
    if url.is_empty() || extract_id_from_url(url).is_empty() {
        tracing::debug!("related url not addressable: {:?}", url);
        return None;
    }

    let path = client.logical_path(url);
    Some(client.fetch_cached(&path, RELATED_TTL).await)
}

/// Accumulates list pages in order, one request at a time
pub struct Pager<T> {
    resource_type: ResourceType,
    search: Option<String>,
    next_page: Option<u32>,
    pages_fetched: u32,
    count: u64,
    items: Vec<T>,
    served_mock: bool,
}

impl<T: DeserializeOwned> Pager<T> {
    pub fn new(resource_type: ResourceType, search: Option<&str>) -> Self {
        Self {
            resource_type,
            search: search.map(str::to_string),
            next_page: Some(1),
            pages_fetched: 0,
            count: 0,
            items: Vec::new(),
            served_mock: false,
        }
    }

    pub fn has_next(&self) -> bool {
        self.next_page.is_some()
    }

    /// Fetch the next page. Returns `false` once there was nothing left to fetch.
    pub async fn fetch_next(&mut self, client: &SwapiClient) -> bool {
        let Some(page) = self.next_page else {
            return false;
        };

        let fetched = fetch_page::<T>(client, self.resource_type, page, self.search.as_deref()).await;
        self.served_mock |= fetched.is_mock();
        self.pages_fetched += 1;
        self.count = fetched.data.count;
        self.next_page = fetched
            .data
            .next_page_number()
            .filter(|next| *next > page);
        self.items.extend(fetched.data.results);

        true
    }

    /// Total reported by the API
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Whether any accumulated page came from canned data
    pub fn served_mock(&self) -> bool {
        self.served_mock
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Fetch every page of a list (capped at [`MAX_PAGES`])
pub async fn fetch_all<T: DeserializeOwned>(
    client: &SwapiClient,
    resource_type: ResourceType,
    search: Option<&str>,
) -> Pager<T> {
    fetch_pages(client, resource_type, search, MAX_PAGES).await
}

/// Fetch pages in order until the list ends or `max_pages` were fetched
pub async fn fetch_pages<T: DeserializeOwned>(
    client: &SwapiClient,
    resource_type: ResourceType,
    search: Option<&str>,
    max_pages: u32,
) -> Pager<T> {
    let mut pager = Pager::new(resource_type, search);

    while pager.has_next() && pager.pages_fetched() < max_pages {
        pager.fetch_next(client).await;
    }

    if pager.has_next() {
        tracing::warn!(
            "Stopped {} after {} pages with more remaining",
            resource_type,
            pager.pages_fetched()
        );
    }

    pager
}

/// First-page results of a search across every resource type
pub struct GlobalSearch {
    pub query: String,
    pub sections: Vec<(ResourceType, Fetched<Page<Value>>)>,
}

impl GlobalSearch {
    pub fn has_results(&self) -> bool {
        self.sections
            .iter()
            .any(|(_, fetched)| !fetched.data.results.is_empty())
    }

    pub fn section(&self, resource_type: ResourceType) -> Option<&Page<Value>> {
        self.sections
            .iter()
            .find(|(rt, _)| *rt == resource_type)
            .map(|(_, fetched)| &fetched.data)
    }
}

/// Search all six resource types concurrently
pub async fn global_search(client: &SwapiClient, query: &str) -> GlobalSearch {
    let searches = ResourceType::ALL
        .into_iter()
        .map(|rt| async move { (rt, fetch_page::<Value>(client, rt, 1, Some(query)).await) });

    GlobalSearch {
        query: query.to_string(),
        sections: join_all(searches).await,
    }
}
