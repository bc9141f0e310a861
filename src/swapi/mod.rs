//! SWAPI access module
//!
//! This module provides the fetch pipeline for the Star Wars API: an ordered
//! chain of upstream endpoints, a relay unwrapper, canned fallbacks and a
//! response cache.
//!
//! # Module Structure
//!
//! - [`client`] - Fallback chain, provenance and the "last successful" hint
//! - [`endpoint`] - Candidate bases and their URL/unwrap rules
//! - [`http`] - HTTP utilities for REST API calls
//! - [`links`] - Id extraction and URL -> logical path rewriting
//! - [`mock`] - Canned payloads used when every endpoint fails
//! - [`cache`] - TTL-checked LRU of live responses
//!
//! # Example
//!
//! ```no_run
//! use tswapi::resource::{Page, Person};
//! use tswapi::swapi::SwapiClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = SwapiClient::new()?;
//!     let page: Page<Person> = client.fetch_resource("/people/?page=1").await;
//!     println!("{} people", page.count);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod links;
pub mod mock;

pub use client::{Fetched, Provenance, SwapiClient};
pub use endpoint::{default_endpoints, Endpoint};
pub use error::FetchError;
pub use links::{extract_id_from_url, resource_type_from_url, to_logical_path};
