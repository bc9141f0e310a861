//! tswapi
//!
//! Browse, search and filter Star Wars reference data from SWAPI. Requests go
//! through an ordered chain of upstream endpoints and fall back to canned
//! example data, so every call yields something displayable.
//!
//! - [`swapi`] - Fetch pipeline (endpoints, relay, mock fallback, cache)
//! - [`resource`] - Typed records, list/detail/related/search operations, filters
//! - [`config`] - Persistent user configuration
//! - [`render`] - Plain-text views for the command line

pub mod config;
pub mod render;
pub mod resource;
pub mod swapi;
