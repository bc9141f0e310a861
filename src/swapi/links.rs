//! Resource links
//!
//! Records reference each other by absolute URL, naming whichever base
//! produced them. These helpers turn such URLs back into logical paths and
//! identifiers so traversal works regardless of the base that will serve it.

use super::endpoint::KNOWN_BASES;
use crate::resource::ResourceType;

/// Extract the numeric id from a resource URL.
///
/// The id is the run of digits between the last two `/` of a URL that ends in
/// `/`. Anything else yields an empty string.
/// e.g., "https://swapi.dev/api/people/1/" -> "1"
pub fn extract_id_from_url(url: &str) -> String {
    let Some(trimmed) = url.strip_suffix('/') else {
        return String::new();
    };

    let digits_start = trimmed
        .char_indices()
        .rev()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let digits = &trimmed[digits_start..];

    if digits.is_empty() || !trimmed[..digits_start].ends_with('/') {
        return String::new();
    }

    digits.to_string()
}

/// Resource type named by the segment before the id
/// e.g., "https://swapi.dev/api/planets/1/" -> Some(Planets)
pub fn resource_type_from_url(url: &str) -> Option<ResourceType> {
    let segments: Vec<&str> = url.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() < 2 {
        return None;
    }
    segments[segments.len() - 2].parse().ok()
}

/// Rewrite a record URL to a logical path using the well-known bases
pub fn to_logical_path(url: &str) -> String {
    to_logical_path_with(url, &[])
}

/// Rewrite a record URL to a logical path, also recognizing `extra_bases`
pub fn to_logical_path_with(url: &str, extra_bases: &[&str]) -> String {
    let stripped = KNOWN_BASES
        .iter()
        .chain(extra_bases.iter())
        .find_map(|base| url.strip_prefix(base.trim_end_matches('/')))
        .unwrap_or(url);

    format!("/{}", stripped.trim_start_matches('/'))
}
