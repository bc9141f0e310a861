//! Text rendering
//!
//! Plain-text views of lists, records, search results and the filter catalog
//! for the command line.

use crate::resource::{display_option, filter_options, GlobalSearch, ResourceType, SwapiResource};
use crate::swapi::links::extract_id_from_url;
use crate::swapi::Provenance;
use serde_json::Value;
use std::fmt::Write;

/// `name`, or `title` for films
pub fn record_title(record: &Value) -> &str {
    record
        .get("name")
        .or_else(|| record.get("title"))
        .and_then(|v| v.as_str())
        .unwrap_or("-")
}

/// Note shown under output served from canned data
pub fn provenance_note(provenance: &Provenance) -> Option<&'static str> {
    match provenance {
        Provenance::Mock => Some("(offline: showing example data)"),
        _ => None,
    }
}

/// One line per record: id and title
pub fn format_list(resource_type: ResourceType, records: &[&Value], total: u64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({} of {})", resource_type.label(), records.len(), total);

    if records.is_empty() {
        let _ = writeln!(out, "  No {} found", resource_type);
        return out;
    }

    for record in records {
        let id = record
            .get("url")
            .and_then(|v| v.as_str())
            .map(extract_id_from_url)
            .unwrap_or_default();
        let _ = writeln!(out, "  {:>4}  {}", id, record_title(record));
    }

    out
}

/// Detail view of a typed record
pub fn format_resource<T: SwapiResource>(record: &T) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} #{} - {}",
        T::RESOURCE_TYPE.label(),
        record.id(),
        record.display_name()
    );

    if let Ok(Value::Object(fields)) = serde_json::to_value(record) {
        for (key, value) in &fields {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => continue,
            };
            if matches!(key.as_str(), "url" | "created" | "edited") || text.starts_with("http") {
                continue;
            }
            let _ = writeln!(out, "  {:<24} {}", key, text.replace(['\r', '\n'], " "));
        }
    }

    for (field, urls) in record.related() {
        if urls.is_empty() {
            continue;
        }
        let ids: Vec<String> = urls.iter().map(|u| extract_id_from_url(u)).collect();
        let _ = writeln!(out, "  {:<24} {}", field, ids.join(", "));
    }

    if let Some(created) = record.created_at() {
        let _ = writeln!(out, "  {:<24} {}", "created", created.format("%Y-%m-%d"));
    }
    if let Some(edited) = record.edited_at() {
        let _ = writeln!(out, "  {:<24} {}", "edited", edited.format("%Y-%m-%d"));
    }

    out
}

/// Global search results grouped by resource type
pub fn format_search(search: &GlobalSearch) -> String {
    let mut out = String::new();

    if !search.has_results() {
        let _ = writeln!(out, "No results for {:?}", search.query);
        return out;
    }

    for (resource_type, fetched) in &search.sections {
        if fetched.data.results.is_empty() {
            continue;
        }
        let records: Vec<&Value> = fetched.data.results.iter().collect();
        out.push_str(&format_list(*resource_type, &records, fetched.data.count));
    }

    out
}

/// Filter keys and choices for a resource type
pub fn format_filter_catalog(resource_type: ResourceType) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Filters for {}", resource_type.label());

    for option in filter_options(resource_type) {
        let choices: Vec<String> = option.options.iter().map(|o| display_option(o)).collect();
        let _ = writeln!(out, "  {} ({}): {}", option.label, option.key, choices.join(", "));
    }

    out
}
