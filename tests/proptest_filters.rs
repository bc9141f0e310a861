//! Property-based tests using proptest
//!
//! These tests verify id extraction, link rewriting and the client-side
//! filter predicate against randomized inputs.

use proptest::prelude::*;
use serde_json::{json, Value};
use tswapi::resource::{apply_filters, matches_filters, ResourceFilters, ResourceType};
use tswapi::swapi::endpoint::{PRIMARY_BASE, SECONDARY_BASE};
use tswapi::swapi::{extract_id_from_url, resource_type_from_url, to_logical_path};

fn arb_resource_type() -> impl Strategy<Value = ResourceType> {
    prop::sample::select(ResourceType::ALL.to_vec())
}

fn arb_base() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(PRIMARY_BASE), Just(SECONDARY_BASE)]
}

/// Generate arbitrary person-like records
fn arb_person() -> impl Strategy<Value = Value> {
    (
        "[A-Z][a-z]{2,10} [A-Z][a-z]{2,10}",
        prop_oneof!["male", "female", "n/a", "hermaphrodite"],
        prop_oneof!["blue", "yellow", "red", "brown", "blue-gray"],
        prop::collection::vec(1u32..7, 0..4),
    )
        .prop_map(|(name, gender, eye_color, films)| {
            json!({
                "name": name,
                "gender": gender,
                "eye_color": eye_color,
                "films": films
                    .iter()
                    .map(|id| format!("https://swapi.dev/api/films/{}/", id))
                    .collect::<Vec<_>>()
            })
        })
}

fn arb_people() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(arb_person(), 0..50)
}

proptest! {
    /// Any record URL round-trips its id
    #[test]
    fn id_round_trips(base in arb_base(), rt in arb_resource_type(), id in 1u32..100_000) {
        let url = format!("{}/{}/{}/", base, rt, id);
        prop_assert_eq!(extract_id_from_url(&url), id.to_string());
        prop_assert_eq!(resource_type_from_url(&url), Some(rt));
    }

    /// Collection URLs never yield an id
    #[test]
    fn collection_urls_have_no_id(base in arb_base(), rt in arb_resource_type()) {
        let url = format!("{}/{}/", base, rt);
        prop_assert_eq!(extract_id_from_url(&url), "");
    }

    /// Id extraction never panics and only ever returns digits
    #[test]
    fn id_is_digits_or_empty(url in "\\PC{0,40}") {
        let id = extract_id_from_url(&url);
        prop_assert!(id.chars().all(|c| c.is_ascii_digit()));
    }

    /// Rewriting is base-agnostic
    #[test]
    fn logical_path_ignores_base(base in arb_base(), rt in arb_resource_type(), id in 1u32..1000) {
        let url = format!("{}/{}/{}/", base, rt, id);
        prop_assert_eq!(to_logical_path(&url), format!("/{}/{}/", rt, id));
    }

    /// Rewritten paths start with exactly one separator and rewriting is idempotent
    #[test]
    fn logical_path_is_normalized(path in "/{0,3}[a-z]{1,8}/[0-9]{1,3}/") {
        let once = to_logical_path(&path);
        prop_assert!(once.starts_with('/'));
        prop_assert!(!once.starts_with("//"));
        prop_assert_eq!(to_logical_path(&once), once.clone());
    }

    /// No filters returns all records
    #[test]
    fn empty_filters_return_all(people in arb_people()) {
        prop_assert_eq!(apply_filters(&people, None).len(), people.len());
        prop_assert_eq!(apply_filters(&people, Some(&ResourceFilters::new())).len(), people.len());
    }

    /// Filtering is idempotent
    #[test]
    fn filter_is_idempotent(people in arb_people(), wanted in "[a-z]{0,4}") {
        let filters: ResourceFilters = [("gender".to_string(), wanted)].into_iter().collect();
        let once: Vec<Value> = apply_filters(&people, Some(&filters)).into_iter().cloned().collect();
        let twice = apply_filters(&once, Some(&filters));
        prop_assert_eq!(once.len(), twice.len());
    }

    /// Adding a filter never widens the result
    #[test]
    fn more_filters_narrow(people in arb_people(), gender in "[a-z]{0,3}", eye in "[a-z]{0,3}") {
        let one: ResourceFilters = [("gender".to_string(), gender.clone())].into_iter().collect();
        let two: ResourceFilters = [("gender".to_string(), gender), ("eye_color".to_string(), eye)]
            .into_iter()
            .collect();
        prop_assert!(apply_filters(&people, Some(&two)).len() <= apply_filters(&people, Some(&one)).len());
    }

    /// Matching is case-insensitive
    #[test]
    fn matching_ignores_case(person in arb_person()) {
        let name = person["name"].as_str().unwrap().to_string();
        let upper: ResourceFilters = [("name".to_string(), name.to_uppercase())].into_iter().collect();
        let lower: ResourceFilters = [("name".to_string(), name.to_lowercase())].into_iter().collect();
        prop_assert!(matches_filters(&person, &upper));
        prop_assert!(matches_filters(&person, &lower));
    }
}
