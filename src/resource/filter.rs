//! Client-side filters
//!
//! Filter state for the browser (search query, active resource type and
//! per-type key/value filters) plus the predicate that narrows already
//! fetched records.

use super::types::ResourceType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Filters for one resource type: field name -> wanted value
pub type ResourceFilters = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub active_filters: BTreeMap<ResourceType, ResourceFilters>,
    pub search_query: String,
    pub active_resource_type: ResourceType,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            active_filters: BTreeMap::new(),
            search_query: String::new(),
            active_resource_type: ResourceType::People,
        }
    }
}

impl FilterState {
    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.to_string();
    }

    /// Switch resource type; the search query does not carry over
    pub fn set_active_resource_type(&mut self, resource_type: ResourceType) {
        self.active_resource_type = resource_type;
        self.search_query.clear();
    }

    /// Set or remove one filter. `None` or an empty value removes the key, and
    /// a type left without filters is dropped entirely.
    pub fn set_resource_filter(&mut self, resource_type: ResourceType, key: &str, value: Option<&str>) {
        match value.filter(|v| !v.is_empty()) {
            Some(value) => {
                self.active_filters
                    .entry(resource_type)
                    .or_default()
                    .insert(key.to_string(), value.to_string());
            }
            None => {
                if let Some(filters) = self.active_filters.get_mut(&resource_type) {
                    filters.remove(key);
                    if filters.is_empty() {
                        self.active_filters.remove(&resource_type);
                    }
                }
            }
        }
    }

    pub fn clear_resource_filters(&mut self, resource_type: ResourceType) {
        self.active_filters.remove(&resource_type);
    }

    /// Drop every filter and the search query
    pub fn clear_all_filters(&mut self) {
        self.active_filters.clear();
        self.search_query.clear();
    }

    pub fn filters_for(&self, resource_type: ResourceType) -> Option<&ResourceFilters> {
        self.active_filters.get(&resource_type)
    }

    pub fn has_filters(&self, resource_type: ResourceType) -> bool {
        self.filters_for(resource_type)
            .is_some_and(|filters| !filters.is_empty())
    }
}

/// Whether a record passes every non-empty filter.
///
/// Text fields match by case-insensitive substring, list fields when any
/// element does. Numbers, booleans, objects and missing keys never match.
pub fn matches_filters(record: &Value, filters: &ResourceFilters) -> bool {
    filters
        .iter()
        .filter(|(_, wanted)| !wanted.is_empty())
        .all(|(key, wanted)| {
            let wanted_lower = wanted.to_lowercase();
            match record.get(key) {
                Some(Value::String(s)) => s.to_lowercase().contains(&wanted_lower),
                Some(Value::Array(items)) => items.iter().any(|item| {
                    value_text(item).to_lowercase().contains(&wanted_lower)
                }),
                Some(_) | None => false,
            }
        })
}

/// Records passing `filters`; all of them when `filters` is `None` or empty
pub fn apply_filters<'a>(records: &'a [Value], filters: Option<&ResourceFilters>) -> Vec<&'a Value> {
    match filters {
        Some(filters) if !filters.is_empty() => records
            .iter()
            .filter(|record| matches_filters(record, filters))
            .collect(),
        _ => records.iter().collect(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One filter dropdown
#[derive(Debug, Clone, Copy)]
pub struct FilterOption {
    pub key: &'static str,
    pub label: &'static str,
    pub options: &'static [&'static str],
}

const PEOPLE_FILTERS: &[FilterOption] = &[
    FilterOption {
        key: "gender",
        label: "Gender",
        options: &["male", "female", "n/a", "hermaphrodite"],
    },
    FilterOption {
        key: "eye_color",
        label: "Eye Color",
        options: &[
            "blue", "yellow", "red", "brown", "blue-gray", "black", "orange", "hazel", "pink",
            "unknown",
        ],
    },
    FilterOption {
        key: "hair_color",
        label: "Hair Color",
        options: &["blond", "brown", "black", "auburn", "white", "grey", "none", "unknown"],
    },
];

const PLANET_FILTERS: &[FilterOption] = &[
    FilterOption {
        key: "climate",
        label: "Climate",
        options: &[
            "arid", "temperate", "tropical", "frozen", "murky", "windy", "hot", "frigid", "humid",
            "moist", "polluted", "unknown",
        ],
    },
    FilterOption {
        key: "terrain",
        label: "Terrain",
        options: &[
            "desert", "grasslands", "mountains", "jungle", "rainforests", "tundra", "swamp",
            "gas giant", "forests", "lakes", "grassy hills", "cityscape", "ocean", "rock",
            "scrublands", "unknown",
        ],
    },
];

const SPECIES_FILTERS: &[FilterOption] = &[
    FilterOption {
        key: "classification",
        label: "Classification",
        options: &[
            "mammal", "artificial", "sentient", "reptile", "amphibian", "gastropod", "unknown",
        ],
    },
    FilterOption {
        key: "designation",
        label: "Designation",
        options: &["sentient", "semi-sentient", "reptilian", "unknown"],
    },
];

const STARSHIP_FILTERS: &[FilterOption] = &[
    FilterOption {
        key: "starship_class",
        label: "Starship Class",
        options: &[
            "Starfighter",
            "Deep space mobile battlestation",
            "Light freighter",
            "Assault starfighter",
            "Star Destroyer",
            "Landing craft",
            "Medium transport",
            "Patrol craft",
            "Armed government transport",
            "Escort ship",
            "Star dreadnought",
            "unknown",
        ],
    },
    FilterOption {
        key: "manufacturer",
        label: "Manufacturer",
        options: &[
            "Incom Corporation",
            "Imperial Department of Military Research",
            "Corellian Engineering Corporation",
            "Koensayr Manufacturing",
            "Kuat Drive Yards",
            "Sienar Fleet Systems",
            "Alliance Underground Engineering",
            "Gallofree Yards, Inc.",
            "unknown",
        ],
    },
];

const VEHICLE_FILTERS: &[FilterOption] = &[
    FilterOption {
        key: "vehicle_class",
        label: "Vehicle Class",
        options: &[
            "Wheeled",
            "Repulsorcraft",
            "Walker",
            "Airspeeder",
            "Space/atmospheric assault ship",
            "Assault walker",
            "Armoured fighting vehicle",
            "Speeder",
            "Sail barge",
            "unknown",
        ],
    },
    FilterOption {
        key: "manufacturer",
        label: "Manufacturer",
        options: &[
            "Corellia Mining Corporation",
            "Imperial Department of Military Research",
            "Incom Corporation",
            "Kuat Drive Yards",
            "Mobquet Swoops and Speeders",
            "SoroSuub Corporation",
            "Ubrikkian Industries",
            "unknown",
        ],
    },
];

const FILM_FILTERS: &[FilterOption] = &[
    FilterOption {
        key: "director",
        label: "Director",
        options: &["George Lucas", "Irvin Kershner", "Richard Marquand"],
    },
    FilterOption {
        key: "producer",
        label: "Producer",
        options: &["Gary Kurtz", "Rick McCallum"],
    },
];

/// Filter dropdowns offered for a resource type
pub fn filter_options(resource_type: ResourceType) -> &'static [FilterOption] {
    match resource_type {
        ResourceType::People => PEOPLE_FILTERS,
        ResourceType::Planets => PLANET_FILTERS,
        ResourceType::Species => SPECIES_FILTERS,
        ResourceType::Starships => STARSHIP_FILTERS,
        ResourceType::Vehicles => VEHICLE_FILTERS,
        ResourceType::Films => FILM_FILTERS,
    }
}

/// Display form of an option value
/// e.g., "unknown" -> "Unknown", "n/a" -> "N/A", "male" -> "Male"
pub fn display_option(value: &str) -> String {
    match value {
        "unknown" => "Unknown".to_string(),
        "n/a" => "N/A".to_string(),
        _ => {
            let mut chars = value.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filters(pairs: &[(&str, &str)]) -> ResourceFilters {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_state() {
        let state = FilterState::default();
        assert!(state.active_filters.is_empty());
        assert_eq!(state.search_query, "");
        assert_eq!(state.active_resource_type, ResourceType::People);
    }

    #[test]
    fn test_switching_type_clears_search() {
        let mut state = FilterState::default();
        state.set_search_query("luke");
        state.set_active_resource_type(ResourceType::Planets);
        assert_eq!(state.active_resource_type, ResourceType::Planets);
        assert_eq!(state.search_query, "");
    }

    #[test]
    fn test_set_and_remove_filter() {
        let mut state = FilterState::default();
        state.set_resource_filter(ResourceType::People, "gender", Some("female"));
        state.set_resource_filter(ResourceType::People, "eye_color", Some("blue"));
        assert_eq!(state.filters_for(ResourceType::People).unwrap().len(), 2);

        state.set_resource_filter(ResourceType::People, "gender", None);
        assert_eq!(
            state.filters_for(ResourceType::People),
            Some(&filters(&[("eye_color", "blue")]))
        );

        // removing the last key drops the type entirely
        state.set_resource_filter(ResourceType::People, "eye_color", Some(""));
        assert!(state.filters_for(ResourceType::People).is_none());
        assert!(!state.has_filters(ResourceType::People));
    }

    #[test]
    fn test_removing_from_unfiltered_type_is_noop() {
        let mut state = FilterState::default();
        state.set_resource_filter(ResourceType::Films, "director", None);
        assert!(state.active_filters.is_empty());
    }

    #[test]
    fn test_clear_resource_and_all() {
        let mut state = FilterState::default();
        state.set_search_query("a");
        state.set_resource_filter(ResourceType::People, "gender", Some("male"));
        state.set_resource_filter(ResourceType::Films, "director", Some("George Lucas"));

        state.clear_resource_filters(ResourceType::People);
        assert!(!state.has_filters(ResourceType::People));
        assert!(state.has_filters(ResourceType::Films));
        assert_eq!(state.search_query, "a");

        state.clear_all_filters();
        assert!(state.active_filters.is_empty());
        assert_eq!(state.search_query, "");
    }

    #[test]
    fn test_string_fields_match_case_insensitive_substring() {
        let planet = json!({"name": "Tatooine", "climate": "arid", "terrain": "Desert, mountains"});
        assert!(matches_filters(&planet, &filters(&[("terrain", "desert")])));
        assert!(matches_filters(&planet, &filters(&[("climate", "ARID"), ("terrain", "mount")])));
        assert!(!matches_filters(&planet, &filters(&[("climate", "temperate")])));
    }

    #[test]
    fn test_array_fields_match_any_element() {
        let person = json!({"films": ["https://swapi.dev/api/films/1/", "https://swapi.dev/api/films/3/"]});
        assert!(matches_filters(&person, &filters(&[("films", "films/3/")])));
        assert!(!matches_filters(&person, &filters(&[("films", "films/2/")])));
    }

    #[test]
    fn test_non_text_fields_never_match() {
        let film = json!({"title": "A New Hope", "episode_id": 4, "canon": true, "meta": {"a": "4"}});
        assert!(!matches_filters(&film, &filters(&[("episode_id", "4")])));
        assert!(!matches_filters(&film, &filters(&[("canon", "true")])));
        assert!(!matches_filters(&film, &filters(&[("meta", "4")])));
        assert!(!matches_filters(&film, &filters(&[("missing", "x")])));
        assert!(matches_filters(&film, &filters(&[("title", "hope")])));
    }

    #[test]
    fn test_empty_filter_values_are_ignored() {
        let person = json!({"gender": "male"});
        assert!(matches_filters(&person, &filters(&[("gender", "")])));
    }

    #[test]
    fn test_apply_filters() {
        let records = vec![
            json!({"name": "Luke Skywalker", "gender": "male"}),
            json!({"name": "Leia Organa", "gender": "female"}),
        ];
        assert_eq!(apply_filters(&records, None).len(), 2);
        assert_eq!(apply_filters(&records, Some(&ResourceFilters::new())).len(), 2);

        let female = apply_filters(&records, Some(&filters(&[("gender", "female")])));
        assert_eq!(female.len(), 1);
        assert_eq!(female[0]["name"], "Leia Organa");

        // substring semantics: "male" also matches "female"
        assert_eq!(apply_filters(&records, Some(&filters(&[("gender", "male")]))).len(), 2);
    }

    #[test]
    fn test_every_type_has_options() {
        for rt in ResourceType::ALL {
            let options = filter_options(rt);
            assert!(!options.is_empty(), "{} should have filters", rt);
            assert!(options.iter().all(|o| !o.options.is_empty()));
        }
    }

    #[test]
    fn test_display_option() {
        assert_eq!(display_option("unknown"), "Unknown");
        assert_eq!(display_option("n/a"), "N/A");
        assert_eq!(display_option("blue-gray"), "Blue-gray");
        assert_eq!(display_option(""), "");
    }
}
