//! Resource types and records
//!
//! Typed shapes of the six SWAPI resources and of the paged collections that
//! list endpoints return. Every field the API serves as text stays text here,
//! including numeric-looking values such as `height` or `population`.

use crate::swapi::links::extract_id_from_url;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// The closed set of resource kinds the API serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    People,
    Planets,
    Species,
    Starships,
    Vehicles,
    Films,
}

impl ResourceType {
    pub const ALL: [ResourceType; 6] = [
        ResourceType::People,
        ResourceType::Planets,
        ResourceType::Species,
        ResourceType::Starships,
        ResourceType::Vehicles,
        ResourceType::Films,
    ];

    /// Path segment under the API root
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::People => "people",
            ResourceType::Planets => "planets",
            ResourceType::Species => "species",
            ResourceType::Starships => "starships",
            ResourceType::Vehicles => "vehicles",
            ResourceType::Films => "films",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            ResourceType::People => "Characters",
            ResourceType::Planets => "Planets",
            ResourceType::Species => "Species",
            ResourceType::Starships => "Starships",
            ResourceType::Vehicles => "Vehicles",
            ResourceType::Films => "Films",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown resource type: {0} (expected one of people, planets, species, starships, vehicles, films)")]
pub struct ParseResourceTypeError(String);

impl FromStr for ResourceType {
    type Err = ParseResourceTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        ResourceType::ALL
            .into_iter()
            .find(|rt| rt.as_str() == lowered)
            .ok_or_else(|| ParseResourceTypeError(s.to_string()))
    }
}

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

impl<T> Page<T> {
    /// Page number of the following page, read from the `page` query parameter of `next`
    pub fn next_page_number(&self) -> Option<u32> {
        self.next.as_deref().and_then(page_param)
    }

    pub fn previous_page_number(&self) -> Option<u32> {
        self.previous.as_deref().and_then(page_param)
    }
}

/// `page` query parameter of an absolute or API-relative link
fn page_param(link: &str) -> Option<u32> {
    let base = Url::parse("http://localhost/").ok()?;
    let url = base.join(link).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}

/// Behavior shared by every record type
pub trait SwapiResource: DeserializeOwned + Serialize + Default + Clone + Send + 'static {
    const RESOURCE_TYPE: ResourceType;

    /// Canonical address of the record
    fn url(&self) -> &str;
    fn created(&self) -> &str;
    fn edited(&self) -> &str;
    /// `name`, or `title` for films
    fn display_name(&self) -> &str;
    /// Relationship fields as (field name, URLs)
    fn related(&self) -> Vec<(&'static str, Vec<&str>)>;

    /// Numeric id from the record URL; empty when not addressable
    fn id(&self) -> String {
        extract_id_from_url(self.url())
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.created())
    }

    fn edited_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.edited())
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn strs(urls: &[String]) -> Vec<&str> {
    urls.iter().map(String::as_str).collect()
}

/// A character
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub skin_color: String,
    pub eye_color: String,
    pub birth_year: String,
    pub gender: String,
    pub homeworld: String,
    pub films: Vec<String>,
    pub species: Vec<String>,
    pub vehicles: Vec<String>,
    pub starships: Vec<String>,
    pub created: String,
    pub edited: String,
    pub url: String,
}

impl SwapiResource for Person {
    const RESOURCE_TYPE: ResourceType = ResourceType::People;

    fn url(&self) -> &str {
        &self.url
    }
    fn created(&self) -> &str {
        &self.created
    }
    fn edited(&self) -> &str {
        &self.edited
    }
    fn display_name(&self) -> &str {
        &self.name
    }
    fn related(&self) -> Vec<(&'static str, Vec<&str>)> {
        vec![
            ("homeworld", vec![self.homeworld.as_str()]),
            ("films", strs(&self.films)),
            ("species", strs(&self.species)),
            ("vehicles", strs(&self.vehicles)),
            ("starships", strs(&self.starships)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    pub rotation_period: String,
    pub orbital_period: String,
    pub diameter: String,
    pub climate: String,
    pub gravity: String,
    pub terrain: String,
    pub surface_water: String,
    pub population: String,
    pub residents: Vec<String>,
    pub films: Vec<String>,
    pub created: String,
    pub edited: String,
    pub url: String,
}

impl SwapiResource for Planet {
    const RESOURCE_TYPE: ResourceType = ResourceType::Planets;

    fn url(&self) -> &str {
        &self.url
    }
    fn created(&self) -> &str {
        &self.created
    }
    fn edited(&self) -> &str {
        &self.edited
    }
    fn display_name(&self) -> &str {
        &self.name
    }
    fn related(&self) -> Vec<(&'static str, Vec<&str>)> {
        vec![("residents", strs(&self.residents)), ("films", strs(&self.films))]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    pub classification: String,
    pub designation: String,
    pub average_height: String,
    pub skin_colors: String,
    pub hair_colors: String,
    pub eye_colors: String,
    pub average_lifespan: String,
    /// Some species have no homeworld
    pub homeworld: Option<String>,
    pub language: String,
    pub people: Vec<String>,
    pub films: Vec<String>,
    pub created: String,
    pub edited: String,
    pub url: String,
}

impl SwapiResource for Species {
    const RESOURCE_TYPE: ResourceType = ResourceType::Species;

    fn url(&self) -> &str {
        &self.url
    }
    fn created(&self) -> &str {
        &self.created
    }
    fn edited(&self) -> &str {
        &self.edited
    }
    fn display_name(&self) -> &str {
        &self.name
    }
    fn related(&self) -> Vec<(&'static str, Vec<&str>)> {
        vec![
            ("homeworld", self.homeworld.as_deref().into_iter().collect()),
            ("people", strs(&self.people)),
            ("films", strs(&self.films)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Starship {
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    pub cost_in_credits: String,
    pub length: String,
    pub max_atmosphering_speed: String,
    pub crew: String,
    pub passengers: String,
    pub cargo_capacity: String,
    pub consumables: String,
    pub hyperdrive_rating: String,
    #[serde(rename = "MGLT")]
    pub mglt: String,
    pub starship_class: String,
    pub pilots: Vec<String>,
    pub films: Vec<String>,
    pub created: String,
    pub edited: String,
    pub url: String,
}

impl SwapiResource for Starship {
    const RESOURCE_TYPE: ResourceType = ResourceType::Starships;

    fn url(&self) -> &str {
        &self.url
    }
    fn created(&self) -> &str {
        &self.created
    }
    fn edited(&self) -> &str {
        &self.edited
    }
    fn display_name(&self) -> &str {
        &self.name
    }
    fn related(&self) -> Vec<(&'static str, Vec<&str>)> {
        vec![("pilots", strs(&self.pilots)), ("films", strs(&self.films))]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Vehicle {
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    pub cost_in_credits: String,
    pub length: String,
    pub max_atmosphering_speed: String,
    pub crew: String,
    pub passengers: String,
    pub cargo_capacity: String,
    pub consumables: String,
    pub vehicle_class: String,
    pub pilots: Vec<String>,
    pub films: Vec<String>,
    pub created: String,
    pub edited: String,
    pub url: String,
}

impl SwapiResource for Vehicle {
    const RESOURCE_TYPE: ResourceType = ResourceType::Vehicles;

    fn url(&self) -> &str {
        &self.url
    }
    fn created(&self) -> &str {
        &self.created
    }
    fn edited(&self) -> &str {
        &self.edited
    }
    fn display_name(&self) -> &str {
        &self.name
    }
    fn related(&self) -> Vec<(&'static str, Vec<&str>)> {
        vec![("pilots", strs(&self.pilots)), ("films", strs(&self.films))]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Film {
    pub title: String,
    pub episode_id: u32,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub release_date: String,
    pub characters: Vec<String>,
    pub planets: Vec<String>,
    pub starships: Vec<String>,
    pub vehicles: Vec<String>,
    pub species: Vec<String>,
    pub created: String,
    pub edited: String,
    pub url: String,
}

impl SwapiResource for Film {
    const RESOURCE_TYPE: ResourceType = ResourceType::Films;

    fn url(&self) -> &str {
        &self.url
    }
    fn created(&self) -> &str {
        &self.created
    }
    fn edited(&self) -> &str {
        &self.edited
    }
    fn display_name(&self) -> &str {
        &self.title
    }
    fn related(&self) -> Vec<(&'static str, Vec<&str>)> {
        vec![
            ("characters", strs(&self.characters)),
            ("planets", strs(&self.planets)),
            ("starships", strs(&self.starships)),
            ("vehicles", strs(&self.vehicles)),
            ("species", strs(&self.species)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swapi::mock::mock_payload;
    use chrono::Datelike;
    use serde_json::json;

    #[test]
    fn test_labels() {
        assert_eq!(ResourceType::People.label(), "Characters");
        assert_eq!(ResourceType::Planets.label(), "Planets");
        assert_eq!(ResourceType::Species.label(), "Species");
        assert_eq!(ResourceType::Starships.label(), "Starships");
        assert_eq!(ResourceType::Vehicles.label(), "Vehicles");
        assert_eq!(ResourceType::Films.label(), "Films");
    }

    #[test]
    fn test_parse_resource_type() {
        assert_eq!("people".parse::<ResourceType>().unwrap(), ResourceType::People);
        assert_eq!(" Films ".parse::<ResourceType>().unwrap(), ResourceType::Films);
        assert!("characters".parse::<ResourceType>().is_err());
        for rt in ResourceType::ALL {
            assert_eq!(rt.to_string().parse::<ResourceType>().unwrap(), rt);
        }
    }

    #[test]
    fn test_mock_people_deserialize() {
        let page: Page<Person> = serde_json::from_value(mock_payload("/people/")).unwrap();
        let luke = &page.results[0];
        assert_eq!(luke.id(), "1");
        assert_eq!(luke.display_name(), "Luke Skywalker");
        assert_eq!(luke.created_at().unwrap().year(), 2014);
        assert_eq!(luke.related()[0], ("homeworld", vec!["https://swapi.py4e.com/api/planets/1/"]));
    }

    #[test]
    fn test_species_without_homeworld() {
        let droid: Species = serde_json::from_value(json!({
            "name": "Droid",
            "classification": "artificial",
            "designation": "sentient",
            "average_height": "n/a",
            "skin_colors": "n/a",
            "hair_colors": "n/a",
            "eye_colors": "n/a",
            "average_lifespan": "indefinite",
            "homeworld": null,
            "language": "n/a",
            "people": ["https://swapi.dev/api/people/2/"],
            "films": [],
            "created": "2014-12-10T15:16:16.259000Z",
            "edited": "2014-12-20T21:36:42.139000Z",
            "url": "https://swapi.dev/api/species/2/"
        }))
        .unwrap();
        assert!(droid.homeworld.is_none());
        assert_eq!(droid.related()[0], ("homeworld", vec![]));
    }

    #[test]
    fn test_starship_mglt_rename() {
        let ship: Starship = serde_json::from_value(json!({
            "name": "X-wing", "model": "T-65 X-wing", "manufacturer": "Incom Corporation",
            "cost_in_credits": "149999", "length": "12.5", "max_atmosphering_speed": "1050",
            "crew": "1", "passengers": "0", "cargo_capacity": "110", "consumables": "1 week",
            "hyperdrive_rating": "1.0", "MGLT": "100", "starship_class": "Starfighter",
            "pilots": [], "films": [], "created": "", "edited": "",
            "url": "https://swapi.dev/api/starships/12/"
        }))
        .unwrap();
        assert_eq!(ship.mglt, "100");
        assert_eq!(ship.id(), "12");
        assert!(ship.created_at().is_none());
    }

    #[test]
    fn test_next_page_number() {
        let page: Page<Person> = Page {
            count: 82,
            next: Some("https://swapi.dev/api/people/?page=3&search=a".to_string()),
            previous: Some("/people/?page=1&search=a".to_string()),
            results: vec![],
        };
        assert_eq!(page.next_page_number(), Some(3));
        assert_eq!(page.previous_page_number(), Some(1));
    }

    #[test]
    fn test_next_page_number_absent() {
        let page: Page<Person> = Page::default();
        assert_eq!(page.next_page_number(), None);

        let page: Page<Person> = Page {
            next: Some("https://swapi.dev/api/people/".to_string()),
            ..Page::default()
        };
        assert_eq!(page.next_page_number(), None);
    }

    #[test]
    fn test_page_requires_results() {
        let parsed: Result<Page<Person>, _> = serde_json::from_value(json!({"count": 1}));
        assert!(parsed.is_err());
        let parsed: Page<Person> =
            serde_json::from_value(json!({"count": 0, "results": []})).unwrap();
        assert!(parsed.next.is_none());
    }
}
