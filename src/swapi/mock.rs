//! Canned payloads
//!
//! Substitute responses served when every live endpoint fails, so callers
//! always receive a well-formed collection.

use serde_json::{json, Value};

/// Substitute payload for a logical path.
///
/// Matching is by substring: `/people` first, then `/planets`. Any other path
/// yields an empty collection.
pub fn mock_payload(logical_path: &str) -> Value {
    tracing::info!("Using mock data for: {}", logical_path);

    if logical_path.contains("/people") {
        return mock_people();
    }

    if logical_path.contains("/planets") {
        return mock_planets();
    }

    empty_collection()
}

/// `{ count: 0, next: null, previous: null, results: [] }`
pub fn empty_collection() -> Value {
    json!({
        "count": 0,
        "next": null,
        "previous": null,
        "results": []
    })
}

fn mock_people() -> Value {
    json!({
        "count": 5,
        "next": null,
        "previous": null,
        "results": [
            {
                "name": "Luke Skywalker",
                "height": "172",
                "mass": "77",
                "hair_color": "blond",
                "skin_color": "fair",
                "eye_color": "blue",
                "birth_year": "19BBY",
                "gender": "male",
                "homeworld": "https://swapi.py4e.com/api/planets/1/",
                "films": ["https://swapi.py4e.com/api/films/1/"],
                "species": [],
                "vehicles": [],
                "starships": [],
                "created": "2014-12-09T13:50:51.644000Z",
                "edited": "2014-12-20T21:17:56.891000Z",
                "url": "https://swapi.py4e.com/api/people/1/"
            },
            {
                "name": "Darth Vader",
                "height": "202",
                "mass": "136",
                "hair_color": "none",
                "skin_color": "white",
                "eye_color": "yellow",
                "birth_year": "41.9BBY",
                "gender": "male",
                "homeworld": "https://swapi.py4e.com/api/planets/1/",
                "films": ["https://swapi.py4e.com/api/films/1/"],
                "species": [],
                "vehicles": [],
                "starships": [],
                "created": "2014-12-09T13:50:51.644000Z",
                "edited": "2014-12-20T21:17:56.891000Z",
                "url": "https://swapi.py4e.com/api/people/4/"
            }
        ]
    })
}

fn mock_planets() -> Value {
    json!({
        "count": 3,
        "next": null,
        "previous": null,
        "results": [
            {
                "name": "Tatooine",
                "rotation_period": "23",
                "orbital_period": "304",
                "diameter": "10465",
                "climate": "arid",
                "gravity": "1 standard",
                "terrain": "desert",
                "surface_water": "1",
                "population": "200000",
                "residents": ["https://swapi.py4e.com/api/people/1/"],
                "films": ["https://swapi.py4e.com/api/films/1/"],
                "created": "2014-12-09T13:50:49.641000Z",
                "edited": "2014-12-20T20:58:18.411000Z",
                "url": "https://swapi.py4e.com/api/planets/1/"
            }
        ]
    })
}
