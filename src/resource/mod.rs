//! Resource layer
//!
//! Typed SWAPI records and the browse operations built on the fetch pipeline.
//!
//! # Architecture
//!
//! - [`types`] - Resource types, record structs and paged collections
//! - [`fetcher`] - List pages, detail and related lookups, global search
//! - [`filter`] - Filter state and the client-side filter predicate

pub mod fetcher;
pub mod filter;
pub mod types;

pub use fetcher::{
    detail_path, fetch_all, fetch_one, fetch_page, fetch_pages, fetch_related, global_search,
    list_path, GlobalSearch, Pager,
};
pub use filter::{
    apply_filters, display_option, filter_options, matches_filters, FilterOption, FilterState,
    ResourceFilters,
};
pub use types::{
    Film, Page, ParseResourceTypeError, Person, Planet, ResourceType, Species, Starship,
    SwapiResource, Vehicle,
};
