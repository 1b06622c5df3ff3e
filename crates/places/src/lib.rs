//! Place resolution: provider search, candidate ranking and TTL caching.

pub mod center;
pub mod error;
pub mod google;
pub mod ranker;
pub mod resolver;
pub mod search;

pub use center::DestinationCenterResolver;
pub use error::ResolutionError;
pub use google::{GooglePlacesClient, PlacesConfig, DEFAULT_PLACES_BASE_URL};
pub use ranker::{haversine_km, hashtags_for, rank_candidates, score_candidate};
pub use resolver::{place_cache_key, PlaceResolver, LOCATION_BIAS_RADIUS_METERS, PHOTO_MAX_PX};
pub use search::{LocationBias, PlaceCandidate, PlaceSearch};
