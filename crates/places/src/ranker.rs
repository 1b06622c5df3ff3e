//! Scoring of provider candidates against the trip destination.

use tripflow_core::keywords::{DEFAULT_HASHTAG, HASHTAG_FAMILIES};
use tripflow_core::GeoPoint;

use crate::search::PlaceCandidate;

pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const MAX_HASHTAGS: usize = 3;

const ADDRESS_MATCH_BONUS: i32 = 10;
const NEAR_RADIUS_KM: f64 = 60.0;
const NEAR_BONUS: i32 = 8;
const REGION_RADIUS_KM: f64 = 120.0;
const REGION_BONUS: i32 = 3;
const FAR_PENALTY: i32 = -10;
const OPERATIONAL_BONUS: i32 = 3;

pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

pub fn distance_bonus(distance_km: f64) -> i32 {
    if distance_km <= NEAR_RADIUS_KM {
        NEAR_BONUS
    } else if distance_km <= REGION_RADIUS_KM {
        REGION_BONUS
    } else {
        FAR_PENALTY
    }
}

pub fn score_candidate(
    candidate: &PlaceCandidate,
    destination: &str,
    center: Option<GeoPoint>,
) -> i32 {
    let mut score = 0;

    let destination = destination.trim().to_lowercase();
    if !destination.is_empty()
        && candidate
            .formatted_address
            .as_deref()
            .is_some_and(|address| address.to_lowercase().contains(&destination))
    {
        score += ADDRESS_MATCH_BONUS;
    }

    if let (Some(center), Some(location)) = (center, candidate.location) {
        score += distance_bonus(haversine_km(center, location));
    }

    if candidate.is_operational() {
        score += OPERATIONAL_BONUS;
    }

    score
}

/// Candidates paired with their score, best first. Ties keep provider order.
pub fn rank_candidates(
    candidates: Vec<PlaceCandidate>,
    destination: &str,
    center: Option<GeoPoint>,
) -> Vec<(i32, PlaceCandidate)> {
    let mut scored = candidates
        .into_iter()
        .map(|candidate| (score_candidate(&candidate, destination, center), candidate))
        .collect::<Vec<_>>();
    scored.sort_by(|(a, _), (b, _)| b.cmp(a));
    scored
}

pub fn hashtags_for(candidate: &PlaceCandidate) -> Vec<String> {
    let haystack = [
        candidate.display_name.as_str(),
        candidate.formatted_address.as_deref().unwrap_or_default(),
        candidate.editorial_summary.as_deref().unwrap_or_default(),
        candidate.types.join(" ").as_str(),
    ]
    .join(" ")
    .to_lowercase();

    let mut tags = HASHTAG_FAMILIES
        .iter()
        .filter(|family| family.matches(&haystack))
        .take(MAX_HASHTAGS)
        .map(|family| family.tag.to_string())
        .collect::<Vec<_>>();

    if tags.is_empty() {
        tags.push(DEFAULT_HASHTAG.to_string());
    }
    tags
}
