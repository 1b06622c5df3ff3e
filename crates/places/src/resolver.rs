use std::collections::HashSet;
use std::sync::Arc;

use chrono::Duration;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};
use tripflow_cache::TtlCache;
use tripflow_core::{GeoPoint, ResolvedPlace};
use tripflow_observability::AppMetrics;

use crate::center::DestinationCenterResolver;
use crate::error::ResolutionError;
use crate::ranker::{hashtags_for, rank_candidates};
use crate::search::{LocationBias, PlaceCandidate, PlaceSearch};

pub const LOCATION_BIAS_RADIUS_METERS: f64 = 50_000.0;
pub const PHOTO_MAX_PX: u32 = 400;

const MAX_CONCURRENT_LOOKUPS: usize = 8;

pub fn place_cache_key(place_name: &str, destination: &str) -> String {
    format!(
        "{}::{}",
        place_name.trim().to_lowercase(),
        destination.trim().to_lowercase()
    )
}

pub struct PlaceResolver<S> {
    search: Arc<S>,
    centers: DestinationCenterResolver<S>,
    cache: TtlCache<String, ResolvedPlace>,
    metrics: Arc<AppMetrics>,
}

impl<S: PlaceSearch> PlaceResolver<S> {
    pub fn new(search: S, ttl: Duration, metrics: Arc<AppMetrics>) -> Self {
        let search = Arc::new(search);
        Self {
            centers: DestinationCenterResolver::new(Arc::clone(&search), ttl),
            search,
            cache: TtlCache::new(ttl),
            metrics,
        }
    }

    pub fn search(&self) -> &S {
        &self.search
    }

    pub fn centers(&self) -> &DestinationCenterResolver<S> {
        &self.centers
    }

    pub fn place_cache(&self) -> &TtlCache<String, ResolvedPlace> {
        &self.cache
    }

    /// Resolves one name. A miss, or a best candidate scoring below zero,
    /// is cached and returned as `found: false`.
    #[instrument(skip(self, center))]
    pub async fn resolve_place(
        &self,
        place_name: &str,
        destination: &str,
        center: Option<GeoPoint>,
    ) -> Result<ResolvedPlace, ResolutionError> {
        let key = place_cache_key(place_name, destination);
        if let Some(hit) = self.cache.get(&key) {
            self.metrics.record_place_cache(true);
            debug!(key = %key, "place cache hit");
            return Ok(hit);
        }
        self.metrics.record_place_cache(false);

        let bias = center.map(|center| LocationBias::circle(center, LOCATION_BIAS_RADIUS_METERS));
        self.metrics.inc_provider_call();
        let mut candidates = self.search.search_text(place_name, bias).await?;

        let destination_label = destination.trim();
        if candidates.is_empty() && !destination_label.is_empty() {
            self.metrics.inc_provider_call();
            candidates = self
                .search
                .search_text(&format!("{place_name}, {destination_label}"), None)
                .await?;
        }

        let resolved = match rank_candidates(candidates, destination, center)
            .into_iter()
            .next()
        {
            Some((score, best)) if score >= 0 => self.build_resolved(best),
            Some((score, best)) => {
                debug!(score, candidate = %best.display_name, "best candidate scored below zero");
                ResolvedPlace::not_found()
            }
            None => ResolvedPlace::not_found(),
        };

        self.cache.set(key, resolved.clone());
        self.metrics.record_resolution(resolved.found);
        Ok(resolved)
    }

    /// Resolves every distinct name against one shared destination centre.
    /// Output follows first-seen input order with exact duplicates removed.
    /// A failed lookup becomes `found: false` instead of failing the batch.
    #[instrument(skip(self, names), fields(names = names.len()))]
    pub async fn resolve_batch(
        &self,
        names: &[String],
        destination: &str,
    ) -> Vec<(String, ResolvedPlace)> {
        let mut seen = HashSet::new();
        let unique = names
            .iter()
            .filter(|name| seen.insert(name.as_str()))
            .cloned()
            .collect::<Vec<_>>();

        let center = match self.centers.resolve(destination).await {
            Ok(center) => center,
            Err(error) => {
                warn!(destination = %destination, error = %error, "destination center lookup failed");
                None
            }
        };

        let results = stream::iter(unique)
            .map(move |name| async move {
                let resolved = match self.resolve_place(&name, destination, center).await {
                    Ok(resolved) => resolved,
                    Err(error) => {
                        warn!(place = %name, error = %error, "place lookup failed");
                        ResolvedPlace::not_found()
                    }
                };
                (name, resolved)
            })
            .buffered(MAX_CONCURRENT_LOOKUPS)
            .collect::<Vec<_>>()
            .await;

        info!(
            destination = %destination,
            resolved = results.iter().filter(|(_, place)| place.found).count(),
            total = results.len(),
            "place batch resolved"
        );
        results
    }

    fn build_resolved(&self, candidate: PlaceCandidate) -> ResolvedPlace {
        let hashtags = hashtags_for(&candidate);
        let photo_url = candidate
            .photo_refs
            .first()
            .map(|photo_ref| self.search.photo_url(photo_ref, PHOTO_MAX_PX, PHOTO_MAX_PX));

        ResolvedPlace {
            found: true,
            canonical_name: Some(candidate.display_name),
            address: candidate.formatted_address,
            rating: candidate.rating,
            user_rating_count: candidate.user_rating_count,
            google_place_id: Some(candidate.id),
            location: candidate.location,
            photo_url,
            hashtags,
        }
    }
}
