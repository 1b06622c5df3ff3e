use std::sync::Arc;

use chrono::Duration;
use tracing::debug;
use tripflow_cache::TtlCache;
use tripflow_core::GeoPoint;

use crate::error::ResolutionError;
use crate::search::PlaceSearch;

/// Resolves a destination string to a centre point, one provider call per
/// cache miss. Only hits are cached: an unknown destination is re-queried
/// every time.
pub struct DestinationCenterResolver<S> {
    search: Arc<S>,
    cache: TtlCache<String, GeoPoint>,
}

impl<S: PlaceSearch> DestinationCenterResolver<S> {
    pub fn new(search: Arc<S>, ttl: Duration) -> Self {
        Self {
            search,
            cache: TtlCache::new(ttl),
        }
    }

    pub fn cache(&self) -> &TtlCache<String, GeoPoint> {
        &self.cache
    }

    pub async fn resolve(&self, destination: &str) -> Result<Option<GeoPoint>, ResolutionError> {
        let key = destination.trim().to_lowercase();
        if key.is_empty() {
            return Ok(None);
        }

        if let Some(center) = self.cache.get(&key) {
            debug!(destination = %key, "destination center cache hit");
            return Ok(Some(center));
        }

        // The provider's own ranking is trusted here; no re-scoring.
        let center = self
            .search
            .search_text(destination, None)
            .await?
            .into_iter()
            .next()
            .and_then(|candidate| candidate.location);

        if let Some(center) = center {
            self.cache.set(key, center);
        }
        Ok(center)
    }
}
