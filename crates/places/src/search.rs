use std::future::Future;

use serde::{Deserialize, Serialize};
use tripflow_core::GeoPoint;

use crate::error::ResolutionError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationBias {
    pub center: GeoPoint,
    pub radius_meters: f64,
}

impl LocationBias {
    pub fn circle(center: GeoPoint, radius_meters: f64) -> Self {
        Self {
            center,
            radius_meters,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceCandidate {
    pub id: String,
    pub display_name: String,
    pub formatted_address: Option<String>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<u32>,
    pub business_status: Option<String>,
    pub location: Option<GeoPoint>,
    pub photo_refs: Vec<String>,
    pub types: Vec<String>,
    pub editorial_summary: Option<String>,
}

impl PlaceCandidate {
    pub fn is_operational(&self) -> bool {
        self.business_status.as_deref() == Some("OPERATIONAL")
    }
}

/// Text search against a place provider. Results come back in the
/// provider's relevance order; implementations never retry.
pub trait PlaceSearch: Send + Sync {
    fn search_text(
        &self,
        query: &str,
        bias: Option<LocationBias>,
    ) -> impl Future<Output = Result<Vec<PlaceCandidate>, ResolutionError>> + Send;

    fn photo_url(&self, photo_ref: &str, max_width_px: u32, max_height_px: u32) -> String;
}
