//! Google Places API (New) text search.

use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tripflow_core::GeoPoint;

use crate::error::ResolutionError;
use crate::search::{LocationBias, PlaceCandidate, PlaceSearch};

pub const DEFAULT_PLACES_BASE_URL: &str = "https://places.googleapis.com";

const FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,places.rating,\
places.userRatingCount,places.businessStatus,places.location,places.photos,places.types,\
places.editorialSummary";

#[derive(Debug, Clone)]
pub struct PlacesConfig {
    pub api_key: Option<String>,
    /// Browser-restricted key embedded in photo URLs handed to clients.
    /// Falls back to `api_key` when unset.
    pub photo_api_key: Option<String>,
    pub base_url: String,
    pub language_code: String,
}

impl PlacesConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("GOOGLE_PLACES_API_KEY")
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            photo_api_key: env::var("TRIPFLOW_PLACES_PHOTO_KEY")
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            base_url: env::var("TRIPFLOW_PLACES_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PLACES_BASE_URL.to_string()),
            language_code: env::var("TRIPFLOW_PLACES_LANGUAGE").unwrap_or_else(|_| "en".to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SearchTextResponse {
    #[serde(default)]
    places: Vec<ApiPlace>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ApiPlace {
    id: String,
    display_name: Option<LocalizedText>,
    formatted_address: Option<String>,
    rating: Option<f64>,
    user_rating_count: Option<u32>,
    business_status: Option<String>,
    location: Option<ApiLatLng>,
    photos: Vec<ApiPhoto>,
    types: Vec<String>,
    editorial_summary: Option<LocalizedText>,
}

#[derive(Debug, Default, Deserialize)]
struct LocalizedText {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiLatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ApiPhoto {
    name: String,
}

impl From<ApiPlace> for PlaceCandidate {
    fn from(place: ApiPlace) -> Self {
        Self {
            id: place.id,
            display_name: place.display_name.map(|name| name.text).unwrap_or_default(),
            formatted_address: place.formatted_address,
            rating: place.rating,
            user_rating_count: place.user_rating_count,
            business_status: place.business_status,
            location: place
                .location
                .map(|location| GeoPoint::new(location.latitude, location.longitude)),
            photo_refs: place.photos.into_iter().map(|photo| photo.name).collect(),
            types: place.types,
            editorial_summary: place
                .editorial_summary
                .map(|summary| summary.text)
                .filter(|text| !text.is_empty()),
        }
    }
}

pub struct GooglePlacesClient {
    http: Client,
    config: PlacesConfig,
}

impl GooglePlacesClient {
    pub fn new(config: PlacesConfig) -> Result<Self, ResolutionError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(6))
            .timeout(Duration::from_secs(20))
            .build()?;

        Ok(Self { http, config })
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }
}

impl PlaceSearch for GooglePlacesClient {
    async fn search_text(
        &self,
        query: &str,
        bias: Option<LocationBias>,
    ) -> Result<Vec<PlaceCandidate>, ResolutionError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ResolutionError::NotConfigured("GOOGLE_PLACES_API_KEY is not set"))?;

        let mut payload = json!({
            "textQuery": query,
            "languageCode": self.config.language_code,
        });
        if let Some(bias) = bias {
            payload["locationBias"] = json!({
                "circle": {
                    "center": {
                        "latitude": bias.center.latitude,
                        "longitude": bias.center.longitude
                    },
                    "radius": bias.radius_meters
                }
            });
        }

        let response = self
            .http
            .post(format!("{}/v1/places:searchText", self.base_url()))
            .header("X-Goog-Api-Key", api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResolutionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: SearchTextResponse =
            serde_json::from_str(&body).map_err(|source| ResolutionError::Decode { source })?;

        Ok(parsed.places.into_iter().map(PlaceCandidate::from).collect())
    }

    fn photo_url(&self, photo_ref: &str, max_width_px: u32, max_height_px: u32) -> String {
        format!(
            "{}/v1/{}/media?maxWidthPx={}&maxHeightPx={}&key={}",
            self.base_url(),
            photo_ref,
            max_width_px,
            max_height_px,
            self.config
                .photo_api_key
                .as_deref()
                .or(self.config.api_key.as_deref())
                .unwrap_or_default()
        )
    }
}
