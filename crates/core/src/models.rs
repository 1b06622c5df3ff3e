use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MAX_PLAN_DAYS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Meal,
    Sightseeing,
    Activity,
}

impl ActivityType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "meal" => Some(Self::Meal),
            "sightseeing" => Some(Self::Sightseeing),
            "activity" => Some(Self::Activity),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Meal => "meal",
            Self::Sightseeing => "sightseeing",
            Self::Activity => "activity",
        }
    }
}

/// Lowercased, with everything but alphanumerics removed, so
/// "Old Town Square" and "old-town square!" collapse to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaceKey(String);

impl PlaceKey {
    pub fn from_name(name: &str) -> Self {
        Self(
            name.chars()
                .filter(|ch| ch.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub order: usize,
    pub place_name: String,
    pub description: String,
    pub activity_type: ActivityType,
    pub duration_min: u32,
}

impl Place {
    pub fn key(&self) -> PlaceKey {
        PlaceKey::from_name(&self.place_name)
    }

    pub fn search_text(&self) -> String {
        format!("{} {}", self.place_name, self.description).to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub day_number: u32,
    pub places: Vec<Place>,
}

impl Day {
    pub fn empty(day_number: u32) -> Self {
        Self {
            day_number,
            places: Vec::new(),
        }
    }

    pub fn reindex_places(&mut self) {
        for (idx, place) in self.places.iter_mut().enumerate() {
            place.order = idx;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub days: Vec<Day>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A miss is `{ "found": false }` on the wire; every other field is omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPlace {
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hashtags: Vec<String>,
}

impl ResolvedPlace {
    pub fn not_found() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub destination: String,
    pub days: u32,
    #[serde(default)]
    pub companions: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub transportation: Option<String>,
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub use_web_search: bool,
}

impl PlanRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.destination.trim().is_empty() {
            return Err(ValidationError::Missing {
                field: "destination",
            });
        }

        if self.days == 0 || self.days > MAX_PLAN_DAYS {
            return Err(ValidationError::OutOfRange {
                field: "days",
                reason: format!("expected 1..={MAX_PLAN_DAYS}, got {}", self.days),
            });
        }

        Ok(())
    }
}
