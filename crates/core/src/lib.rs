pub mod classify;
pub mod dedup;
pub mod error;
pub mod extract;
pub mod keywords;
pub mod models;
pub mod normalize;
pub mod planner;
pub mod reorder;

pub use classify::{classify_activity, is_lodging_or_flight, is_repeatable_hub};
pub use dedup::dedupe_places;
pub use error::{ParseError, ValidationError};
pub use extract::extract_json_object;
pub use models::*;
pub use normalize::{normalize_plan, renumber_days};
pub use planner::build_plan_from_model_text;
pub use reorder::{area_hint, dominant_area, reorder_days_by_area};
