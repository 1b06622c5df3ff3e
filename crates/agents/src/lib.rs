//! Plan generation: prompt a generative model and normalize what comes back.

pub mod backend;
pub mod error;
pub mod gemini;
pub mod planner;
pub mod prompt;

pub use backend::{GenerationOptions, GenerativeBackend};
pub use error::{GenerationError, PlanError};
pub use gemini::{GeminiClient, GeminiConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
pub use planner::TripPlanner;
pub use prompt::build_plan_prompt;
