use thiserror::Error;
use tripflow_core::ParseError;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generative backend is not configured: {0}")]
    NotConfigured(&'static str),

    #[error("generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generative backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("generation response could not be decoded: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    #[error("generative backend returned no text")]
    EmptyResponse,
}

/// Why a plan could not be produced. No partial plan is ever returned.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("model output is not a usable plan: {0}")]
    Parse(#[from] ParseError),
}
