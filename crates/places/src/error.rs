use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("place search is not configured: {0}")]
    NotConfigured(&'static str),

    #[error("place search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("place search returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("place search response could not be decoded: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    #[error("place search failed: {0}")]
    Provider(String),
}
