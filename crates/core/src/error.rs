use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("model response is empty")]
    EmptyInput,

    #[error("no valid JSON object found in model response")]
    NoJsonObject,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("field `{field}` is required")]
    Missing { field: &'static str },

    #[error("field `{field}` is out of range: {reason}")]
    OutOfRange { field: &'static str, reason: String },
}
