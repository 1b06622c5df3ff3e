use std::future::Future;

use crate::error::GenerationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationOptions {
    pub web_search_enabled: bool,
}

/// A text-in, text-out model. The returned text is untrusted and may wrap
/// the JSON in prose or code fences.
pub trait GenerativeBackend: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;
}
