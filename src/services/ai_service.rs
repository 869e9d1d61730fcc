use anyhow::Result;

/// Trait for generative AI backends (Gemini, ...)
#[async_trait::async_trait]
pub trait AIService: Send + Sync {
    /// Free-text prompt in, free-text completion out.
    async fn answer(&self, prompt: &str) -> Result<String>;
}
