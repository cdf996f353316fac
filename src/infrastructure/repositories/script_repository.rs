use async_trait::async_trait;

/// Repository for script text generation.
/// Abstracts the underlying large-language-model provider
#[async_trait]
pub trait ScriptRepository: Send + Sync {
    /// Generate a completion for a system instruction and a user prompt
    ///
    /// # Errors
    /// Returns a human-readable message if the provider fails or returns
    /// no content
    async fn generate(&self, system_prompt: &str, prompt: &str) -> Result<String, String>;
}
