use super::script_repository::ScriptRepository;
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.95;
const MAX_OUTPUT_TOKENS: u32 = 2048;

/// OpenAI chat-completions implementation of the script repository
pub struct OpenAiScriptRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiScriptRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }

    fn build_request(
        &self,
        system_prompt: &str,
        prompt: &str,
    ) -> Result<CreateChatCompletionRequest, OpenAIError> {
        CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt)
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()?
                    .into(),
            ])
            .temperature(TEMPERATURE)
            .top_p(TOP_P)
            .max_tokens(MAX_OUTPUT_TOKENS)
            .build()
    }
}

#[async_trait]
impl ScriptRepository for OpenAiScriptRepository {
    async fn generate(&self, system_prompt: &str, prompt: &str) -> Result<String, String> {
        let start_time = std::time::Instant::now();

        tracing::info!(
            model = %self.model,
            prompt_length = prompt.len(),
            "Calling OpenAI chat completions"
        );

        let request = self
            .build_request(system_prompt, prompt)
            .map_err(|e| format!("Invalid script generation request: {}", e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                "OpenAI chat completion failed"
            );
            format!("Script generation failed: {}", e)
        })?;

        let total_tokens = response.usage.as_ref().map(|u| u.total_tokens).unwrap_or(0);
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| "Script generation returned no content".to_string())?;

        tracing::info!(
            provider = "openai",
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            total_tokens = total_tokens,
            script_length = content.len(),
            "Script generation completed"
        );

        Ok(content)
    }
}
