use super::dto::{GenerateScriptRequest, GeneratedScript, ScriptMetadata};
use super::error::ScriptServiceError;
use super::prompt::{count_words, estimated_minutes, ScriptPrompt};
use crate::infrastructure::repositories::ScriptRepository;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

pub struct ScriptService {
    script_repo: Arc<dyn ScriptRepository>,
    cache: Option<Cache<String, GeneratedScript>>,
}

impl ScriptService {
    pub fn new(script_repo: Arc<dyn ScriptRepository>, cache_enabled: bool) -> Self {
        let cache = if cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(100)
                    .time_to_idle(Duration::from_secs(30 * 60)) // 30 minutes, refreshes on access
                    .build(),
            )
        } else {
            None
        };

        Self { script_repo, cache }
    }
}

#[async_trait]
pub trait ScriptServiceApi: Send + Sync {
    /// Generate a podcast script sized to the requested duration
    ///
    /// This operation:
    /// - Validates topic, duration and speaker count
    /// - Asks the text-generation provider for a script
    /// - Reports word count and estimated spoken duration
    async fn generate(
        &self,
        request: GenerateScriptRequest,
    ) -> Result<GeneratedScript, ScriptServiceError>;
}

#[async_trait]
impl ScriptServiceApi for ScriptService {
    async fn generate(
        &self,
        request: GenerateScriptRequest,
    ) -> Result<GeneratedScript, ScriptServiceError> {
        let prompt = request.validate()?;

        tracing::info!(
            topic = %prompt.topic,
            duration_minutes = prompt.duration_minutes,
            speakers = prompt.speakers,
            language = %prompt.language,
            "Script generation request"
        );

        let cache_key = prompt.cache_key();
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(&cache_key).await {
                tracing::info!(
                    topic = %prompt.topic,
                    word_count = cached.metadata.word_count,
                    "Script cache hit - returning cached script"
                );
                return Ok(cached);
            }
        }

        let script = self
            .script_repo
            .generate(&prompt.system_prompt(), &prompt.user_prompt())
            .await
            .map_err(ScriptServiceError::Dependency)?;

        let script = script.trim().to_string();
        if script.is_empty() {
            return Err(ScriptServiceError::Dependency(
                "Script generation returned an empty script".to_string(),
            ));
        }

        let generated = build_result(&prompt, script);

        tracing::info!(
            word_count = generated.metadata.word_count,
            estimated_minutes = format!("{:.1}", generated.metadata.estimated_duration),
            target_words = prompt.target_word_count(),
            "Generated script stats"
        );

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, generated.clone()).await;
        }

        Ok(generated)
    }
}

fn build_result(prompt: &ScriptPrompt, script: String) -> GeneratedScript {
    let word_count = count_words(&script);
    GeneratedScript {
        script,
        metadata: ScriptMetadata {
            duration: prompt.duration_minutes,
            estimated_duration: estimated_minutes(word_count),
            word_count,
            format: prompt.format(),
            language: prompt.language.clone(),
            topic: prompt.topic.clone(),
            subtopic: prompt.subtopic.clone(),
        },
    }
}
