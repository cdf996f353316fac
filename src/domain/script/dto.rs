use super::error::ScriptServiceError;
use super::prompt::ScriptPrompt;
use crate::domain::audio::{ScriptFormat, VoiceSettings};
use serde::{Deserialize, Serialize};

const DEFAULT_LANGUAGE: &str = "English";

/// Request for POST /api/generate-text
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateScriptRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtopic: Option<String>,
    /// Target length in minutes
    #[serde(default)]
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_settings: Option<VoiceSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl GenerateScriptRequest {
    pub fn validate(self) -> Result<ScriptPrompt, ScriptServiceError> {
        let topic = self.topic.trim().to_string();
        if topic.is_empty() {
            return Err(ScriptServiceError::Invalid("Topic is required".to_string()));
        }

        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(ScriptServiceError::Invalid(
                "Duration must be a positive number of minutes".to_string(),
            ));
        }

        let speakers = self
            .voice_settings
            .filter(VoiceSettings::has_valid_speaker_count)
            .map(|settings| settings.speaker_count())
            .ok_or_else(|| {
                ScriptServiceError::Invalid(
                    "Valid voiceSettings with numberOfSpeakers is required".to_string(),
                )
            })?;

        let subtopic = self
            .subtopic
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let language = self
            .language
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        Ok(ScriptPrompt {
            topic,
            subtopic,
            duration_minutes: self.duration,
            speakers,
            language,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptMetadata {
    pub duration: f64,
    pub estimated_duration: f64,
    pub word_count: usize,
    pub format: ScriptFormat,
    pub language: String,
    pub topic: String,
    pub subtopic: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedScript {
    pub script: String,
    pub metadata: ScriptMetadata,
}

/// Response for POST /api/generate-text
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateScriptResponse {
    pub success: bool,
    pub script: String,
    pub metadata: ScriptMetadata,
}

impl From<GeneratedScript> for GenerateScriptResponse {
    fn from(generated: GeneratedScript) -> Self {
        Self {
            success: true,
            script: generated.script,
            metadata: generated.metadata,
        }
    }
}
