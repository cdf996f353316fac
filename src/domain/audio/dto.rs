use super::error::JobError;
use super::formatter::ScriptFormat;
use super::model::{ActivePhase, AudioMetadata, JobId};
use super::voice::VoiceSettings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const INVALID_SCRIPT: &str = "Script is required and must be a string";
const INVALID_VOICE_SETTINGS: &str = "Valid voiceSettings with numberOfSpeakers is required";

/// Request for POST /api/queue-audio-generation
///
/// Fields are kept loosely typed so that every shape problem is reported
/// with the same validation message instead of a deserializer error.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueAudioRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_settings: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Value>,
}

/// A submission that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub script: String,
    pub voice_settings: VoiceSettings,
    pub format: ScriptFormat,
}

impl QueueAudioRequest {
    pub fn validate(self) -> Result<NewJob, JobError> {
        let script = match self.script {
            Some(Value::String(script)) if !script.is_empty() => script,
            _ => return Err(JobError::Invalid(INVALID_SCRIPT.to_string())),
        };

        let voice_settings = match self.voice_settings {
            Some(raw @ Value::Object(_)) => serde_json::from_value::<VoiceSettings>(raw)
                .ok()
                .filter(VoiceSettings::has_valid_speaker_count)
                .ok_or_else(|| JobError::Invalid(INVALID_VOICE_SETTINGS.to_string()))?,
            _ => return Err(JobError::Invalid(INVALID_VOICE_SETTINGS.to_string())),
        };

        let format = match self.format {
            None | Some(Value::Null) => ScriptFormat::default(),
            Some(Value::String(format)) => ScriptFormat::from_label(&format),
            Some(_) => {
                return Err(JobError::Invalid("Format must be a string".to_string()));
            }
        };

        Ok(NewJob {
            script,
            voice_settings,
            format,
        })
    }
}

/// Response for POST /api/queue-audio-generation
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueAudioResponse {
    pub success: bool,
    pub request_id: JobId,
    pub status: ActivePhase,
    pub message: String,
}

impl QueueAudioResponse {
    pub fn queued(request_id: JobId) -> Self {
        Self {
            success: true,
            request_id,
            status: ActivePhase::Queued,
            message: "Audio generation has been queued".to_string(),
        }
    }
}

/// Query for GET /api/queue-audio-generation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusQuery {
    pub request_id: Option<String>,
}

impl JobStatusQuery {
    pub fn job_id(self) -> Result<JobId, JobError> {
        self.request_id
            .filter(|id| !id.trim().is_empty())
            .map(JobId::from)
            .ok_or_else(|| JobError::Invalid("Missing requestId parameter".to_string()))
    }
}

/// Pending or completed response for GET /api/queue-audio-generation
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponse {
    pub success: bool,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Milliseconds since the Unix epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queued_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AudioMetadata>,
}

impl JobStatusResponse {
    pub fn pending(phase: ActivePhase, queued_at: DateTime<Utc>) -> Self {
        let message = match phase {
            ActivePhase::Queued => "Your audio is queued for generation",
            ActivePhase::Processing => "Your audio is still being generated",
        };
        Self {
            success: true,
            status: "pending".to_string(),
            message: Some(message.to_string()),
            queued_at: Some(queued_at.timestamp_millis()),
            audio_url: None,
            metadata: None,
        }
    }

    pub fn completed(audio_url: String, metadata: AudioMetadata) -> Self {
        Self {
            success: true,
            status: "completed".to_string(),
            message: None,
            queued_at: None,
            audio_url: Some(audio_url),
            metadata: Some(metadata),
        }
    }
}
