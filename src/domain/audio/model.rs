use super::formatter::ScriptFormat;
use super::voice::{SpeakerVoice, VoiceSettings};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Audio container reported for every completed job
pub const AUDIO_FORMAT: &str = "mp3";

/// Opaque job handle: 128 random bits rendered as 32 hex characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for JobId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Phase of a job that has not reached a terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivePhase {
    Queued,
    Processing,
}

impl ActivePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivePhase::Queued => "queued",
            ActivePhase::Processing => "processing",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveJob {
    pub id: JobId,
    pub phase: ActivePhase,
    pub submitted_at: DateTime<Utc>,
    pub script: String,
    pub voice_settings: VoiceSettings,
    pub format: ScriptFormat,
}

impl ActiveJob {
    pub fn queued(
        id: JobId,
        script: String,
        voice_settings: VoiceSettings,
        format: ScriptFormat,
    ) -> Self {
        Self {
            id,
            phase: ActivePhase::Queued,
            submitted_at: Utc::now(),
            script,
            voice_settings,
            format,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioMetadata {
    pub duration: f64,
    pub format: String,
    pub voices: Vec<SpeakerVoice>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Completed {
        audio_url: String,
        metadata: AudioMetadata,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedJob {
    pub id: JobId,
    pub resolved_at: DateTime<Utc>,
    pub outcome: JobOutcome,
}

impl ResolvedJob {
    pub fn completed(id: JobId, audio_url: String, metadata: AudioMetadata) -> Self {
        Self {
            id,
            resolved_at: Utc::now(),
            outcome: JobOutcome::Completed {
                audio_url,
                metadata,
            },
        }
    }

    pub fn failed(id: JobId, message: impl Into<String>) -> Self {
        Self {
            id,
            resolved_at: Utc::now(),
            outcome: JobOutcome::Failed {
                message: message.into(),
            },
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, JobOutcome::Completed { .. })
    }
}

/// Result of a single linearizable lookup across both partitions
#[derive(Debug, Clone, PartialEq)]
pub enum JobLookup {
    Resolved(ResolvedJob),
    Active(ActiveJob),
    NotFound,
}

/// What a status poll reports to the caller
#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    Pending {
        phase: ActivePhase,
        queued_at: DateTime<Utc>,
    },
    Completed {
        audio_url: String,
        metadata: AudioMetadata,
    },
    Failed {
        message: String,
    },
    NotFound,
}
