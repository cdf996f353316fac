use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Upper bound on `numberOfSpeakers`; one voice entry is built per speaker
pub const MAX_SPEAKERS: u32 = 10;

/// Voice settings as submitted by the client.
///
/// Only `numberOfSpeakers` is interpreted by the job pipeline; the optional
/// per-speaker voice names override the configured defaults. Anything else
/// the client sends is kept untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSettings {
    pub number_of_speakers: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker1_voice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker2_voice: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VoiceSettings {
    pub fn with_speakers(number_of_speakers: u32) -> Self {
        Self {
            number_of_speakers,
            speaker1_voice: None,
            speaker2_voice: None,
            extra: Map::new(),
        }
    }

    /// Between one and `MAX_SPEAKERS` speakers
    pub fn has_valid_speaker_count(&self) -> bool {
        (1..=MAX_SPEAKERS).contains(&self.number_of_speakers)
    }

    pub fn speaker_count(&self) -> usize {
        self.number_of_speakers as usize
    }
}

/// One entry of the voice configuration sent to the speech service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerVoice {
    pub voice: String,
    pub turn_prefix: String,
}

/// Fallback voices used when a request does not name its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultVoices {
    pub primary: String,
    pub secondary: String,
}

/// Label that opens every turn of the speaker at `index` (0-based)
pub fn turn_prefix(index: usize) -> String {
    format!("Speaker {}: ", index + 1)
}

/// Build one voice entry per speaker.
///
/// Speaker 0 gets the primary voice, every other speaker the secondary one.
pub fn build_voice_configuration(
    settings: &VoiceSettings,
    defaults: &DefaultVoices,
) -> Vec<SpeakerVoice> {
    let primary = settings
        .speaker1_voice
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(&defaults.primary);
    let secondary = settings
        .speaker2_voice
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(&defaults.secondary);

    (0..settings.speaker_count())
        .map(|index| SpeakerVoice {
            voice: if index == 0 { primary } else { secondary }.to_string(),
            turn_prefix: turn_prefix(index),
        })
        .collect()
}
