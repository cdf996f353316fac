use crate::domain::audio::SpeakerVoice;
use async_trait::async_trait;

/// Audio produced by the speech synthesis provider.
///
/// Both fields are optional because providers do not always return them;
/// the caller decides what a missing URL means.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynthesizedAudio {
    pub audio_url: Option<String>,
    pub duration_seconds: Option<f64>,
}

/// Repository for text-to-speech synthesis.
/// Abstracts the hosted speech provider (fal.ai PlayAI dialog, ...)
///
/// Implementations are responsible for:
/// - Submitting the script with one voice per speaker
/// - Waiting for the provider to finish, however long that takes
/// - Reporting the hosted audio URL and its duration
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize a (possibly speaker-tagged) script
    ///
    /// # Arguments
    /// * `text` - The script to speak; dialogue lines carry their turn prefix
    /// * `voices` - One voice per speaker, matched by turn prefix
    ///
    /// # Errors
    /// Returns a human-readable message if the provider rejects the request
    /// or is unavailable
    async fn synthesize(&self, text: &str, voices: &[SpeakerVoice])
        -> Result<SynthesizedAudio, String>;
}
