use super::formatter::format_script;
use super::model::{AudioMetadata, JobId, ResolvedJob, AUDIO_FORMAT};
use super::table::JobTable;
use super::voice::{build_voice_configuration, DefaultVoices, SpeakerVoice};
use crate::infrastructure::repositories::{SynthesizedAudio, TtsRepository};
use std::sync::Arc;
use std::time::{Duration, Instant};

const MISSING_AUDIO_URL: &str = "No audio URL in response";
const UNKNOWN_FAILURE: &str = "Unknown error during audio generation";
const TASK_FAILURE: &str = "Audio generation task failed unexpectedly";
const MISSING_RECORD: &str = "Internal error: job record was not found when processing started";

/// Background half of a job: drives one record from queued to a terminal phase.
///
/// Only the workflow instance spawned for a job mutates that job's record, so
/// its phase transitions happen in order.
#[derive(Clone)]
pub struct SynthesisWorkflow {
    table: Arc<JobTable>,
    tts_repo: Arc<dyn TtsRepository>,
    default_voices: DefaultVoices,
    retention: Duration,
}

impl SynthesisWorkflow {
    pub fn new(
        table: Arc<JobTable>,
        tts_repo: Arc<dyn TtsRepository>,
        default_voices: DefaultVoices,
        retention: Duration,
    ) -> Self {
        Self {
            table,
            tts_repo,
            default_voices,
            retention,
        }
    }

    /// Run the job to completion. Never panics on provider failures; every
    /// outcome ends up in the resolved partition.
    pub async fn run(self, id: JobId) {
        let Some(job) = self.table.begin_processing(&id) else {
            tracing::error!(
                request_id = %id,
                defect = true,
                "No queued record for job when synthesis started"
            );
            self.resolve(ResolvedJob::failed(id, MISSING_RECORD));
            return;
        };

        let speakers = job.voice_settings.speaker_count();
        let formatted = format_script(&job.script, job.format, speakers);
        let voices = build_voice_configuration(&job.voice_settings, &self.default_voices);

        tracing::info!(
            request_id = %id,
            phase = "processing",
            format = %job.format,
            speakers = speakers,
            script_length = formatted.len(),
            "Starting audio synthesis"
        );

        let start_time = Instant::now();
        let result = self.call_provider(formatted, voices.clone()).await;
        let latency = start_time.elapsed();

        let resolved = match result {
            Ok(SynthesizedAudio {
                audio_url: Some(audio_url),
                duration_seconds,
            }) if !audio_url.trim().is_empty() => {
                tracing::info!(
                    request_id = %id,
                    phase = "completed",
                    latency_ms = latency.as_millis(),
                    duration_seconds = duration_seconds.unwrap_or(0.0),
                    "Audio synthesis completed"
                );
                ResolvedJob::completed(
                    id,
                    audio_url,
                    AudioMetadata {
                        duration: duration_seconds.unwrap_or(0.0),
                        format: AUDIO_FORMAT.to_string(),
                        voices,
                    },
                )
            }
            Ok(_) => {
                tracing::warn!(
                    request_id = %id,
                    latency_ms = latency.as_millis(),
                    "Speech provider returned no audio URL"
                );
                ResolvedJob::failed(id, MISSING_AUDIO_URL)
            }
            Err(message) => {
                tracing::warn!(
                    request_id = %id,
                    latency_ms = latency.as_millis(),
                    error = %message,
                    "Audio synthesis failed"
                );
                let message = if message.trim().is_empty() {
                    UNKNOWN_FAILURE.to_string()
                } else {
                    message
                };
                ResolvedJob::failed(id, message)
            }
        };

        self.resolve(resolved);
    }

    /// The provider call runs in its own task so a panic inside it still
    /// resolves the job.
    async fn call_provider(
        &self,
        text: String,
        voices: Vec<SpeakerVoice>,
    ) -> Result<SynthesizedAudio, String> {
        let tts_repo = self.tts_repo.clone();
        let handle = tokio::spawn(async move { tts_repo.synthesize(&text, &voices).await });

        match handle.await {
            Ok(result) => result,
            Err(join_error) => {
                tracing::error!(error = %join_error, "Speech synthesis task aborted");
                Err(TASK_FAILURE.to_string())
            }
        }
    }

    fn resolve(&self, resolved: ResolvedJob) {
        let id = resolved.id.clone();
        if !self.table.move_to_resolved(resolved) {
            tracing::warn!(request_id = %id, "Resolved job had no active record");
        }
        self.table.schedule_expiry(&id, self.retention);
    }
}
