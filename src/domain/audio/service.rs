use super::dto::QueueAudioRequest;
use super::error::JobError;
use super::model::{ActiveJob, JobId, JobLookup, JobOutcome, JobStatus};
use super::table::{JobCounts, JobTable};
use super::voice::DefaultVoices;
use super::workflow::SynthesisWorkflow;
use crate::infrastructure::repositories::TtsRepository;
use std::sync::Arc;
use std::time::Duration;

/// Queues audio synthesis jobs and reports on them
pub struct AudioJobService {
    table: Arc<JobTable>,
    workflow: SynthesisWorkflow,
    retention: Duration,
}

impl AudioJobService {
    pub fn new(
        table: Arc<JobTable>,
        tts_repo: Arc<dyn TtsRepository>,
        default_voices: DefaultVoices,
        retention: Duration,
    ) -> Self {
        let workflow = SynthesisWorkflow::new(table.clone(), tts_repo, default_voices, retention);
        Self {
            table,
            workflow,
            retention,
        }
    }

    /// Validate a submission, record it as queued and start synthesis.
    ///
    /// Returns as soon as the job is recorded; synthesis runs on a detached
    /// task. Must be called from within a tokio runtime.
    pub fn submit(&self, request: QueueAudioRequest) -> Result<JobId, JobError> {
        let job = request.validate()?;

        let id = JobId::generate();
        tracing::info!(
            request_id = %id,
            phase = "queued",
            format = %job.format,
            speakers = job.voice_settings.number_of_speakers,
            script_length = job.script.len(),
            "Audio generation queued"
        );
        self.table.put(ActiveJob::queued(
            id.clone(),
            job.script,
            job.voice_settings,
            job.format,
        ));

        // No cancellation: the handle is dropped and the task runs until the
        // provider answers. A caller that stops polling leaves it running.
        tokio::spawn(self.workflow.clone().run(id.clone()));

        Ok(id)
    }

    /// Report the current state of a job.
    ///
    /// Reading a completed job arms its retention timer (once).
    pub fn status(&self, id: &JobId) -> JobStatus {
        match self.table.lookup(id) {
            JobLookup::Resolved(job) => match job.outcome {
                JobOutcome::Completed {
                    audio_url,
                    metadata,
                } => {
                    self.table.schedule_expiry(id, self.retention);
                    JobStatus::Completed {
                        audio_url,
                        metadata,
                    }
                }
                JobOutcome::Failed { message } => JobStatus::Failed { message },
            },
            JobLookup::Active(job) => JobStatus::Pending {
                phase: job.phase,
                queued_at: job.submitted_at,
            },
            JobLookup::NotFound => JobStatus::NotFound,
        }
    }

    pub fn counts(&self) -> JobCounts {
        self.table.counts()
    }
}
