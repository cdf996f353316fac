use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use std::sync::Arc;

use crate::{
    domain::audio::{
        AudioJobService, JobStatus, JobStatusQuery, JobStatusResponse, QueueAudioRequest,
        QueueAudioResponse,
    },
    error::{AppError, AppResult},
};

pub struct AudioController {
    audio_service: Arc<AudioJobService>,
}

impl AudioController {
    pub fn new(audio_service: Arc<AudioJobService>) -> Self {
        Self { audio_service }
    }

    /// POST /api/queue-audio-generation - Queue a script for speech synthesis
    ///
    /// Responds as soon as the job is recorded; synthesis continues in the
    /// background.
    pub async fn queue(
        State(controller): State<Arc<AudioController>>,
        payload: Result<Json<QueueAudioRequest>, JsonRejection>,
    ) -> AppResult<Json<QueueAudioResponse>> {
        let Json(request) = payload?;
        let request_id = controller.audio_service.submit(request)?;

        Ok(Json(QueueAudioResponse::queued(request_id)))
    }

    /// GET /api/queue-audio-generation?requestId=... - Poll a queued job
    pub async fn status(
        State(controller): State<Arc<AudioController>>,
        query: Result<Query<JobStatusQuery>, QueryRejection>,
    ) -> AppResult<Json<JobStatusResponse>> {
        let Query(query) = query?;
        let request_id = query.job_id()?;

        match controller.audio_service.status(&request_id) {
            JobStatus::Pending { phase, queued_at } => {
                Ok(Json(JobStatusResponse::pending(phase, queued_at)))
            }
            JobStatus::Completed {
                audio_url,
                metadata,
            } => Ok(Json(JobStatusResponse::completed(audio_url, metadata))),
            JobStatus::Failed { message } => Err(AppError::ExternalService(message)),
            JobStatus::NotFound => Err(AppError::NotFound("Request not found".to_string())),
        }
    }
}
