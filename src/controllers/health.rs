use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use crate::domain::audio::JobTable;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Readiness: the job table is in-process, so being able to read it is enough
pub async fn health_ready(State(jobs): State<Arc<JobTable>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "jobs": jobs.counts(),
            "tts": "configured"
        })),
    )
}
