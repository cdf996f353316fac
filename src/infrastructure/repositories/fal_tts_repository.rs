use super::tts_repository::{SynthesizedAudio, TtsRepository};
use crate::domain::audio::SpeakerVoice;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};

#[derive(Debug, Serialize)]
struct DialogRequest<'a> {
    input: &'a str,
    voices: &'a [SpeakerVoice],
}

#[derive(Debug, Deserialize)]
struct QueueSubmission {
    request_id: String,
    #[serde(default)]
    status_url: Option<String>,
    #[serde(default)]
    response_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueueStatus {
    status: String,
    #[serde(default)]
    queue_position: Option<u64>,
    #[serde(default)]
    logs: Option<Vec<QueueLog>>,
}

#[derive(Debug, Deserialize)]
struct QueueLog {
    message: String,
}

#[derive(Debug, Deserialize)]
struct DialogResult {
    #[serde(default)]
    audio: Option<AudioFile>,
}

#[derive(Debug, Deserialize)]
struct AudioFile {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
}

/// fal.ai queue implementation of the TTS repository.
///
/// Submits the dialog to the model's queue, polls the request status until
/// it completes and then fetches the result. There is no overall deadline:
/// the job waits as long as the provider keeps the request alive.
pub struct FalTtsRepository {
    http: reqwest::Client,
    api_key: String,
    queue_url: String,
    model: String,
    poll_interval: Duration,
}

impl FalTtsRepository {
    pub fn new(api_key: String, queue_url: String, model: String, poll_interval: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            queue_url: queue_url.trim_end_matches('/').to_string(),
            model: model.trim_matches('/').to_string(),
            poll_interval,
        }
    }

    fn submit_url(&self) -> String {
        format!("{}/{}", self.queue_url, self.model)
    }

    fn request_url(&self, request_id: &str) -> String {
        format!("{}/{}/requests/{}", self.queue_url, self.model, request_id)
    }

    fn auth_header(&self) -> String {
        format!("Key {}", self.api_key)
    }

    async fn submit(&self, text: &str, voices: &[SpeakerVoice]) -> Result<QueueSubmission, String> {
        let response = self
            .http
            .post(self.submit_url())
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .json(&DialogRequest { input: text, voices })
            .send()
            .await
            .map_err(|e| format!("Speech service unreachable: {}", e))?;

        read_json(response).await
    }

    async fn wait_until_complete(&self, status_url: &str, request_id: &str) -> Result<(), String> {
        let mut logs_seen = 0;

        loop {
            let response = self
                .http
                .get(status_url)
                .query(&[("logs", "1")])
                .header(reqwest::header::AUTHORIZATION, self.auth_header())
                .send()
                .await
                .map_err(|e| format!("Speech service unreachable: {}", e))?;
            let status: QueueStatus = read_json(response).await?;

            let logs = status.logs.unwrap_or_default();
            for log in logs.iter().skip(logs_seen) {
                tracing::debug!(fal_request_id = %request_id, "{}", log.message);
            }
            logs_seen = logs_seen.max(logs.len());

            match status.status.as_str() {
                "COMPLETED" => return Ok(()),
                "IN_QUEUE" => {
                    tracing::debug!(
                        fal_request_id = %request_id,
                        queue_position = ?status.queue_position,
                        "Speech request waiting in queue"
                    );
                }
                "IN_PROGRESS" => {}
                other => return Err(format!("Unexpected speech queue status: {}", other)),
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn fetch_result(&self, response_url: &str) -> Result<DialogResult, String> {
        let response = self
            .http
            .get(response_url)
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .send()
            .await
            .map_err(|e| format!("Speech service unreachable: {}", e))?;

        read_json(response).await
    }
}

#[async_trait]
impl TtsRepository for FalTtsRepository {
    async fn synthesize(
        &self,
        text: &str,
        voices: &[SpeakerVoice],
    ) -> Result<SynthesizedAudio, String> {
        let start_time = Instant::now();

        tracing::info!(
            model = %self.model,
            speakers = voices.len(),
            text_length = text.len(),
            text_preview = %text.chars().take(200).collect::<String>(),
            "Submitting speech synthesis request"
        );

        let submission = self.submit(text, voices).await?;
        let request_id = submission.request_id;
        let status_url = submission
            .status_url
            .unwrap_or_else(|| format!("{}/status", self.request_url(&request_id)));
        let response_url = submission
            .response_url
            .unwrap_or_else(|| self.request_url(&request_id));

        self.wait_until_complete(&status_url, &request_id).await?;
        let result = self.fetch_result(&response_url).await?;

        let audio = result.audio.unwrap_or(AudioFile {
            url: None,
            duration: None,
        });

        tracing::info!(
            provider = "fal",
            model = %self.model,
            fal_request_id = %request_id,
            latency_ms = start_time.elapsed().as_millis(),
            has_audio_url = audio.url.is_some(),
            "Speech synthesis finished"
        );

        Ok(SynthesizedAudio {
            audio_url: audio.url,
            duration_seconds: audio.duration,
        })
    }
}

/// Decode a successful JSON body, or turn an error response into a message
async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, String> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(error_message(status, &body));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| format!("Malformed speech service response: {}", e))
}

/// Prefer the service's `detail` field, which is either a string or a list
/// of validation errors carrying `msg`.
fn error_message(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| match value.get("detail") {
            Some(Value::String(detail)) => Some(detail.clone()),
            Some(Value::Array(items)) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        });

    match detail {
        Some(detail) => detail,
        None if !body.trim().is_empty() => {
            format!("Speech service error ({}): {}", status.as_u16(), body.trim())
        }
        None => format!("Speech service error ({})", status.as_u16()),
    }
}
