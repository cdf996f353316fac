use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use parking_lot::Mutex;
use podcast_backend::domain::audio::SpeakerVoice;
use podcast_backend::infrastructure::repositories::{FalTtsRepository, TtsRepository};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

const MODEL: &str = "fal-ai/playai/tts/dialog";

/// In-process stand-in for the fal queue API
#[derive(Default)]
struct MockQueue {
    submissions: Mutex<Vec<(Option<String>, Value)>>,
    status_polls: AtomicUsize,
    reject_submission: bool,
    final_status: Option<&'static str>,
}

async fn submit(
    State(queue): State<Arc<MockQueue>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    queue.submissions.lock().push((auth, body));

    if queue.reject_submission {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": [{"msg": "input too long"}, {"msg": "unknown voice"}]})),
        );
    }

    (StatusCode::OK, Json(json!({"request_id": "req-1"})))
}

async fn status(
    State(queue): State<Arc<MockQueue>>,
    Path(request_id): Path<String>,
) -> Json<Value> {
    assert_eq!(request_id, "req-1");
    let polls = queue.status_polls.fetch_add(1, Ordering::SeqCst);

    let status = match polls {
        0 => "IN_QUEUE",
        1 => "IN_PROGRESS",
        _ => queue.final_status.unwrap_or("COMPLETED"),
    };

    Json(json!({
        "status": status,
        "queue_position": 0,
        "logs": [{"message": "loading model"}]
    }))
}

async fn result(Path(request_id): Path<String>) -> Json<Value> {
    assert_eq!(request_id, "req-1");
    Json(json!({
        "audio": {"url": "https://cdn.example/req-1.mp3", "duration": 12.5}
    }))
}

async fn start_mock(queue: MockQueue) -> (String, Arc<MockQueue>) {
    let queue = Arc::new(queue);
    let app = Router::new()
        .route(&format!("/{}", MODEL), post(submit))
        .route(&format!("/{}/requests/:id/status", MODEL), get(status))
        .route(&format!("/{}/requests/:id", MODEL), get(result))
        .with_state(queue.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), queue)
}

fn repository(base_url: String) -> FalTtsRepository {
    FalTtsRepository::new(
        "test-key".to_string(),
        base_url,
        MODEL.to_string(),
        Duration::from_millis(5),
    )
}

fn voices() -> Vec<SpeakerVoice> {
    vec![
        SpeakerVoice {
            voice: "Jennifer (English (US)/American)".to_string(),
            turn_prefix: "Speaker 1: ".to_string(),
        },
        SpeakerVoice {
            voice: "Furio (English (IT)/Italian)".to_string(),
            turn_prefix: "Speaker 2: ".to_string(),
        },
    ]
}

#[tokio::test]
async fn it_should_submit_poll_and_fetch_the_result() {
    let (base_url, queue) = start_mock(MockQueue::default()).await;

    let audio = repository(base_url)
        .synthesize("Speaker 1: Hi\nSpeaker 2: Hello", &voices())
        .await
        .unwrap();

    assert_eq!(audio.audio_url.as_deref(), Some("https://cdn.example/req-1.mp3"));
    assert_eq!(audio.duration_seconds, Some(12.5));
    assert_eq!(queue.status_polls.load(Ordering::SeqCst), 3);

    let submissions = queue.submissions.lock();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].0.as_deref(), Some("Key test-key"));
    assert_eq!(
        submissions[0].1,
        json!({
            "input": "Speaker 1: Hi\nSpeaker 2: Hello",
            "voices": [
                {"voice": "Jennifer (English (US)/American)", "turn_prefix": "Speaker 1: "},
                {"voice": "Furio (English (IT)/Italian)", "turn_prefix": "Speaker 2: "}
            ]
        })
    );
}

#[tokio::test]
async fn it_should_surface_validation_details_from_a_rejected_submission() {
    let (base_url, queue) = start_mock(MockQueue {
        reject_submission: true,
        ..Default::default()
    })
    .await;

    let err = repository(base_url)
        .synthesize("Hello", &voices())
        .await
        .unwrap_err();

    assert_eq!(err, "input too long; unknown voice");
    assert_eq!(queue.status_polls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn it_should_fail_on_an_unexpected_queue_status() {
    let (base_url, _queue) = start_mock(MockQueue {
        final_status: Some("CANCELLED"),
        ..Default::default()
    })
    .await;

    let err = repository(base_url)
        .synthesize("Hello", &voices())
        .await
        .unwrap_err();

    assert_eq!(err, "Unexpected speech queue status: CANCELLED");
}

#[tokio::test]
async fn it_should_report_an_unreachable_service() {
    // Nothing listens on the discard port
    let err = repository("http://127.0.0.1:9".to_string())
        .synthesize("Hello", &voices())
        .await
        .unwrap_err();

    assert!(
        err.starts_with("Speech service unreachable"),
        "Unexpected error: {}",
        err
    );
}
