use crate::e2e::helpers;

use helpers::assertions::assert_error_response;
use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;

const GENERATE_PATH: &str = "/api/generate-text";

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_a_dialogue_script(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            GENERATE_PATH,
            &json!({
                "topic": "Coffee",
                "subtopic": "Espresso",
                "duration": 2,
                "voiceSettings": {"numberOfSpeakers": 2}
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json_field("success"), &json!(true));
    assert_eq!(
        response.json_str("script"),
        Some("Speaker 1: Welcome to the show.\nSpeaker 2: Glad to be here.")
    );

    let metadata = response.json_field("metadata");
    assert_eq!(metadata["format"], "dialogue");
    assert_eq!(metadata["wordCount"], 12);
    assert_eq!(metadata["duration"], json!(2.0));
    assert_eq!(metadata["language"], "English");
    assert_eq!(metadata["topic"], "Coffee");
    assert_eq!(metadata["subtopic"], "Espresso");

    let prompts = ctx.scripts.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Coffee"));
    assert!(prompts[0].contains("Espresso"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_monologue_for_a_single_speaker(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            GENERATE_PATH,
            &json!({
                "topic": "Coffee",
                "duration": 1,
                "voiceSettings": {"numberOfSpeakers": 1},
                "language": "Spanish"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let metadata = response.json_field("metadata");
    assert_eq!(metadata["format"], "monologue");
    assert_eq!(metadata["language"], "Spanish");
    assert_eq!(metadata["subtopic"], serde_json::Value::Null);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_a_missing_topic(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            GENERATE_PATH,
            &json!({"duration": 1, "voiceSettings": {"numberOfSpeakers": 2}}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error_response(response.body.as_ref().unwrap(), None, "Topic is required");
    assert!(ctx.scripts.prompts().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_a_non_positive_duration(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            GENERATE_PATH,
            &json!({"topic": "Coffee", "duration": 0, "voiceSettings": {"numberOfSpeakers": 2}}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_error_message("Duration must be a positive number");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_provider_failures(ctx: &TestContext) {
    ctx.scripts.fail_with("Script generation failed: rate limited");

    let response = ctx
        .client
        .post(
            GENERATE_PATH,
            &json!({"topic": "Coffee", "duration": 1, "voiceSettings": {"numberOfSpeakers": 2}}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_response(
        response.body.as_ref().unwrap(),
        Some("error"),
        "Script generation failed: rate limited",
    );
}
