use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use async_openai::{config::OpenAIConfig, Client as OpenAiClient};
use podcast_backend::controllers::{audio::AudioController, script::ScriptController};
use podcast_backend::domain::audio::{AudioJobService, DefaultVoices, JobTable};
use podcast_backend::domain::script::ScriptService;
use podcast_backend::infrastructure::config::{Config, LogFormat};
use podcast_backend::infrastructure::http::{build_router, start_http_server};
use podcast_backend::infrastructure::repositories::{FalTtsRepository, OpenAiScriptRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Podcast Backend on {}:{}",
        config.host,
        config.port
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate provider repositories
    tracing::info!(
        queue_url = %config.fal_queue_url,
        model = %config.fal_tts_model,
        "Instantiating speech synthesis repository"
    );
    let tts_repo = Arc::new(FalTtsRepository::new(
        config.fal_key.clone(),
        config.fal_queue_url.clone(),
        config.fal_tts_model.clone(),
        config.fal_poll_interval(),
    ));

    tracing::info!(model = %config.openai_script_model, "Instantiating script repository");
    let openai_client = Arc::new(OpenAiClient::with_config(
        OpenAIConfig::new().with_api_key(config.openai_api_key.clone()),
    ));
    let script_repo = Arc::new(OpenAiScriptRepository::new(
        openai_client,
        config.openai_script_model.clone(),
    ));

    // 2. Job table: process-local, lost on restart
    let job_table = Arc::new(JobTable::new());
    tracing::info!(
        retention_secs = config.job_retention_secs,
        "In-memory job table created"
    );

    // 3. Instantiate services
    tracing::info!("Instantiating services...");
    let audio_service = Arc::new(AudioJobService::new(
        job_table.clone(),
        tts_repo,
        DefaultVoices {
            primary: config.default_primary_voice.clone(),
            secondary: config.default_secondary_voice.clone(),
        },
        config.job_retention(),
    ));
    let script_service = Arc::new(ScriptService::new(script_repo, config.script_cache_enabled));

    // 4. Instantiate controllers
    tracing::info!("Instantiating controllers...");
    let audio_controller = Arc::new(AudioController::new(audio_service));
    let script_controller = Arc::new(ScriptController::new(script_service));

    // Start HTTP server with all routes
    let app = build_router(&config, job_table, audio_controller, script_controller);
    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "podcast_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
