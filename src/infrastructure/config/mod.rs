use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Speech synthesis (fal.ai)
    pub fal_key: String,
    pub fal_queue_url: String,
    pub fal_tts_model: String,
    pub fal_poll_interval_ms: u64,
    // Script generation (OpenAI)
    pub openai_api_key: String,
    pub openai_script_model: String,
    pub script_cache_enabled: bool,
    // Job table
    pub job_retention_secs: u64,
    pub default_primary_voice: String,
    pub default_secondary_voice: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

pub const DEFAULT_PRIMARY_VOICE: &str = "Jennifer (English (US)/American)";
pub const DEFAULT_SECONDARY_VOICE: &str = "Furio (English (IT)/Italian)";

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| format!("missing required environment variable {}", key))
        };
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = Config {
            host: or_default("HOST", "0.0.0.0"),
            port: or_default("PORT", "8080").parse()?,
            environment: match or_default("ENVIRONMENT", "development").as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match or_default("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            fal_key: required("FAL_KEY")?,
            fal_queue_url: or_default("FAL_QUEUE_URL", "https://queue.fal.run")
                .trim_end_matches('/')
                .to_string(),
            fal_tts_model: or_default("FAL_TTS_MODEL", "fal-ai/playai/tts/dialog"),
            fal_poll_interval_ms: or_default("FAL_POLL_INTERVAL_MS", "1000").parse()?,
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_script_model: or_default("OPENAI_SCRIPT_MODEL", "gpt-4o-mini"),
            script_cache_enabled: or_default("SCRIPT_CACHE_ENABLED", "false").to_lowercase()
                == "true",
            job_retention_secs: or_default("JOB_RETENTION_SECS", "600").parse()?,
            default_primary_voice: or_default("DEFAULT_PRIMARY_VOICE", DEFAULT_PRIMARY_VOICE),
            default_secondary_voice: or_default("DEFAULT_SECONDARY_VOICE", DEFAULT_SECONDARY_VOICE),
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn job_retention(&self) -> Duration {
        Duration::from_secs(self.job_retention_secs)
    }

    pub fn fal_poll_interval(&self) -> Duration {
        Duration::from_millis(self.fal_poll_interval_ms)
    }
}
