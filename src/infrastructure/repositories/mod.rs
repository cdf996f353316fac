pub mod fal_tts_repository;
pub mod openai_script_repository;
pub mod script_repository;
pub mod tts_repository;

pub use fal_tts_repository::FalTtsRepository;
pub use openai_script_repository::OpenAiScriptRepository;
pub use script_repository::ScriptRepository;
pub use tts_repository::{SynthesizedAudio, TtsRepository};
