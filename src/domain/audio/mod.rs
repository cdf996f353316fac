pub mod dto;
pub mod error;
pub mod formatter;
pub mod model;
pub mod service;
pub mod table;
pub mod voice;
pub mod workflow;


pub use dto::{JobStatusQuery, JobStatusResponse, NewJob, QueueAudioRequest, QueueAudioResponse};
pub use error::JobError;
pub use formatter::{format_script, ScriptFormat};
pub use model::{ActivePhase, AudioMetadata, JobId, JobStatus};
pub use service::AudioJobService;
pub use table::{JobCounts, JobTable};
pub use voice::{
    build_voice_configuration, DefaultVoices, SpeakerVoice, VoiceSettings, MAX_SPEAKERS,
};
pub use workflow::SynthesisWorkflow;
