pub mod dto;
pub mod error;
pub mod prompt;
pub mod service;

pub use dto::{GenerateScriptRequest, GenerateScriptResponse, GeneratedScript, ScriptMetadata};
pub use error::ScriptServiceError;
pub use prompt::ScriptPrompt;
pub use service::{ScriptService, ScriptServiceApi};
