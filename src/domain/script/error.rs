use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ScriptServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
}

impl From<ScriptServiceError> for AppError {
    fn from(err: ScriptServiceError) -> Self {
        match err {
            ScriptServiceError::Invalid(msg) => AppError::BadRequest(msg),
            ScriptServiceError::Dependency(msg) => AppError::ExternalService(msg),
        }
    }
}
