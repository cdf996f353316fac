use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("{0}")]
    Invalid(String),
}

impl From<JobError> for AppError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::Invalid(msg) => AppError::BadRequest(msg),
        }
    }
}
