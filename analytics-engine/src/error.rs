use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed claims payload: {0}")]
    Payload(#[from] serde_json::Error),
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
