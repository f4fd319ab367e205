// Rejections raised by value objects and request parsing

use axum::http::StatusCode;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid date/time entries")]
    InvalidDateTime,

    #[error("Invalid time stamps")]
    InvalidTimeStamps,

    #[error("Invalid delta")]
    InvalidDelta,

    #[error("Invalid Device Location")]
    InvalidDeviceLocation,

    #[error("Invalid {kind} id: {value}")]
    InvalidId { kind: &'static str, value: String },

    #[error("{0} cannot be blank")]
    Blank(&'static str),

    #[error("{0}")]
    Rule(String),
}

impl ValidationError {
    pub fn rule(message: impl Into<String>) -> Self {
        ValidationError::Rule(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}
