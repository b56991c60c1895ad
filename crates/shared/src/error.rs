use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Validation,
    Internal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Failure to interpret a selector value coming from the UI or the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("unknown measure '{0}'")]
    UnknownMeasure(String),
    #[error("unknown panel '{0}'")]
    UnknownPanel(String),
}

impl From<DomainError> for ApiError {
    fn from(value: DomainError) -> Self {
        let code = match value {
            DomainError::UnknownPanel(_) => ErrorCode::NotFound,
            DomainError::UnknownMeasure(_) => ErrorCode::Validation,
        };
        Self::new(code, value.to_string())
    }
}
