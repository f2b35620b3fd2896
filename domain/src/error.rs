use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("video encoding failed: {message}")]
    Encoding {
        message: String,
        exit_code: Option<i32>,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn synthesis(message: impl Into<String>) -> Self {
        Self::Synthesis(message.into())
    }

    pub fn encoding(message: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self::Encoding {
            message: message.into(),
            exit_code,
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
