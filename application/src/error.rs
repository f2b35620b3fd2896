use thiserror::Error;
use validator::ValidationErrors;
use video_domain::DomainError;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ApplicationError::Validation(_) | ApplicationError::Domain(DomainError::Validation(_))
        )
    }

    /// Message safe to show to the end user.
    pub fn user_message(&self) -> String {
        match self {
            ApplicationError::Validation(message)
            | ApplicationError::Domain(DomainError::Validation(message)) => message.clone(),
            ApplicationError::Domain(DomainError::Synthesis(message)) => {
                format!("speech synthesis failed: {message}")
            }
            ApplicationError::Domain(DomainError::Encoding { message, .. }) => {
                format!("video encoding failed: {message}")
            }
            ApplicationError::Domain(DomainError::Internal(_)) | ApplicationError::Internal(_) => {
                "internal error while generating the video".to_string()
            }
        }
    }
}

impl From<ValidationErrors> for ApplicationError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                match &error.message {
                    Some(message) => messages.push(message.to_string()),
                    None => messages.push(format!("{field} is invalid ({})", error.code)),
                }
            }
        }
        messages.sort();
        ApplicationError::Validation(messages.join("; "))
    }
}
