use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use video_application::ApplicationError;
use video_domain::DomainError;

#[derive(Debug)]
pub enum HttpError {
    Validation { message: String },
    UnsupportedMediaType { message: String },
    Synthesis { message: String },
    Encoding { message: String },
    Internal { message: String },
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::Validation { .. } => StatusCode::BAD_REQUEST,
            HttpError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            HttpError::Synthesis { .. } => StatusCode::BAD_GATEWAY,
            HttpError::Encoding { .. } | HttpError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            HttpError::Validation { message }
            | HttpError::UnsupportedMediaType { message }
            | HttpError::Synthesis { message }
            | HttpError::Encoding { message }
            | HttpError::Internal { message } => message,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        (
            status,
            Json(json!({
                "error": self.message(),
            })),
        )
            .into_response()
    }
}

pub fn error_mapper(error: ApplicationError) -> HttpError {
    let message = error.user_message();
    match error {
        ApplicationError::Validation(_) | ApplicationError::Domain(DomainError::Validation(_)) => {
            HttpError::Validation { message }
        }
        ApplicationError::Domain(DomainError::Synthesis(_)) => HttpError::Synthesis { message },
        ApplicationError::Domain(DomainError::Encoding { .. }) => HttpError::Encoding { message },
        ApplicationError::Domain(DomainError::Internal(_)) | ApplicationError::Internal(_) => {
            HttpError::Internal { message }
        }
    }
}
