use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use video_application::ApplicationError;

use crate::error::{error_mapper, HttpError};

/// JSON body that is deserialized and validated before reaching the handler.
/// Every malformed body is a 400; only a wrong content type is a 415.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(map_rejection)?;
        value
            .validate()
            .map_err(|errors| error_mapper(ApplicationError::from(errors)))?;
        Ok(ValidatedJson(value))
    }
}

fn map_rejection(rejection: JsonRejection) -> HttpError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => HttpError::UnsupportedMediaType {
            message: "expected a JSON body with content type application/json".to_string(),
        },
        other => HttpError::Validation {
            message: other.body_text(),
        },
    }
}
