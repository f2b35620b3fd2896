use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use validator::Validate;

use video_application::{ApplicationError, GenerateVideoRequest};

use crate::delivery::deliver_video;
use crate::error::{error_mapper, HttpError};
use crate::state::AppState;
use crate::template::render_form;

pub async fn show_form() -> Html<String> {
    Html(render_form(None))
}

/// Same pipeline as the JSON endpoint; failures re-render the page with the
/// message and the matching status code.
pub async fn submit_form(
    State(state): State<AppState>,
    form: Result<Form<GenerateVideoRequest>, FormRejection>,
) -> Response {
    let request = match form {
        Ok(Form(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "unreadable form submission");
            return form_error(HttpError::Validation {
                message: "text is required".to_string(),
            });
        }
    };

    if let Err(errors) = request.validate() {
        return form_error(error_mapper(ApplicationError::from(errors)));
    }

    tracing::info!(
        text_chars = request.text.chars().count(),
        "received form video request"
    );

    let result = match state.usecase.generate(request).await {
        Ok(result) => result,
        Err(error) => {
            tracing::error!(error = %error, "form video request failed");
            return form_error(error_mapper(error));
        }
    };

    match deliver_video(&result.video(), &state.download_name, &state.cleanup).await {
        Ok(response) => response,
        Err(error) => form_error(error),
    }
}

fn form_error(error: HttpError) -> Response {
    let status: StatusCode = error.status();
    (status, Html(render_form(Some(error.message())))).into_response()
}
