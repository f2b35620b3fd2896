use axum::{extract::State, response::Response};

use video_application::GenerateVideoRequest;

use crate::delivery::deliver_video;
use crate::error::{error_mapper, HttpError};
use crate::extract::ValidatedJson;
use crate::state::AppState;

pub async fn generate_video_api(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<GenerateVideoRequest>,
) -> Result<Response, HttpError> {
    tracing::info!(
        text_chars = request.text.chars().count(),
        "received api video request"
    );

    match state.usecase.generate(request).await {
        Ok(result) => deliver_video(&result.video(), &state.download_name, &state.cleanup).await,
        Err(error) => {
            tracing::error!(error = %error, "api video request failed");
            Err(error_mapper(error))
        }
    }
}
