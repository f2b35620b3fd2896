use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

use video_application::artifacts::discard;
use video_application::DeferredCleanup;
use video_domain::{PipelinePhase, VideoArtifact};

use crate::error::HttpError;

/// Streams the finished video as an attachment and hands the file to the
/// cleanup worker. The file is opened before scheduling, so the stream stays
/// valid even if deletion fires while the client is still reading.
pub async fn deliver_video(
    artifact: &VideoArtifact,
    download_name: &str,
    cleanup: &DeferredCleanup,
) -> Result<Response, HttpError> {
    let file = match tokio::fs::File::open(&artifact.path).await {
        Ok(file) => file,
        Err(err) => {
            tracing::error!(
                request_id = %artifact.request_id,
                path = %artifact.path.display(),
                error = %err,
                "finished video could not be opened"
            );
            discard(&[artifact.path.as_path()]).await;
            return Err(HttpError::Internal {
                message: "internal error while generating the video".to_string(),
            });
        }
    };

    tracing::debug!(
        request_id = %artifact.request_id,
        phase = %PipelinePhase::Streaming,
        size_bytes = artifact.size_bytes,
        "pipeline phase"
    );

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        download_name.replace(['"', '\\'], "_")
    ))
    .map_err(|err| HttpError::Internal {
        message: format!("invalid download name: {err}"),
    })?;

    let response = (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("video/mp4")),
            (header::CONTENT_DISPOSITION, disposition),
            (
                header::CONTENT_LENGTH,
                HeaderValue::from(artifact.size_bytes),
            ),
        ],
        Body::from_stream(ReaderStream::new(file)),
    )
        .into_response();

    cleanup.schedule(&artifact.path);
    tracing::debug!(
        request_id = %artifact.request_id,
        phase = %PipelinePhase::CleanupScheduled,
        delay_secs = cleanup.delay().as_secs(),
        "pipeline phase"
    );

    Ok(response)
}
