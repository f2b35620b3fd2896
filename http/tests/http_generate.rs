use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::serve;
use reqwest::{header, Client, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use video_application::{
    CleanupOutcome, CleanupStatus, DeferredCleanup, GenerateVideoUseCaseImpl, PipelineSettings,
};
use video_domain::{
    AudioArtifact, CompositionJob, DomainError, SpeechRequest, SpeechSynthesizerPort,
    SubtitleBuilder, SubtitleStyle, VideoArtifact, VideoCompositorPort,
};
use video_http_server::{build_router, AppState};

const FAKE_VIDEO: &[u8] = b"\x00\x00\x00\x18ftypmp42 not really a video";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Failure {
    None,
    Synthesis,
    Encoding,
}

struct StubSynthesizer {
    failure: Failure,
}

#[async_trait]
impl SpeechSynthesizerPort for StubSynthesizer {
    async fn synthesize(
        &self,
        _request: SpeechRequest,
        destination: &Path,
    ) -> Result<AudioArtifact, DomainError> {
        if self.failure == Failure::Synthesis {
            return Err(DomainError::synthesis("speech service returned 503"));
        }
        tokio::fs::write(destination, b"mp3")
            .await
            .map_err(|err| DomainError::internal_error(err.to_string()))?;
        Ok(AudioArtifact {
            path: destination.to_path_buf(),
            duration_ms: 4_000,
        })
    }
}

struct StubCompositor {
    failure: Failure,
}

#[async_trait]
impl VideoCompositorPort for StubCompositor {
    async fn compose(&self, job: CompositionJob) -> Result<VideoArtifact, DomainError> {
        tokio::fs::write(&job.output, FAKE_VIDEO)
            .await
            .map_err(|err| DomainError::internal_error(err.to_string()))?;
        if self.failure == Failure::Encoding {
            return Err(DomainError::encoding("Unable to open background.jpg", Some(1)));
        }
        Ok(VideoArtifact {
            request_id: job.request_id,
            path: job.output,
            size_bytes: FAKE_VIDEO.len() as u64,
        })
    }
}

struct TestServer {
    base_url: String,
    client: Client,
    work_dir: TempDir,
    cleanup: DeferredCleanup,
    server: JoinHandle<()>,
}

impl TestServer {
    async fn start(failure: Failure) -> Self {
        Self::start_with_delay(failure, Duration::from_millis(200)).await
    }

    async fn start_with_delay(failure: Failure, cleanup_delay: Duration) -> Self {
        let work_dir = tempfile::tempdir().expect("tempdir");
        let settings = PipelineSettings {
            language: "hi".to_string(),
            work_dir: work_dir.path().to_path_buf(),
            background_image: PathBuf::from("background.jpg"),
            style: SubtitleStyle::default(),
            subtitles: SubtitleBuilder::new(8, 45).expect("builder"),
            max_text_chars: 5_000,
        };
        let usecase = Arc::new(GenerateVideoUseCaseImpl::new(
            Arc::new(StubSynthesizer { failure }),
            Arc::new(StubCompositor { failure }),
            settings,
        ));
        let cleanup = DeferredCleanup::spawn(cleanup_delay);
        let app = build_router(AppState::new(usecase, cleanup.clone(), "hindi_video.mp4"));

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let server = tokio::spawn(async move {
            serve(listener, app).await.expect("server run");
        });

        Self {
            base_url: format!("http://{addr}"),
            client: Client::new(),
            work_dir,
            cleanup,
            server,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn files(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.work_dir.path())
            .expect("read dir")
            .map(|entry| entry.expect("entry").path())
            .collect()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn next_outcome(
    outcomes: &mut tokio::sync::broadcast::Receiver<CleanupOutcome>,
) -> CleanupOutcome {
    tokio::time::timeout(Duration::from_secs(5), outcomes.recv())
        .await
        .expect("cleanup ran in time")
        .expect("outcome")
}

async fn error_body(response: reqwest::Response) -> String {
    let body: Value = response.json().await.expect("json error body");
    body["error"].as_str().expect("error field").to_string()
}

#[tokio::test]
async fn index_serves_the_form() {
    let app = TestServer::start(Failure::None).await;

    let response = app.client.get(app.url("/")).send().await.expect("request");

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("body");
    assert!(body.contains(r#"<textarea name="text""#));
    assert!(body.contains(r#"method="post""#));
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestServer::start(Failure::None).await;

    let response = app
        .client
        .get(app.url("/health"))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("json");
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn api_streams_video_then_deletes_it() {
    let app = TestServer::start_with_delay(Failure::None, Duration::from_secs(2)).await;
    let mut outcomes = app.cleanup.subscribe();

    let response = app
        .client
        .post(app.url("/api"))
        .json(&json!({ "text": "नमस्ते दुनिया यह एक परीक्षण है" }))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "video/mp4");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        r#"attachment; filename="hindi_video.mp4""#
    );
    let body = response.bytes().await.expect("body");
    assert_eq!(body.as_ref(), FAKE_VIDEO);

    let remaining = app.files();
    assert_eq!(remaining.len(), 1, "only the video survives delivery");
    assert_eq!(
        remaining[0].extension().and_then(|e| e.to_str()),
        Some("mp4")
    );

    let outcome = next_outcome(&mut outcomes).await;
    assert_eq!(outcome.path, remaining[0]);
    assert_eq!(outcome.status, CleanupStatus::Deleted);
    assert_eq!(outcome.path.extension().and_then(|e| e.to_str()), Some("mp4"));
    assert!(app.files().is_empty());
}

#[tokio::test]
async fn api_rejects_non_json_content_type() {
    let app = TestServer::start(Failure::None).await;

    let response = app
        .client
        .post(app.url("/api"))
        .header(header::CONTENT_TYPE, "text/plain")
        .body("नमस्ते")
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(!error_body(response).await.is_empty());
}

#[tokio::test]
async fn api_rejects_malformed_missing_and_blank_text() {
    let app = TestServer::start(Failure::None).await;

    for body in [r#"{"text": "#, "{}", r#"{"text": "   "}"#, r#"{"text": 12}"#] {
        let response = app
            .client
            .post(app.url("/api"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .expect("request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body}");
        assert!(!error_body(response).await.is_empty());
    }
    assert!(app.files().is_empty());
}

#[tokio::test]
async fn api_maps_synthesis_failure_to_bad_gateway() {
    let app = TestServer::start(Failure::Synthesis).await;

    let response = app
        .client
        .post(app.url("/api"))
        .json(&json!({ "text": "नमस्ते" }))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(error_body(response).await.contains("speech synthesis failed"));
    assert!(app.files().is_empty());
}

#[tokio::test]
async fn api_maps_encoding_failure_to_server_error() {
    let app = TestServer::start(Failure::Encoding).await;

    let response = app
        .client
        .post(app.url("/api"))
        .json(&json!({ "text": "नमस्ते" }))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_body(response).await.contains("video encoding failed"));
    assert!(app.files().is_empty());
}

#[tokio::test]
async fn form_submission_downloads_video() {
    let app = TestServer::start(Failure::None).await;
    let mut outcomes = app.cleanup.subscribe();

    let response = app
        .client
        .post(app.url("/"))
        .form(&[("text", "नमस्ते दुनिया")])
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "video/mp4");
    assert_eq!(response.bytes().await.expect("body").as_ref(), FAKE_VIDEO);
    assert_eq!(next_outcome(&mut outcomes).await.status, CleanupStatus::Deleted);
}

#[tokio::test]
async fn blank_form_is_rerendered_with_message() {
    let app = TestServer::start(Failure::None).await;

    let response = app
        .client
        .post(app.url("/"))
        .form(&[("text", "  ")])
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.text().await.expect("body");
    assert!(body.contains("<textarea"));
    assert!(body.contains("text is required"));
}

#[tokio::test]
async fn form_encoding_failure_is_rendered_in_page() {
    let app = TestServer::start(Failure::Encoding).await;

    let response = app
        .client
        .post(app.url("/"))
        .form(&[("text", "नमस्ते")])
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let content_type = response.headers()[header::CONTENT_TYPE]
        .to_str()
        .expect("ascii")
        .to_string();
    assert!(content_type.starts_with("text/html"));
    assert!(response.text().await.expect("body").contains("video encoding failed"));
    assert!(app.files().is_empty());
}
