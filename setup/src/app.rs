use std::sync::Arc;

use anyhow::{Context, Error};

use video_application::{
    DeferredCleanup, GenerateVideoUseCase, GenerateVideoUseCaseImpl, PipelineSettings,
};
use video_configuration::{AppConfig, ServerConfig};
use video_domain::{SpeechSynthesizerPort, VideoCompositorPort};
use video_http_server::{create_app_routes, AppState};
use video_infra_ffmpeg::FfmpegCompositor;
use video_infra_tts_rest::{TranslateTtsAdapter, TranslateTtsSettings};

pub async fn build_and_run(config: AppConfig, server_config: ServerConfig) -> Result<(), Error> {
    let app = Application::new(config).await?;
    app.run(server_config).await
}

pub struct Application {
    pub config: AppConfig,
    pub state: AppState,
}

impl Application {
    /// Wires adapters into the use case. Must be called inside a tokio
    /// runtime because it starts the cleanup worker.
    pub async fn new(config: AppConfig) -> Result<Self, Error> {
        config.validate()?;
        let service = &config.service;

        tracing::info!(
            language = %service.tts.language,
            words_per_chunk = service.subtitles.words_per_chunk,
            work_dir = %service.storage.work_dir.display(),
            ffmpeg = %service.encoder.ffmpeg_path.display(),
            cleanup_delay_secs = service.cleanup.delay_secs,
            "initializing video application"
        );

        tokio::fs::create_dir_all(&service.storage.work_dir)
            .await
            .with_context(|| {
                format!(
                    "cannot create work dir {}",
                    service.storage.work_dir.display()
                )
            })?;
        if !tokio::fs::try_exists(&service.encoder.background_image)
            .await
            .unwrap_or(false)
        {
            tracing::warn!(
                path = %service.encoder.background_image.display(),
                "background image is missing; every request will fail until it exists"
            );
        }

        let synthesizer: Arc<dyn SpeechSynthesizerPort> =
            Arc::new(TranslateTtsAdapter::new(TranslateTtsSettings {
                endpoint: service.tts.endpoint.clone(),
                user_agent: service.tts.user_agent.clone(),
                request_timeout: service.tts.request_timeout(),
            })?);
        let compositor: Arc<dyn VideoCompositorPort> = Arc::new(FfmpegCompositor::new(
            service.encoder.ffmpeg_path.clone(),
            service.encoder.preset.clone(),
        ));

        let settings = PipelineSettings {
            language: service.tts.language.clone(),
            work_dir: service.storage.work_dir.clone(),
            background_image: service.encoder.background_image.clone(),
            style: service.style.to_style()?,
            subtitles: service.subtitles.builder()?,
            max_text_chars: service.limits.max_text_chars,
        };
        let usecase: Arc<dyn GenerateVideoUseCase> =
            Arc::new(GenerateVideoUseCaseImpl::new(synthesizer, compositor, settings));

        let cleanup = DeferredCleanup::spawn(service.cleanup.delay());
        let state = AppState::new(usecase, cleanup, service.http.download_name.as_str());

        Ok(Self { config, state })
    }

    pub async fn run(self, server_config: ServerConfig) -> Result<(), Error> {
        tracing::info!(
            host = %server_config.host,
            port = server_config.port,
            "starting video HTTP routes"
        );

        create_app_routes(self.state, &server_config.bind_address())
            .await
            .map_err(|err| anyhow::anyhow!("server startup failed: {err}"))
    }
}
