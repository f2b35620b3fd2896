use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use video_domain::{
    ArtifactSet, CompositionJob, PipelinePhase, RequestId, SpeechRequest, SpeechSynthesizerPort,
    SubtitleBuilder, SubtitleStyle, VideoArtifact, VideoCompositorPort,
};

use crate::artifacts::discard;
use crate::{ApplicationError, GenerateVideoRequest, GenerateVideoResponse};

#[async_trait]
pub trait GenerateVideoUseCase: Send + Sync {
    async fn generate(
        &self,
        request: GenerateVideoRequest,
    ) -> Result<GenerateVideoResponse, ApplicationError>;
}

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub language: String,
    pub work_dir: PathBuf,
    pub background_image: PathBuf,
    pub style: SubtitleStyle,
    pub subtitles: SubtitleBuilder,
    pub max_text_chars: usize,
}

pub struct GenerateVideoUseCaseImpl {
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    compositor: Arc<dyn VideoCompositorPort>,
    settings: PipelineSettings,
}

struct PipelineOutput {
    video: VideoArtifact,
    audio_duration_ms: u64,
    subtitle_count: usize,
}

impl GenerateVideoUseCaseImpl {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        compositor: Arc<dyn VideoCompositorPort>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            synthesizer,
            compositor,
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    fn validate(&self, request: &GenerateVideoRequest) -> Result<(), ApplicationError> {
        request.validate()?;
        let length = request.text.chars().count();
        if length > self.settings.max_text_chars {
            return Err(ApplicationError::Validation(format!(
                "text is too long ({length} characters, limit {})",
                self.settings.max_text_chars
            )));
        }
        Ok(())
    }

    async fn run(
        &self,
        text: &str,
        artifacts: &ArtifactSet,
    ) -> Result<PipelineOutput, ApplicationError> {
        let request_id = &artifacts.request_id;

        enter(request_id, PipelinePhase::Synthesizing);
        let audio = self
            .synthesizer
            .synthesize(
                SpeechRequest {
                    text: text.to_string(),
                    language: self.settings.language.clone(),
                },
                &artifacts.audio,
            )
            .await?;

        enter(request_id, PipelinePhase::BuildingSubtitles);
        let track = self.settings.subtitles.build(text, audio.duration_ms)?;
        tokio::fs::write(&artifacts.subtitles, track.to_srt())
            .await
            .map_err(|err| {
                ApplicationError::Internal(format!(
                    "failed to write subtitles to {}: {err}",
                    artifacts.subtitles.display()
                ))
            })?;

        enter(request_id, PipelinePhase::Encoding);
        let audio_duration_ms = audio.duration_ms;
        let video = self
            .compositor
            .compose(CompositionJob {
                request_id: request_id.clone(),
                background_image: self.settings.background_image.clone(),
                audio,
                subtitles: artifacts.subtitles.clone(),
                style: self.settings.style.clone(),
                output: artifacts.video.clone(),
            })
            .await?;

        Ok(PipelineOutput {
            video,
            audio_duration_ms,
            subtitle_count: track.chunks.len(),
        })
    }
}

#[async_trait]
impl GenerateVideoUseCase for GenerateVideoUseCaseImpl {
    async fn generate(
        &self,
        request: GenerateVideoRequest,
    ) -> Result<GenerateVideoResponse, ApplicationError> {
        self.validate(&request)?;

        let artifacts = ArtifactSet::new(&self.settings.work_dir, RequestId::generate());
        enter(&artifacts.request_id, PipelinePhase::Received);
        tracing::debug!(
            request_id = %artifacts.request_id,
            text_chars = request.text.chars().count(),
            word_count = request.text.split_whitespace().count(),
            "starting video pipeline"
        );

        match self.run(&request.text, &artifacts).await {
            Ok(output) => {
                discard(&artifacts.intermediates()).await;
                tracing::info!(
                    request_id = %artifacts.request_id,
                    audio_duration_ms = output.audio_duration_ms,
                    subtitle_count = output.subtitle_count,
                    video_size_bytes = output.video.size_bytes,
                    "video pipeline completed"
                );
                Ok(GenerateVideoResponse {
                    request_id: output.video.request_id,
                    video_path: output.video.path,
                    video_size_bytes: output.video.size_bytes,
                    audio_duration_ms: output.audio_duration_ms,
                    subtitle_count: output.subtitle_count,
                })
            }
            Err(err) => {
                enter(&artifacts.request_id, PipelinePhase::Failed);
                tracing::error!(
                    request_id = %artifacts.request_id,
                    error = %err,
                    "video pipeline failed"
                );
                discard(&artifacts.all()).await;
                Err(err)
            }
        }
    }
}

fn enter(request_id: &RequestId, phase: PipelinePhase) {
    tracing::debug!(request_id = %request_id, phase = %phase, "pipeline phase");
}
