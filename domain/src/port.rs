use std::path::Path;

use async_trait::async_trait;

use crate::{AudioArtifact, CompositionJob, DomainError, SpeechRequest, VideoArtifact};

#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    /// Writes the synthesized audio to `destination` and reports its duration.
    async fn synthesize(
        &self,
        request: SpeechRequest,
        destination: &Path,
    ) -> Result<AudioArtifact, DomainError>;
}

#[async_trait]
pub trait VideoCompositorPort: Send + Sync {
    async fn compose(&self, job: CompositionJob) -> Result<VideoArtifact, DomainError>;
}
