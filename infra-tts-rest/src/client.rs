use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use video_domain::{AudioArtifact, DomainError, SpeechRequest, SpeechSynthesizerPort};

use crate::duration::mp3_duration_ms;
use crate::segment::{split_for_tts, MAX_SEGMENT_CHARS};

#[derive(Debug, Clone)]
pub struct TranslateTtsSettings {
    pub endpoint: String,
    pub user_agent: String,
    pub request_timeout: Option<Duration>,
}

/// Speech synthesis over the public translate TTS endpoint. Long text is sent
/// as several segment requests whose MP3 bodies are concatenated.
pub struct TranslateTtsAdapter {
    client: Client,
    endpoint: String,
}

impl TranslateTtsAdapter {
    pub fn new(settings: TranslateTtsSettings) -> Result<Self, DomainError> {
        let mut builder = Client::builder().user_agent(settings.user_agent);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| DomainError::internal_error(format!("failed to build http client: {err}")))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint,
        })
    }

    async fn fetch_segment(
        &self,
        segment: &str,
        language: &str,
        index: usize,
        total: usize,
    ) -> Result<Vec<u8>, DomainError> {
        let total_param = total.to_string();
        let index_param = index.to_string();
        let length_param = segment.chars().count().to_string();

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("ie", "UTF-8"),
                ("q", segment),
                ("tl", language),
                ("total", total_param.as_str()),
                ("idx", index_param.as_str()),
                ("textlen", length_param.as_str()),
                ("client", "tw-ob"),
            ])
            .send()
            .await
            .map_err(|err| DomainError::synthesis(format!("speech service unreachable: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::synthesis(format!(
                "speech service returned {status} for segment {}/{total}",
                index + 1
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| DomainError::synthesis(format!("failed to read speech audio: {err}")))?;
        if body.is_empty() {
            return Err(DomainError::synthesis(format!(
                "speech service returned empty audio for segment {}/{total}",
                index + 1
            )));
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizerPort for TranslateTtsAdapter {
    async fn synthesize(
        &self,
        request: SpeechRequest,
        destination: &Path,
    ) -> Result<AudioArtifact, DomainError> {
        let segments = split_for_tts(&request.text, MAX_SEGMENT_CHARS);
        if segments.is_empty() {
            return Err(DomainError::validation("nothing to synthesize"));
        }

        let total = segments.len();
        let mut bodies = Vec::with_capacity(total);
        for (index, segment) in segments.iter().enumerate() {
            let body = self
                .fetch_segment(segment, &request.language, index, total)
                .await?;
            tracing::debug!(
                segment = index + 1,
                total,
                bytes = body.len(),
                "received speech segment"
            );
            bodies.push(body);
        }

        let (audio, duration_ms) = tokio::task::spawn_blocking(move || {
            let mut duration_ms = 0u64;
            for body in &bodies {
                duration_ms += mp3_duration_ms(body)?;
            }
            Ok::<_, DomainError>((bodies.concat(), duration_ms))
        })
        .await
        .map_err(|err| DomainError::internal_error(format!("audio probe task failed: {err}")))??;

        tokio::fs::write(destination, &audio).await.map_err(|err| {
            DomainError::internal_error(format!(
                "failed to write audio to {}: {err}",
                destination.display()
            ))
        })?;

        tracing::info!(
            path = %destination.display(),
            segments = total,
            duration_ms,
            "speech synthesized"
        );

        Ok(AudioArtifact {
            path: destination.to_path_buf(),
            duration_ms,
        })
    }
}
