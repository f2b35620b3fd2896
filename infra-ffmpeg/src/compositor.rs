use std::io;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use video_domain::{CompositionJob, DomainError, VideoArtifact, VideoCompositorPort};

use crate::args::build_args;

const STDERR_TAIL_LINES: usize = 4;

pub struct FfmpegCompositor {
    binary: PathBuf,
    preset: String,
}

impl FfmpegCompositor {
    pub fn new(binary: impl Into<PathBuf>, preset: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            preset: preset.into(),
        }
    }
}

#[async_trait]
impl VideoCompositorPort for FfmpegCompositor {
    async fn compose(&self, job: CompositionJob) -> Result<VideoArtifact, DomainError> {
        if !tokio::fs::try_exists(&job.background_image)
            .await
            .unwrap_or(false)
        {
            return Err(DomainError::encoding(
                format!(
                    "background image {} not found",
                    job.background_image.display()
                ),
                None,
            ));
        }

        let args = build_args(&job, &self.preset);
        tracing::debug!(
            request_id = %job.request_id,
            binary = %self.binary.display(),
            "running encoder"
        );

        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|err| {
                let message = if err.kind() == io::ErrorKind::NotFound {
                    format!("encoder `{}` not found", self.binary.display())
                } else {
                    format!("failed to start encoder: {err}")
                };
                DomainError::encoding(message, None)
            })?;

        if !output.status.success() {
            let excerpt = stderr_excerpt(&output.stderr);
            tracing::warn!(
                request_id = %job.request_id,
                exit_code = ?output.status.code(),
                stderr = %excerpt,
                "encoder failed"
            );
            let message = if excerpt.is_empty() {
                format!("encoder exited with {}", output.status)
            } else {
                format!("encoder exited with {}: {excerpt}", output.status)
            };
            return Err(DomainError::encoding(message, output.status.code()));
        }

        let metadata = tokio::fs::metadata(&job.output).await.map_err(|err| {
            DomainError::encoding(
                format!(
                    "encoder reported success but {} is unreadable: {err}",
                    job.output.display()
                ),
                Some(0),
            )
        })?;

        Ok(VideoArtifact {
            request_id: job.request_id,
            path: job.output,
            size_bytes: metadata.len(),
        })
    }
}

/// Last few non-empty stderr lines, joined on one line.
fn stderr_excerpt(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let mut tail: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .rev()
        .take(STDERR_TAIL_LINES)
        .collect();
    tail.reverse();
    tail.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_keeps_last_lines_in_order() {
        let stderr = b"line 1\n\nline 2\nline 3\n  line 4 \nline 5\n";
        assert_eq!(
            stderr_excerpt(stderr),
            "line 2 | line 3 | line 4 | line 5"
        );
    }

    #[test]
    fn excerpt_of_silence_is_empty() {
        assert_eq!(stderr_excerpt(b"\n \n"), "");
    }
}
