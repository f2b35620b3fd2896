use std::io;
use std::path::Path;

/// Removes a file, treating "already gone" as success. Returns whether a file
/// was actually removed.
pub async fn remove_if_exists(path: &Path) -> io::Result<bool> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Best-effort removal of several artifacts; failures are logged only.
pub async fn discard(paths: &[&Path]) {
    for path in paths {
        match remove_if_exists(path).await {
            Ok(true) => tracing::debug!(path = %path.display(), "removed artifact"),
            Ok(false) => {}
            Err(err) => tracing::warn!(
                path = %path.display(),
                error = %err,
                "failed to remove artifact"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("gone.srt");
        assert!(!remove_if_exists(&path).await.expect("no error"));
    }

    #[tokio::test]
    async fn discard_removes_every_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let audio = dir.path().join("a.mp3");
        let subtitles = dir.path().join("a.srt");
        std::fs::write(&audio, b"mp3").expect("write");

        discard(&[audio.as_path(), subtitles.as_path()]).await;

        assert!(!audio.exists());
        assert!(!subtitles.exists());
    }
}
