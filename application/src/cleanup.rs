//! Delayed deletion of delivered videos.
//!
//! A single worker task owns a timer queue. Handlers push paths through a
//! channel, each path expires after the configured delay and is removed from
//! disk. Every attempt is published on a broadcast channel so callers can
//! observe outcomes; nothing is ever returned to the HTTP client.

use std::path::PathBuf;
use std::time::Duration;

use futures::StreamExt;
use tokio::sync::{broadcast, mpsc};
use tokio_util::time::DelayQueue;

use crate::artifacts::remove_if_exists;

const OUTCOME_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupStatus {
    Deleted,
    AlreadyGone,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOutcome {
    pub path: PathBuf,
    pub status: CleanupStatus,
}

#[derive(Clone)]
pub struct DeferredCleanup {
    jobs: mpsc::UnboundedSender<PathBuf>,
    outcomes: broadcast::Sender<CleanupOutcome>,
    delay: Duration,
}

impl DeferredCleanup {
    /// Starts the worker on the current tokio runtime.
    pub fn spawn(delay: Duration) -> Self {
        let (jobs, receiver) = mpsc::unbounded_channel();
        let (outcomes, _) = broadcast::channel(OUTCOME_CHANNEL_CAPACITY);
        tokio::spawn(run_worker(receiver, outcomes.clone(), delay));
        Self {
            jobs,
            outcomes,
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Queues `path` for deletion once the delay has elapsed. Jobs cannot be
    /// cancelled.
    pub fn schedule(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        tracing::debug!(
            path = %path.display(),
            delay_ms = self.delay.as_millis() as u64,
            "scheduling artifact cleanup"
        );
        if let Err(err) = self.jobs.send(path) {
            tracing::warn!(
                path = %err.0.display(),
                "cleanup worker is not running; artifact left on disk"
            );
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CleanupOutcome> {
        self.outcomes.subscribe()
    }
}

async fn run_worker(
    mut jobs: mpsc::UnboundedReceiver<PathBuf>,
    outcomes: broadcast::Sender<CleanupOutcome>,
    delay: Duration,
) {
    let mut queue: DelayQueue<PathBuf> = DelayQueue::new();
    let mut accepting = true;

    loop {
        tokio::select! {
            job = jobs.recv(), if accepting => match job {
                Some(path) => {
                    queue.insert(path, delay);
                }
                None => accepting = false,
            },
            Some(expired) = queue.next(), if !queue.is_empty() => {
                let outcome = delete_artifact(expired.into_inner()).await;
                // No subscribers is the normal case outside tests.
                let _ = outcomes.send(outcome);
            }
            else => break,
        }
    }

    tracing::debug!("cleanup worker stopped");
}

async fn delete_artifact(path: PathBuf) -> CleanupOutcome {
    let status = match remove_if_exists(&path).await {
        Ok(true) => {
            tracing::info!(path = %path.display(), "deleted delivered video");
            CleanupStatus::Deleted
        }
        Ok(false) => {
            tracing::debug!(path = %path.display(), "video already removed");
            CleanupStatus::AlreadyGone
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "video cleanup failed");
            CleanupStatus::Failed(err.to_string())
        }
    };
    CleanupOutcome { path, status }
}

impl std::fmt::Debug for DeferredCleanup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredCleanup")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn write_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"video").expect("write video");
        path
    }

    #[tokio::test(start_paused = true)]
    async fn file_survives_until_delay_then_is_deleted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_file(dir.path(), "ab12cd34.mp4");
        let cleanup = DeferredCleanup::spawn(Duration::from_secs(5));
        let mut outcomes = cleanup.subscribe();
        let started = tokio::time::Instant::now();

        cleanup.schedule(&path);
        tokio::time::advance(Duration::from_secs(4)).await;
        assert!(path.exists(), "video must stay available inside the window");

        let outcome = outcomes.recv().await.expect("outcome");
        assert_eq!(outcome.path, path);
        assert_eq!(outcome.status, CleanupStatus::Deleted);
        assert!(started.elapsed() >= Duration::from_secs(5));
        assert!(!path.exists());
    }

    #[tokio::test(start_paused = true)]
    async fn missing_file_is_reported_as_already_gone() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cleanup = DeferredCleanup::spawn(Duration::from_secs(1));
        let mut outcomes = cleanup.subscribe();

        cleanup.schedule(dir.path().join("never-written.mp4"));

        let outcome = outcomes.recv().await.expect("outcome");
        assert_eq!(outcome.status, CleanupStatus::AlreadyGone);
    }

    #[tokio::test(start_paused = true)]
    async fn deletion_failure_is_reported_not_propagated() {
        let dir = tempfile::tempdir().expect("tempdir");
        let not_a_file = dir.path().join("nested");
        std::fs::create_dir(&not_a_file).expect("mkdir");
        let cleanup = DeferredCleanup::spawn(Duration::from_millis(10));
        let mut outcomes = cleanup.subscribe();

        cleanup.schedule(&not_a_file);

        let outcome = outcomes.recv().await.expect("outcome");
        assert!(matches!(outcome.status, CleanupStatus::Failed(_)));
        assert!(not_a_file.exists());
    }

    #[tokio::test(start_paused = true)]
    async fn queued_jobs_still_run_after_handles_are_dropped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first = write_file(dir.path(), "first.mp4");
        let second = write_file(dir.path(), "second.mp4");
        let cleanup = DeferredCleanup::spawn(Duration::from_secs(2));
        let mut outcomes = cleanup.subscribe();

        cleanup.schedule(&first);
        cleanup.schedule(&second);
        drop(cleanup);

        let mut deleted = vec![
            outcomes.recv().await.expect("first outcome").path,
            outcomes.recv().await.expect("second outcome").path,
        ];
        deleted.sort();
        assert_eq!(deleted, vec![first.clone(), second.clone()]);
        assert!(!first.exists());
        assert!(!second.exists());
    }
}
