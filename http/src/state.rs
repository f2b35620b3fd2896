use std::sync::Arc;

use video_application::{DeferredCleanup, GenerateVideoUseCase};

#[derive(Clone)]
pub struct AppState {
    pub usecase: Arc<dyn GenerateVideoUseCase>,
    pub cleanup: DeferredCleanup,
    /// File name offered to the browser for every video.
    pub download_name: Arc<str>,
}

impl AppState {
    pub fn new(
        usecase: Arc<dyn GenerateVideoUseCase>,
        cleanup: DeferredCleanup,
        download_name: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            usecase,
            cleanup,
            download_name: download_name.into(),
        }
    }
}
