pub mod artifacts;
pub mod cleanup;
pub mod dto;
pub mod error;
pub mod usecase;

pub use cleanup::{CleanupOutcome, CleanupStatus, DeferredCleanup};
pub use dto::*;
pub use error::*;
pub use usecase::{GenerateVideoUseCase, GenerateVideoUseCaseImpl, PipelineSettings};
