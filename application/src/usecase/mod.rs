mod generate_video;

pub use generate_video::{GenerateVideoUseCase, GenerateVideoUseCaseImpl, PipelineSettings};
