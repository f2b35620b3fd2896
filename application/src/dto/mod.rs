mod generate_video;

pub use generate_video::{GenerateVideoRequest, GenerateVideoResponse};
