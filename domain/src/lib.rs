pub mod entity;
pub mod error;
pub mod port;
pub mod subtitle;

pub use entity::*;
pub use error::DomainError;
pub use port::*;
pub use subtitle::{format_timestamp, wrap_text, SubtitleBuilder, SubtitleTrack};
