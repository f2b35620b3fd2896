mod client;
mod duration;
mod segment;

pub use client::{TranslateTtsAdapter, TranslateTtsSettings};
pub use duration::mp3_duration_ms;
pub use segment::{split_for_tts, MAX_SEGMENT_CHARS};
