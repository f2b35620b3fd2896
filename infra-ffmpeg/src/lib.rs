mod args;
mod compositor;

pub use args::{build_args, escape_filter_value, subtitle_filter};
pub use compositor::FfmpegCompositor;
