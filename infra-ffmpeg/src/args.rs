use std::ffi::OsString;
use std::path::Path;

use video_domain::CompositionJob;

/// Escapes a value for use inside a filter option, then for the filtergraph
/// that contains it.
pub fn escape_filter_value(value: &str) -> String {
    let option_level = escape_with(value, &['\\', '\'', ':']);
    escape_with(&option_level, &['\\', '\'', '[', ']', ',', ';'])
}

fn escape_with(value: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        if special.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

pub fn subtitle_filter(job: &CompositionJob) -> String {
    format!(
        "subtitles=filename={}:force_style='{}'",
        escape_filter_value(&filter_path(&job.subtitles)),
        job.style.force_style()
    )
}

/// libass wants forward slashes even on Windows.
fn filter_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Full encoder argument vector for a still-image video with burned-in
/// subtitles. The audio stream is copied untouched.
pub fn build_args(job: &CompositionJob, preset: &str) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-y", "-nostdin", "-hide_banner", "-loglevel", "error"]
        .into_iter()
        .map(OsString::from)
        .collect();

    args.extend([
        OsString::from("-loop"),
        OsString::from("1"),
        OsString::from("-i"),
        job.background_image.clone().into_os_string(),
        OsString::from("-i"),
        job.audio.path.clone().into_os_string(),
        OsString::from("-vf"),
        OsString::from(subtitle_filter(job)),
        OsString::from("-c:v"),
        OsString::from("libx264"),
        OsString::from("-preset"),
        OsString::from(preset),
        OsString::from("-tune"),
        OsString::from("stillimage"),
        OsString::from("-c:a"),
        OsString::from("copy"),
        OsString::from("-pix_fmt"),
        OsString::from("yuv420p"),
        OsString::from("-shortest"),
        job.output.clone().into_os_string(),
    ]);
    args
}
