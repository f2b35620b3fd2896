use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Full 128-bit v4 uuid in simple form, so concurrent requests never
    /// share artifact paths.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The three files a single request owns, all derived from its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    pub request_id: RequestId,
    pub audio: PathBuf,
    pub subtitles: PathBuf,
    pub video: PathBuf,
}

impl ArtifactSet {
    pub fn new(work_dir: &Path, request_id: RequestId) -> Self {
        let id = request_id.as_str();
        Self {
            audio: work_dir.join(format!("{id}.mp3")),
            subtitles: work_dir.join(format!("{id}.srt")),
            video: work_dir.join(format!("{id}.mp4")),
            request_id,
        }
    }

    pub fn intermediates(&self) -> [&Path; 2] {
        [self.audio.as_path(), self.subtitles.as_path()]
    }

    pub fn all(&self) -> [&Path; 3] {
        [
            self.audio.as_path(),
            self.subtitles.as_path(),
            self.video.as_path(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    pub text: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    pub path: PathBuf,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleChunk {
    pub index: usize,
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
}

impl SubtitleChunk {
    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RgbColor {
    pub const WHITE: RgbColor = RgbColor::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: RgbColor = RgbColor::new(0x00, 0x00, 0x00);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// ASS colour literal: alpha, blue, green, red.
    pub fn to_ass(&self) -> String {
        format!("&H00{:02X}{:02X}{:02X}", self.blue, self.green, self.red)
    }
}

impl FromStr for RgbColor {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DomainError::validation(format!(
                "invalid colour `{value}`, expected #RRGGBB"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|err| DomainError::validation(format!("invalid colour `{value}`: {err}")))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleStyle {
    pub font_size: u32,
    pub primary_color: RgbColor,
    pub outline_color: RgbColor,
    pub outline_width: u32,
    pub alignment: u32,
    pub margin_v: u32,
}

impl SubtitleStyle {
    /// Renders the libass `force_style` value. Every field is numeric or a
    /// generated colour literal, so the result never needs quoting inside.
    pub fn force_style(&self) -> String {
        format!(
            "Fontsize={},PrimaryColour={},OutlineColour={},Outline={},Alignment={},MarginV={}",
            self.font_size,
            self.primary_color.to_ass(),
            self.outline_color.to_ass(),
            self.outline_width,
            self.alignment,
            self.margin_v,
        )
    }
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self {
            font_size: 28,
            primary_color: RgbColor::WHITE,
            outline_color: RgbColor::BLACK,
            outline_width: 1,
            alignment: 10,
            margin_v: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionJob {
    pub request_id: RequestId,
    pub background_image: PathBuf,
    pub audio: AudioArtifact,
    pub subtitles: PathBuf,
    pub style: SubtitleStyle,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoArtifact {
    pub request_id: RequestId,
    pub path: PathBuf,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    Received,
    Synthesizing,
    BuildingSubtitles,
    Encoding,
    Streaming,
    CleanupScheduled,
    Failed,
}

impl PipelinePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelinePhase::Received => "received",
            PipelinePhase::Synthesizing => "synthesizing",
            PipelinePhase::BuildingSubtitles => "building_subtitles",
            PipelinePhase::Encoding => "encoding",
            PipelinePhase::Streaming => "streaming",
            PipelinePhase::CleanupScheduled => "cleanup_scheduled",
            PipelinePhase::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
