use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use video_domain::{RgbColor, SubtitleBuilder, SubtitleStyle};

mod loader;
mod logging;

pub use loader::{load_config, load_config_from, ConfigError, CONFIG_ENV_PREFIX};
pub use logging::setup_logging;

pub type AppConfig = VideoConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_true")]
    pub ansi: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub tts: TtsConfig,
    #[serde(default)]
    pub subtitles: SubtitleConfig,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub encoder: EncoderConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub cleanup: CleanupConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    #[serde(default = "default_tts_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Unset means the request may block indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleConfig {
    #[serde(default = "default_words_per_chunk")]
    pub words_per_chunk: usize,
    #[serde(default = "default_max_line_chars")]
    pub max_line_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default = "default_outline_color")]
    pub outline_color: String,
    #[serde(default = "default_outline_width")]
    pub outline_width: u32,
    #[serde(default = "default_alignment")]
    pub alignment: u32,
    #[serde(default = "default_margin_v")]
    pub margin_v: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,
    #[serde(default = "default_background_image")]
    pub background_image: PathBuf,
    #[serde(default = "default_preset")]
    pub preset: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupConfig {
    #[serde(default = "default_cleanup_delay_secs")]
    pub delay_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_download_name")]
    pub download_name: String,
}

impl VideoConfig {
    /// Rejects settings that would only fail later, mid-request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.service.subtitles.builder()?;
        self.service.style.to_style()?;
        if self.service.limits.max_text_chars == 0 {
            return Err(ConfigError::Invalid(
                "service.limits.max_text_chars must be greater than zero".to_string(),
            ));
        }
        if self.service.http.download_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "service.http.download_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl TtsConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl SubtitleConfig {
    pub fn builder(&self) -> Result<SubtitleBuilder, ConfigError> {
        SubtitleBuilder::new(self.words_per_chunk, self.max_line_chars)
            .map_err(|err| ConfigError::Invalid(format!("service.subtitles: {err}")))
    }
}

impl StyleConfig {
    pub fn to_style(&self) -> Result<SubtitleStyle, ConfigError> {
        if self.font_size == 0 {
            return Err(ConfigError::Invalid(
                "service.style.font_size must be greater than zero".to_string(),
            ));
        }
        let parse = |key: &str, value: &str| {
            value
                .parse::<RgbColor>()
                .map_err(|err| ConfigError::Invalid(format!("service.style.{key}: {err}")))
        };
        Ok(SubtitleStyle {
            font_size: self.font_size,
            primary_color: parse("primary_color", &self.primary_color)?,
            outline_color: parse("outline_color", &self.outline_color)?,
            outline_width: self.outline_width,
            alignment: self.alignment,
            margin_v: self.margin_v,
        })
    }
}

impl CleanupConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            ansi: default_true(),
        }
    }
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_tts_endpoint(),
            language: default_language(),
            user_agent: default_user_agent(),
            request_timeout_secs: None,
        }
    }
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            words_per_chunk: default_words_per_chunk(),
            max_line_chars: default_max_line_chars(),
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            primary_color: default_primary_color(),
            outline_color: default_outline_color(),
            outline_width: default_outline_width(),
            alignment: default_alignment(),
            margin_v: default_margin_v(),
        }
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            background_image: default_background_image(),
            preset: default_preset(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            work_dir: default_work_dir(),
        }
    }
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            delay_secs: default_cleanup_delay_secs(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_text_chars: default_max_text_chars(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            download_name: default_download_name(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    10_000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tts_endpoint() -> String {
    "https://translate.google.com/translate_tts".to_string()
}

fn default_language() -> String {
    "hi".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko)".to_string()
}

fn default_words_per_chunk() -> usize {
    8
}

fn default_max_line_chars() -> usize {
    45
}

fn default_font_size() -> u32 {
    28
}

fn default_primary_color() -> String {
    "#FFFFFF".to_string()
}

fn default_outline_color() -> String {
    "#000000".to_string()
}

fn default_outline_width() -> u32 {
    1
}

fn default_alignment() -> u32 {
    10
}

fn default_margin_v() -> u32 {
    30
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_background_image() -> PathBuf {
    PathBuf::from("background.jpg")
}

fn default_preset() -> String {
    "medium".to_string()
}

fn default_work_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_cleanup_delay_secs() -> u64 {
    5
}

fn default_max_text_chars() -> usize {
    5_000
}

fn default_download_name() -> String {
    "hindi_video.mp4".to_string()
}
