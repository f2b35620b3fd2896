use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use video_domain::{RequestId, VideoArtifact};

/// Shared by the form and JSON entry points. `text` is trimmed while it is
/// deserialized, so a missing, null, or whitespace-only value all fail the
/// same length rule.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GenerateVideoRequest {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, message = "text is required"))]
    pub text: String,
}

impl GenerateVideoRequest {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            text: text.as_ref().trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateVideoResponse {
    pub request_id: RequestId,
    pub video_path: std::path::PathBuf,
    pub video_size_bytes: u64,
    pub audio_duration_ms: u64,
    pub subtitle_count: usize,
}

impl GenerateVideoResponse {
    pub fn video(&self) -> VideoArtifact {
        VideoArtifact {
            request_id: self.request_id.clone(),
            path: self.video_path.clone(),
            size_bytes: self.video_size_bytes,
        }
    }
}

fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|text| text.trim().to_string()).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_text_fails_validation() {
        let request: GenerateVideoRequest =
            serde_json::from_str(r#"{"text": "  \n\t "}"#).expect("valid json");
        assert!(request.text.is_empty());
        assert!(request.validate().is_err());
    }

    #[test]
    fn missing_and_null_text_fail_validation() {
        let missing: GenerateVideoRequest = serde_json::from_str("{}").expect("valid json");
        let null: GenerateVideoRequest =
            serde_json::from_str(r#"{"text": null}"#).expect("valid json");
        assert!(missing.validate().is_err());
        assert!(null.validate().is_err());
    }

    #[test]
    fn text_is_trimmed_on_input() {
        let request: GenerateVideoRequest =
            serde_json::from_str(r#"{"text": "  नमस्ते दुनिया  "}"#).expect("valid json");
        assert_eq!(request.text, "नमस्ते दुनिया");
        assert!(request.validate().is_ok());
        assert_eq!(GenerateVideoRequest::new(" एक ").text, "एक");
    }
}
