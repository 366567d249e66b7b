/// Domain models for cloud-stt
///
/// These models describe audio inputs and normalized transcripts, independent of any provider.
use serde::{Deserialize, Serialize};

/// Audio encoding identifiers understood by the recognize endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    Flac,
    Linear16,
    Mp3,
    OggOpus,
}

impl std::fmt::Display for AudioEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioEncoding::Flac => write!(f, "FLAC"),
            AudioEncoding::Linear16 => write!(f, "LINEAR16"),
            AudioEncoding::Mp3 => write!(f, "MP3"),
            AudioEncoding::OggOpus => write!(f, "OGG_OPUS"),
        }
    }
}

/// Encoding and sample rate inferred for an audio file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AudioFormat {
    pub encoding: AudioEncoding,
    pub sample_rate_hertz: u32,
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self {
            encoding: AudioEncoding::Flac,
            sample_rate_hertz: 16000,
        }
    }
}

/// A single recognized word with its offsets into the audio
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptWord {
    pub word: String,
    pub start_time: f64, // seconds
    pub end_time: f64,   // seconds
}

/// Normalized transcription output
///
/// Callers must check `error` before trusting `text` or `chunks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranscriptResult {
    pub text: String,

    /// 0.0 to 1.0, or 0.0 when the provider reported none
    pub confidence: f64,

    /// Word-level timings in recognition order
    pub chunks: Vec<TranscriptWord>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranscriptResult {
    /// Creates a failed result with empty text
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_serializes_as_wire_name() {
        let json = serde_json::to_string(&AudioEncoding::OggOpus).unwrap();
        assert_eq!(json, "\"OGG_OPUS\"");
        let json = serde_json::to_string(&AudioEncoding::Linear16).unwrap();
        assert_eq!(json, "\"LINEAR16\"");
        assert_eq!(AudioEncoding::Mp3.to_string(), "MP3");
    }

    #[test]
    fn test_failure_result() {
        let result = TranscriptResult::failure("boom");
        assert!(result.is_error());
        assert_eq!(result.text, "");
        assert_eq!(result.confidence, 0.0);
        assert!(result.chunks.is_empty());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["error"], "boom");
        assert!(json.get("raw_response").is_none());
    }
}
