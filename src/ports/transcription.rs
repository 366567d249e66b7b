/// Speech model port trait
///
/// Defines the interface for speech-to-text providers.
/// Implementations: Google
use crate::domain::models::TranscriptResult;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";
pub const DEFAULT_RECOGNIZE_ENDPOINT: &str = "https://speech.googleapis.com/v1/speech:recognize";

/// Environment variable that overrides the configured API key
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Where tokens come from when no API key is configured
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CredentialSource {
    /// `gcloud auth print-access-token`
    #[default]
    Gcloud,
    /// Token stored in the OS keychain
    Keychain,
}

impl std::str::FromStr for CredentialSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gcloud" => Ok(CredentialSource::Gcloud),
            "keychain" => Ok(CredentialSource::Keychain),
            other => Err(format!(
                "unknown credential source '{}' (expected gcloud or keychain)",
                other
            )),
        }
    }
}

/// Configuration for a speech model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Bearer credential used as-is; falls back to `credential_source` when absent
    pub api_key: Option<String>,

    pub credential_source: CredentialSource,

    /// BCP-47 language tag (e.g., "en-US")
    pub language_code: String,

    /// Recognize endpoint URL
    pub endpoint: String,

    /// Request timeout; None keeps the HTTP client default
    pub timeout_secs: Option<u64>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            credential_source: CredentialSource::default(),
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            endpoint: DEFAULT_RECOGNIZE_ENDPOINT.to_string(),
            timeout_secs: None,
        }
    }
}

impl SpeechConfig {
    /// Builds a config from a JSON mapping. Missing keys take defaults.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| AppError::Config(format!("Invalid speech config: {}", e)))
    }

    /// Applies `GOOGLE_API_KEY` from the environment
    pub fn with_env_overrides(self) -> Self {
        let key = std::env::var(API_KEY_ENV).ok();
        self.with_api_key_override(key)
    }

    /// A non-empty override replaces the configured key
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    /// The configured key, ignoring empty strings
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

/// Port trait for speech-to-text models
///
/// Every provider exposes the same capability set so callers can swap them freely.
#[async_trait]
pub trait SpeechModelPort: Send + Sync {
    /// Short provider name (e.g., "google")
    fn name(&self) -> &str;

    /// Verify the model is usable. Missing credentials are reported, not fatal.
    async fn load(&self) -> Result<()>;

    /// Transcribe an audio file. Failures are reported in `TranscriptResult::error`.
    async fn transcribe(&self, audio_path: &Path) -> TranscriptResult;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_config() {
        let config = SpeechConfig::default();
        assert_eq!(config.language_code, "en-US");
        assert_eq!(config.endpoint, DEFAULT_RECOGNIZE_ENDPOINT);
        assert!(config.api_key().is_none());
        assert!(config.timeout_secs.is_none());
        assert_eq!(config.credential_source, CredentialSource::Gcloud);
    }

    #[test]
    fn test_credential_source_from_mapping() {
        let config = SpeechConfig::from_value(json!({ "credential_source": "keychain" })).unwrap();
        assert_eq!(config.credential_source, CredentialSource::Keychain);

        let result = SpeechConfig::from_value(json!({ "credential_source": "vault" }));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_credential_source_from_str() {
        assert_eq!(
            "Keychain".parse::<CredentialSource>(),
            Ok(CredentialSource::Keychain)
        );
        assert_eq!(
            "gcloud".parse::<CredentialSource>(),
            Ok(CredentialSource::Gcloud)
        );
        assert!("vault".parse::<CredentialSource>().is_err());
    }

    #[test]
    fn test_config_from_mapping() {
        let config = SpeechConfig::from_value(json!({
            "api_key": "abc",
            "language_code": "fr-FR",
            "unrelated": 42
        }))
        .unwrap();
        assert_eq!(config.api_key(), Some("abc"));
        assert_eq!(config.language_code, "fr-FR");
        assert_eq!(config.endpoint, DEFAULT_RECOGNIZE_ENDPOINT);
    }

    #[test]
    fn test_config_from_empty_mapping() {
        let config = SpeechConfig::from_value(json!({})).unwrap();
        assert_eq!(config.language_code, "en-US");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_config_rejects_wrong_types() {
        let result = SpeechConfig::from_value(json!({ "language_code": 7 }));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_api_key_override() {
        let config = SpeechConfig {
            api_key: Some("from-config".to_string()),
            ..Default::default()
        };

        let kept = config.clone().with_api_key_override(None);
        assert_eq!(kept.api_key(), Some("from-config"));

        let kept = config.clone().with_api_key_override(Some(String::new()));
        assert_eq!(kept.api_key(), Some("from-config"));

        let replaced = config.with_api_key_override(Some("from-env".to_string()));
        assert_eq!(replaced.api_key(), Some("from-env"));
    }

    #[test]
    fn test_empty_api_key_is_absent() {
        let config = SpeechConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(config.api_key().is_none());
    }
}
