//! ASR (Automatic Speech Recognition) service adapters
//!
//! This module provides adapters for different ASR providers:
//! - Google: synchronous REST recognize with base64 audio

pub mod google;

pub use google::GoogleSpeechModel;

use crate::error::{AppError, Result};
use crate::ports::transcription::{SpeechConfig, SpeechModelPort};

/// Model names accepted by `get_model`
pub const AVAILABLE_MODELS: &[&str] = &[google::GOOGLE_MODEL_NAME];

/// Create a speech model by name
///
/// A non-empty `GOOGLE_API_KEY` environment variable overrides `config.api_key`.
pub fn get_model(name: &str, config: SpeechConfig) -> Result<Box<dyn SpeechModelPort>> {
    match name {
        google::GOOGLE_MODEL_NAME => Ok(Box::new(GoogleSpeechModel::from_env(config)?)),
        _ => Err(AppError::UnknownModel {
            name: name.to_string(),
            available: AVAILABLE_MODELS.join(", "),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_google_model() {
        let model = get_model("google", SpeechConfig::default()).unwrap();
        assert_eq!(model.name(), "google");
    }

    #[test]
    fn test_unknown_model() {
        let err = get_model("dolphin", SpeechConfig::default())
            .err()
            .expect("dolphin is not available");
        assert_eq!(
            err.to_string(),
            "Unknown model: dolphin. Available models: google"
        );
    }
}
