//! Google Cloud Speech-to-Text adapter
//!
//! Implements the SpeechModelPort for the synchronous `speech:recognize` REST endpoint.
//! API flow:
//! 1. Resolve a bearer token from the credential provider
//! 2. Infer encoding from the file extension and base64 the whole file
//! 3. POST a single recognize request (no retry)
//! 4. Flatten the first alternative of every result into text and word timings

use crate::adapters::credentials::{KeychainProvider, LocalCliProvider, StaticKeyProvider};
use crate::domain::models::{AudioEncoding, TranscriptResult, TranscriptWord};
use crate::error::{AppError, Result};
use crate::ports::credentials::CredentialProvider;
use crate::ports::transcription::{CredentialSource, SpeechConfig, SpeechModelPort};
use crate::utils::audio_file::{detect_audio_format, read_audio_base64};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const GOOGLE_MODEL_NAME: &str = "google";

/// Google Speech-to-Text model
pub struct GoogleSpeechModel {
    client: Client,
    config: SpeechConfig,
    credentials: Box<dyn CredentialProvider>,
}

impl GoogleSpeechModel {
    /// Create the model. A configured API key is used directly; otherwise tokens come
    /// from the configured `credential_source`.
    ///
    /// The environment is not consulted; see `from_env`.
    pub fn new(config: SpeechConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let credentials: Box<dyn CredentialProvider> = match config.api_key() {
            Some(key) => Box::new(StaticKeyProvider::new(key)),
            None => match config.credential_source {
                CredentialSource::Gcloud => Box::new(LocalCliProvider::gcloud()),
                CredentialSource::Keychain => Box::new(KeychainProvider::new(GOOGLE_MODEL_NAME)),
            },
        };

        Ok(Self {
            client,
            config,
            credentials,
        })
    }

    /// Create the model after letting `GOOGLE_API_KEY` override the configured key
    pub fn from_env(config: SpeechConfig) -> Result<Self> {
        Self::new(config.with_env_overrides())
    }

    /// Replace the credential source (service account, keychain, test fakes)
    pub fn with_credential_provider(mut self, credentials: Box<dyn CredentialProvider>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn config(&self) -> &SpeechConfig {
        &self.config
    }

    /// Where tokens are obtained from, for diagnostics
    pub fn credential_description(&self) -> String {
        self.credentials.description()
    }

    /// Obtain a bearer token, or None when the provider cannot supply one
    pub async fn resolve_access_token(&self) -> Option<String> {
        match self.credentials.access_token().await {
            Ok(token) if !token.is_empty() => Some(token),
            Ok(_) => {
                log::error!("{} returned an empty token", self.credentials.description());
                None
            }
            Err(e) => {
                let reason = e.detail().map(str::to_string).unwrap_or_else(|| e.to_string());
                log::error!(
                    "Error getting access token from {}: {}",
                    self.credentials.description(),
                    reason
                );
                log::error!(
                    "Please set the GOOGLE_API_KEY environment variable or configure gcloud."
                );
                None
            }
        }
    }

    async fn try_transcribe(&self, audio_path: &Path) -> Result<TranscriptResult> {
        let token = self
            .resolve_access_token()
            .await
            .ok_or_else(|| AppError::Credential("no token available".to_string()))?;

        let format = detect_audio_format(audio_path);
        let content = read_audio_base64(audio_path).await?;

        let request_body = RecognizeRequest {
            config: RecognitionConfig {
                encoding: format.encoding,
                sample_rate_hertz: format.sample_rate_hertz,
                language_code: self.config.language_code.clone(),
                enable_word_time_offsets: true,
                enable_automatic_punctuation: true,
            },
            audio: RecognitionAudio { content },
        };

        log::info!(
            "Sending recognize request: encoding={}, rate={}Hz, language={}",
            format.encoding,
            format.sample_rate_hertz,
            self.config.language_code
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&token)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log::error!("Error response ({}): {}", status, body);
            return Err(AppError::RemoteRequest {
                status: status.as_u16(),
                body,
            });
        }

        let raw: serde_json::Value = serde_json::from_str(&body)?;
        parse_recognize_response(raw)
    }
}

impl std::fmt::Display for GoogleSpeechModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Model", GOOGLE_MODEL_NAME)
    }
}

#[async_trait]
impl SpeechModelPort for GoogleSpeechModel {
    fn name(&self) -> &str {
        GOOGLE_MODEL_NAME
    }

    async fn load(&self) -> Result<()> {
        match self.credentials.access_token().await {
            Ok(token) if !token.is_empty() => {
                log::info!(
                    "Google Speech-to-Text initialized successfully ({})",
                    self.credentials.description()
                );
            }
            _ => {
                log::warn!(
                    "No Google API key provided and {} did not yield a token.",
                    self.credentials.description()
                );
                log::warn!("You will need to authenticate with Google Cloud before transcription.");
            }
        }
        Ok(())
    }

    async fn transcribe(&self, audio_path: &Path) -> TranscriptResult {
        log::info!("Starting Google transcription for: {}", audio_path.display());

        match self.try_transcribe(audio_path).await {
            Ok(result) => {
                log::info!(
                    "Google transcription complete: {} words, {} chars",
                    result.chunks.len(),
                    result.text.len()
                );
                result
            }
            Err(e) => {
                log::error!("Error transcribing with Google STT: {}", e);
                TranscriptResult::failure(e.to_string())
            }
        }
    }
}

/// Flatten a recognize response into a TranscriptResult
///
/// Only the first alternative of each result counts. Confidence is the last one reported.
fn parse_recognize_response(raw: serde_json::Value) -> Result<TranscriptResult> {
    let response: RecognizeResponse = serde_json::from_value(raw.clone())?;

    let mut transcript = String::new();
    let mut confidence = 0.0;
    let mut chunks = Vec::new();

    for alternative in response
        .results
        .into_iter()
        .filter_map(|result| result.alternatives.into_iter().next())
    {
        transcript.push_str(&alternative.transcript);
        transcript.push(' ');

        if let Some(value) = alternative.confidence {
            confidence = value;
        }

        for word in alternative.words {
            chunks.push(TranscriptWord {
                start_time: parse_offset(word.start_time.as_deref())?,
                end_time: parse_offset(word.end_time.as_deref())?,
                word: word.word,
            });
        }
    }

    Ok(TranscriptResult {
        text: transcript.trim().to_string(),
        confidence,
        chunks,
        raw_response: Some(raw),
        error: None,
    })
}

/// Parse a duration like "1.200s" into seconds. Missing offsets are 0.
fn parse_offset(value: Option<&str>) -> Result<f64> {
    let Some(value) = value else {
        return Ok(0.0);
    };

    value
        .strip_suffix('s')
        .unwrap_or(value)
        .parse::<f64>()
        .map_err(|e| AppError::InvalidResponse(format!("Bad time offset {:?}: {}", value, e)))
}

// ===== API Request/Response Types =====

#[derive(Debug, Serialize)]
struct RecognizeRequest {
    config: RecognitionConfig,
    audio: RecognitionAudio,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig {
    encoding: AudioEncoding,
    sample_rate_hertz: u32,
    language_code: String,
    enable_word_time_offsets: bool,
    enable_automatic_punctuation: bool,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Debug, Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    transcript: String,
    confidence: Option<f64>,
    #[serde(default)]
    words: Vec<WordInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WordInfo {
    word: String,
    start_time: Option<String>,
    end_time: Option<String>,
}
