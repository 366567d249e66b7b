//! Speech-to-text adapters for cloud recognition APIs
//!
//! Ports define the speech model and credential contracts; adapters implement them
//! for Google Cloud Speech-to-Text and several token sources.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

pub use adapters::services::asr::{get_model, GoogleSpeechModel, AVAILABLE_MODELS};
pub use domain::{AudioEncoding, AudioFormat, TranscriptResult, TranscriptWord};
pub use error::{AppError, Result};
pub use ports::{CredentialProvider, CredentialSource, SpeechConfig, SpeechModelPort};
