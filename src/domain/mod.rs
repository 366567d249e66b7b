/// Domain layer - core data models
///
/// These models are provider-agnostic.
pub mod models;

pub use models::{AudioEncoding, AudioFormat, TranscriptResult, TranscriptWord};
