//! Audio file utilities for recognize requests
//!
//! Format detection works from the file extension only; file contents are never inspected.

use crate::domain::models::{AudioEncoding, AudioFormat};
use crate::error::Result;
use base64::Engine as _;
use std::path::Path;

const DEFAULT_SAMPLE_RATE_HERTZ: u32 = 16000;

/// Infer encoding and sample rate from the file extension
///
/// Unknown or missing extensions fall back to FLAC at 16 kHz.
pub fn detect_audio_format<P: AsRef<Path>>(path: P) -> AudioFormat {
    let extension = path
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let encoding = match extension.as_deref() {
        Some("flac") => AudioEncoding::Flac,
        Some("wav") => AudioEncoding::Linear16,
        Some("mp3") => AudioEncoding::Mp3,
        Some("ogg") => AudioEncoding::OggOpus,
        _ => AudioEncoding::Flac,
    };

    AudioFormat {
        encoding,
        sample_rate_hertz: DEFAULT_SAMPLE_RATE_HERTZ,
    }
}

/// Encode raw audio bytes for embedding in a JSON string field
pub fn encode_audio(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Read the whole file into memory and base64-encode it
pub async fn read_audio_base64<P: AsRef<Path>>(path: P) -> Result<String> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    log::debug!(
        "Read {} bytes of audio from {}",
        bytes.len(),
        path.as_ref().display()
    );
    Ok(encode_audio(&bytes))
}
