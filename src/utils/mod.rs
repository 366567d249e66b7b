//! Shared helpers

pub mod audio_file;
