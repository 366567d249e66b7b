//! External service adapters
//!
//! This module contains adapters for external speech recognition APIs.

pub mod asr;
