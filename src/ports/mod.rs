/// Port trait definitions (interfaces)
///
/// These traits define the contracts for adapters to implement.
/// Following the ports-and-adapters (hexagonal) architecture pattern.
pub mod credentials;
pub mod transcription;

pub use credentials::CredentialProvider;
pub use transcription::{CredentialSource, SpeechConfig, SpeechModelPort};
