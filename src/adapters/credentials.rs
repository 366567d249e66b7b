//! Credential provider adapters
//!
//! Implements the CredentialProvider port for:
//! - A static API key from configuration
//! - A local command-line helper that prints an access token (gcloud by default)
//! - A token stored in the OS keychain

use crate::error::{AppError, Result};
use crate::ports::credentials::CredentialProvider;
use async_trait::async_trait;
use keyring::Entry;
use tokio::process::Command;

/// Keychain service name for cloud-stt
const SERVICE_NAME: &str = "com.cloud-stt";

/// Returns a configured key verbatim
pub struct StaticKeyProvider {
    api_key: String,
}

impl StaticKeyProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticKeyProvider {
    fn description(&self) -> String {
        "configured API key".to_string()
    }

    async fn access_token(&self) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(AppError::Credential("API key is empty".to_string()));
        }
        Ok(self.api_key.clone())
    }
}

/// Runs a local helper program and reads the token from its stdout
pub struct LocalCliProvider {
    program: String,
    args: Vec<String>,
}

impl LocalCliProvider {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `gcloud auth print-access-token`
    pub fn gcloud() -> Self {
        Self::new("gcloud", ["auth", "print-access-token"])
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl CredentialProvider for LocalCliProvider {
    fn description(&self) -> String {
        format!("`{}`", self.command_line())
    }

    async fn access_token(&self) -> Result<String> {
        log::debug!("Requesting access token from {}", self.command_line());

        let output = Command::new(&self.program)
            .args(&self.args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                AppError::Credential(format!("Failed to run {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Credential(format!(
                "{} exited with {}: {}",
                self.command_line(),
                output.status,
                stderr.trim()
            )));
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(AppError::Credential(format!(
                "{} printed no token",
                self.command_line()
            )));
        }

        Ok(token)
    }
}

/// Reads a token saved in the OS keychain under `asr_<provider>`
///
/// Tokens are written by external tooling; this provider only reads them.
pub struct KeychainProvider {
    account: String,
}

impl KeychainProvider {
    pub fn new(provider: &str) -> Self {
        Self {
            account: format!("asr_{}", provider),
        }
    }
}

#[async_trait]
impl CredentialProvider for KeychainProvider {
    fn description(&self) -> String {
        format!("keychain entry {}/{}", SERVICE_NAME, self.account)
    }

    async fn access_token(&self) -> Result<String> {
        let entry = Entry::new(SERVICE_NAME, &self.account)
            .map_err(|e| AppError::Credential(e.to_string()))?;

        entry.get_password().map_err(|e| {
            AppError::Credential(format!("Failed to read {}: {}", self.account, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_key_returned_verbatim() {
        let provider = StaticKeyProvider::new("  ya29.key  ");
        assert_eq!(provider.access_token().await.unwrap(), "  ya29.key  ");
        assert_eq!(provider.description(), "configured API key");
    }

    #[tokio::test]
    async fn test_static_key_empty_fails() {
        let provider = StaticKeyProvider::new("");
        assert!(matches!(
            provider.access_token().await,
            Err(AppError::Credential(_))
        ));
    }

    #[test]
    fn test_gcloud_command_line() {
        let provider = LocalCliProvider::gcloud();
        assert_eq!(provider.description(), "`gcloud auth print-access-token`");
    }

    #[tokio::test]
    async fn test_missing_helper_fails() {
        let provider = LocalCliProvider::new("cloud-stt-no-such-helper-binary", ["token"]);
        let err = provider.access_token().await.unwrap_err();
        assert!(matches!(err, AppError::Credential(_)));
        assert_eq!(err.to_string(), "Failed to get access token");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_helper_output_is_trimmed() {
        let provider = LocalCliProvider::new("sh", ["-c", "printf '  ya29.token \\n'"]);
        assert_eq!(provider.access_token().await.unwrap(), "ya29.token");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_helper_nonzero_exit_fails() {
        let provider = LocalCliProvider::new("sh", ["-c", "echo token; echo denied >&2; exit 3"]);
        let err = provider.access_token().await.unwrap_err();
        let detail = err.detail().unwrap_or_default();
        assert!(detail.contains("denied"), "{}", detail);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_helper_blank_output_fails() {
        let provider = LocalCliProvider::new("sh", ["-c", "echo '   '"]);
        assert!(provider.access_token().await.is_err());
    }

    #[test]
    fn test_keychain_account_name() {
        let provider = KeychainProvider::new("google");
        assert_eq!(
            provider.description(),
            "keychain entry com.cloud-stt/asr_google"
        );
    }

    #[tokio::test]
    #[ignore] // Requires OS keychain access - skip in CI
    async fn test_keychain_read() {
        let entry = Entry::new(SERVICE_NAME, "asr_test_provider").unwrap();
        entry.set_password("test_token_12345").unwrap();

        let provider = KeychainProvider::new("test_provider");
        assert_eq!(provider.access_token().await.unwrap(), "test_token_12345");

        let _ = entry.delete_password();
    }
}
