/// Credential provider port trait
///
/// Supplies bearer tokens for authenticated requests.
/// Implementations: static API key, local CLI helper, OS keychain
use crate::error::Result;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Human readable source of the token, for diagnostics
    fn description(&self) -> String;

    /// Obtain a bearer token
    async fn access_token(&self) -> Result<String>;
}
