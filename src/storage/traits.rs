use crate::error::Result;
use async_trait::async_trait;

/// Plaintext credential persistence under a fixed key. No expiry, no
/// validation beyond non-empty at the call sites.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn load(&self) -> Result<Option<String>>;

    async fn save(&self, token: &str) -> Result<()>;

    async fn clear(&self) -> Result<()>;
}
