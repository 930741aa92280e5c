use async_trait::async_trait;

use crate::model::AccessToken;

/// The one slot holding the current session token. Last writer wins; there
/// is exactly one human driving one form at a time, so no ordering between
/// writers is provided.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persists `token`, overwriting any previous session.
    async fn save(&self, token: &AccessToken) -> anyhow::Result<()>;

    /// Returns the current session token, if any.
    async fn read(&self) -> anyhow::Result<Option<AccessToken>>;

    /// Forgets the current session. Clearing an empty store is not an error.
    async fn clear(&self) -> anyhow::Result<()>;
}
