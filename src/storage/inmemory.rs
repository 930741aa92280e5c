use std::sync::Mutex;

use async_trait::async_trait;

use crate::{app::TokenStore, model::AccessToken};

/// Ephemeral token slot; the session dies with the process. Used as the test
/// double everywhere a durable store is not wanted.
pub struct InMemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn save(&self, token: &AccessToken) -> anyhow::Result<()> {
        *self.slot.lock().unwrap() = Some(token.as_str().to_string());

        Ok(())
    }

    async fn read(&self) -> anyhow::Result<Option<AccessToken>> {
        Ok(self
            .slot
            .lock()
            .unwrap()
            .as_deref()
            .and_then(AccessToken::from_str))
    }

    async fn clear(&self) -> anyhow::Result<()> {
        *self.slot.lock().unwrap() = None;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_read_clear_round_trip() {
        let store = InMemoryTokenStore::new();

        assert!(store.read().await.unwrap().is_none());

        store
            .save(&AccessToken::from_str("first").unwrap())
            .await
            .unwrap();
        assert_eq!(store.read().await.unwrap().unwrap().as_str(), "first");

        // Re-authentication overwrites the previous session.
        store
            .save(&AccessToken::from_str("second").unwrap())
            .await
            .unwrap();
        assert_eq!(store.read().await.unwrap().unwrap().as_str(), "second");

        store.clear().await.unwrap();
        assert!(store.read().await.unwrap().is_none());
    }
}
