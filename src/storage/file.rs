use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;

use crate::{app::TokenStore, model::AccessToken};

const DEFAULT_DIR: &str = "todo-client";
const TOKEN_FILE: &str = "access_token";

/// Token slot backed by a single file, so a session survives process
/// restarts. A missing or blank file reads as "no session".
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Places the token under the platform data directory, for callers with
    /// no explicit location configured.
    pub fn in_default_location() -> anyhow::Result<Self> {
        let dir = dirs::data_dir().context("no data directory on this platform")?;

        Ok(Self::new(dir.join(DEFAULT_DIR).join(TOKEN_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn save(&self, token: &AccessToken) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        tokio::fs::write(&self.path, token.as_str())
            .await
            .with_context(|| format!("writing {}", self.path.display()))?;

        Ok(())
    }

    async fn read(&self) -> anyhow::Result<Option<AccessToken>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", self.path.display()))
            }
        };

        Ok(AccessToken::from_str(&raw))
    }

    async fn clear(&self) -> anyhow::Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| format!("removing {}", self.path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn token_survives_across_store_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("access_token");

        let store = FileTokenStore::new(&path);
        store
            .save(&AccessToken::from_str("persisted").unwrap())
            .await
            .unwrap();

        let reopened = FileTokenStore::new(&path);
        assert_eq!(
            reopened.read().await.unwrap().unwrap().as_str(),
            "persisted"
        );
    }

    #[tokio::test]
    async fn missing_parent_directories_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("token");

        let store = FileTokenStore::new(&path);
        store
            .save(&AccessToken::from_str("abc").unwrap())
            .await
            .unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn blank_file_reads_as_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("access_token");
        std::fs::write(&path, "  \n").unwrap();

        let store = FileTokenStore::new(&path);
        assert!(store.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clear_removes_the_file_and_tolerates_absence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("access_token");

        let store = FileTokenStore::new(&path);
        store
            .save(&AccessToken::from_str("abc").unwrap())
            .await
            .unwrap();

        store.clear().await.unwrap();
        assert!(!path.exists());
        assert!(store.read().await.unwrap().is_none());

        // Clearing again must not fail.
        store.clear().await.unwrap();
    }
}
