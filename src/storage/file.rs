use std::collections::HashMap;
use std::path::PathBuf;

use crate::{
    error::{FluxError, Result},
    storage::{traits::CredentialStore, TOKEN_KEY},
};
use async_trait::async_trait;

/// JSON key-value file holding the credential under [`TOKEN_KEY`].
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn read_map(&self) -> Result<HashMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| FluxError::SerializationError(format!("token file is corrupt: {}", e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(FluxError::StorageError(format!(
                "failed to read token file: {}",
                e
            ))),
        }
    }

    async fn write_map(&self, map: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    FluxError::StorageError(format!("failed to create token dir: {}", e))
                })?;
            }
        }

        let contents = serde_json::to_string_pretty(map)
            .map_err(|e| FluxError::SerializationError(e.to_string()))?;

        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| FluxError::StorageError(format!("failed to write token file: {}", e)))
    }
}

#[async_trait]
impl CredentialStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        let map = self.read_map().await?;
        Ok(map.get(TOKEN_KEY).cloned())
    }

    async fn save(&self, token: &str) -> Result<()> {
        let mut map = self.read_map().await?;
        map.insert(TOKEN_KEY.to_string(), token.to_string());
        self.write_map(&map).await
    }

    async fn clear(&self) -> Result<()> {
        let mut map = self.read_map().await?;
        if map.remove(TOKEN_KEY).is_some() {
            self.write_map(&map).await?;
        }
        Ok(())
    }
}
