use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::utils::AppError;

/// Client-side key/value storage for session state.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn set_item(&mut self, key: &str, value: &str) -> Result<(), AppError>;
    async fn remove_item(&mut self, key: &str) -> Result<(), AppError>;
}

/// Keeps all entries as one JSON object in a file.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `None` when the file does not exist yet.
    async fn read_all(&self) -> Result<Option<HashMap<String, String>>, AppError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| AppError::Storage(format!("Corrupt store {}: {}", self.path.display(), e)))
    }

    async fn write_all(&self, entries: &HashMap<String, String>) -> Result<(), AppError> {
        let body = serde_json::to_string_pretty(entries)
            .map_err(|e| AppError::Storage(format!("Failed to serialize store: {}", e)))?;
        tokio::fs::write(&self.path, body)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.read_all().await?.and_then(|mut entries| entries.remove(key)))
    }

    async fn set_item(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        // A corrupt file is overwritten rather than blocking the login.
        let mut entries = self.read_all().await.ok().flatten().unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries).await
    }

    async fn remove_item(&mut self, key: &str) -> Result<(), AppError> {
        match self.read_all().await {
            Ok(None) => Ok(()),
            Ok(Some(mut entries)) => {
                entries.remove(key);
                self.write_all(&entries).await
            }
            Err(_) => self.write_all(&HashMap::new()).await,
        }
    }
}

/// Process-local store for tests.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    entries: HashMap<String, String>,
}

#[cfg(test)]
#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.get(key).cloned())
    }

    async fn set_item(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&mut self, key: &str) -> Result<(), AppError> {
        self.entries.remove(key);
        Ok(())
    }
}
