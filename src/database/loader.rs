use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::AppError;

/// Source of the static JSON resources.
#[async_trait]
pub trait ResourceLoader: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<String, AppError>;

    /// Human-readable location used in log lines.
    fn locate(&self, path: &str) -> String;
}

/// Fetches resources relative to an `http(s)://` base URL.
pub struct HttpLoader {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpLoader {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    fn url_for(&self, path: &str) -> String {
        let encoded: Vec<String> = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}/{}", self.base_url, encoded.join("/"))
    }
}

#[async_trait]
impl ResourceLoader for HttpLoader {
    async fn fetch(&self, path: &str) -> Result<String, AppError> {
        let url = self.url_for(path);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::ResourceLoad(format!("Failed to load {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(AppError::ResourceLoad(format!(
                "Failed to load {}: HTTP {}",
                url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::ResourceLoad(format!("Failed to read {}: {}", url, e)))
    }

    fn locate(&self, path: &str) -> String {
        self.url_for(path)
    }
}

/// Reads resources from a local directory.
pub struct FileLoader {
    root: PathBuf,
}

impl FileLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ResourceLoader for FileLoader {
    async fn fetch(&self, path: &str) -> Result<String, AppError> {
        let full = self.root.join(path);
        tokio::fs::read_to_string(&full)
            .await
            .map_err(|e| AppError::ResourceLoad(format!("Failed to load {}: {}", full.display(), e)))
    }

    fn locate(&self, path: &str) -> String {
        self.root.join(path).display().to_string()
    }
}

/// Picks the loader for a configured data source.
pub fn loader_for(source: &str, timeout: Duration) -> Box<dyn ResourceLoader> {
    if source.starts_with("http://") || source.starts_with("https://") {
        Box::new(HttpLoader::new(source, timeout))
    } else {
        Box::new(FileLoader::new(source))
    }
}

/// Loads one collection. Any failure is logged and yields an empty collection.
pub async fn load_collection<T: DeserializeOwned>(loader: &dyn ResourceLoader, path: &str) -> Vec<T> {
    let body = match loader.fetch(path).await {
        Ok(body) => body,
        Err(e) => {
            log::error!("❌ {}", e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<T>>(&body) {
        Ok(records) => {
            log::info!("✅ Loaded {} records from {}", records.len(), loader.locate(path));
            records
        }
        Err(e) => {
            log::error!("❌ Malformed JSON in {}: {}", loader.locate(path), e);
            Vec::new()
        }
    }
}
