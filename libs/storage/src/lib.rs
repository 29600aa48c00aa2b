//! Asset storage abstraction for uploaded images
//!
//! Uploaded files are renamed to a generated identifier so user-supplied
//! filenames never touch the filesystem. Backends return the public URL path
//! that gets persisted alongside the owning record.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AssetStoreError {
    #[error("Failed to write asset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
}

pub type AssetStoreResult<T> = Result<T, AssetStoreError>;

/// Extensions accepted for image uploads
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Storage backend for uploaded assets
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store the given bytes and return the public URL path of the asset.
    ///
    /// The original filename is only consulted for its extension.
    async fn store(&self, original_name: &str, bytes: &[u8]) -> AssetStoreResult<String>;
}

/// Extract and validate a lowercase extension from an uploaded filename.
fn sanitized_extension(original_name: &str) -> AssetStoreResult<String> {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(AssetStoreError::UnsupportedType(original_name.to_string()))
    }
}

/// Local-filesystem asset store
///
/// Writes files under a root directory and serves them via a static route
/// mounted at `public_prefix`.
#[derive(Clone, Debug)]
pub struct LocalAssetStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalAssetStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_prefix: public_prefix.into(),
        }
    }

    /// Create the root directory if it does not exist.
    pub async fn ensure_root(&self) -> AssetStoreResult<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn store(&self, original_name: &str, bytes: &[u8]) -> AssetStoreResult<String> {
        let ext = sanitized_extension(original_name)?;
        let file_name = format!("{}.{}", Uuid::now_v7(), ext);
        let path = self.root.join(&file_name);

        tokio::fs::write(&path, bytes).await?;
        debug!(file = %file_name, size = bytes.len(), "Stored uploaded asset");

        Ok(format!(
            "{}/{}",
            self.public_prefix.trim_end_matches('/'),
            file_name
        ))
    }
}

/// In-memory asset store (for development/testing)
#[derive(Clone, Debug, Default)]
pub struct InMemoryAssetStore {
    assets: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, url_path: &str) -> Option<Vec<u8>> {
        self.assets.read().await.get(url_path).cloned()
    }

    pub async fn len(&self) -> usize {
        self.assets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.assets.read().await.is_empty()
    }
}

#[async_trait]
impl AssetStore for InMemoryAssetStore {
    async fn store(&self, original_name: &str, bytes: &[u8]) -> AssetStoreResult<String> {
        let ext = sanitized_extension(original_name)?;
        let url_path = format!("/uploads/{}.{}", Uuid::now_v7(), ext);
        self.assets
            .write()
            .await
            .insert(url_path.clone(), bytes.to_vec());
        Ok(url_path)
    }
}
