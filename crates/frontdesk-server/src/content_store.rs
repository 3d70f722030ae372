use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};

use crate::error::ApiError;

/// Verify that a resolved path stays within the expected base directory.
/// Prevents path traversal attacks.
fn ensure_within(base: &Path, target: &Path) -> Result<PathBuf, ApiError> {
    // Canonicalize base; target may not exist yet so normalize manually
    let canonical_base = base.canonicalize().unwrap_or_else(|_| base.to_path_buf());
    let mut resolved = canonical_base.clone();
    for component in target
        .strip_prefix(&canonical_base)
        .unwrap_or(target)
        .components()
    {
        match component {
            std::path::Component::Normal(c) => resolved.push(c),
            std::path::Component::ParentDir => return Err(ApiError::PathTraversal),
            _ => {} // RootDir, CurDir, Prefix — skip
        }
    }
    if !resolved.starts_with(&canonical_base) {
        return Err(ApiError::PathTraversal);
    }
    Ok(resolved)
}

/// Flat directory of uploaded image bytes, keyed by generated storage name.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub async fn new(root: PathBuf) -> Result<Self, ApiError> {
        fs::create_dir_all(&root).await.map_err(|e| {
            ApiError::ContentStore(format!(
                "Failed to create upload directory '{}': {}",
                root.display(),
                e
            ))
        })?;

        info!(path = %root.display(), "Content store initialized");

        Ok(Self { root })
    }

    pub async fn save(&self, name: &str, data: &[u8]) -> Result<(), ApiError> {
        let path = self.resolve(name)?;

        fs::write(&path, data)
            .await
            .map_err(|e| ApiError::ContentStore(format!("Failed to write '{}': {}", name, e)))?;

        debug!(name = %name, size = data.len(), "Stored upload");
        Ok(())
    }

    pub async fn read(&self, name: &str) -> Result<Vec<u8>, ApiError> {
        let path = self.resolve(name)?;

        if !path.exists() {
            return Err(ApiError::NotFound("Image"));
        }

        let data = fs::read(&path)
            .await
            .map_err(|e| ApiError::ContentStore(format!("Failed to read '{}': {}", name, e)))?;

        debug!(name = %name, size = data.len(), "Retrieved upload");
        Ok(data)
    }

    /// Delete the named blob.  Returns whether it existed — an absent blob
    /// is not an error, so metadata cleanup can still proceed.
    pub async fn remove(&self, name: &str) -> Result<bool, ApiError> {
        let path = self.resolve(name)?;

        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path)
            .await
            .map_err(|e| ApiError::ContentStore(format!("Failed to delete '{}': {}", name, e)))?;

        debug!(name = %name, "Deleted upload");
        Ok(true)
    }

    /// Resolve a storage name, rejecting anything that could escape the root.
    fn resolve(&self, name: &str) -> Result<PathBuf, ApiError> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(ApiError::PathTraversal);
        }
        ensure_within(&self.root, &self.root.join(name))
    }
}
