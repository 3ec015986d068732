//! Local-disk media store.
//!
//! DESIGN
//! ======
//! Uploaded binaries live under a single root directory and are served
//! read-only at `/media/*`. Records keep the storage path alongside the
//! public URL, so deletion never has to parse a URL back into a path.

use std::fmt::Write;
use std::path::{Component, Path, PathBuf};

use rand::Rng;

/// Prefix under the store root where uploads land.
const UPLOAD_PREFIX: &str = "uploads";
/// Extension used when the original filename has none.
const FALLBACK_EXT: &str = "bin";

fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Extension of an original filename, lowercased. `None` for dotless names
/// or a bare trailing dot.
fn file_extension(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || ext.contains('/') {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// A storage path is only usable when it stays inside the store root.
fn path_is_safe(path: &str) -> bool {
    !path.is_empty()
        && Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("unsafe storage path: {0}")]
    UnsafePath(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handle to the on-disk media store. Clone is cheap (one `PathBuf`).
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Generate a collision-resistant storage path for an upload:
    /// `uploads/<unix-ms>-<random-hex>.<ext>`.
    #[must_use]
    pub fn generate_path(original_name: &str) -> String {
        let now_ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_millis());
        let salt: [u8; 4] = rand::rng().random();
        let ext = file_extension(original_name).unwrap_or_else(|| FALLBACK_EXT.to_owned());
        format!("{UPLOAD_PREFIX}/{now_ms}-{}.{ext}", bytes_to_hex(&salt))
    }

    /// Public address for a stored path, as served by the static route.
    #[must_use]
    pub fn public_url(path: &str) -> String {
        format!("/media/{path}")
    }

    /// Write bytes under the store root, creating parent directories.
    ///
    /// # Errors
    ///
    /// Fails on an unsafe path or any filesystem error.
    pub async fn store(&self, path: &str, bytes: &[u8]) -> Result<(), StorageError> {
        if !path_is_safe(path) {
            return Err(StorageError::UnsafePath(path.to_owned()));
        }
        let full = self.root.join(path);
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full, bytes).await?;
        Ok(())
    }

    /// Remove a stored binary. A missing file is an error: the caller must
    /// not delete the metadata row when the binary could not be removed.
    ///
    /// # Errors
    ///
    /// Fails on an unsafe path or any filesystem error.
    pub async fn remove(&self, path: &str) -> Result<(), StorageError> {
        if !path_is_safe(path) {
            return Err(StorageError::UnsafePath(path.to_owned()));
        }
        tokio::fs::remove_file(self.root.join(path)).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
