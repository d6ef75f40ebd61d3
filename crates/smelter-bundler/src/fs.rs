//! Filesystem seam for the source tree.
//!
//! The transaction only ever touches the source tree through [`SourceFs`],
//! which keeps the swap/restore protocol testable against injected faults.

use async_trait::async_trait;
use std::io;
use std::path::Path;

/// File operations the source-tree transaction needs.
#[async_trait]
pub trait SourceFs: Send + Sync + std::fmt::Debug {
    /// Rename `from` to `to`, replacing `to` if it exists.
    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Create or truncate `path` and write `content`.
    async fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;

    /// Delete `path`. A missing file is an error of kind `NotFound`.
    async fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Whether `path` exists. Errors only when existence cannot be decided.
    async fn exists(&self, path: &Path) -> io::Result<bool>;

    /// Whole contents of `path`.
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// [`SourceFs`] over the real filesystem via `tokio::fs`.
///
/// # Examples
///
/// ```no_run
/// use smelter_bundler::{NativeFs, SourceFs};
/// use std::path::Path;
///
/// # async fn run() -> std::io::Result<()> {
/// let fs = NativeFs::new();
/// let aggregation = Path::new("alloy/src/core/componentCreators.js");
/// if fs.exists(aggregation).await? {
///     let original = fs.read(aggregation).await?;
///     println!("{} bytes", original.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeFs;

impl NativeFs {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SourceFs for NativeFs {
    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        tokio::fs::rename(from, to).await
    }

    async fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        tokio::fs::write(path, content).await
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_file(path).await
    }

    async fn exists(&self, path: &Path) -> io::Result<bool> {
        tokio::fs::try_exists(path).await
    }

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}

/// Remove `path`, treating absence as success.
pub(crate) async fn remove_if_present(fs: &dyn SourceFs, path: &Path) -> io::Result<()> {
    match fs.remove_file(path).await {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_native_round_trip() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.js");
        let b = dir.path().join("b.js");
        let fs = NativeFs::new();

        fs.write(&a, b"export default [];").await.unwrap();
        assert!(fs.exists(&a).await.unwrap());

        fs.rename(&a, &b).await.unwrap();
        assert!(!fs.exists(&a).await.unwrap());
        assert_eq!(fs.read(&b).await.unwrap(), b"export default [];");
    }

    #[tokio::test]
    async fn test_remove_if_present_ignores_missing() {
        let dir = TempDir::new().unwrap();
        let fs = NativeFs::new();
        remove_if_present(&fs, &dir.path().join("missing.js"))
            .await
            .unwrap();
    }
}
