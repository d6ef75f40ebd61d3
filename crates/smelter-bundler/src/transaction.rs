//! Guarded swap-and-restore of the aggregation file.
//!
//! A [`SourceTreeTransaction`] moves the aggregation file aside to
//! `<path>.original`, writes synthesized source in its place, and puts the
//! original back on [`end`](SourceTreeTransaction::end). Between `begin` and
//! `end` it holds a process-wide lock for the path, so two builds can never
//! interleave their swaps.
//!
//! A failed restore leaves the source tree in an unknown state. The path is
//! then poisoned: every later `begin` on it fails fast until an operator
//! repairs the tree and calls [`clear_poison`].

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use path_clean::PathClean;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::fs::{SourceFs, remove_if_present};

/// Suffix appended to the aggregation path for the backup copy.
pub const BACKUP_SUFFIX: &str = ".original";

#[derive(Debug, Error)]
pub enum TransactionError {
    /// Swapping in the synthesized file failed; the original is in place.
    #[error("failed to {operation} {}: {source}", .path.display())]
    Begin {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: io::Error,
    },

    /// A backup from an earlier build is still on disk.
    #[error(
        "stale backup {} exists; a previous build did not restore the aggregation file",
        .0.display()
    )]
    StaleBackup(PathBuf),

    /// An earlier restore failed and the path has not been cleared since.
    #[error("aggregation file {} is poisoned: {reason}", .path.display())]
    Poisoned { path: PathBuf, reason: String },

    /// The original file could not be put back.
    #[error("failed to restore {}: {source}", .path.display())]
    RestoreFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TransactionError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, TransactionError::RestoreFailed { .. })
    }
}

/// Per-path lock plus the poison marker.
#[derive(Debug, Default)]
struct PathSlot {
    window: Arc<AsyncMutex<()>>,
    poisoned: Mutex<Option<String>>,
}

static PATH_SLOTS: Lazy<Mutex<FxHashMap<PathBuf, Arc<PathSlot>>>> =
    Lazy::new(|| Mutex::new(FxHashMap::default()));

/// Lock key: absolute and lexically cleaned, so `./a/../b.js` and `b.js`
/// share one slot.
fn slot_key(path: &Path) -> PathBuf {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .clean()
}

fn slot_for(path: &Path) -> Arc<PathSlot> {
    Arc::clone(PATH_SLOTS.lock().entry(slot_key(path)).or_default())
}

/// `<path>.original`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut backup = OsString::from(path.as_os_str());
    backup.push(BACKUP_SUFFIX);
    PathBuf::from(backup)
}

/// Reason the path was poisoned, if it is.
pub fn poison_reason(path: &Path) -> Option<String> {
    PATH_SLOTS
        .lock()
        .get(&slot_key(path))
        .and_then(|slot| slot.poisoned.lock().clone())
}

pub fn is_poisoned(path: &Path) -> bool {
    poison_reason(path).is_some()
}

/// Re-enable builds on a poisoned path. Returns whether it was poisoned.
pub fn clear_poison(path: &Path) -> bool {
    let cleared = PATH_SLOTS
        .lock()
        .get(&slot_key(path))
        .and_then(|slot| slot.poisoned.lock().take())
        .is_some();
    if cleared {
        tracing::warn!("Cleared poisoned aggregation file {}", path.display());
    }
    cleared
}

fn poison(slot: &PathSlot, path: &Path, reason: String) {
    tracing::error!(
        path = %path.display(),
        "Aggregation file left unrestored; further builds on this path are disabled: {}",
        reason
    );
    *slot.poisoned.lock() = Some(reason);
}

/// An open swap of one aggregation file.
///
/// Must be finished with [`end`](Self::end). Dropping it unfinished poisons
/// the path.
#[derive(Debug)]
pub struct SourceTreeTransaction {
    path: PathBuf,
    backup: PathBuf,
    fs: Arc<dyn SourceFs>,
    slot: Arc<PathSlot>,
    _window: OwnedMutexGuard<()>,
    finished: bool,
}

impl SourceTreeTransaction {
    /// Swap `new_content` into `path`, keeping the original as a backup.
    ///
    /// Waits for any other transaction on the same path to end first.
    pub async fn begin(
        fs: Arc<dyn SourceFs>,
        path: impl Into<PathBuf>,
        new_content: &str,
    ) -> Result<Self, TransactionError> {
        let path = path.into();
        let slot = slot_for(&path);
        let window = Arc::clone(&slot.window).lock_owned().await;

        let poisoned = slot.poisoned.lock().clone();
        if let Some(reason) = poisoned {
            return Err(TransactionError::Poisoned { path, reason });
        }

        let backup = backup_path(&path);
        match fs.exists(&backup).await {
            Ok(false) => {}
            Ok(true) => return Err(TransactionError::StaleBackup(backup)),
            Err(source) => {
                return Err(TransactionError::Begin {
                    path: backup,
                    operation: "inspect",
                    source,
                });
            }
        }

        fs.rename(&path, &backup)
            .await
            .map_err(|source| TransactionError::Begin {
                path: path.clone(),
                operation: "back up",
                source,
            })?;

        if let Err(source) = fs.write(&path, new_content.as_bytes()).await {
            // Put the original back before reporting the write failure.
            let _ = remove_if_present(fs.as_ref(), &path).await;
            if let Err(rollback) = fs.rename(&backup, &path).await {
                let err = TransactionError::RestoreFailed {
                    path: path.clone(),
                    source: rollback,
                };
                poison(&slot, &path, err.to_string());
                return Err(err);
            }
            return Err(TransactionError::Begin {
                path,
                operation: "write",
                source,
            });
        }

        tracing::debug!("Swapped synthesized source into {}", path.display());

        Ok(Self {
            path,
            backup,
            fs,
            slot,
            _window: window,
            finished: false,
        })
    }

    /// The aggregation file being swapped.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the original is parked until [`end`](Self::end).
    pub fn backup(&self) -> &Path {
        &self.backup
    }

    /// Restore the original file and release the path lock.
    ///
    /// On failure the path is poisoned and `RestoreFailed` is returned.
    pub async fn end(mut self) -> Result<(), TransactionError> {
        let result = self.restore().await;
        self.finished = true;

        match &result {
            Ok(()) => tracing::debug!("Restored {}", self.path.display()),
            Err(err) => poison(&self.slot, &self.path, err.to_string()),
        }
        result
    }

    async fn restore(&self) -> Result<(), TransactionError> {
        if let Err(e) = remove_if_present(self.fs.as_ref(), &self.path).await {
            // The rename below replaces the file anyway; only its failure is fatal.
            tracing::warn!("Failed to remove {}: {}", self.path.display(), e);
        }

        self.fs
            .rename(&self.backup, &self.path)
            .await
            .map_err(|source| TransactionError::RestoreFailed {
                path: self.path.clone(),
                source,
            })
    }
}

impl Drop for SourceTreeTransaction {
    fn drop(&mut self) {
        if !self.finished {
            poison(
                &self.slot,
                &self.path,
                "transaction dropped before the original was restored".to_string(),
            );
        }
    }
}
