//! # Staking Directory Locking
//!
//! Prevents two provisioning tools from patching the same staking directory.
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFile on Windows).

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::domain::errors::StoreError;

/// Exclusive lock on a staking directory.
///
/// Released on drop (RAII). The lock file itself is left in place so every
/// contender always locks the same inode.
///
/// # Example
///
/// ```ignore
/// let lock = DirectoryLock::acquire(Path::new("/home/me/.luxd/staking"))?;
/// // Lock is held until `lock` goes out of scope
/// ```
#[derive(Debug)]
pub struct DirectoryLock {
    /// Kept open to maintain the lock
    file: File,
    path: PathBuf,
    pid: u32,
}

impl DirectoryLock {
    /// Lock file name
    pub const LOCK_FILE: &'static str = ".provision.lock";

    /// Acquire the lock without blocking.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Locked` if another holder exists.
    pub fn acquire(dir: &Path) -> Result<Self, StoreError> {
        let lock_path = dir.join(Self::LOCK_FILE);

        // No truncate here: the current holder's PID must stay readable
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| StoreError::io(&lock_path, e))?;

        if file.try_lock_exclusive().is_err() {
            return Err(StoreError::Locked {
                pid: Self::read_existing_pid(&lock_path),
                path: lock_path,
            });
        }

        let pid = std::process::id();
        file.set_len(0).map_err(|e| StoreError::io(&lock_path, e))?;
        writeln!(file, "{}", pid).map_err(|e| StoreError::io(&lock_path, e))?;
        file.sync_all().map_err(|e| StoreError::io(&lock_path, e))?;

        Ok(Self {
            file,
            path: lock_path,
            pid,
        })
    }

    /// PID of the process holding the lock
    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_existing_pid(path: &Path) -> Option<u32> {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }
}

impl Drop for DirectoryLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
