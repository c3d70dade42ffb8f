//! # Data Directory Layout
//!
//! All persistent state lives under one directory:
//!
//! ```text
//! data/
//! ├── users.dat
//! ├── rooms.dat
//! ├── guests.dat
//! ├── reservations.dat
//! ├── invoices.dat
//! ├── billing_items.dat
//! ├── payments.dat
//! └── backup/
//!     └── 20240301_140533/   ← one timestamped snapshot per backup run
//!         ├── users.dat
//!         └── ...
//! ```
//!
//! Entity files appear lazily on first append; a file that does not exist
//! yet is an empty store.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

/// Names of the seven entity files, in backup order.
const ENTITY_FILES: [&str; 7] = [
    "users.dat",
    "rooms.dat",
    "guests.dat",
    "reservations.dat",
    "invoices.dat",
    "billing_items.dat",
    "payments.dat",
];

/// Handle to the data directory; hands out entity file paths and owns the
/// backup procedure.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    /// Opens (creating if necessary) the data directory.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|err| StoreError::io(&root, err))?;
        debug!(root = %root.display(), "data directory ready");
        Ok(DataDir { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn users_file(&self) -> PathBuf {
        self.root.join("users.dat")
    }

    pub fn rooms_file(&self) -> PathBuf {
        self.root.join("rooms.dat")
    }

    pub fn guests_file(&self) -> PathBuf {
        self.root.join("guests.dat")
    }

    pub fn reservations_file(&self) -> PathBuf {
        self.root.join("reservations.dat")
    }

    pub fn invoices_file(&self) -> PathBuf {
        self.root.join("invoices.dat")
    }

    pub fn billing_items_file(&self) -> PathBuf {
        self.root.join("billing_items.dat")
    }

    pub fn payments_file(&self) -> PathBuf {
        self.root.join("payments.dat")
    }

    /// Copies every existing entity file into a fresh timestamped
    /// directory under `backup/` and returns its path. Files that do not
    /// exist yet (empty stores) are simply skipped. Two backups within
    /// the same second get distinct directories; a snapshot is never
    /// overwritten.
    pub fn backup(&self) -> StoreResult<PathBuf> {
        let base = self.root.join("backup");
        std::fs::create_dir_all(&base).map_err(|err| StoreError::io(&base, err))?;
        let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let target = fresh_snapshot_dir(&base, &stamp);
        std::fs::create_dir(&target).map_err(|err| StoreError::io(&target, err))?;

        let mut copied = 0usize;
        for name in ENTITY_FILES {
            let source = self.root.join(name);
            if !source.exists() {
                continue;
            }
            std::fs::copy(&source, target.join(name))
                .map_err(|err| StoreError::io(&source, err))?;
            copied += 1;
        }
        info!(target = %target.display(), copied, "backup complete");
        Ok(target)
    }
}

/// First unused snapshot directory for `stamp`: the stamp itself, then
/// `<stamp>_2`, `<stamp>_3`, ...
fn fresh_snapshot_dir(base: &Path, stamp: &str) -> PathBuf {
    let mut target = base.join(stamp);
    let mut attempt = 1usize;
    while target.exists() {
        attempt += 1;
        target = base.join(format!("{stamp}_{attempt}"));
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("data");
        let data = DataDir::open(&root).unwrap();
        assert!(data.root().is_dir());
        assert_eq!(data.users_file(), root.join("users.dat"));
    }

    #[test]
    fn backup_copies_existing_files_byte_identical() {
        let dir = TempDir::new().unwrap();
        let data = DataDir::open(dir.path().join("data")).unwrap();
        std::fs::write(data.rooms_file(), b"room bytes").unwrap();
        std::fs::write(data.guests_file(), b"guest bytes").unwrap();

        let target = data.backup().unwrap();

        assert_eq!(std::fs::read(target.join("rooms.dat")).unwrap(), b"room bytes");
        assert_eq!(std::fs::read(target.join("guests.dat")).unwrap(), b"guest bytes");
        // Files that never existed are not invented.
        assert!(!target.join("payments.dat").exists());
    }

    #[test]
    fn repeated_backups_never_share_a_directory() {
        let dir = TempDir::new().unwrap();
        let data = DataDir::open(dir.path().join("data")).unwrap();
        std::fs::write(data.rooms_file(), b"first").unwrap();

        let first = data.backup().unwrap();
        std::fs::write(data.rooms_file(), b"second").unwrap();
        let second = data.backup().unwrap();

        // Same-second runs still land in distinct directories and the
        // first snapshot keeps its bytes.
        assert_ne!(first, second);
        assert_eq!(std::fs::read(first.join("rooms.dat")).unwrap(), b"first");
        assert_eq!(std::fs::read(second.join("rooms.dat")).unwrap(), b"second");
    }

    #[test]
    fn snapshot_dir_picks_the_next_free_suffix() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("backup");
        std::fs::create_dir_all(base.join("20240301_140533")).unwrap();
        std::fs::create_dir_all(base.join("20240301_140533_2")).unwrap();

        let target = fresh_snapshot_dir(&base, "20240301_140533");
        assert_eq!(target, base.join("20240301_140533_3"));

        let untaken = fresh_snapshot_dir(&base, "20240301_150000");
        assert_eq!(untaken, base.join("20240301_150000"));
    }

    #[test]
    fn backup_of_empty_store_succeeds() {
        let dir = TempDir::new().unwrap();
        let data = DataDir::open(dir.path().join("data")).unwrap();
        let target = data.backup().unwrap();
        assert!(target.is_dir());
    }
}
