//! # Record Store
//!
//! Generic flat-file persistence for one entity type.
//!
//! ## File Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Store, One File                                  │
//! │                                                                         │
//! │  READ:    open ──► sequential scan, RECORD_SIZE at a time ──► close    │
//! │           missing file = empty store, short trailing block = EOF       │
//! │                                                                         │
//! │  APPEND:  open O_APPEND ──► write one block ──► close                  │
//! │                                                                         │
//! │  MUTATE:  temp file in the SAME directory                              │
//! │           copy every record, transforming the matches                  │
//! │           0 matches ──► discard temp, original untouched               │
//! │           ≥1 match  ──► atomic rename over the original                │
//! │                                                                         │
//! │  Soft deletes flip is_active; records are never moved or reordered.   │
//! │  Ids are never reused: next_id = 1 + max(ALL ids, active or not).     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::codec::FixedRecord;
use crate::error::{StoreError, StoreResult};

// =============================================================================
// RecordStore
// =============================================================================

/// Flat-file store of fixed-size records for one entity type.
///
/// Stateless between calls: every operation opens the file fresh. There is
/// no cache to invalidate and no index to maintain.
pub struct RecordStore<R: FixedRecord> {
    path: PathBuf,
    _marker: PhantomData<R>,
}

/// Outcome of a [`RecordStore::rewrite_where`] transform for one matching
/// record.
pub enum Rewrite<R> {
    /// Write the (possibly modified) record back.
    Keep(R),
    /// Drop the record from the file entirely. Reserved for repair tooling;
    /// normal deletion flips `is_active` and Keeps.
    Remove,
}

impl<R: FixedRecord> RecordStore<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RecordStore {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a sequential scan over every record in the file, active and
    /// inactive alike. A missing file yields an empty scan.
    pub fn scan(&self) -> StoreResult<Scan<R>> {
        let reader = match File::open(&self.path) {
            Ok(file) => Some(BufReader::new(file)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };
        Ok(Scan {
            reader,
            path: self.path.clone(),
            offset: 0,
            _marker: PhantomData,
        })
    }

    /// Returns the first record matching `predicate`, or `None`.
    pub fn find_first<P>(&self, mut predicate: P) -> StoreResult<Option<R>>
    where
        P: FnMut(&R) -> bool,
    {
        for record in self.scan()? {
            let record = record?;
            if predicate(&record) {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    /// Collects every record matching `predicate`, in file order.
    pub fn find_all<P>(&self, mut predicate: P) -> StoreResult<Vec<R>>
    where
        P: FnMut(&R) -> bool,
    {
        let mut out = Vec::new();
        for record in self.scan()? {
            let record = record?;
            if predicate(&record) {
                out.push(record);
            }
        }
        Ok(out)
    }

    /// Appends one record to the end of the file, creating it if needed.
    pub fn append(&self, record: &R) -> StoreResult<()> {
        let mut buf = vec![0u8; R::RECORD_SIZE];
        record.encode(&mut buf);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| StoreError::io(&self.path, err))?;
        file.write_all(&buf)
            .map_err(|err| StoreError::io(&self.path, err))?;
        debug!(entity = R::ENTITY, id = record.id(), "record appended");
        Ok(())
    }

    /// The sole mutation primitive: streams every record into a temp file
    /// in the same directory, applying `transform` to those matching
    /// `predicate`, then atomically renames the temp file over the
    /// original. Returns the number of matches.
    ///
    /// Zero matches discards the temp file and leaves the original
    /// byte-for-byte untouched. An error at any point before the final
    /// rename also leaves the original untouched.
    pub fn rewrite_where<P, T>(&self, mut predicate: P, mut transform: T) -> StoreResult<usize>
    where
        P: FnMut(&R) -> bool,
        T: FnMut(R) -> Rewrite<R>,
    {
        if !self.path.exists() {
            return Ok(0);
        }
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let temp = NamedTempFile::new_in(dir).map_err(|err| StoreError::io(dir, err))?;
        let mut writer = BufWriter::new(temp);

        let mut matched = 0usize;
        let mut buf = vec![0u8; R::RECORD_SIZE];
        for record in self.scan()? {
            let record = record?;
            if predicate(&record) {
                matched += 1;
                match transform(record) {
                    Rewrite::Keep(updated) => {
                        updated.encode(&mut buf);
                        writer
                            .write_all(&buf)
                            .map_err(|err| StoreError::io(&self.path, err))?;
                    }
                    Rewrite::Remove => {}
                }
            } else {
                record.encode(&mut buf);
                writer
                    .write_all(&buf)
                    .map_err(|err| StoreError::io(&self.path, err))?;
            }
        }

        if matched == 0 {
            // Temp file is dropped and unlinked; nothing happened.
            return Ok(0);
        }

        let temp = writer
            .into_inner()
            .map_err(|err| StoreError::io(&self.path, err.into_error()))?;
        temp.persist(&self.path)
            .map_err(|err| StoreError::io(&self.path, err.error))?;
        debug!(entity = R::ENTITY, matched, "store rewritten");
        Ok(matched)
    }

    /// Allocates the next id: one past the highest id ever written,
    /// soft-deleted records included. Ids are never reused.
    pub fn next_id(&self) -> StoreResult<u32> {
        let mut max = 0u32;
        for record in self.scan()? {
            max = max.max(record?.id());
        }
        Ok(max + 1)
    }
}

// =============================================================================
// Scan Iterator
// =============================================================================

/// Lazy iterator over a store's records, reading one block at a time.
pub struct Scan<R: FixedRecord> {
    reader: Option<BufReader<File>>,
    path: PathBuf,
    offset: u64,
    _marker: PhantomData<R>,
}

impl<R: FixedRecord> Scan<R> {
    /// Reads exactly one record block. `Ok(None)` on a clean end of file;
    /// a SHORT trailing block (torn final append) is logged and treated as
    /// end of file too.
    fn read_block(&mut self, buf: &mut [u8]) -> StoreResult<Option<()>> {
        let reader = match self.reader.as_mut() {
            Some(reader) => reader,
            None => return Ok(None),
        };
        let mut filled = 0usize;
        while filled < buf.len() {
            match reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(StoreError::io(&self.path, err)),
            }
        }
        if filled == 0 {
            self.reader = None;
            return Ok(None);
        }
        if filled < buf.len() {
            warn!(
                entity = R::ENTITY,
                path = %self.path.display(),
                offset = self.offset,
                bytes = filled,
                "short trailing block ignored"
            );
            self.reader = None;
            return Ok(None);
        }
        Ok(Some(()))
    }
}

impl<R: FixedRecord> Iterator for Scan<R> {
    type Item = StoreResult<R>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = vec![0u8; R::RECORD_SIZE];
        match self.read_block(&mut buf) {
            Ok(None) => None,
            Err(err) => {
                self.reader = None;
                Some(Err(err))
            }
            Ok(Some(())) => {
                let offset = self.offset;
                self.offset += R::RECORD_SIZE as u64;
                match R::decode(&buf) {
                    Ok(record) => Some(Ok(record)),
                    Err(err) => {
                        self.reader = None;
                        Some(Err(StoreError::Corrupt {
                            path: self.path.clone(),
                            offset,
                            detail: err.to_string(),
                        }))
                    }
                }
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
