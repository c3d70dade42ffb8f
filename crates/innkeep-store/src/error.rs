//! # Store Error Types
//!
//! Error types for the persistence layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error (open/read/write/rename)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds path and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Menu layer renders a message and re-prompts                           │
//! │                                                                         │
//! │  EXCEPTION: a missing entity file is NOT an error - it is an empty     │
//! │  store ("no records yet") and scans simply yield nothing.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Taxonomy
//! - [`StoreError::NotFound`]: referenced id absent - a negative result,
//!   never fatal
//! - [`StoreError::Validation`]: business rule violated - recoverable,
//!   the operator corrects input and retries
//! - [`StoreError::Io`]: file could not be opened/created/replaced - aborts
//!   the current operation with prior state intact, process survives
//! - [`StoreError::Corrupt`]: a record mid-file failed to decode (truncated
//!   TRAILING blocks are silently treated as end-of-stream instead)

use std::path::{Path, PathBuf};
use thiserror::Error;

use innkeep_core::ValidationError;

/// Persistence-layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in its store (or soft-deleted).
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u32 },

    /// Business rule violated; wraps the core validation error.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// File could not be opened, created, written, or replaced. The
    /// original file is left untouched.
    #[error("storage failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A full-sized record block failed to decode (e.g. an enum byte with
    /// no matching variant).
    #[error("corrupt record in {path} at offset {offset}: {detail}")]
    Corrupt {
        path: PathBuf,
        offset: u64,
        detail: String,
    },

    /// The configuration file exists but could not be parsed.
    #[error("invalid configuration {path}: {detail}")]
    Config { path: PathBuf, detail: String },
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: u32) -> Self {
        StoreError::NotFound { entity, id }
    }

    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// True when the error is a plain negative lookup result.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;
