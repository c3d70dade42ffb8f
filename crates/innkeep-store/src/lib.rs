//! # innkeep-store: Flat-File Persistence for Innkeep
//!
//! Fixed-record storage, repositories, and the cross-entity workflows of
//! the hotel management core.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Innkeep Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Console menu layer (external)                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ innkeep-store (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐   ┌────────────┐   ┌─────────────────────────┐  │   │
//! │  │   │ service  │──►│ repository │──►│ store + codec + paths   │  │   │
//! │  │   │workflows │   │ per entity │   │ fixed records on disk   │  │   │
//! │  │   └──────────┘   └────────────┘   └─────────────────────────┘  │   │
//! │  │        │                                                        │   │
//! │  │        └──► innkeep-core (pure rules, recompute, validation)    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Storage model: one flat file per entity, fixed-size binary records,   │
//! │  linear scans, whole-file rewrite through a temp file for mutation.    │
//! │  Single process, single thread; the files ARE the database.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod config;
pub mod error;
pub mod paths;
pub mod repository;
pub mod service;
pub mod store;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use paths::DataDir;
pub use service::HotelService;
