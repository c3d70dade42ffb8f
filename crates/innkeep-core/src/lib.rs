//! # innkeep-core: Pure Business Logic for Innkeep
//!
//! This crate is the heart of the hotel management core. It contains all
//! business rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Innkeep Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Console menu layer (external)                   │   │
//! │  │     prompts ──► command dispatch ──► result rendering           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ call/return                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                innkeep-store (persistence)                      │   │
//! │  │     record codec, repositories, workflows, backups              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ innkeep-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ recompute │  │ validation │  │  password │  │   │
//! │  │   │  entities │  │  amounts  │  │   dates    │  │  checksum │  │   │
//! │  │   │   enums   │  │ VIP tiers │  │  overlap   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • PURE FUNCTIONS                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output; even "today" is a
//!    parameter, never read from the clock here
//! 2. **No I/O**: file access lives in innkeep-store, full stop
//! 3. **Explicit Errors**: typed [`error::ValidationError`] variants, never
//!    strings or panics
//! 4. **f64 Money**: monetary values are IEEE-754 doubles, matching the
//!    fixed-record file layout

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod password;
pub mod recompute;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ValidationError, ValidationResult};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat tax rate applied to an invoice's subtotal when no explicit
/// Tax-typed billing item exists.
pub const DEFAULT_TAX_RATE: f64 = 0.10;

/// Days between an invoice's issue date and its due date.
pub const DEFAULT_INVOICE_DUE_DAYS: i64 = 7;

/// Cumulative-spend thresholds for loyalty tiers, evaluated high-to-low.
pub const VIP_PLATINUM_THRESHOLD: f64 = 5000.0;
pub const VIP_GOLD_THRESHOLD: f64 = 2500.0;
pub const VIP_SILVER_THRESHOLD: f64 = 1000.0;
pub const VIP_BRONZE_THRESHOLD: f64 = 500.0;

/// Credentials of the admin account seeded into an empty data directory.
///
/// ## Why Constants?
/// First login on a fresh install has to work before any account exists;
/// the operator is expected to change the password immediately after.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_ADMIN_NAME: &str = "System Administrator";
