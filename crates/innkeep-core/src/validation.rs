//! # Validation Module
//!
//! Business-rule validation shared by every repository.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Menu layer (external caller)                                 │
//! │  ├── Numeric range prompts, re-prompting on bad input                  │
//! │  └── Immediate operator feedback                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - pure business rules                            │
//! │  ├── Date format and ordering                                          │
//! │  ├── Half-open interval overlap                                        │
//! │  └── Field presence                                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Repositories (innkeep-store)                                 │
//! │  └── Cross-record rules needing a scan (uniqueness, conflicts)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Date Handling
//! Dates travel as `YYYY-MM-DD` strings and are ORDERED by plain string
//! comparison, which is correct for this format. `chrono` is only consulted
//! to confirm a string is a real calendar date and to count nights.

use chrono::NaiveDate;

use crate::error::{ValidationError, ValidationResult};

/// On-disk/date-string format for all calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Date Validators
// =============================================================================

/// Validates a `YYYY-MM-DD` string as a real calendar date.
///
/// ## Example
/// ```rust
/// use innkeep_core::validation::validate_date;
///
/// assert!(validate_date("2024-02-29").is_ok()); // leap day
/// assert!(validate_date("2024-02-30").is_err());
/// assert!(validate_date("24-1-5").is_err());
/// ```
pub fn validate_date(value: &str) -> ValidationResult<NaiveDate> {
    // Length check first: chrono would accept "2024-1-5", which the
    // fixed-width record layout (and string ordering) cannot.
    if value.len() != 10 {
        return Err(ValidationError::InvalidDate {
            value: value.to_string(),
        });
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
        value: value.to_string(),
    })
}

/// Validates that both dates parse and that check-out falls strictly after
/// check-in (string comparison, same result as chronological).
pub fn validate_date_range(check_in: &str, check_out: &str) -> ValidationResult<()> {
    validate_date(check_in)?;
    validate_date(check_out)?;
    if check_in >= check_out {
        return Err(ValidationError::InvalidDateRange {
            check_in: check_in.to_string(),
            check_out: check_out.to_string(),
        });
    }
    Ok(())
}

/// Half-open interval overlap test for date ranges.
///
/// `[a_start, a_end)` and `[b_start, b_end)` overlap iff
/// `a_start < b_end && b_start < a_end`. A stay checking out on the day
/// another checks in does NOT overlap.
///
/// ## Example
/// ```rust
/// use innkeep_core::validation::ranges_overlap;
///
/// assert!(ranges_overlap("2024-01-01", "2024-01-04", "2024-01-03", "2024-01-06"));
/// // Touching boundary: B starts exactly on A's checkout date.
/// assert!(!ranges_overlap("2024-01-01", "2024-01-04", "2024-01-04", "2024-01-07"));
/// ```
pub fn ranges_overlap(a_start: &str, a_end: &str, b_start: &str, b_end: &str) -> bool {
    a_start < b_end && b_start < a_end
}

/// Number of nights billed for a stay: the calendar-day difference,
/// floored at one (same-day turnarounds still bill a night).
///
/// Callers must have validated the dates; unparseable input bills one night.
pub fn billable_nights(check_in: &str, check_out: &str) -> i64 {
    let nights = match (
        NaiveDate::parse_from_str(check_in, DATE_FORMAT),
        NaiveDate::parse_from_str(check_out, DATE_FORMAT),
    ) {
        (Ok(start), Ok(end)) => (end - start).num_days(),
        _ => 0,
    };
    nights.max(1)
}

// =============================================================================
// Field Validators
// =============================================================================

/// Stored capacity of a username; must match the fixed record layout.
pub const USERNAME_MAX_BYTES: usize = 20;

/// Validates a username: non-empty after trimming and within the stored
/// capacity. An over-length name would be truncated on disk, where it
/// could collide with any other name sharing the same 20-byte prefix
/// and could never authenticate under its full spelling.
///
/// Uniqueness is a cross-record rule checked by the user repository.
pub fn validate_username(username: &str) -> ValidationResult<()> {
    if username.trim().is_empty() {
        return Err(ValidationError::Required { field: "username" });
    }
    if username.len() > USERNAME_MAX_BYTES {
        return Err(ValidationError::TooLong {
            field: "username",
            max: USERNAME_MAX_BYTES,
        });
    }
    Ok(())
}

/// Validates that a required text field is present.
pub fn validate_required(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

/// Validates that an amount is strictly positive.
pub fn validate_positive(field: &'static str, amount: f64) -> ValidationResult<()> {
    if amount <= 0.0 {
        return Err(ValidationError::MustBePositive { field });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
