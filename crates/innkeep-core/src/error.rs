//! # Error Types
//!
//! Domain-specific error types for innkeep-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  innkeep-core errors (this file)                                        │
//! │  └── ValidationError  - Business-rule violations                        │
//! │                                                                         │
//! │  innkeep-store errors (separate crate)                                  │
//! │  └── StoreError       - NotFound / Validation / Io / Corrupt            │
//! │                                                                         │
//! │  Flow: ValidationError → StoreError → caller (menu layer)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ids, dates, amounts)
//! 3. Errors are enum variants, never String
//! 4. Every variant is recoverable - the operator corrects input and retries

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Business-rule violations.
///
/// These are always surfaced to the caller for user correction; they never
/// abort the process and never leave a data file half-written.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Numeric value must be greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Text field exceeds its fixed stored capacity.
    #[error("{field} exceeds {max} bytes")]
    TooLong { field: &'static str, max: usize },

    /// Date string is not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid date: '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    /// Check-out does not fall after check-in.
    #[error("check-out {check_out} must be after check-in {check_in}")]
    InvalidDateRange {
        check_in: String,
        check_out: String,
    },

    /// Username already taken (case-sensitive match).
    #[error("username '{username}' already exists")]
    DuplicateUsername { username: String },

    /// Room number already in use.
    #[error("room {room_id} already exists")]
    DuplicateRoom { room_id: u32 },

    /// Room is not in a bookable state.
    #[error("room {room_id} is not available")]
    RoomUnavailable { room_id: u32 },

    /// Requested party is larger than the room can hold.
    #[error("room {room_id} holds {capacity} guests, {requested} requested")]
    CapacityExceeded {
        room_id: u32,
        capacity: u32,
        requested: u32,
    },

    /// Another Confirmed/CheckedIn reservation overlaps the requested dates.
    ///
    /// ## Overlap Rule
    /// `[a, b)` and `[c, d)` overlap iff `a < d && c < b`. Touching
    /// boundaries (one stay checking out the day another checks in) do
    /// NOT conflict.
    #[error("room {room_id} is already reserved between {check_in} and {check_out}")]
    OverlappingReservation {
        room_id: u32,
        check_in: String,
        check_out: String,
    },

    /// The referenced guest exists but has been deactivated.
    #[error("guest {guest_id} is inactive")]
    GuestInactive { guest_id: u32 },

    /// An active invoice already exists for this reservation.
    #[error("an invoice already exists for reservation {reservation_id}")]
    InvoiceExists { reservation_id: u32 },

    /// The entity's current status does not permit the requested operation.
    ///
    /// ## When This Occurs
    /// - Checking in a reservation that is not Confirmed
    /// - Adding items or payments to a Paid/Cancelled invoice
    /// - Issuing an invoice that is not Draft
    #[error("cannot {operation}: {entity} is {status}")]
    InvalidStatus {
        entity: &'static str,
        status: &'static str,
        operation: &'static str,
    },

    /// Check-out refused while money is still owed on the reservation.
    #[error("reservation {reservation_id} has an outstanding balance of {balance:.2}")]
    OutstandingBalance { reservation_id: u32, balance: f64 },

    /// Deletion refused while dependent reservations are still live.
    #[error("{entity} {id} still has active reservations")]
    HasActiveReservations { entity: &'static str, id: u32 },

    /// The supplied password does not match the stored hash.
    #[error("invalid credentials")]
    BadCredentials,
}

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_context() {
        let err = ValidationError::CapacityExceeded {
            room_id: 204,
            capacity: 2,
            requested: 5,
        };
        assert_eq!(err.to_string(), "room 204 holds 2 guests, 5 requested");

        let err = ValidationError::OutstandingBalance {
            reservation_id: 7,
            balance: 120.5,
        };
        assert_eq!(
            err.to_string(),
            "reservation 7 has an outstanding balance of 120.50"
        );
    }

    #[test]
    fn invalid_status_message() {
        let err = ValidationError::InvalidStatus {
            entity: "invoice",
            status: "Paid",
            operation: "add billing item",
        };
        assert_eq!(err.to_string(), "cannot add billing item: invoice is Paid");
    }
}
