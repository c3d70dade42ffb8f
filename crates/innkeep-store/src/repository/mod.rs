//! # Repositories
//!
//! One repository per entity, each owning exactly one [`crate::store::RecordStore`].
//!
//! ## Division of Labor
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Repository (this module)          Service (crate::service)            │
//! │  ─────────────────────────         ──────────────────────────          │
//! │  single-entity rules:              cross-entity workflows:             │
//! │    uniqueness scans                  check-in / check-out              │
//! │    status-gated edits                invoice ⇄ items ⇄ payments        │
//! │    soft delete                       recompute fan-out                 │
//! │    list / search                     VIP trigger on Paid               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every read filters `is_active` unless it explicitly says otherwise;
//! inactive records exist only for id allocation and audit.

pub mod billing_items;
pub mod guests;
pub mod invoices;
pub mod payments;
pub mod reservations;
pub mod rooms;
pub mod users;

pub use billing_items::{BillingItemRepository, BillingItemUpdate, NewBillingItem};
pub use guests::{GuestRepository, NewGuest};
pub use invoices::InvoiceRepository;
pub use payments::{NewPayment, PaymentRepository, PaymentUpdate};
pub use reservations::{NewReservation, ReservationRepository};
pub use rooms::{NewRoom, RoomRepository};
pub use users::UserRepository;

/// Case-insensitive substring match used by every repository search.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
