//! # Domain Types
//!
//! Core domain types used throughout Innkeep.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌───────────────┐                  │
//! │  │    Room      │  │    Guest     │  │  Reservation  │                  │
//! │  │  ──────────  │  │  ──────────  │  │  ───────────  │                  │
//! │  │  id (room#)  │  │  id          │  │  id           │                  │
//! │  │  status      │  │  vip_status  │  │  guest_id ────┼──► Guest.id     │
//! │  │  rate        │  │  total_spent │  │  room_id  ────┼──► Room.id      │
//! │  └──────────────┘  └──────────────┘  └───────────────┘                  │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌───────────────┐                  │
//! │  │   Invoice    │  │ BillingItem  │  │    Payment    │                  │
//! │  │  ──────────  │  │  ──────────  │  │  ───────────  │                  │
//! │  │  totals are  │  │  invoice_id  │  │  invoice_id   │                  │
//! │  │  DERIVED,    │  │  amount =    │  │  only active  │                  │
//! │  │  never set   │  │  price × qty │  │  + Completed  │                  │
//! │  │  directly    │  │              │  │  count        │                  │
//! │  └──────────────┘  └──────────────┘  └───────────────┘                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Weak Foreign Keys
//! Child records hold bare `u32` ids of their parents (guest_id, room_id,
//! invoice_id, reservation_id). They are handles, not references: every
//! lookup re-scans the parent's store. This keeps soft-deleted parents from
//! dangling - a lookup simply comes back empty.
//!
//! ## Money
//! All monetary values are IEEE-754 `f64`, matching the on-disk record
//! layout. Dates are `YYYY-MM-DD` strings, compared lexicographically
//! (valid because that format sorts chronologically).

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// User
// =============================================================================

/// Operator account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Staff,
}

impl UserRole {
    pub const fn as_u8(self) -> u8 {
        match self {
            UserRole::Admin => 1,
            UserRole::Staff => 2,
        }
    }

    pub const fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(UserRole::Admin),
            2 => Some(UserRole::Staff),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UserRole::Admin => "Admin",
            UserRole::Staff => "Staff",
        })
    }
}

/// An operator account.
///
/// Accounts are never hard-deleted, only deactivated - historical records
/// reference `created_by` ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    /// Login name, unique and case-sensitive.
    pub username: String,
    /// Checksum of the password, rendered as a decimal string.
    pub password_hash: String,
    pub full_name: String,
    pub role: UserRole,
    /// `YYYY-MM-DD HH:MM:SS` of the most recent login, or `"Never"`.
    pub last_login: String,
    pub is_active: bool,
}

// =============================================================================
// Room
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Standard,
    Deluxe,
    Suite,
    Executive,
    Presidential,
}

impl RoomType {
    pub const fn as_u8(self) -> u8 {
        match self {
            RoomType::Standard => 0,
            RoomType::Deluxe => 1,
            RoomType::Suite => 2,
            RoomType::Executive => 3,
            RoomType::Presidential => 4,
        }
    }

    pub const fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(RoomType::Standard),
            1 => Some(RoomType::Deluxe),
            2 => Some(RoomType::Suite),
            3 => Some(RoomType::Executive),
            4 => Some(RoomType::Presidential),
            _ => None,
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RoomType::Standard => "Standard",
            RoomType::Deluxe => "Deluxe",
            RoomType::Suite => "Suite",
            RoomType::Executive => "Executive",
            RoomType::Presidential => "Presidential",
        })
    }
}

/// Room occupancy state.
///
/// Mutated only by reservation lifecycle transitions (check-in, check-out,
/// cancellation) and explicit operator override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
    Reserved,
    Cleaning,
}

impl RoomStatus {
    pub const fn as_u8(self) -> u8 {
        match self {
            RoomStatus::Available => 0,
            RoomStatus::Occupied => 1,
            RoomStatus::Maintenance => 2,
            RoomStatus::Reserved => 3,
            RoomStatus::Cleaning => 4,
        }
    }

    pub const fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(RoomStatus::Available),
            1 => Some(RoomStatus::Occupied),
            2 => Some(RoomStatus::Maintenance),
            3 => Some(RoomStatus::Reserved),
            4 => Some(RoomStatus::Cleaning),
            _ => None,
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RoomStatus::Available => "Available",
            RoomStatus::Occupied => "Occupied",
            RoomStatus::Maintenance => "Maintenance",
            RoomStatus::Reserved => "Reserved",
            RoomStatus::Cleaning => "Cleaning",
        })
    }
}

/// A hotel room. The id doubles as the room number (natural key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Room number, chosen by the operator at creation.
    pub id: u32,
    pub room_type: RoomType,
    pub status: RoomStatus,
    /// Nightly rate.
    pub rate: f64,
    pub capacity: u32,
    pub floor: u32,
    pub description: String,
    pub features: String,
    pub is_active: bool,
}

// =============================================================================
// Guest
// =============================================================================

/// Loyalty tier, derived solely from cumulative spend.
///
/// Thresholds are evaluated high-to-low against the NEW cumulative total
/// whenever a stay completes; see [`crate::recompute::vip_tier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VipStatus {
    Regular,
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl VipStatus {
    pub const fn as_u8(self) -> u8 {
        match self {
            VipStatus::Regular => 0,
            VipStatus::Bronze => 1,
            VipStatus::Silver => 2,
            VipStatus::Gold => 3,
            VipStatus::Platinum => 4,
        }
    }

    pub const fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(VipStatus::Regular),
            1 => Some(VipStatus::Bronze),
            2 => Some(VipStatus::Silver),
            3 => Some(VipStatus::Gold),
            4 => Some(VipStatus::Platinum),
            _ => None,
        }
    }
}

impl fmt::Display for VipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VipStatus::Regular => "Regular",
            VipStatus::Bronze => "Bronze",
            VipStatus::Silver => "Silver",
            VipStatus::Gold => "Gold",
            VipStatus::Platinum => "Platinum",
        })
    }
}

/// A registered guest.
///
/// `total_stays`, `total_spent` and `vip_status` are derived fields: they
/// change exactly once per completed stay and are never decremented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub id_type: String,
    pub id_number: String,
    /// `YYYY-MM-DD`, stamped at creation.
    pub registration_date: String,
    pub total_stays: u32,
    pub total_spent: f64,
    pub vip_status: VipStatus,
    pub notes: String,
    pub is_active: bool,
}

// =============================================================================
// Reservation
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
    NoShow,
}

impl ReservationStatus {
    pub const fn as_u8(self) -> u8 {
        match self {
            ReservationStatus::Confirmed => 0,
            ReservationStatus::CheckedIn => 1,
            ReservationStatus::CheckedOut => 2,
            ReservationStatus::Cancelled => 3,
            ReservationStatus::NoShow => 4,
        }
    }

    pub const fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(ReservationStatus::Confirmed),
            1 => Some(ReservationStatus::CheckedIn),
            2 => Some(ReservationStatus::CheckedOut),
            3 => Some(ReservationStatus::Cancelled),
            4 => Some(ReservationStatus::NoShow),
            _ => None,
        }
    }

    /// True for the statuses that block other bookings of the same room.
    pub const fn holds_room(self) -> bool {
        matches!(
            self,
            ReservationStatus::Confirmed | ReservationStatus::CheckedIn
        )
    }

    pub const fn label(self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "Confirmed",
            ReservationStatus::CheckedIn => "Checked In",
            ReservationStatus::CheckedOut => "Checked Out",
            ReservationStatus::Cancelled => "Cancelled",
            ReservationStatus::NoShow => "No Show",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A booking of one room for one guest over a half-open date interval
/// `[check_in, check_out)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: u32,
    pub guest_id: u32,
    pub room_id: u32,
    pub check_in: String,
    pub check_out: String,
    pub status: ReservationStatus,
    pub num_guests: u32,
    /// rate × billable nights, fixed at creation.
    pub total_amount: f64,
    pub paid_amount: f64,
    /// `YYYY-MM-DD HH:MM:SS` creation stamp.
    pub created_at: String,
    pub created_by: u32,
    pub notes: String,
    pub is_active: bool,
}

// =============================================================================
// Invoice
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Issued,
    Paid,
    Cancelled,
    Overdue,
}

impl InvoiceStatus {
    pub const fn as_u8(self) -> u8 {
        match self {
            InvoiceStatus::Draft => 0,
            InvoiceStatus::Issued => 1,
            InvoiceStatus::Paid => 2,
            InvoiceStatus::Cancelled => 3,
            InvoiceStatus::Overdue => 4,
        }
    }

    pub const fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(InvoiceStatus::Draft),
            1 => Some(InvoiceStatus::Issued),
            2 => Some(InvoiceStatus::Paid),
            3 => Some(InvoiceStatus::Cancelled),
            4 => Some(InvoiceStatus::Overdue),
            _ => None,
        }
    }

    /// Paid and Cancelled are terminal: no modification, no new items,
    /// no payment mutations.
    pub const fn is_mutable(self) -> bool {
        !matches!(self, InvoiceStatus::Paid | InvoiceStatus::Cancelled)
    }

    pub const fn label(self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Issued => "Issued",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Cancelled => "Cancelled",
            InvoiceStatus::Overdue => "Overdue",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An invoice for one reservation (at most one active invoice per
/// reservation, enforced at creation).
///
/// ## Derived Fields
/// `subtotal`, `tax_amount`, `discount_amount`, `total_amount` and
/// `paid_amount` are recomputed together from the invoice's billing items
/// and payments after every mutation of either - never set independently.
/// Invariant: `total_amount == max(0, subtotal + tax_amount - discount_amount)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: u32,
    pub guest_id: u32,
    pub reservation_id: u32,
    pub issue_date: String,
    pub due_date: String,
    pub subtotal: f64,
    pub tax_amount: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub status: InvoiceStatus,
    pub notes: String,
    pub created_by: u32,
    pub is_active: bool,
}

impl Invoice {
    /// Remaining balance; negative when overpaid.
    pub fn balance(&self) -> f64 {
        self.total_amount - self.paid_amount
    }
}

// =============================================================================
// Billing Item
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingItemType {
    RoomCharge,
    Food,
    Laundry,
    Minibar,
    Spa,
    Tax,
    Discount,
    Other,
}

impl BillingItemType {
    pub const fn as_u8(self) -> u8 {
        match self {
            BillingItemType::RoomCharge => 0,
            BillingItemType::Food => 1,
            BillingItemType::Laundry => 2,
            BillingItemType::Minibar => 3,
            BillingItemType::Spa => 4,
            BillingItemType::Tax => 5,
            BillingItemType::Discount => 6,
            BillingItemType::Other => 7,
        }
    }

    pub const fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(BillingItemType::RoomCharge),
            1 => Some(BillingItemType::Food),
            2 => Some(BillingItemType::Laundry),
            3 => Some(BillingItemType::Minibar),
            4 => Some(BillingItemType::Spa),
            5 => Some(BillingItemType::Tax),
            6 => Some(BillingItemType::Discount),
            7 => Some(BillingItemType::Other),
            _ => None,
        }
    }
}

impl fmt::Display for BillingItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BillingItemType::RoomCharge => "Room Charge",
            BillingItemType::Food => "Food Service",
            BillingItemType::Laundry => "Laundry",
            BillingItemType::Minibar => "Minibar",
            BillingItemType::Spa => "Spa Service",
            BillingItemType::Tax => "Tax",
            BillingItemType::Discount => "Discount",
            BillingItemType::Other => "Other",
        })
    }
}

/// A line on an invoice.
///
/// Tax- and Discount-typed items do not contribute to the subtotal; they
/// feed the invoice's tax/discount aggregates directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingItem {
    pub id: u32,
    pub invoice_id: u32,
    pub item_type: BillingItemType,
    pub description: String,
    pub unit_price: f64,
    pub quantity: u32,
    /// Always `unit_price * quantity`, recomputed on every edit.
    pub amount: f64,
    pub is_active: bool,
}

// =============================================================================
// Payment
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    BankTransfer,
    Online,
}

impl PaymentMethod {
    pub const fn as_u8(self) -> u8 {
        match self {
            PaymentMethod::Cash => 0,
            PaymentMethod::CreditCard => 1,
            PaymentMethod::DebitCard => 2,
            PaymentMethod::BankTransfer => 3,
            PaymentMethod::Online => 4,
        }
    }

    pub const fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(PaymentMethod::Cash),
            1 => Some(PaymentMethod::CreditCard),
            2 => Some(PaymentMethod::DebitCard),
            3 => Some(PaymentMethod::BankTransfer),
            4 => Some(PaymentMethod::Online),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Online => "Online Payment",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub const fn as_u8(self) -> u8 {
        match self {
            PaymentStatus::Pending => 0,
            PaymentStatus::Completed => 1,
            PaymentStatus::Failed => 2,
            PaymentStatus::Refunded => 3,
        }
    }

    pub const fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(PaymentStatus::Pending),
            1 => Some(PaymentStatus::Completed),
            2 => Some(PaymentStatus::Failed),
            3 => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Completed => "Completed",
            PaymentStatus::Failed => "Failed",
            PaymentStatus::Refunded => "Refunded",
        })
    }
}

/// Money received against an invoice.
///
/// Only active + Completed payments count toward `Invoice::paid_amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: u32,
    pub invoice_id: u32,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub amount: f64,
    pub transaction_date: String,
    pub transaction_id: String,
    pub notes: String,
    pub created_by: u32,
    pub is_active: bool,
}

impl Payment {
    /// True when this payment contributes to the invoice's paid amount.
    pub fn counts_toward_paid(&self) -> bool {
        self.is_active && self.status == PaymentStatus::Completed
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_byte_tags_round_trip() {
        for status in [
            ReservationStatus::Confirmed,
            ReservationStatus::CheckedIn,
            ReservationStatus::CheckedOut,
            ReservationStatus::Cancelled,
            ReservationStatus::NoShow,
        ] {
            assert_eq!(ReservationStatus::from_u8(status.as_u8()), Some(status));
        }
        assert_eq!(ReservationStatus::from_u8(200), None);
        assert_eq!(InvoiceStatus::from_u8(9), None);
        assert_eq!(BillingItemType::from_u8(BillingItemType::Spa.as_u8()), Some(BillingItemType::Spa));
    }

    #[test]
    fn holds_room_only_for_live_bookings() {
        assert!(ReservationStatus::Confirmed.holds_room());
        assert!(ReservationStatus::CheckedIn.holds_room());
        assert!(!ReservationStatus::CheckedOut.holds_room());
        assert!(!ReservationStatus::Cancelled.holds_room());
        assert!(!ReservationStatus::NoShow.holds_room());
    }

    #[test]
    fn paid_and_cancelled_invoices_are_frozen() {
        assert!(InvoiceStatus::Draft.is_mutable());
        assert!(InvoiceStatus::Issued.is_mutable());
        assert!(InvoiceStatus::Overdue.is_mutable());
        assert!(!InvoiceStatus::Paid.is_mutable());
        assert!(!InvoiceStatus::Cancelled.is_mutable());
    }

    #[test]
    fn only_completed_active_payments_count() {
        let mut payment = Payment {
            id: 1,
            invoice_id: 1,
            method: PaymentMethod::Cash,
            status: PaymentStatus::Completed,
            amount: 50.0,
            transaction_date: "2024-01-05".to_string(),
            transaction_id: "TX-1".to_string(),
            notes: String::new(),
            created_by: 1,
            is_active: true,
        };
        assert!(payment.counts_toward_paid());

        payment.status = PaymentStatus::Pending;
        assert!(!payment.counts_toward_paid());

        payment.status = PaymentStatus::Completed;
        payment.is_active = false;
        assert!(!payment.counts_toward_paid());
    }
}
