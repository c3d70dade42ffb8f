//! # Hotel Service
//!
//! Cross-entity workflows over the repositories.
//!
//! ## Workflow Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Reservation Lifecycle                              │
//! │                                                                         │
//! │   book ──► Confirmed ──check_in──► CheckedIn ──check_out──► CheckedOut │
//! │                │                       │                                │
//! │              cancel                  room: Occupied ──► Cleaning        │
//! │                ▼                                                        │
//! │            Cancelled (room back to Available)                           │
//! │                                                                         │
//! │                      Invoice Lifecycle                                  │
//! │                                                                         │
//! │   create ──► Draft ──issue──► Issued ──(due date passes)──► Overdue    │
//! │                │                 │                             │        │
//! │              cancel        mark_paid ◄─────────────────────────┘        │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │              Paid  ──► guest stats bump (EXACTLY once per stay)        │
//! │                        reservation settled                              │
//! │                                                                         │
//! │   every item/payment mutation ──► recompute all five invoice amounts   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This is the only module that reads the clock; repositories and core
//! logic take dates as parameters.

use std::path::PathBuf;

use chrono::{Duration, Local, NaiveDate};
use tracing::{info, warn};

use innkeep_core::recompute::invoice_amounts_with_rate;
use innkeep_core::types::{
    BillingItemType, Invoice, InvoiceStatus, ReservationStatus, RoomStatus,
};
use innkeep_core::validation::{billable_nights, DATE_FORMAT};
use innkeep_core::ValidationError;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::paths::DataDir;
use crate::repository::{
    BillingItemRepository, BillingItemUpdate, GuestRepository, InvoiceRepository, NewBillingItem,
    NewPayment, NewReservation, PaymentRepository, PaymentUpdate, ReservationRepository,
    RoomRepository, UserRepository,
};

pub struct HotelService {
    config: StoreConfig,
    data: DataDir,
    users: UserRepository,
    rooms: RoomRepository,
    guests: GuestRepository,
    reservations: ReservationRepository,
    invoices: InvoiceRepository,
    billing_items: BillingItemRepository,
    payments: PaymentRepository,
}

impl HotelService {
    /// Opens the data directory, seeds the default admin into an empty
    /// install, and runs the overdue sweep once so stale Issued invoices
    /// surface immediately.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        let data = DataDir::open(config.data_dir.clone())?;
        let service = HotelService {
            users: UserRepository::new(&data),
            rooms: RoomRepository::new(&data),
            guests: GuestRepository::new(&data),
            reservations: ReservationRepository::new(&data),
            invoices: InvoiceRepository::new(&data),
            billing_items: BillingItemRepository::new(&data),
            payments: PaymentRepository::new(&data),
            data,
            config,
        };
        service.users.seed_default_admin()?;
        let overdue = service.sweep_overdue()?;
        if overdue > 0 {
            warn!(count = overdue, "invoices became overdue since last run");
        }
        Ok(service)
    }

    // =========================================================================
    // Clock
    // =========================================================================

    fn today(&self) -> String {
        Local::now().format("%Y-%m-%d").to_string()
    }

    fn now(&self) -> String {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }

    // =========================================================================
    // Reservation Lifecycle
    // =========================================================================

    /// Books a stay. Resolves the guest and room, then hands the ordered
    /// validation to the reservation repository.
    pub fn create_reservation(&self, input: NewReservation) -> StoreResult<u32> {
        let guest = self
            .guests
            .get(input.guest_id)?
            .ok_or(StoreError::not_found("guest", input.guest_id))?;
        let room = self
            .rooms
            .get(input.room_id)?
            .ok_or(StoreError::not_found("room", input.room_id))?;
        self.reservations.create(input, &guest, &room, &self.now())
    }

    /// Confirmed → CheckedIn; the room becomes Occupied.
    pub fn check_in(&self, reservation_id: u32) -> StoreResult<()> {
        let reservation = self.require_reservation(reservation_id)?;
        if reservation.status != ReservationStatus::Confirmed {
            return Err(invalid_reservation_status(&reservation.status, "check in"));
        }
        self.reservations
            .set_status(reservation_id, ReservationStatus::CheckedIn)?;
        self.rooms
            .set_status(reservation.room_id, RoomStatus::Occupied)?;
        info!(reservation_id, room_id = reservation.room_id, "guest checked in");
        Ok(())
    }

    /// CheckedIn → CheckedOut; refused while the stay is not paid in
    /// full. The room goes to Cleaning, not straight back to Available.
    pub fn check_out(&self, reservation_id: u32) -> StoreResult<()> {
        let reservation = self.require_reservation(reservation_id)?;
        if reservation.status != ReservationStatus::CheckedIn {
            return Err(invalid_reservation_status(&reservation.status, "check out"));
        }
        if reservation.paid_amount < reservation.total_amount {
            return Err(ValidationError::OutstandingBalance {
                reservation_id,
                balance: reservation.total_amount - reservation.paid_amount,
            }
            .into());
        }
        self.reservations
            .set_status(reservation_id, ReservationStatus::CheckedOut)?;
        self.rooms
            .set_status(reservation.room_id, RoomStatus::Cleaning)?;
        info!(reservation_id, room_id = reservation.room_id, "guest checked out");
        Ok(())
    }

    /// Confirmed → Cancelled; the room returns to Available.
    pub fn cancel_reservation(&self, reservation_id: u32) -> StoreResult<()> {
        let reservation = self.require_reservation(reservation_id)?;
        if reservation.status != ReservationStatus::Confirmed {
            return Err(invalid_reservation_status(&reservation.status, "cancel"));
        }
        self.reservations
            .set_status(reservation_id, ReservationStatus::Cancelled)?;
        self.rooms
            .set_status(reservation.room_id, RoomStatus::Available)?;
        info!(reservation_id, "reservation cancelled");
        Ok(())
    }

    // =========================================================================
    // Invoice Lifecycle
    // =========================================================================

    /// Creates the reservation's invoice, seeded with the room charge
    /// (nightly rate × billable nights) and recomputed immediately. Due
    /// date is the issue date plus the configured grace period.
    pub fn create_invoice(&self, reservation_id: u32, created_by: u32) -> StoreResult<u32> {
        let reservation = self.require_reservation(reservation_id)?;
        let room = self
            .rooms
            .get(reservation.room_id)?
            .ok_or(StoreError::not_found("room", reservation.room_id))?;

        let issue_date = self.today();
        let due_date = add_days(&issue_date, self.config.invoice_due_days);
        let invoice_id = self
            .invoices
            .create(&reservation, &issue_date, &due_date, created_by)?;

        let nights = billable_nights(&reservation.check_in, &reservation.check_out);
        self.billing_items.add(NewBillingItem {
            invoice_id,
            item_type: BillingItemType::RoomCharge,
            description: format!(
                "Room {} ({}) for {} night(s)",
                room.id, room.room_type, nights
            ),
            unit_price: room.rate,
            quantity: nights as u32,
        })?;
        self.recompute_invoice(invoice_id)?;
        Ok(invoice_id)
    }

    /// Draft → Issued; the invoice starts aging toward its due date.
    pub fn issue_invoice(&self, invoice_id: u32) -> StoreResult<()> {
        let invoice = self.invoices.require(invoice_id)?;
        if invoice.status != InvoiceStatus::Draft {
            return Err(invalid_invoice_status(&invoice, "issue"));
        }
        self.invoices.set_status(invoice_id, InvoiceStatus::Issued)?;
        Ok(())
    }

    /// Cancels an invoice (terminal + soft delete). Payments already taken
    /// against it stay on record.
    pub fn cancel_invoice(&self, invoice_id: u32) -> StoreResult<()> {
        self.invoices.cancel(invoice_id)
    }

    /// Issued/Overdue → Paid. This is the ONE place a completed stay
    /// lands on the guest: stats bump once, the reservation is settled.
    pub fn mark_invoice_paid(&self, invoice_id: u32) -> StoreResult<()> {
        let invoice = self.invoices.require(invoice_id)?;
        if !matches!(
            invoice.status,
            InvoiceStatus::Issued | InvoiceStatus::Overdue
        ) {
            return Err(invalid_invoice_status(&invoice, "mark paid"));
        }
        // Refresh the derived amounts so the settlement uses the true total.
        let fresh = self.recompute_invoice(invoice_id)?;
        self.settle_paid(&fresh)
    }

    /// Flips every Issued invoice past its due date to Overdue.
    pub fn sweep_overdue(&self) -> StoreResult<usize> {
        self.invoices.sweep_overdue(&self.today())
    }

    /// Gathers the invoice's active items and payments, recomputes the five
    /// derived amounts with the configured tax rate, and writes them back
    /// in one pass. Returns the refreshed invoice.
    fn recompute_invoice(&self, invoice_id: u32) -> StoreResult<Invoice> {
        let items = self.billing_items.list_for_invoice(invoice_id)?;
        let payments = self.payments.list_for_invoice(invoice_id)?;
        let amounts = invoice_amounts_with_rate(&items, &payments, self.config.tax_rate);
        self.invoices.set_amounts(invoice_id, amounts)?;
        self.invoices.require(invoice_id)
    }

    /// Paid transition plus its two side effects. Callers have already
    /// verified the status gate.
    fn settle_paid(&self, invoice: &Invoice) -> StoreResult<()> {
        self.invoices.set_status(invoice.id, InvoiceStatus::Paid)?;
        self.guests
            .record_stay(invoice.guest_id, invoice.total_amount)?;
        self.reservations.settle(invoice.reservation_id)?;
        info!(
            invoice_id = invoice.id,
            guest_id = invoice.guest_id,
            total = invoice.total_amount,
            "invoice paid, stay recorded"
        );
        Ok(())
    }

    // =========================================================================
    // Billing Items
    // =========================================================================

    /// Adds a line to a mutable invoice and recomputes.
    pub fn add_billing_item(&self, input: NewBillingItem) -> StoreResult<u32> {
        let invoice = self.invoices.require(input.invoice_id)?;
        if !invoice.status.is_mutable() {
            return Err(invalid_invoice_status(&invoice, "add item"));
        }
        let item_id = self.billing_items.add(input)?;
        self.recompute_invoice(invoice.id)?;
        Ok(item_id)
    }

    /// Edits a line of a mutable invoice and recomputes.
    pub fn modify_billing_item(&self, item_id: u32, update: BillingItemUpdate) -> StoreResult<()> {
        let item = self.billing_items.require(item_id)?;
        let invoice = self.invoices.require(item.invoice_id)?;
        if !invoice.status.is_mutable() {
            return Err(invalid_invoice_status(&invoice, "modify item"));
        }
        self.billing_items.modify(item_id, update)?;
        self.recompute_invoice(invoice.id)?;
        Ok(())
    }

    /// Soft-deletes a line of a mutable invoice and recomputes.
    pub fn remove_billing_item(&self, item_id: u32) -> StoreResult<()> {
        let item = self.billing_items.require(item_id)?;
        let invoice = self.invoices.require(item.invoice_id)?;
        if !invoice.status.is_mutable() {
            return Err(invalid_invoice_status(&invoice, "remove item"));
        }
        self.billing_items.soft_delete(item_id)?;
        self.recompute_invoice(invoice.id)?;
        Ok(())
    }

    // =========================================================================
    // Payments
    // =========================================================================

    /// Records a payment against a mutable invoice and recomputes. When
    /// the payment settles an Issued or Overdue invoice in full, it is
    /// marked Paid automatically, with the same side effects as
    /// [`HotelService::mark_invoice_paid`]. A fully paid Draft stays
    /// Draft: it has not been issued to anyone yet.
    pub fn record_payment(&self, input: NewPayment) -> StoreResult<u32> {
        let invoice = self.invoices.require(input.invoice_id)?;
        if !invoice.status.is_mutable() {
            return Err(invalid_invoice_status(&invoice, "record payment"));
        }
        let payment_id = self.payments.record(input, &self.today())?;
        let fresh = self.recompute_invoice(invoice.id)?;
        if fresh.paid_amount >= fresh.total_amount
            && matches!(fresh.status, InvoiceStatus::Issued | InvoiceStatus::Overdue)
        {
            self.settle_paid(&fresh)?;
        }
        Ok(payment_id)
    }

    /// Edits a payment on a mutable invoice and recomputes. Unlike
    /// [`HotelService::record_payment`] this never auto-settles; an edit
    /// that happens to cover the balance still waits for an explicit
    /// mark-paid.
    pub fn modify_payment(&self, payment_id: u32, update: PaymentUpdate) -> StoreResult<()> {
        let payment = self.payments.require(payment_id)?;
        let invoice = self.invoices.require(payment.invoice_id)?;
        if !invoice.status.is_mutable() {
            return Err(invalid_invoice_status(&invoice, "modify payment"));
        }
        self.payments.modify(payment_id, update)?;
        self.recompute_invoice(invoice.id)?;
        Ok(())
    }

    /// Refunds a payment on a mutable invoice and recomputes; the paid
    /// amount drops immediately.
    pub fn cancel_payment(&self, payment_id: u32) -> StoreResult<()> {
        let payment = self.payments.require(payment_id)?;
        let invoice = self.invoices.require(payment.invoice_id)?;
        if !invoice.status.is_mutable() {
            return Err(invalid_invoice_status(&invoice, "cancel payment"));
        }
        self.payments.cancel(payment_id)?;
        self.recompute_invoice(invoice.id)?;
        Ok(())
    }

    // =========================================================================
    // Guarded Deletions
    // =========================================================================

    /// Retires a room, refused while any active booking holds it.
    pub fn delete_room(&self, room_id: u32) -> StoreResult<()> {
        if self.reservations.room_has_active(room_id)? {
            return Err(ValidationError::HasActiveReservations {
                entity: "room",
                id: room_id,
            }
            .into());
        }
        if !self.rooms.soft_delete(room_id)? {
            return Err(StoreError::not_found("room", room_id));
        }
        Ok(())
    }

    /// Removes a guest, refused while they hold any active booking.
    pub fn delete_guest(&self, guest_id: u32) -> StoreResult<()> {
        if self.reservations.guest_has_active(guest_id)? {
            return Err(ValidationError::HasActiveReservations {
                entity: "guest",
                id: guest_id,
            }
            .into());
        }
        if !self.guests.soft_delete(guest_id)? {
            return Err(StoreError::not_found("guest", guest_id));
        }
        Ok(())
    }

    // =========================================================================
    // Maintenance
    // =========================================================================

    /// Snapshots every entity file into a timestamped backup directory.
    pub fn backup(&self) -> StoreResult<PathBuf> {
        self.data.backup()
    }

    // =========================================================================
    // Accessors (menu layer passthrough)
    // =========================================================================

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn users(&self) -> &UserRepository {
        &self.users
    }

    pub fn rooms(&self) -> &RoomRepository {
        &self.rooms
    }

    pub fn guests(&self) -> &GuestRepository {
        &self.guests
    }

    pub fn reservations(&self) -> &ReservationRepository {
        &self.reservations
    }

    pub fn invoices(&self) -> &InvoiceRepository {
        &self.invoices
    }

    pub fn billing_items(&self) -> &BillingItemRepository {
        &self.billing_items
    }

    pub fn payments(&self) -> &PaymentRepository {
        &self.payments
    }

    fn require_reservation(
        &self,
        id: u32,
    ) -> StoreResult<innkeep_core::types::Reservation> {
        self.reservations
            .get(id)?
            .ok_or(StoreError::not_found("reservation", id))
    }
}

fn invalid_reservation_status(
    status: &ReservationStatus,
    operation: &'static str,
) -> StoreError {
    ValidationError::InvalidStatus {
        entity: "reservation",
        status: status.label(),
        operation,
    }
    .into()
}

fn invalid_invoice_status(invoice: &Invoice, operation: &'static str) -> StoreError {
    ValidationError::InvalidStatus {
        entity: "invoice",
        status: invoice.status.label(),
        operation,
    }
    .into()
}

/// Shifts a `YYYY-MM-DD` date by a signed number of days. Falls back to
/// the input on a parse failure, which validated callers never hit.
fn add_days(date: &str, days: i64) -> String {
    match NaiveDate::parse_from_str(date, DATE_FORMAT) {
        Ok(parsed) => (parsed + Duration::days(days))
            .format(DATE_FORMAT)
            .to_string(),
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_days_spans_boundaries() {
        assert_eq!(add_days("2024-03-01", 7), "2024-03-08");
        assert_eq!(add_days("2024-02-26", 7), "2024-03-04"); // leap year
        assert_eq!(add_days("2023-12-28", 7), "2024-01-04");
        assert_eq!(add_days("2024-03-08", -7), "2024-03-01");
    }
}
