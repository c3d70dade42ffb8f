//! Invoices: one per reservation, amounts always written as a unit.
//!
//! The five monetary fields are DERIVED: this repository persists whatever
//! [`innkeep_core::recompute::invoice_amounts`] produced, it never edits a
//! single amount on its own.

use tracing::{debug, info};

use innkeep_core::recompute::InvoiceAmounts;
use innkeep_core::types::{Invoice, InvoiceStatus, Reservation};
use innkeep_core::ValidationError;

use crate::error::{StoreError, StoreResult};
use crate::paths::DataDir;
use crate::repository::contains_ignore_case;
use crate::store::{RecordStore, Rewrite};

pub struct InvoiceRepository {
    store: RecordStore<Invoice>,
}

impl InvoiceRepository {
    pub fn new(data: &DataDir) -> Self {
        InvoiceRepository {
            store: RecordStore::new(data.invoices_file()),
        }
    }

    /// Creates a Draft invoice for a reservation. At most one ACTIVE
    /// invoice may exist per reservation; a cancelled (inactive) one does
    /// not block a replacement.
    pub fn create(
        &self,
        reservation: &Reservation,
        issue_date: &str,
        due_date: &str,
        created_by: u32,
    ) -> StoreResult<u32> {
        if self
            .store
            .find_first(|i| i.is_active && i.reservation_id == reservation.id)?
            .is_some()
        {
            return Err(ValidationError::InvoiceExists {
                reservation_id: reservation.id,
            }
            .into());
        }
        let id = self.store.next_id()?;
        let invoice = Invoice {
            id,
            guest_id: reservation.guest_id,
            reservation_id: reservation.id,
            issue_date: issue_date.to_string(),
            due_date: due_date.to_string(),
            subtotal: 0.0,
            tax_amount: 0.0,
            discount_amount: 0.0,
            total_amount: 0.0,
            paid_amount: 0.0,
            status: InvoiceStatus::Draft,
            notes: String::new(),
            created_by,
            is_active: true,
        };
        self.store.append(&invoice)?;
        info!(
            invoice_id = id,
            reservation_id = reservation.id,
            "invoice created"
        );
        Ok(id)
    }

    pub fn get(&self, id: u32) -> StoreResult<Option<Invoice>> {
        self.store.find_first(|i| i.id == id && i.is_active)
    }

    /// Same as [`InvoiceRepository::get`] but an absent id is an error.
    pub fn require(&self, id: u32) -> StoreResult<Invoice> {
        self.get(id)?.ok_or(StoreError::not_found("invoice", id))
    }

    pub fn get_by_reservation(&self, reservation_id: u32) -> StoreResult<Option<Invoice>> {
        self.store
            .find_first(|i| i.is_active && i.reservation_id == reservation_id)
    }

    pub fn set_status(&self, id: u32, status: InvoiceStatus) -> StoreResult<bool> {
        let matched = self.store.rewrite_where(
            |i| i.id == id && i.is_active,
            |mut i| {
                i.status = status;
                Rewrite::Keep(i)
            },
        )?;
        if matched > 0 {
            debug!(invoice_id = id, status = status.label(), "invoice status changed");
        }
        Ok(matched > 0)
    }

    /// Writes all five derived amounts in one rewrite pass, so no reader
    /// ever observes a half-updated invoice.
    pub fn set_amounts(&self, id: u32, amounts: InvoiceAmounts) -> StoreResult<bool> {
        let matched = self.store.rewrite_where(
            |i| i.id == id && i.is_active,
            |mut i| {
                i.subtotal = amounts.subtotal;
                i.tax_amount = amounts.tax_amount;
                i.discount_amount = amounts.discount_amount;
                i.total_amount = amounts.total_amount;
                i.paid_amount = amounts.paid_amount;
                Rewrite::Keep(i)
            },
        )?;
        Ok(matched > 0)
    }

    /// Updates the free-text notes. Paid and Cancelled invoices are frozen.
    pub fn update_notes(&self, id: u32, notes: &str) -> StoreResult<()> {
        let invoice = self.require(id)?;
        if !invoice.status.is_mutable() {
            return Err(ValidationError::InvalidStatus {
                entity: "invoice",
                status: invoice.status.label(),
                operation: "modify",
            }
            .into());
        }
        let notes = notes.to_string();
        self.store.rewrite_where(
            |i| i.id == id && i.is_active,
            |mut i| {
                i.notes = notes.clone();
                Rewrite::Keep(i)
            },
        )?;
        Ok(())
    }

    /// Cancels an invoice: terminal status AND soft delete, so a new
    /// invoice may be raised for the same reservation.
    pub fn cancel(&self, id: u32) -> StoreResult<()> {
        let invoice = self.require(id)?;
        if !invoice.status.is_mutable() {
            return Err(ValidationError::InvalidStatus {
                entity: "invoice",
                status: invoice.status.label(),
                operation: "cancel",
            }
            .into());
        }
        self.store.rewrite_where(
            |i| i.id == id && i.is_active,
            |mut i| {
                i.status = InvoiceStatus::Cancelled;
                i.is_active = false;
                Rewrite::Keep(i)
            },
        )?;
        info!(invoice_id = id, "invoice cancelled");
        Ok(())
    }

    pub fn list(&self, status: Option<InvoiceStatus>) -> StoreResult<Vec<Invoice>> {
        self.store
            .find_all(|i| i.is_active && status.map_or(true, |s| i.status == s))
    }

    pub fn list_for_guest(&self, guest_id: u32) -> StoreResult<Vec<Invoice>> {
        self.store.find_all(|i| i.is_active && i.guest_id == guest_id)
    }

    /// Case-insensitive substring search over notes and the two dates.
    pub fn search(&self, term: &str) -> StoreResult<Vec<Invoice>> {
        self.store.find_all(|i| {
            i.is_active
                && (contains_ignore_case(&i.notes, term)
                    || i.issue_date.contains(term)
                    || i.due_date.contains(term))
        })
    }

    /// Flips every Issued invoice whose due date has passed to Overdue,
    /// in a single pass. Running it twice is a no-op the second time:
    /// already-Overdue invoices no longer match.
    pub fn sweep_overdue(&self, today: &str) -> StoreResult<usize> {
        let matched = self.store.rewrite_where(
            |i| {
                i.is_active
                    && i.status == InvoiceStatus::Issued
                    && i.due_date.as_str() < today
            },
            |mut i| {
                i.status = InvoiceStatus::Overdue;
                Rewrite::Keep(i)
            },
        )?;
        if matched > 0 {
            info!(count = matched, "invoices marked overdue");
        }
        Ok(matched)
    }
}
