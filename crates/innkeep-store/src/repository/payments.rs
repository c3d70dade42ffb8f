//! Payments: money received against invoices.
//!
//! Payments record as Completed immediately (a console operator takes the
//! money and types it in afterward). Cancelling one flips it to Refunded
//! AND inactive, so it leaves the paid total but stays in the audit
//! listing on disk.

use tracing::{debug, info};
use uuid::Uuid;

use innkeep_core::types::{Payment, PaymentMethod, PaymentStatus};
use innkeep_core::validation::validate_positive;

use crate::error::{StoreError, StoreResult};
use crate::paths::DataDir;
use crate::store::{RecordStore, Rewrite};

/// Input for recording a payment.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub invoice_id: u32,
    pub method: PaymentMethod,
    pub amount: f64,
    /// External reference; generated when the operator leaves it blank.
    pub transaction_id: Option<String>,
    pub notes: String,
    pub created_by: u32,
}

/// Partial edit of a recorded payment; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct PaymentUpdate {
    pub method: Option<PaymentMethod>,
    pub amount: Option<f64>,
    pub notes: Option<String>,
}

pub struct PaymentRepository {
    store: RecordStore<Payment>,
}

impl PaymentRepository {
    pub fn new(data: &DataDir) -> Self {
        PaymentRepository {
            store: RecordStore::new(data.payments_file()),
        }
    }

    /// Records a Completed payment dated `today`.
    pub fn record(&self, input: NewPayment, today: &str) -> StoreResult<u32> {
        validate_positive("amount", input.amount)?;
        let id = self.store.next_id()?;
        let transaction_id = match input.transaction_id {
            Some(reference) if !reference.trim().is_empty() => reference,
            _ => Uuid::new_v4().simple().to_string(),
        };
        let payment = Payment {
            id,
            invoice_id: input.invoice_id,
            method: input.method,
            status: PaymentStatus::Completed,
            amount: input.amount,
            transaction_date: today.to_string(),
            transaction_id,
            notes: input.notes,
            created_by: input.created_by,
            is_active: true,
        };
        self.store.append(&payment)?;
        info!(
            payment_id = id,
            invoice_id = payment.invoice_id,
            amount = payment.amount,
            method = %payment.method,
            "payment recorded"
        );
        Ok(id)
    }

    pub fn get(&self, id: u32) -> StoreResult<Option<Payment>> {
        self.store.find_first(|p| p.id == id && p.is_active)
    }

    pub fn require(&self, id: u32) -> StoreResult<Payment> {
        self.get(id)?.ok_or(StoreError::not_found("payment", id))
    }

    /// Applies a partial edit to an active payment.
    pub fn modify(&self, id: u32, update: PaymentUpdate) -> StoreResult<bool> {
        if let Some(amount) = update.amount {
            validate_positive("amount", amount)?;
        }
        let matched = self.store.rewrite_where(
            |p| p.id == id && p.is_active,
            |mut p| {
                if let Some(method) = update.method {
                    p.method = method;
                }
                if let Some(amount) = update.amount {
                    p.amount = amount;
                }
                if let Some(notes) = &update.notes {
                    p.notes = notes.clone();
                }
                Rewrite::Keep(p)
            },
        )?;
        Ok(matched > 0)
    }

    /// Cancels a payment: Refunded + inactive in one pass. It immediately
    /// stops counting toward the invoice's paid amount.
    pub fn cancel(&self, id: u32) -> StoreResult<bool> {
        let matched = self.store.rewrite_where(
            |p| p.id == id && p.is_active,
            |mut p| {
                p.status = PaymentStatus::Refunded;
                p.is_active = false;
                Rewrite::Keep(p)
            },
        )?;
        if matched > 0 {
            debug!(payment_id = id, "payment cancelled");
        }
        Ok(matched > 0)
    }

    /// Active payments of one invoice; feeds the recompute.
    pub fn list_for_invoice(&self, invoice_id: u32) -> StoreResult<Vec<Payment>> {
        self.store
            .find_all(|p| p.is_active && p.invoice_id == invoice_id)
    }

    /// Full payment history of one invoice, cancelled ones included.
    pub fn history_for_invoice(&self, invoice_id: u32) -> StoreResult<Vec<Payment>> {
        self.store.find_all(|p| p.invoice_id == invoice_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo() -> (TempDir, PaymentRepository) {
        let dir = TempDir::new().unwrap();
        let data = DataDir::open(dir.path().join("data")).unwrap();
        (dir, PaymentRepository::new(&data))
    }

    fn cash(invoice_id: u32, amount: f64) -> NewPayment {
        NewPayment {
            invoice_id,
            method: PaymentMethod::Cash,
            amount,
            transaction_id: None,
            notes: String::new(),
            created_by: 1,
        }
    }

    #[test]
    fn records_completed_with_generated_reference() {
        let (_dir, payments) = repo();
        let id = payments.record(cash(4, 100.0), "2024-03-01").unwrap();
        let payment = payments.get(id).unwrap().unwrap();
        assert_eq!(payment.status, PaymentStatus::Completed);
        assert_eq!(payment.transaction_date, "2024-03-01");
        assert!(!payment.transaction_id.is_empty());
        assert!(payment.counts_toward_paid());
    }

    #[test]
    fn keeps_operator_supplied_reference() {
        let (_dir, payments) = repo();
        let mut input = cash(4, 100.0);
        input.transaction_id = Some("BANK-REF-77".to_string());
        let id = payments.record(input, "2024-03-01").unwrap();
        assert_eq!(
            payments.get(id).unwrap().unwrap().transaction_id,
            "BANK-REF-77"
        );

        // Blank reference still generates one.
        let mut blank = cash(4, 50.0);
        blank.transaction_id = Some("   ".to_string());
        let id = payments.record(blank, "2024-03-01").unwrap();
        assert!(!payments.get(id).unwrap().unwrap().transaction_id.trim().is_empty());
    }

    #[test]
    fn rejects_nonpositive_amounts() {
        let (_dir, payments) = repo();
        assert!(payments.record(cash(4, 0.0), "2024-03-01").is_err());
        assert!(payments.record(cash(4, -20.0), "2024-03-01").is_err());
    }

    #[test]
    fn modify_edits_amount_and_method() {
        let (_dir, payments) = repo();
        let id = payments.record(cash(4, 100.0), "2024-03-01").unwrap();
        assert!(payments
            .modify(
                id,
                PaymentUpdate {
                    amount: Some(120.0),
                    method: Some(PaymentMethod::DebitCard),
                    ..PaymentUpdate::default()
                },
            )
            .unwrap());
        let payment = payments.get(id).unwrap().unwrap();
        assert_eq!(payment.amount, 120.0);
        assert_eq!(payment.method, PaymentMethod::DebitCard);

        // Invalid amounts are rejected before the file is touched.
        assert!(payments
            .modify(
                id,
                PaymentUpdate {
                    amount: Some(-5.0),
                    ..PaymentUpdate::default()
                },
            )
            .is_err());
        assert_eq!(payments.get(id).unwrap().unwrap().amount, 120.0);
    }

    #[test]
    fn cancelled_payment_becomes_refunded_history() {
        let (_dir, payments) = repo();
        let id = payments.record(cash(4, 100.0), "2024-03-01").unwrap();
        assert!(payments.cancel(id).unwrap());

        // Gone from active reads, still in history as Refunded.
        assert!(payments.get(id).unwrap().is_none());
        assert!(payments.list_for_invoice(4).unwrap().is_empty());
        let history = payments.history_for_invoice(4).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, PaymentStatus::Refunded);
        assert!(!history[0].counts_toward_paid());

        // Double cancel is a no-op.
        assert!(!payments.cancel(id).unwrap());
    }
}
