//! Billing items: invoice lines with `amount = unit_price × quantity`.
//!
//! Invoice-status gating (no edits once Paid/Cancelled) lives in the
//! service, which holds the invoice; this repository enforces the
//! single-line rules only.

use tracing::debug;

use innkeep_core::types::{BillingItem, BillingItemType};
use innkeep_core::validation::{validate_positive, validate_required};
use innkeep_core::ValidationError;

use crate::error::{StoreError, StoreResult};
use crate::paths::DataDir;
use crate::store::{RecordStore, Rewrite};

/// Input for a new invoice line.
#[derive(Debug, Clone)]
pub struct NewBillingItem {
    pub invoice_id: u32,
    pub item_type: BillingItemType,
    pub description: String,
    pub unit_price: f64,
    pub quantity: u32,
}

/// Partial update of a line; `None` keeps the stored value. The amount is
/// recomputed from whatever price/quantity result.
#[derive(Debug, Clone, Default)]
pub struct BillingItemUpdate {
    pub description: Option<String>,
    pub unit_price: Option<f64>,
    pub quantity: Option<u32>,
}

pub struct BillingItemRepository {
    store: RecordStore<BillingItem>,
}

impl BillingItemRepository {
    pub fn new(data: &DataDir) -> Self {
        BillingItemRepository {
            store: RecordStore::new(data.billing_items_file()),
        }
    }

    pub fn add(&self, input: NewBillingItem) -> StoreResult<u32> {
        validate_required("description", &input.description)?;
        validate_positive("unit_price", input.unit_price)?;
        if input.quantity == 0 {
            return Err(ValidationError::MustBePositive { field: "quantity" }.into());
        }
        let id = self.store.next_id()?;
        let item = BillingItem {
            id,
            invoice_id: input.invoice_id,
            item_type: input.item_type,
            description: input.description,
            unit_price: input.unit_price,
            quantity: input.quantity,
            amount: input.unit_price * input.quantity as f64,
            is_active: true,
        };
        self.store.append(&item)?;
        debug!(
            item_id = id,
            invoice_id = item.invoice_id,
            amount = item.amount,
            "billing item added"
        );
        Ok(id)
    }

    pub fn get(&self, id: u32) -> StoreResult<Option<BillingItem>> {
        self.store.find_first(|i| i.id == id && i.is_active)
    }

    pub fn require(&self, id: u32) -> StoreResult<BillingItem> {
        self.get(id)?
            .ok_or(StoreError::not_found("billing item", id))
    }

    /// Applies a partial update; the amount always ends up as
    /// `unit_price × quantity` of the resulting line.
    pub fn modify(&self, id: u32, update: BillingItemUpdate) -> StoreResult<bool> {
        if let Some(price) = update.unit_price {
            validate_positive("unit_price", price)?;
        }
        if update.quantity == Some(0) {
            return Err(ValidationError::MustBePositive { field: "quantity" }.into());
        }
        if let Some(description) = &update.description {
            validate_required("description", description)?;
        }
        let matched = self.store.rewrite_where(
            |i| i.id == id && i.is_active,
            |mut i| {
                if let Some(description) = &update.description {
                    i.description = description.clone();
                }
                if let Some(price) = update.unit_price {
                    i.unit_price = price;
                }
                if let Some(quantity) = update.quantity {
                    i.quantity = quantity;
                }
                i.amount = i.unit_price * i.quantity as f64;
                Rewrite::Keep(i)
            },
        )?;
        Ok(matched > 0)
    }

    /// Soft delete; the line drops out of the invoice's recomputed totals.
    pub fn soft_delete(&self, id: u32) -> StoreResult<bool> {
        let matched = self.store.rewrite_where(
            |i| i.id == id && i.is_active,
            |mut i| {
                i.is_active = false;
                Rewrite::Keep(i)
            },
        )?;
        Ok(matched > 0)
    }

    /// Active lines of one invoice, in entry order.
    pub fn list_for_invoice(&self, invoice_id: u32) -> StoreResult<Vec<BillingItem>> {
        self.store
            .find_all(|i| i.is_active && i.invoice_id == invoice_id)
    }
}
