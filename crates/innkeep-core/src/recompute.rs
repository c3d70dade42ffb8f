//! # Derived-State Recomputation
//!
//! Pure functions that rebuild every derived field from its source records.
//!
//! ## Why Pure?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Derived-State Consistency Model                            │
//! │                                                                         │
//! │  billing_items.dat ──┐                                                  │
//! │                      ├──► invoice_amounts() ──► 5 fields written back   │
//! │  payments.dat ───────┘         (pure)           in ONE rewrite pass     │
//! │                                                                         │
//! │  invoice marked Paid ──► apply_stay() ──► stays/spend/tier written      │
//! │                            (pure)          back in ONE rewrite pass     │
//! │                                                                         │
//! │  The store layer gathers inputs and persists outputs; everything in     │
//! │  between lives here and runs against in-memory fixtures in tests.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The invoice invariant at every observation point:
//! `total == max(0, subtotal + tax - discount)` and
//! `paid == Σ (active, Completed payments)`.

use crate::types::{BillingItem, BillingItemType, Guest, Payment, VipStatus};
use crate::{
    DEFAULT_TAX_RATE, VIP_BRONZE_THRESHOLD, VIP_GOLD_THRESHOLD, VIP_PLATINUM_THRESHOLD,
    VIP_SILVER_THRESHOLD,
};

// =============================================================================
// Invoice Amounts
// =============================================================================

/// The five derived monetary fields of an invoice, always computed together.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InvoiceAmounts {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    pub paid_amount: f64,
}

/// Recomputes all five derived invoice fields from the invoice's billing
/// items and payments.
///
/// ## Rules
/// - inactive items and payments are ignored;
/// - Tax-typed items sum into `tax_amount`, Discount-typed items into
///   `discount_amount`, everything else into `subtotal`;
/// - when NO explicit Tax item exists, tax defaults to
///   [`DEFAULT_TAX_RATE`] × subtotal;
/// - `total = max(0, subtotal + tax - discount)`;
/// - `paid` sums only active AND Completed payments.
///
/// Callers pass the item/payment records belonging to one invoice; this
/// function never touches storage.
///
/// ## Example
/// ```rust
/// use innkeep_core::recompute::invoice_amounts;
/// use innkeep_core::types::{BillingItem, BillingItemType};
///
/// let items = vec![BillingItem {
///     id: 1,
///     invoice_id: 1,
///     item_type: BillingItemType::RoomCharge,
///     description: "Room 101 (Standard) for 3 night(s)".to_string(),
///     unit_price: 100.0,
///     quantity: 3,
///     amount: 300.0,
///     is_active: true,
/// }];
///
/// let amounts = invoice_amounts(&items, &[]);
/// assert_eq!(amounts.subtotal, 300.0);
/// assert_eq!(amounts.tax_amount, 30.0); // no explicit tax item -> 10%
/// assert_eq!(amounts.total_amount, 330.0);
/// ```
pub fn invoice_amounts(items: &[BillingItem], payments: &[Payment]) -> InvoiceAmounts {
    invoice_amounts_with_rate(items, payments, DEFAULT_TAX_RATE)
}

/// Same as [`invoice_amounts`], with the fallback tax rate supplied by the
/// caller (the store layer reads it from configuration).
pub fn invoice_amounts_with_rate(
    items: &[BillingItem],
    payments: &[Payment],
    tax_rate: f64,
) -> InvoiceAmounts {
    let mut subtotal = 0.0;
    let mut tax_amount = 0.0;
    let mut discount_amount = 0.0;

    for item in items.iter().filter(|item| item.is_active) {
        match item.item_type {
            BillingItemType::Tax => tax_amount += item.amount,
            BillingItemType::Discount => discount_amount += item.amount,
            _ => subtotal += item.amount,
        }
    }

    // No explicit tax line: fall back to the flat rate on the subtotal.
    if tax_amount == 0.0 {
        tax_amount = subtotal * tax_rate;
    }

    let total_amount = (subtotal + tax_amount - discount_amount).max(0.0);

    let paid_amount = payments
        .iter()
        .filter(|payment| payment.counts_toward_paid())
        .map(|payment| payment.amount)
        .sum();

    InvoiceAmounts {
        subtotal,
        tax_amount,
        discount_amount,
        total_amount,
        paid_amount,
    }
}

// =============================================================================
// VIP Tier
// =============================================================================

/// Maps cumulative spend to a loyalty tier.
///
/// Thresholds are evaluated high-to-low against the NEW cumulative total,
/// so a single large stay can skip tiers entirely.
///
/// ## Example
/// ```rust
/// use innkeep_core::recompute::vip_tier;
/// use innkeep_core::types::VipStatus;
///
/// assert_eq!(vip_tier(0.0), VipStatus::Regular);
/// assert_eq!(vip_tier(1080.0), VipStatus::Silver); // skipped Bronze
/// assert_eq!(vip_tier(5000.0), VipStatus::Platinum);
/// ```
pub fn vip_tier(total_spent: f64) -> VipStatus {
    if total_spent >= VIP_PLATINUM_THRESHOLD {
        VipStatus::Platinum
    } else if total_spent >= VIP_GOLD_THRESHOLD {
        VipStatus::Gold
    } else if total_spent >= VIP_SILVER_THRESHOLD {
        VipStatus::Silver
    } else if total_spent >= VIP_BRONZE_THRESHOLD {
        VipStatus::Bronze
    } else {
        VipStatus::Regular
    }
}

/// Folds one completed stay into a guest's cumulative stats.
///
/// Increments `total_stays`, adds `amount` to `total_spent`, and derives
/// the tier from the new total. Stats only ever grow; there is no
/// decrement path. The store layer invokes this exactly once per stay,
/// when the stay's invoice transitions to Paid.
pub fn apply_stay(guest: &mut Guest, amount: f64) {
    guest.total_stays += 1;
    guest.total_spent += amount;
    guest.vip_status = vip_tier(guest.total_spent);
}

// =============================================================================
// Unit Tests
// =============================================================================
