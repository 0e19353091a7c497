//! Pure quote arithmetic. Every function here is deterministic and
//! side-effect free; the mutating operations in [`super::engine`] call into
//! these and persist nothing themselves.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::quote::Quote;

/// Monetary rounding policy for every computed amount: two decimal places,
/// midpoint away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `unit_price * quantity`, less `discount_pct` percent of it. Inputs are
/// assumed validated (quantity >= 1, discount within 0..=100); the engine's
/// mutating operations are the validating callers inside this crate.
pub fn line_total(unit_price: Decimal, quantity: u32, discount_pct: Decimal) -> Decimal {
    let gross = unit_price * Decimal::from(quantity);
    round_money(gross - gross * discount_pct / Decimal::ONE_HUNDRED)
}

/// The pricing inputs of one line, detached from the item's identity so
/// previews can be computed before anything exists to persist.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineInput {
    pub unit_price: Decimal,
    pub quantity: u32,
    pub discount_pct: Decimal,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Aggregate totals over an ordered list of lines: sum the per-line totals,
/// take the global discount off the subtotal, then tax the remainder.
pub fn compute_totals(
    items: &[LineInput],
    tax_rate: Decimal,
    global_discount_pct: Decimal,
) -> QuoteTotals {
    let subtotal: Decimal = items
        .iter()
        .map(|item| line_total(item.unit_price, item.quantity, item.discount_pct))
        .sum();

    let discount = round_money(subtotal * global_discount_pct / Decimal::ONE_HUNDRED);
    let after_discount = subtotal - discount;
    let tax = round_money(after_discount * tax_rate / Decimal::ONE_HUNDRED);
    let total = after_discount + tax;

    QuoteTotals { subtotal, discount, tax, total }
}

/// Prices a whole quote from its stored lines and rates. The seam exists so
/// a margin-aware or promotional engine can be swapped in without touching
/// the mutating operations.
pub trait PricingEngine: Send + Sync {
    fn price(&self, quote: &Quote) -> QuoteTotals;
}

#[derive(Default)]
pub struct DeterministicPricingEngine;

impl PricingEngine for DeterministicPricingEngine {
    fn price(&self, quote: &Quote) -> QuoteTotals {
        let lines: Vec<LineInput> = quote
            .items
            .iter()
            .map(|item| LineInput {
                unit_price: item.unit_price,
                quantity: item.quantity,
                discount_pct: item.discount_pct,
            })
            .collect();

        compute_totals(&lines, quote.tax_rate, quote.global_discount_pct)
    }
}
