use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::plan::{DetectedProductId, PlanId};
use crate::domain::product::ProductId;
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteItemId(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
    Expired,
}

impl QuoteStatus {
    /// Approved, rejected and expired quotes are frozen as far as the
    /// lifecycle is concerned. Whether edits are still allowed in these
    /// states is the caller's policy, not enforced here.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Expired)
    }
}

/// One product entry on a quote. Price and descriptive fields are
/// snapshotted from the catalog when the item is added or its product is
/// swapped; later catalog edits never reach existing quotes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteItem {
    /// Stable identity carried alongside positional addressing, so a future
    /// API revision can stop exposing raw indices without a data migration.
    pub id: QuoteItemId,
    pub product_id: ProductId,
    pub detected_product_id: Option<DetectedProductId>,
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub discount_pct: Decimal,
    pub selected_material: Option<String>,
    pub notes: Option<String>,
    pub total: Decimal,
}

/// A quotation aggregate. Items are held in insertion order and addressed
/// by position. `tax_rate` and `global_discount_pct` are the stored inputs;
/// `discount` and `tax` are the derived absolute amounts, kept in agreement
/// with the items by every engine recompute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub reference: String,
    pub plan_id: Option<PlanId>,
    pub status: QuoteStatus,
    pub currency: String,
    pub items: Vec<QuoteItem>,
    pub tax_rate: Decimal,
    pub global_discount_pct: Decimal,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub valid_until: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Quote {
    pub fn can_transition_to(&self, next: QuoteStatus) -> bool {
        matches!(
            (&self.status, next),
            (QuoteStatus::Draft, QuoteStatus::Pending)
                | (QuoteStatus::Pending, QuoteStatus::Approved)
                | (QuoteStatus::Pending, QuoteStatus::Rejected)
                | (QuoteStatus::Pending, QuoteStatus::Expired)
        )
    }

    pub fn transition_to(&mut self, next: QuoteStatus) -> Result<(), DomainError> {
        if self.can_transition_to(next) {
            self.status = next;
            return Ok(());
        }

        Err(DomainError::InvalidQuoteTransition { from: self.status, to: next })
    }

    /// Display state at `now`. Expiry is derived at query time from
    /// `valid_until`; it is not a stored transition the engine triggers.
    pub fn display_status(&self, now: DateTime<Utc>) -> QuoteStatus {
        if self.status == QuoteStatus::Pending && self.valid_until < now {
            return QuoteStatus::Expired;
        }
        self.status
    }
}

/// Monthly quote reference in the `QT-YYYYMM-NNNN` scheme. The persistence
/// layer supplies the per-month sequence counter.
pub fn quote_reference(year: i32, month: u32, sequence: u32) -> String {
    format!("QT-{year}{month:02}-{sequence:04}")
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    use super::{quote_reference, Quote, QuoteId, QuoteStatus};
    use crate::errors::DomainError;

    fn quote(status: QuoteStatus) -> Quote {
        Quote {
            id: QuoteId("Q-1".to_string()),
            reference: quote_reference(2026, 8, 1),
            plan_id: None,
            status,
            currency: "EUR".to_string(),
            items: Vec::new(),
            tax_rate: Decimal::new(20, 0),
            global_discount_pct: Decimal::ZERO,
            subtotal: Decimal::ZERO,
            discount: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
            valid_until: Utc::now() + Duration::days(30),
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn allows_submission_and_decision_transitions() {
        let mut quote = quote(QuoteStatus::Draft);
        quote.transition_to(QuoteStatus::Pending).expect("draft -> pending");
        quote.transition_to(QuoteStatus::Approved).expect("pending -> approved");
        assert_eq!(quote.status, QuoteStatus::Approved);
    }

    #[test]
    fn blocks_decision_on_a_draft() {
        let mut quote = quote(QuoteStatus::Draft);
        let error = quote.transition_to(QuoteStatus::Approved).expect_err("draft -> approved");
        assert!(matches!(error, DomainError::InvalidQuoteTransition { .. }));
        assert_eq!(quote.status, QuoteStatus::Draft);
    }

    #[test]
    fn terminal_states_admit_no_further_transition() {
        for status in [QuoteStatus::Approved, QuoteStatus::Rejected, QuoteStatus::Expired] {
            assert!(status.is_terminal());
            let quote = quote(status);
            assert!(!quote.can_transition_to(QuoteStatus::Pending));
            assert!(!quote.can_transition_to(QuoteStatus::Draft));
        }
    }

    #[test]
    fn pending_quote_past_validity_displays_as_expired() {
        let mut stale = quote(QuoteStatus::Pending);
        stale.valid_until = Utc::now() - Duration::days(1);
        assert_eq!(stale.display_status(Utc::now()), QuoteStatus::Expired);
        // The stored status is untouched; only the view changes.
        assert_eq!(stale.status, QuoteStatus::Pending);

        let draft = quote(QuoteStatus::Draft);
        assert_eq!(draft.display_status(Utc::now() + Duration::days(90)), QuoteStatus::Draft);
    }

    #[test]
    fn reference_pads_month_and_sequence() {
        assert_eq!(quote_reference(2026, 8, 7), "QT-202608-0007");
        assert_eq!(quote_reference(2026, 11, 1234), "QT-202611-1234");
    }
}
