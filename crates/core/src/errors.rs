use thiserror::Error;

use crate::domain::product::ProductId;
use crate::domain::quote::{QuoteId, QuoteStatus};

/// Caller or input mistakes surfaced by the quote engine. All of these are
/// synchronous and non-retryable; none indicates a transient failure.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("product not found: {product_id:?}")]
    ProductNotFound { product_id: ProductId },
    #[error("quote item index {index} out of bounds for {len} items")]
    ItemNotFound { index: usize, len: usize },
    #[error("quote not found: {quote_id:?}")]
    QuoteNotFound { quote_id: QuoteId },
    #[error("invalid quote transition from {from:?} to {to:?}")]
    InvalidQuoteTransition { from: QuoteStatus, to: QuoteStatus },
    #[error("product currency {product} does not match quote currency {quote}")]
    CurrencyMismatch { quote: String, product: String },
    #[error("quantity must be at least 1, got {quantity}")]
    InvalidQuantity { quantity: u32 },
    #[error("discount percentage must be within 0..=100, got {discount_pct}")]
    InvalidDiscount { discount_pct: rust_decimal::Decimal },
    #[error("tax rate must not be negative, got {tax_rate}")]
    InvalidTaxRate { tax_rate: rust_decimal::Decimal },
}

impl DomainError {
    /// True for the lookup failures the surrounding request layer renders as
    /// a 404; everything else is a 400-class input problem.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProductNotFound { .. } | Self::ItemNotFound { .. } | Self::QuoteNotFound { .. }
        )
    }
}

/// Transport-facing classification of a [`DomainError`], for the request
/// layer that wraps this crate. Carries a correlation id so operator logs
/// can be matched to a client report.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InterfaceError {
    #[error("not found: {message}")]
    NotFound { message: String, correlation_id: String },
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "The requested resource does not exist.",
            Self::BadRequest { .. } => {
                "The request could not be processed. Check inputs and try again."
            }
        }
    }
}

impl DomainError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let message = self.to_string();
        if self.is_not_found() {
            InterfaceError::NotFound { message, correlation_id }
        } else {
            InterfaceError::BadRequest { message, correlation_id }
        }
    }
}
