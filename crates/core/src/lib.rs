pub mod config;
pub mod detect;
pub mod domain;
pub mod errors;
pub mod quoting;

pub use detect::{
    DetectionCandidate, DetectionResult, FixtureClassifier, FixtureType, ParsedPlan,
    RuleBasedClassifier,
};
pub use domain::geometry::{BoundingBox, Dimensions, Vec3};
pub use domain::plan::{DetectedProduct, DetectedProductId, Plan, PlanId};
pub use domain::product::{Product, ProductId, ProductType};
pub use domain::quote::{
    quote_reference, Quote, QuoteId, QuoteItem, QuoteItemId, QuoteStatus,
};
pub use errors::{DomainError, InterfaceError};
pub use quoting::{
    compute_totals, line_total, DeterministicPricingEngine, InMemoryCatalog, LineInput,
    NewQuoteItem, PricingEngine, ProductRepository, QuoteDefaults, QuoteEngine, QuoteItemPatch,
    QuoteTotals,
};
