use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::QuotingConfig;
use crate::domain::plan::{DetectedProductId, Plan, PlanId};
use crate::domain::product::{Product, ProductId};
use crate::domain::quote::{Quote, QuoteId, QuoteItem, QuoteItemId, QuoteStatus};
use crate::errors::DomainError;

use super::catalog::ProductRepository;
use super::pricing::{line_total, DeterministicPricingEngine, PricingEngine};

/// Engine-level defaults, normally sourced from `[quoting]` configuration.
#[derive(Clone, Debug)]
pub struct QuoteDefaults {
    pub tax_rate: Decimal,
    pub currency: String,
    pub validity_days: u32,
}

impl Default for QuoteDefaults {
    fn default() -> Self {
        Self { tax_rate: Decimal::new(20, 0), currency: "EUR".to_owned(), validity_days: 30 }
    }
}

impl From<&QuotingConfig> for QuoteDefaults {
    fn from(config: &QuotingConfig) -> Self {
        Self {
            tax_rate: config.default_tax_rate,
            currency: config.default_currency.clone(),
            validity_days: config.validity_days,
        }
    }
}

/// Request payload for [`QuoteEngine::add_item`].
#[derive(Clone, Debug)]
pub struct NewQuoteItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub discount_pct: Decimal,
    pub detected_product_id: Option<DetectedProductId>,
    pub selected_material: Option<String>,
    pub notes: Option<String>,
}

impl NewQuoteItem {
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
            discount_pct: Decimal::ZERO,
            detected_product_id: None,
            selected_material: None,
            notes: None,
        }
    }
}

/// Partial update for one quote item: absent fields are left unchanged, not
/// reset to defaults.
#[derive(Clone, Debug, Default)]
pub struct QuoteItemPatch {
    pub product_id: Option<ProductId>,
    pub quantity: Option<u32>,
    pub discount_pct: Option<Decimal>,
    pub selected_material: Option<String>,
    pub notes: Option<String>,
}

/// The mutating side of quoting. Every operation recomputes and stores the
/// quote's subtotal/discount/tax/total before returning, so a persisted
/// quote never disagrees with the sum of its items. Callers own atomicity:
/// one logical writer completes an operation (including its recompute)
/// before another is applied to the same quote.
pub struct QuoteEngine<R, P = DeterministicPricingEngine> {
    catalog: R,
    pricing: P,
    defaults: QuoteDefaults,
}

impl<R: ProductRepository> QuoteEngine<R> {
    pub fn new(catalog: R) -> Self {
        Self::with_pricing(catalog, DeterministicPricingEngine, QuoteDefaults::default())
    }

    pub fn with_defaults(catalog: R, defaults: QuoteDefaults) -> Self {
        Self::with_pricing(catalog, DeterministicPricingEngine, defaults)
    }
}

impl<R: ProductRepository, P: PricingEngine> QuoteEngine<R, P> {
    pub fn with_pricing(catalog: R, pricing: P, defaults: QuoteDefaults) -> Self {
        Self { catalog, pricing, defaults }
    }

    /// An empty draft quote carrying the configured defaults. The currency
    /// anchor for every later item is fixed here.
    pub fn new_quote(&self, reference: impl Into<String>, plan_id: Option<PlanId>) -> Quote {
        let created_at = Utc::now();
        Quote {
            id: QuoteId(Uuid::new_v4().to_string()),
            reference: reference.into(),
            plan_id,
            status: QuoteStatus::Draft,
            currency: self.defaults.currency.clone(),
            items: Vec::new(),
            tax_rate: self.defaults.tax_rate,
            global_discount_pct: Decimal::ZERO,
            subtotal: Decimal::ZERO,
            discount: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
            valid_until: created_at + Duration::days(i64::from(self.defaults.validity_days)),
            notes: None,
            created_at,
        }
    }

    /// Snapshot the product's price and descriptive fields into a new line
    /// item and append it. Fails without touching the quote.
    pub fn add_item(
        &self,
        quote: &mut Quote,
        request: NewQuoteItem,
    ) -> Result<QuoteItemId, DomainError> {
        validate_quantity(request.quantity)?;
        validate_discount(request.discount_pct)?;
        let product = self.resolve(&request.product_id)?;
        self.check_currency(quote, &product)?;

        let item = snapshot_item(
            product,
            request.detected_product_id,
            request.quantity,
            request.discount_pct,
            request.selected_material,
            request.notes,
        );
        let item_id = item.id.clone();
        quote.items.push(item);
        self.recalculate(quote);
        Ok(item_id)
    }

    /// Apply a partial update to the item at `index`, recompute its total,
    /// then the quote's. A product change re-resolves the catalog and
    /// re-snapshots price and descriptive fields.
    pub fn update_item(
        &self,
        quote: &mut Quote,
        index: usize,
        patch: QuoteItemPatch,
    ) -> Result<(), DomainError> {
        let len = quote.items.len();
        if index >= len {
            return Err(DomainError::ItemNotFound { index, len });
        }
        if let Some(quantity) = patch.quantity {
            validate_quantity(quantity)?;
        }
        if let Some(discount_pct) = patch.discount_pct {
            validate_discount(discount_pct)?;
        }

        // Resolve any product swap before mutating, so a dangling id leaves
        // the quote exactly as it was.
        let swapped = match &patch.product_id {
            Some(product_id) if *product_id != quote.items[index].product_id => {
                let product = self.resolve(product_id)?;
                self.check_currency(quote, &product)?;
                Some(product)
            }
            _ => None,
        };

        let item = &mut quote.items[index];
        if let Some(product) = swapped {
            item.product_id = product.id;
            item.name = product.name;
            item.sku = product.sku;
            item.description = product.description;
            item.unit_price = product.base_price;
        }
        if let Some(quantity) = patch.quantity {
            item.quantity = quantity;
        }
        if let Some(discount_pct) = patch.discount_pct {
            item.discount_pct = discount_pct;
        }
        if let Some(material) = patch.selected_material {
            item.selected_material = Some(material);
        }
        if let Some(notes) = patch.notes {
            item.notes = Some(notes);
        }
        item.total = line_total(item.unit_price, item.quantity, item.discount_pct);

        self.recalculate(quote);
        Ok(())
    }

    /// Remove the item at `index`. Later items shift down one position;
    /// addressing is by current index at call time, not a stable id.
    pub fn remove_item(&self, quote: &mut Quote, index: usize) -> Result<QuoteItem, DomainError> {
        let len = quote.items.len();
        if index >= len {
            return Err(DomainError::ItemNotFound { index, len });
        }

        let removed = quote.items.remove(index);
        self.recalculate(quote);
        Ok(removed)
    }

    /// One line item (quantity 1, no discount) per detection that carries a
    /// resolved catalog link; unlinked detections are skipped. The quote's
    /// currency is fixed from the first resolved product.
    pub fn create_quote_from_plan(
        &self,
        plan: &Plan,
        reference: impl Into<String>,
    ) -> Result<Quote, DomainError> {
        let mut quote = self.new_quote(reference, Some(plan.id.clone()));

        for detected in &plan.detected_products {
            let Some(product_id) = &detected.product_id else { continue };
            let product = self.resolve(product_id)?;

            if quote.items.is_empty() {
                quote.currency = product.currency.clone();
            } else {
                self.check_currency(&quote, &product)?;
            }

            quote.items.push(snapshot_item(
                product,
                Some(detected.id.clone()),
                1,
                Decimal::ZERO,
                None,
                None,
            ));
        }

        self.recalculate(&mut quote);
        Ok(quote)
    }

    /// Change the quote-level rates and bring the absolute amounts back in
    /// agreement. Percentages in, absolute amounts stored.
    pub fn update_rates(
        &self,
        quote: &mut Quote,
        tax_rate: Option<Decimal>,
        global_discount_pct: Option<Decimal>,
    ) -> Result<(), DomainError> {
        if let Some(tax_rate) = tax_rate {
            if tax_rate < Decimal::ZERO {
                return Err(DomainError::InvalidTaxRate { tax_rate });
            }
        }
        if let Some(global_discount_pct) = global_discount_pct {
            validate_discount(global_discount_pct)?;
        }

        if let Some(tax_rate) = tax_rate {
            quote.tax_rate = tax_rate;
        }
        if let Some(global_discount_pct) = global_discount_pct {
            quote.global_discount_pct = global_discount_pct;
        }
        self.recalculate(quote);
        Ok(())
    }

    /// Recompute subtotal/discount/tax/total from the current items and
    /// stored rates. Idempotent.
    pub fn recalculate(&self, quote: &mut Quote) {
        let totals = self.pricing.price(quote);
        quote.subtotal = totals.subtotal;
        quote.discount = totals.discount;
        quote.tax = totals.tax;
        quote.total = totals.total;
    }

    fn resolve(&self, product_id: &ProductId) -> Result<Product, DomainError> {
        self.catalog
            .get_by_id(product_id)
            .ok_or_else(|| DomainError::ProductNotFound { product_id: product_id.clone() })
    }

    fn check_currency(&self, quote: &Quote, product: &Product) -> Result<(), DomainError> {
        if product.currency != quote.currency {
            return Err(DomainError::CurrencyMismatch {
                quote: quote.currency.clone(),
                product: product.currency.clone(),
            });
        }
        Ok(())
    }
}

fn snapshot_item(
    product: Product,
    detected_product_id: Option<DetectedProductId>,
    quantity: u32,
    discount_pct: Decimal,
    selected_material: Option<String>,
    notes: Option<String>,
) -> QuoteItem {
    let total = line_total(product.base_price, quantity, discount_pct);
    QuoteItem {
        id: QuoteItemId(Uuid::new_v4().to_string()),
        product_id: product.id,
        detected_product_id,
        name: product.name,
        sku: product.sku,
        description: product.description,
        unit_price: product.base_price,
        quantity,
        discount_pct,
        selected_material,
        notes,
        total,
    }
}

fn validate_quantity(quantity: u32) -> Result<(), DomainError> {
    if quantity == 0 {
        return Err(DomainError::InvalidQuantity { quantity });
    }
    Ok(())
}

fn validate_discount(discount_pct: Decimal) -> Result<(), DomainError> {
    if discount_pct < Decimal::ZERO || discount_pct > Decimal::ONE_HUNDRED {
        return Err(DomainError::InvalidDiscount { discount_pct });
    }
    Ok(())
}
