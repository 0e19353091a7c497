//! End-to-end quote lifecycle: plan-sourced creation, then a sequence of
//! item mutations, checking after every operation that the stored totals
//! agree with the items.

use rust_decimal::{Decimal, RoundingStrategy};

use fixtura_core::{
    DetectedProduct, DetectedProductId, Dimensions, DomainError, FixtureType, InMemoryCatalog,
    NewQuoteItem, Plan, PlanId, Product, ProductId, ProductType, Quote, QuoteEngine,
    QuoteItemPatch, QuoteStatus, Vec3,
};

fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// The §3-style aggregate invariants, recomputed independently of the
/// engine's own arithmetic.
fn assert_invariants(quote: &Quote) {
    let item_sum: Decimal = quote.items.iter().map(|item| item.total).sum();
    assert_eq!(quote.subtotal, item_sum, "subtotal must equal the sum of item totals");

    let expected_discount = round2(quote.subtotal * quote.global_discount_pct / Decimal::ONE_HUNDRED);
    assert_eq!(quote.discount, expected_discount, "stored discount must track the percentage");

    let expected_tax =
        round2((quote.subtotal - quote.discount) * quote.tax_rate / Decimal::ONE_HUNDRED);
    assert_eq!(quote.tax, expected_tax, "stored tax must track the rate");

    assert_eq!(
        quote.total,
        quote.subtotal - quote.discount + quote.tax,
        "total must equal subtotal - discount + tax"
    );
}

fn engine() -> QuoteEngine<InMemoryCatalog> {
    QuoteEngine::new(InMemoryCatalog::demo())
}

fn linked(detected: &str, product: &str) -> DetectedProduct {
    DetectedProduct {
        id: DetectedProductId(detected.to_owned()),
        product_id: Some(ProductId(product.to_owned())),
        detected_type: FixtureType::Toilet,
        confidence: 0.9,
        position: Vec3::new(0.0, 0.0, 0.0),
        dimensions: Dimensions::default(),
    }
}

fn unlinked(detected: &str) -> DetectedProduct {
    DetectedProduct { product_id: None, ..linked(detected, "ignored") }
}

fn bathroom_plan() -> Plan {
    Plan {
        id: PlanId("plan-bathroom-01".to_owned()),
        name: "Bathroom Renovation".to_owned(),
        detected_products: vec![
            linked("det-1", "prod-toilet-001"),
            unlinked("det-2"),
            linked("det-3", "prod-sink-002"),
        ],
    }
}

#[test]
fn quote_from_plan_creates_one_line_per_resolved_detection() {
    let engine = engine();
    let quote = engine.create_quote_from_plan(&bathroom_plan(), "QT-202608-0001").expect("quote");

    assert_eq!(quote.status, QuoteStatus::Draft);
    assert_eq!(quote.reference, "QT-202608-0001");
    assert_eq!(quote.plan_id, Some(PlanId("plan-bathroom-01".to_owned())));
    assert_eq!(quote.currency, "EUR");

    // The unlinked detection is skipped; the two resolved ones become
    // quantity-1, zero-discount lines in detection order.
    assert_eq!(quote.items.len(), 2);
    assert_eq!(quote.items[0].detected_product_id, Some(DetectedProductId("det-1".to_owned())));
    assert_eq!(quote.items[0].quantity, 1);
    assert_eq!(quote.items[0].discount_pct, Decimal::ZERO);
    assert_eq!(quote.items[1].sku, "SINK-002");

    // 450.00 + 195.00 with the default 20% tax rate and no global discount.
    assert_eq!(quote.subtotal, Decimal::new(64500, 2));
    assert_eq!(quote.discount, Decimal::ZERO);
    assert_eq!(quote.tax, Decimal::new(12900, 2));
    assert_eq!(quote.total, Decimal::new(77400, 2));
    assert_invariants(&quote);
}

#[test]
fn quote_from_plan_fails_on_a_dangling_catalog_link() {
    let engine = engine();
    let mut plan = bathroom_plan();
    plan.detected_products.push(linked("det-4", "prod-retired-999"));

    let error = engine.create_quote_from_plan(&plan, "QT-202608-0002").expect_err("dangling link");
    assert!(matches!(error, DomainError::ProductNotFound { .. }));
}

#[test]
fn invariants_hold_after_every_mutation_in_a_long_sequence() {
    let engine = engine();
    let mut quote = engine.create_quote_from_plan(&bathroom_plan(), "QT-202608-0003").expect("quote");
    assert_invariants(&quote);

    // Add a discounted bathtub.
    let mut bathtub = NewQuoteItem::new(ProductId("prod-bathtub-001".to_owned()), 1);
    bathtub.discount_pct = Decimal::new(10, 0);
    engine.add_item(&mut quote, bathtub).expect("add bathtub");
    assert_invariants(&quote);
    // 450.00 + 195.00 + 1665.00
    assert_eq!(quote.subtotal, Decimal::new(231000, 2));

    // Triple the toilet.
    engine
        .update_item(&mut quote, 0, QuoteItemPatch { quantity: Some(3), ..Default::default() })
        .expect("update quantity");
    assert_invariants(&quote);
    assert_eq!(quote.subtotal, Decimal::new(321000, 2));

    // Quote-level rates.
    engine
        .update_rates(&mut quote, Some(Decimal::new(20, 0)), Some(Decimal::new(5, 0)))
        .expect("set rates");
    assert_invariants(&quote);

    // Remove the sink; the bathtub shifts from index 2 to 1.
    let removed = engine.remove_item(&mut quote, 1).expect("remove sink");
    assert_eq!(removed.sku, "SINK-002");
    assert_eq!(quote.items.len(), 2);
    assert_eq!(quote.items[1].sku, "BATHTUB-001");
    assert_invariants(&quote);
    // 1350.00 + 1665.00
    assert_eq!(quote.subtotal, Decimal::new(301500, 2));

    // A second removal at the old tail index now misses.
    let error = engine.remove_item(&mut quote, 2).expect_err("index shifted");
    assert!(matches!(error, DomainError::ItemNotFound { index: 2, len: 2 }));
    assert_invariants(&quote);

    // Clearing the quote brings every amount back to zero.
    engine.remove_item(&mut quote, 1).expect("remove bathtub");
    engine.remove_item(&mut quote, 0).expect("remove toilet");
    assert!(quote.items.is_empty());
    assert_eq!(quote.subtotal, Decimal::ZERO);
    assert_eq!(quote.total, Decimal::ZERO);
    assert_invariants(&quote);
}

#[test]
fn failed_operations_leave_stored_totals_untouched() {
    let engine = engine();
    let mut quote = engine.create_quote_from_plan(&bathroom_plan(), "QT-202608-0004").expect("quote");
    let before = quote.clone();

    let error = engine.remove_item(&mut quote, 10).expect_err("out of range");
    assert!(matches!(error, DomainError::ItemNotFound { index: 10, len: 2 }));
    assert_eq!(quote, before);

    let error = engine
        .update_item(&mut quote, 10, QuoteItemPatch { quantity: Some(2), ..Default::default() })
        .expect_err("out of range");
    assert!(matches!(error, DomainError::ItemNotFound { .. }));
    assert_eq!(quote, before);
}

#[test]
fn foreign_currency_products_are_rejected_at_add_time() {
    let catalog = InMemoryCatalog::new(vec![
        Product {
            id: ProductId("prod-eur".to_owned()),
            sku: "EUR-1".to_owned(),
            name: "Eurozone Basin".to_owned(),
            description: None,
            product_type: ProductType::Sink,
            base_price: Decimal::new(10000, 2),
            currency: "EUR".to_owned(),
            in_stock: true,
        },
        Product {
            id: ProductId("prod-usd".to_owned()),
            sku: "USD-1".to_owned(),
            name: "Imported Basin".to_owned(),
            description: None,
            product_type: ProductType::Sink,
            base_price: Decimal::new(12000, 2),
            currency: "USD".to_owned(),
            in_stock: true,
        },
    ]);
    let engine = QuoteEngine::new(catalog);
    let mut quote = engine.new_quote("QT-202608-0005", None);

    engine
        .add_item(&mut quote, NewQuoteItem::new(ProductId("prod-eur".to_owned()), 1))
        .expect("homogeneous currency");

    let error = engine
        .add_item(&mut quote, NewQuoteItem::new(ProductId("prod-usd".to_owned()), 1))
        .expect_err("mixed currency");
    assert!(matches!(
        error,
        DomainError::CurrencyMismatch { ref quote, ref product }
            if quote == "EUR" && product == "USD"
    ));
    assert_eq!(quote.items.len(), 1);
    assert_invariants(&quote);
}

#[test]
fn draft_quotes_from_plans_move_through_the_approval_lifecycle() {
    let engine = engine();
    let mut quote = engine.create_quote_from_plan(&bathroom_plan(), "QT-202608-0006").expect("quote");

    quote.transition_to(QuoteStatus::Pending).expect("submit");
    quote.transition_to(QuoteStatus::Approved).expect("approve");
    assert!(quote.status.is_terminal());

    let error = quote.transition_to(QuoteStatus::Pending).expect_err("terminal state");
    assert!(matches!(error, DomainError::InvalidQuoteTransition { .. }));
}
