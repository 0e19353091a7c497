use rust_decimal::Decimal;

use crate::domain::product::{Product, ProductId, ProductType};

/// Catalog lookup seam. The engine never talks to storage directly; the
/// surrounding system injects whatever implementation it persists products
/// with.
pub trait ProductRepository: Send + Sync {
    fn get_by_id(&self, product_id: &ProductId) -> Option<Product>;
}

/// Vec-backed catalog for tests, previews and the CLI.
#[derive(Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Deterministic demo catalog: a small cut of the supplier seed data.
    pub fn demo() -> Self {
        Self::new(vec![
            Product {
                id: ProductId("prod-toilet-001".to_owned()),
                sku: "TOILET-001".to_owned(),
                name: "Modern Wall-Mounted Toilet".to_owned(),
                description: Some(
                    "Contemporary wall-mounted toilet with soft-close seat".to_owned(),
                ),
                product_type: ProductType::Toilet,
                base_price: Decimal::new(45000, 2),
                currency: "EUR".to_owned(),
                in_stock: true,
            },
            Product {
                id: ProductId("prod-sink-002".to_owned()),
                sku: "SINK-002".to_owned(),
                name: "Pedestal Sink".to_owned(),
                description: Some("Classic pedestal sink with chrome overflow".to_owned()),
                product_type: ProductType::Sink,
                base_price: Decimal::new(19500, 2),
                currency: "EUR".to_owned(),
                in_stock: true,
            },
            Product {
                id: ProductId("prod-bathtub-001".to_owned()),
                sku: "BATHTUB-001".to_owned(),
                name: "Freestanding Bathtub".to_owned(),
                description: Some("Luxury freestanding bathtub with chrome drain".to_owned()),
                product_type: ProductType::Bathtub,
                base_price: Decimal::new(185000, 2),
                currency: "EUR".to_owned(),
                in_stock: true,
            },
            Product {
                id: ProductId("prod-tray-001".to_owned()),
                sku: "TRAY-001".to_owned(),
                name: "Shower Tray 90x90".to_owned(),
                description: None,
                product_type: ProductType::Shower,
                base_price: Decimal::new(21000, 2),
                currency: "EUR".to_owned(),
                in_stock: true,
            },
        ])
    }
}

impl ProductRepository for InMemoryCatalog {
    fn get_by_id(&self, product_id: &ProductId) -> Option<Product> {
        self.products.iter().find(|product| &product.id == product_id).cloned()
    }
}
