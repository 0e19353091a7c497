use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

/// Catalog inventory categories. Broader than, and distinct from, the
/// classifier's fixture enum: the catalog also carries furniture and
/// accessories that no plan parser will ever emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    Toilet,
    Sink,
    Bathtub,
    Shower,
    Faucet,
    Mirror,
    Cabinet,
    Urinal,
    Bidet,
    ShowerPanel,
    TowelRack,
    Accessory,
}

/// A catalog product. Quotes snapshot `base_price` and the descriptive
/// fields at the moment an item is added; nothing here is referenced live
/// from a quote afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub product_type: ProductType,
    pub base_price: Decimal,
    pub currency: String,
    pub in_stock: bool,
}
