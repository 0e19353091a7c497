use serde::{Deserialize, Serialize};

use crate::detect::FixtureType;
use crate::domain::geometry::{Dimensions, Vec3};
use crate::domain::product::ProductId;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetectedProductId(pub String);

/// A classified plan object, persisted by the surrounding system after the
/// detection pass. `product_id` is set once a reviewer (or an automatic
/// matcher) links the detection to a concrete catalog product; detections
/// without a link never reach a quote.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedProduct {
    pub id: DetectedProductId,
    pub product_id: Option<ProductId>,
    pub detected_type: FixtureType,
    pub confidence: f64,
    pub position: Vec3,
    pub dimensions: Dimensions,
}

/// An uploaded building plan with its detections.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,
    pub name: String,
    pub detected_products: Vec<DetectedProduct>,
}
